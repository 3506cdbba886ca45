//! Deterministic automaton and subset construction
//!
//! The subset construction works over interval alphabets: at each pending
//! subset, every member's outgoing intervals are refined into a disjoint
//! cover, and one successor is computed per cover part. Subsets are interned
//! behind dense state ids; the subset labels themselves are dropped once
//! construction finishes.

use crate::automata::nfa::{Nfa, NfaStateId};
use crate::automata::TokenId;
use crate::interval::{self, ClassInterval};
use hashbrown::HashMap;
use smallvec::SmallVec;

/// Identifier of a DFA state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DfaStateId(u32);

impl DfaStateId {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A deterministic state: disjoint outgoing intervals sorted by lower
/// bound, plus the rule it accepts for
#[derive(Debug, Clone, Default)]
pub struct DfaState {
    pub transitions: SmallVec<[(ClassInterval, DfaStateId); 4]>,
    /// The winning rule among every accepting NFA state in this subset,
    /// resolved by declaration order
    pub accept: Option<TokenId>,
}

/// Deterministic automaton over an interval alphabet
#[derive(Debug, Clone)]
pub struct Dfa {
    pub states: Vec<DfaState>,
    pub initial: DfaStateId,
}

impl Dfa {
    /// Subset construction.
    ///
    /// States are discovered breadth-first from the initial closure, so two
    /// runs over the same NFA produce identical automata.
    #[must_use]
    pub fn determinize(nfa: &Nfa) -> Self {
        let initial_closure = nfa.epsilon_closure(&[nfa.initial]);

        let mut subset_ids: HashMap<Box<[NfaStateId]>, DfaStateId, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        let mut subsets: Vec<Vec<NfaStateId>> = Vec::new();
        let mut states: Vec<DfaState> = Vec::new();

        subset_ids.insert(initial_closure.clone().into_boxed_slice(), DfaStateId(0));
        subsets.push(initial_closure);
        states.push(DfaState::default());

        let mut index = 0;
        while index < subsets.len() {
            let subset = subsets[index].clone();

            states[index].accept = resolve_accept(nfa, &subset);

            // Every outgoing interval of the subset, then its disjoint cover
            let mut candidates: Vec<(ClassInterval, NfaStateId)> = Vec::new();
            for &state in &subset {
                for &(iv, to) in &nfa.states[state.index()].edges {
                    if !iv.is_empty() {
                        candidates.push((iv, to));
                    }
                }
            }
            let alphabet: Vec<ClassInterval> = candidates.iter().map(|(iv, _)| *iv).collect();

            for part in interval::cover(&alphabet) {
                let mut targets: Vec<NfaStateId> = candidates
                    .iter()
                    .filter(|(iv, _)| iv.lo <= part.lo && part.hi <= iv.hi)
                    .map(|(_, to)| *to)
                    .collect();
                targets.sort_unstable();
                targets.dedup();
                if targets.is_empty() {
                    continue;
                }

                let closure = nfa.epsilon_closure(&targets);
                let next_id = DfaStateId::new(subsets.len());
                let id = match subset_ids.entry(closure.clone().into_boxed_slice()) {
                    hashbrown::hash_map::Entry::Occupied(entry) => *entry.get(),
                    hashbrown::hash_map::Entry::Vacant(entry) => {
                        entry.insert(next_id);
                        subsets.push(closure);
                        states.push(DfaState::default());
                        next_id
                    }
                };
                states[index].transitions.push((part, id));
            }

            index += 1;
        }

        Self {
            states,
            initial: DfaStateId(0),
        }
    }

    /// The successor of `state` on `c`, if any.
    ///
    /// Transitions are sorted by lower bound and disjoint, so a binary
    /// search suffices.
    #[must_use]
    pub fn target(&self, state: DfaStateId, c: char) -> Option<DfaStateId> {
        let cp = c as u32;
        let transitions = &self.states[state.index()].transitions;
        let idx = transitions.partition_point(|(iv, _)| iv.hi < cp);
        match transitions.get(idx) {
            Some((iv, to)) if iv.contains_code_point(cp) => Some(*to),
            _ => None,
        }
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }
}

/// First rule in declaration order with an accepting NFA state inside the
/// subset. Declaration indices double as priorities, so the minimum wins.
fn resolve_accept(nfa: &Nfa, subset: &[NfaStateId]) -> Option<TokenId> {
    subset
        .iter()
        .filter_map(|state| nfa.states[state.index()].accept)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::{desugar, parse};

    fn determinized(patterns: &[&str]) -> Dfa {
        let cores: Vec<_> = patterns
            .iter()
            .map(|p| desugar(&parse(p).unwrap()))
            .collect();
        Dfa::determinize(&Nfa::compile(&cores))
    }

    fn assert_disjoint(dfa: &Dfa) {
        for (index, state) in dfa.states.iter().enumerate() {
            for (i, (a, _)) in state.transitions.iter().enumerate() {
                for (b, _) in &state.transitions[i + 1..] {
                    assert_eq!(
                        a.intersection(b),
                        None,
                        "state {index}: {a} overlaps {b}"
                    );
                }
            }
        }
    }

    fn accepts(dfa: &Dfa, input: &str) -> Option<TokenId> {
        let mut state = dfa.initial;
        for c in input.chars() {
            state = dfa.target(state, c)?;
        }
        dfa.states[state.index()].accept
    }

    #[test]
    fn test_single_literal() {
        let dfa = determinized(&["ab"]);
        assert_eq!(accepts(&dfa, "ab"), Some(0));
        assert_eq!(accepts(&dfa, "a"), None);
        assert_eq!(accepts(&dfa, "abc"), None);
        assert_disjoint(&dfa);
    }

    #[test]
    fn test_overlapping_classes_are_refined() {
        let dfa = determinized(&["[a-z]+", "a"]);
        assert_disjoint(&dfa);
        // 'a' is claimed by the earlier-declared broad class only through
        // resolution; both rules' NFA states share the subset
        assert_eq!(accepts(&dfa, "a"), Some(0));
        assert_eq!(accepts(&dfa, "z"), Some(0));
    }

    #[test]
    fn test_declaration_order_resolves_ties() {
        // Same language, both accept "x": first declaration wins
        let dfa = determinized(&["x", "x"]);
        assert_eq!(accepts(&dfa, "x"), Some(0));

        let flipped = determinized(&["x|y", "x"]);
        assert_eq!(accepts(&flipped, "x"), Some(0));
    }

    #[test]
    fn test_keyword_beats_identifier_by_order() {
        let dfa = determinized(&["if", "[a-z]+"]);
        assert_eq!(accepts(&dfa, "if"), Some(0));
        assert_eq!(accepts(&dfa, "i"), Some(1));
        assert_eq!(accepts(&dfa, "iff"), Some(1));
        assert_disjoint(&dfa);
    }

    #[test]
    fn test_alternation() {
        let dfa = determinized(&["ab|ac"]);
        assert_eq!(accepts(&dfa, "ab"), Some(0));
        assert_eq!(accepts(&dfa, "ac"), Some(0));
        assert_eq!(accepts(&dfa, "ad"), None);
        assert_disjoint(&dfa);
    }

    #[test]
    fn test_transitions_sorted_by_lower_bound() {
        let dfa = determinized(&["[a-c]|[x-z]|[0-5]"]);
        for state in &dfa.states {
            assert!(
                state
                    .transitions
                    .windows(2)
                    .all(|w| w[0].0.hi < w[1].0.lo)
            );
        }
    }

    #[test]
    fn test_determinism_of_construction() {
        let a = determinized(&["[a-z]+", "if", "[0-9]+"]);
        let b = determinized(&["[a-z]+", "if", "[0-9]+"]);
        assert_eq!(a.state_count(), b.state_count());
        for (x, y) in a.states.iter().zip(&b.states) {
            assert_eq!(x.transitions, y.transitions);
            assert_eq!(x.accept, y.accept);
        }
    }
}
