//! DFA minimization by partition refinement
//!
//! The initial partition separates states by resolved accept rule, so two
//! states that accept for different rules can never merge. Blocks are then
//! split until every pair of block members agrees, for every character, on
//! the successor block. Signatures are canonicalized before comparison:
//! touching intervals with the same target block are merged, which makes
//! states comparable even when the subset construction split their
//! alphabets differently.

use crate::automata::dfa::{Dfa, DfaState, DfaStateId};
use crate::interval::ClassInterval;
use hashbrown::HashMap;
use smallvec::SmallVec;

type Signature = SmallVec<[(u32, u32, usize); 4]>;

/// Compute the quotient automaton of `dfa` under transition equivalence.
#[must_use]
pub fn minimize(dfa: &Dfa) -> Dfa {
    let state_count = dfa.states.len();
    if state_count <= 1 {
        return dfa.clone();
    }

    // Initial partition: one block per resolved accept rule, plus one for
    // the non-accepting states. Block ids are assigned by first occurrence
    // in state order, which keeps every pass deterministic.
    let mut block_of: Vec<usize> = Vec::with_capacity(state_count);
    {
        let mut blocks: HashMap<Option<usize>, usize, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        for state in &dfa.states {
            let next = blocks.len();
            block_of.push(*blocks.entry(state.accept).or_insert(next));
        }
    }

    loop {
        let mut blocks: HashMap<(usize, Signature), usize, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        let mut next_assignment: Vec<usize> = Vec::with_capacity(state_count);

        for (index, state) in dfa.states.iter().enumerate() {
            let key = (block_of[index], signature(state, &block_of));
            let next = blocks.len();
            next_assignment.push(*blocks.entry(key).or_insert(next));
        }

        // First-occurrence numbering makes equal partitions equal vectors
        if next_assignment == block_of {
            break;
        }
        block_of = next_assignment;
    }

    build_quotient(dfa, &block_of)
}

/// The transition function of a state with targets mapped to blocks, in
/// canonical form: sorted by lower bound, touching same-block intervals
/// merged. Two states are distinguishable iff their signatures differ.
fn signature(state: &DfaState, block_of: &[usize]) -> Signature {
    let mut out: Signature = SmallVec::new();
    for &(iv, target) in &state.transitions {
        if iv.is_empty() {
            continue;
        }
        let block = block_of[target.index()];
        if let Some(last) = out.last_mut()
            && last.2 == block
            && last.1 + 1 == iv.lo
        {
            last.1 = iv.hi;
            continue;
        }
        out.push((iv.lo, iv.hi, block));
    }
    out
}

fn build_quotient(dfa: &Dfa, block_of: &[usize]) -> Dfa {
    let block_count = block_of.iter().max().map_or(0, |max| max + 1);

    // Lowest-numbered member represents each block
    let mut representative: Vec<Option<usize>> = vec![None; block_count];
    for (index, &block) in block_of.iter().enumerate() {
        if representative[block].is_none() {
            representative[block] = Some(index);
        }
    }

    let mut states = Vec::with_capacity(block_count);
    for &index in representative.iter().flatten() {
        let source = &dfa.states[index];
        let transitions = signature(source, block_of)
            .into_iter()
            .map(|(lo, hi, block)| (ClassInterval::new(lo, hi), DfaStateId::new(block)))
            .collect();
        states.push(DfaState {
            transitions,
            accept: source.accept,
        });
    }

    Dfa {
        states,
        initial: DfaStateId::new(block_of[dfa.initial.index()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::nfa::Nfa;
    use crate::automata::TokenId;
    use crate::regex::{desugar, parse};

    fn build(patterns: &[&str]) -> Dfa {
        let cores: Vec<_> = patterns
            .iter()
            .map(|p| desugar(&parse(p).unwrap()))
            .collect();
        Dfa::determinize(&Nfa::compile(&cores))
    }

    fn accepts(dfa: &Dfa, input: &str) -> Option<TokenId> {
        let mut state = dfa.initial;
        for c in input.chars() {
            state = dfa.target(state, c)?;
        }
        dfa.states[state.index()].accept
    }

    #[test]
    fn test_redundant_branches_collapse() {
        let dfa = build(&["ab|ab|ac"]);
        let minimized = minimize(&dfa);
        assert!(minimized.state_count() < dfa.state_count());
        for input in ["ab", "ac", "a", "ad", ""] {
            assert_eq!(accepts(&dfa, input), accepts(&minimized, input));
        }
    }

    #[test]
    fn test_language_preserved() {
        let dfa = build(&["if", "[a-z][a-z0-9]*", "[0-9]+"]);
        let minimized = minimize(&dfa);
        for input in ["if", "iffy", "i", "x9", "42", "9a", "", "If"] {
            assert_eq!(
                accepts(&dfa, input),
                accepts(&minimized, input),
                "disagreement on {input:?}"
            );
        }
    }

    #[test]
    fn test_distinct_accept_rules_never_merge() {
        // "ab" and "cd" have isomorphic shapes but different rules; the
        // accepting states must stay separate
        let minimized = minimize(&build(&["ab", "cd"]));
        assert_eq!(accepts(&minimized, "ab"), Some(0));
        assert_eq!(accepts(&minimized, "cd"), Some(1));
    }

    #[test]
    fn test_minimized_intervals_stay_disjoint_and_sorted() {
        let minimized = minimize(&build(&["[a-m]x|[n-z]x", "[0-9]+"]));
        for state in &minimized.states {
            assert!(
                state
                    .transitions
                    .windows(2)
                    .all(|w| w[0].0.hi < w[1].0.lo)
            );
        }
    }

    #[test]
    fn test_single_state_dfa_is_untouched() {
        // A pattern matching nothing but epsilon determinizes to one state
        let dfa = build(&["a{0,0}"]);
        let minimized = minimize(&dfa);
        assert_eq!(minimized.state_count(), dfa.state_count());
    }

    #[test]
    fn test_fixpoint_is_idempotent() {
        let minimized = minimize(&build(&["if", "[a-z]+"]));
        let twice = minimize(&minimized);
        assert_eq!(minimized.state_count(), twice.state_count());
    }
}
