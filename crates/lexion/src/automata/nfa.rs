//! Nondeterministic automaton and Thompson construction
//!
//! Each core operator compiles to a fragment with a single entry and a
//! single exit state; fragments compose recursively. The full automaton
//! hangs every rule's fragment off one master initial state and marks each
//! fragment exit as accepting for its rule.

use crate::automata::TokenId;
use crate::interval::ClassInterval;
use crate::regex::CoreExpr;
use smallvec::SmallVec;

/// Identifier of an NFA state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NfaStateId(u32);

impl NfaStateId {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A state with its outgoing edges.
///
/// Multiple outgoing edges with overlapping intervals are legal; that is
/// the nondeterminism the subset construction resolves.
#[derive(Debug, Clone, Default)]
pub struct NfaState {
    /// The rule this state accepts for, if any. At most one rule per state;
    /// each rule's fragment has its own accepting exit.
    pub accept: Option<TokenId>,
    /// Epsilon edges
    pub epsilons: SmallVec<[NfaStateId; 2]>,
    /// Interval-labelled edges
    pub edges: SmallVec<[(ClassInterval, NfaStateId); 2]>,
}

/// A fragment under construction: one entry, one exit
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub entry: NfaStateId,
    pub exit: NfaStateId,
}

/// Nondeterministic automaton with interval-labelled transitions
#[derive(Debug, Clone)]
pub struct Nfa {
    pub states: Vec<NfaState>,
    pub initial: NfaStateId,
}

impl Nfa {
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: NfaStateId(0),
        }
    }

    /// Compile one automaton from all rule patterns. Rule `i`'s accepting
    /// state reports `accept == Some(i)`.
    #[must_use]
    pub fn compile(patterns: &[CoreExpr]) -> Self {
        let mut nfa = Self::new();
        let initial = nfa.add_state();
        nfa.initial = initial;

        for (token, pattern) in patterns.iter().enumerate() {
            let fragment = nfa.add_fragment(pattern);
            nfa.add_epsilon(initial, fragment.entry);
            nfa.states[fragment.exit.index()].accept = Some(token);
        }
        nfa
    }

    pub fn add_state(&mut self) -> NfaStateId {
        let id = NfaStateId::new(self.states.len());
        self.states.push(NfaState::default());
        id
    }

    pub fn add_epsilon(&mut self, from: NfaStateId, to: NfaStateId) {
        self.states[from.index()].epsilons.push(to);
    }

    pub fn add_edge(&mut self, from: NfaStateId, interval: ClassInterval, to: NfaStateId) {
        self.states[from.index()].edges.push((interval, to));
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Thompson construction of a single core expression
    pub fn add_fragment(&mut self, expr: &CoreExpr) -> Fragment {
        match expr {
            CoreExpr::Epsilon => {
                let entry = self.add_state();
                let exit = self.add_state();
                self.add_epsilon(entry, exit);
                Fragment { entry, exit }
            }
            CoreExpr::Interval(iv) => {
                let entry = self.add_state();
                let exit = self.add_state();
                self.add_edge(entry, *iv, exit);
                Fragment { entry, exit }
            }
            CoreExpr::Concat(a, b) => {
                let left = self.add_fragment(a);
                let right = self.add_fragment(b);
                self.add_epsilon(left.exit, right.entry);
                Fragment {
                    entry: left.entry,
                    exit: right.exit,
                }
            }
            CoreExpr::Alt(a, b) => {
                let entry = self.add_state();
                let exit = self.add_state();
                let left = self.add_fragment(a);
                let right = self.add_fragment(b);
                self.add_epsilon(entry, left.entry);
                self.add_epsilon(entry, right.entry);
                self.add_epsilon(left.exit, exit);
                self.add_epsilon(right.exit, exit);
                Fragment { entry, exit }
            }
            CoreExpr::Star(a) => {
                let entry = self.add_state();
                let exit = self.add_state();
                let inner = self.add_fragment(a);
                self.add_epsilon(entry, inner.entry);
                self.add_epsilon(entry, exit);
                self.add_epsilon(inner.exit, inner.entry);
                self.add_epsilon(inner.exit, exit);
                Fragment { entry, exit }
            }
        }
    }

    /// The set of states reachable from `seed` over epsilon edges alone,
    /// including `seed` itself. Returned sorted by state id.
    #[must_use]
    pub fn epsilon_closure(&self, seed: &[NfaStateId]) -> Vec<NfaStateId> {
        let mut in_closure = vec![false; self.states.len()];
        let mut stack: Vec<NfaStateId> = Vec::with_capacity(seed.len());
        for &state in seed {
            if !in_closure[state.index()] {
                in_closure[state.index()] = true;
                stack.push(state);
            }
        }
        while let Some(state) = stack.pop() {
            for &target in &self.states[state.index()].epsilons {
                if !in_closure[target.index()] {
                    in_closure[target.index()] = true;
                    stack.push(target);
                }
            }
        }
        in_closure
            .iter()
            .enumerate()
            .filter(|&(_, &reached)| reached)
            .map(|(index, _)| NfaStateId::new(index))
            .collect()
    }
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::{desugar, parse};

    fn compile_one(pattern: &str) -> Nfa {
        Nfa::compile(&[desugar(&parse(pattern).unwrap())])
    }

    #[test]
    fn test_interval_fragment_shape() {
        let nfa = compile_one("a");
        // master initial + entry + exit
        assert_eq!(nfa.state_count(), 3);
        let accepting: Vec<_> = nfa
            .states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.accept.is_some())
            .collect();
        assert_eq!(accepting.len(), 1);
        assert_eq!(accepting[0].1.accept, Some(0));
    }

    #[test]
    fn test_alt_fragment_shape() {
        let nfa = compile_one("a|b");
        // initial + fresh entry/exit + 2 states per branch
        assert_eq!(nfa.state_count(), 7);
    }

    #[test]
    fn test_star_epsilon_cycle() {
        let nfa = compile_one("a*");
        let closure = nfa.epsilon_closure(&[nfa.initial]);
        // The exit is epsilon-reachable without consuming anything
        let accepts_in_closure = closure
            .iter()
            .any(|s| nfa.states[s.index()].accept.is_some());
        assert!(accepts_in_closure);
    }

    #[test]
    fn test_multiple_rules_have_distinct_accepts() {
        let patterns = [
            desugar(&parse("a").unwrap()),
            desugar(&parse("b").unwrap()),
        ];
        let nfa = Nfa::compile(&patterns);
        let mut accepts: Vec<TokenId> = nfa.states.iter().filter_map(|s| s.accept).collect();
        accepts.sort_unstable();
        assert_eq!(accepts, vec![0, 1]);
    }

    #[test]
    fn test_epsilon_closure_is_sorted_and_reflexive() {
        let nfa = compile_one("ab");
        let closure = nfa.epsilon_closure(&[nfa.initial]);
        assert!(closure.contains(&nfa.initial));
        assert!(closure.windows(2).all(|w| w[0] < w[1]));
    }
}
