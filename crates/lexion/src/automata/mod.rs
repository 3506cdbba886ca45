//! # Finite Automata
//!
//! The compilation target of the pattern core: a nondeterministic automaton
//! with interval-labelled transitions, determinized by subset construction
//! over a refined interval alphabet, then minimized by partition refinement.
//!
//! States are dense integer identifiers into `Vec` arenas; the
//! subset-construction labels exist only while determinizing and are
//! discarded afterwards.

pub mod dfa;
pub mod minimize;
pub mod nfa;

pub use dfa::{Dfa, DfaState, DfaStateId};
pub use minimize::minimize;
pub use nfa::{Nfa, NfaState, NfaStateId};

/// Declaration index of a token rule. Lower indices take precedence when
/// two rules accept the same input.
pub type TokenId = usize;
