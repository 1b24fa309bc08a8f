use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::automaton::nfa::NFAEdge;

/// What to do with a label that shows up in a transition, as the start state or
/// as a final state without being part of the declared state list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStatePolicy {
    /// Reject the description with [crate::error::AutomatonError::UnknownState].
    #[default]
    Strict,
    /// Treat the label as an ordinary, non-accepting state.
    Permissive,
}

impl FromStr for UnknownStatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(UnknownStatePolicy::Strict),
            "permissive" => Ok(UnknownStatePolicy::Permissive),
            _ => Err(format!("Invalid unknown state policy: {}", s)),
        }
    }
}

impl Display for UnknownStatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownStatePolicy::Strict => write!(f, "strict"),
            UnknownStatePolicy::Permissive => write!(f, "permissive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NfaTransition<L, S> {
    pub from: L,
    pub symbol: NFAEdge<S>,
    pub to: L,
}

/// A plain description of an NFA, as handed over by a parser or any other
/// caller. The alphabet is fixed once the description is built; it never
/// contains epsilon, which is expressed through [NFAEdge::Epsilon].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NfaDescription<L, S> {
    pub states: Vec<L>,
    pub start: L,
    pub transitions: Vec<NfaTransition<L, S>>,
    pub finals: Vec<L>,
    pub alphabet: Vec<S>,
}

impl<L: Clone, S: Clone + Ord> NfaDescription<L, S> {
    pub fn new(states: Vec<L>, start: L, finals: Vec<L>) -> Self {
        NfaDescription {
            states,
            start,
            transitions: vec![],
            finals,
            alphabet: vec![],
        }
    }

    pub fn with_transition(mut self, from: L, symbol: S, to: L) -> Self {
        self.transitions.push(NfaTransition {
            from,
            symbol: NFAEdge::Symbol(symbol),
            to,
        });
        self
    }

    pub fn with_epsilon(mut self, from: L, to: L) -> Self {
        self.transitions.push(NfaTransition {
            from,
            symbol: NFAEdge::Epsilon,
            to,
        });
        self
    }

    pub fn with_alphabet(mut self, alphabet: Vec<S>) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Sets the alphabet to the sorted set of symbols used by the transitions.
    pub fn with_collected_alphabet(mut self) -> Self {
        self.alphabet = self.used_symbols();
        self
    }

    pub fn used_symbols(&self) -> Vec<S> {
        self.transitions
            .iter()
            .filter_map(|t| match &t.symbol {
                NFAEdge::Symbol(s) => Some(s.clone()),
                NFAEdge::Epsilon => None,
            })
            .sorted()
            .dedup()
            .collect_vec()
    }
}
