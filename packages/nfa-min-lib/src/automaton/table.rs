use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{
        Alphabet, AutBuild, AutomatonNode, Letter,
        dfa::{DFA, node::DfaNode},
    },
    error::AutomatonError,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DfaTransition<L, S> {
    pub from: L,
    pub symbol: S,
    pub to: L,
}

/// A flat, value based view of a DFA: its states, start state, transition
/// function, final states and alphabet.
///
/// This is what the pipeline hands back to its caller. States are listed in
/// the order the DFA created them, transitions grouped by source state and
/// ordered like the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaTable<L, S> {
    pub states: Vec<L>,
    pub start: L,
    pub transitions: Vec<DfaTransition<L, S>>,
    pub finals: Vec<L>,
    pub alphabet: Vec<S>,
}

impl<L: PartialEq, S: PartialEq> DfaTable<L, S> {
    /// Looks up the destination of `from` on `symbol`.
    pub fn get(&self, from: &L, symbol: &S) -> Option<&L> {
        self.transitions
            .iter()
            .find(|t| &t.from == from && &t.symbol == symbol)
            .map(|t| &t.to)
    }

    pub fn is_final(&self, state: &L) -> bool {
        self.finals.contains(state)
    }
}

impl<N: AutomatonNode, E: Letter> DFA<N, E> {
    pub fn to_table(&self) -> Result<DfaTable<N, E>, AutomatonError> {
        let start = self.get_start().ok_or(AutomatonError::MissingStart)?;

        let mut transitions = vec![];
        for node in self.graph.node_indices() {
            for letter in self.alphabet() {
                if let Some(target) = self.successor(node, letter) {
                    transitions.push(DfaTransition {
                        from: self.graph[node].data.clone(),
                        symbol: letter.clone(),
                        to: self.graph[target].data.clone(),
                    });
                }
            }
        }

        Ok(DfaTable {
            states: self
                .graph
                .node_indices()
                .map(|node| self.graph[node].data.clone())
                .collect_vec(),
            start: self.graph[start].data.clone(),
            transitions,
            finals: self
                .graph
                .node_indices()
                .filter(|node| self.graph[*node].accepting)
                .map(|node| self.graph[node].data.clone())
                .collect_vec(),
            alphabet: self.alphabet().to_vec(),
        })
    }

    /// Rebuilds a DFA from its table. The table must describe a total,
    /// deterministic transition function over declared states only.
    pub fn from_table(table: &DfaTable<N, E>) -> Result<Self, AutomatonError> {
        let mut dfa = DFA::new(table.alphabet.clone());
        let mut state_map: HashMap<N, NodeIndex> = HashMap::new();

        for state in &table.states {
            if state_map.contains_key(state) {
                continue;
            }

            let node = dfa.add_state(DfaNode::non_accepting(state.clone()));
            state_map.insert(state.clone(), node);
        }

        let lookup = |state: &N| {
            state_map
                .get(state)
                .copied()
                .ok_or_else(|| AutomatonError::UnknownState(format!("{:?}", state)))
        };

        dfa.set_start(lookup(&table.start)?);

        for state in &table.finals {
            let node = lookup(state)?;
            dfa.graph[node].set_accepting();
        }

        for transition in &table.transitions {
            if !table.alphabet.contains(&transition.symbol) {
                return Err(AutomatonError::UnknownSymbol(format!(
                    "{:?}",
                    transition.symbol
                )));
            }

            let from = lookup(&transition.from)?;
            let to = lookup(&transition.to)?;

            match dfa.successor(from, &transition.symbol) {
                Some(existing) if existing == to => continue,
                Some(_) => {
                    return Err(AutomatonError::NondeterministicTransition {
                        state: format!("{:?}", transition.from),
                        symbol: format!("{:?}", transition.symbol),
                    });
                }
                None => {
                    dfa.add_transition(from, to, transition.symbol.clone());
                }
            }
        }

        dfa.check_complete()?;
        dfa.override_complete();
        dfa.mark_sink_states();

        Ok(dfa)
    }
}
