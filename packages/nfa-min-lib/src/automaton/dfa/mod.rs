use std::{
    collections::VecDeque,
    fmt::{Debug, Display},
};

use hashbrown::HashSet;
use itertools::Itertools;
use node::DfaNode;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{AutBuild, Alphabet, AutomatonNode, Language, Letter},
    error::AutomatonError,
};

pub mod hopcroft;
pub mod minimization;
pub mod node;
pub mod partition;
pub mod quotient;

#[derive(Clone)]
pub struct DFA<N: AutomatonNode, E: Letter> {
    start: Option<NodeIndex<u32>>,
    pub graph: DiGraph<DfaNode<N>, E>,
    alphabet: Vec<E>,
    complete: bool,
}

impl<N: AutomatonNode, E: Letter> DFA<N, E> {
    pub fn new(alphabet: Vec<E>) -> Self {
        let graph = DiGraph::new();

        DFA {
            alphabet,
            start: None,
            graph,
            complete: false,
        }
    }

    pub fn set_start(&mut self, start: NodeIndex<u32>) {
        self.start = Some(start);
    }

    pub fn get_start(&self) -> Option<NodeIndex<u32>> {
        self.start
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Sets the DFA to be complete. This is useful when we don't want to spend
    /// the time to check if the DFA is complete.
    pub fn override_complete(&mut self) {
        self.complete = true;
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn node(&self, node: NodeIndex<u32>) -> &DfaNode<N> {
        &self.graph[node]
    }

    pub fn is_accepting(&self, node: NodeIndex<u32>) -> bool {
        self.graph[node].accepting
    }

    /// Finds the state carrying the given data.
    pub fn find_state(&self, data: &N) -> Option<NodeIndex<u32>> {
        self.graph
            .node_indices()
            .find(|node| &self.graph[*node].data == data)
    }

    /// Returns the first state flagged as a trap, which for DFAs built by
    /// determinization is the dead state.
    pub fn dead_state(&self) -> Option<NodeIndex<u32>> {
        self.graph.node_indices().find(|node| self.graph[*node].trap)
    }

    pub fn successor(&self, node: NodeIndex<u32>, letter: &E) -> Option<NodeIndex<u32>> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .find(|edge| edge.weight() == letter)
            .map(|edge| edge.target())
    }

    /// Adds a failure state if needed. This turns the DFA into a complete DFA,
    /// which is needed for minimization.
    pub fn make_complete(&mut self, data: N) -> Option<NodeIndex<u32>> {
        let failure_transitions = self.missing_transitions();
        self.complete = true;

        if failure_transitions.is_empty() {
            return None;
        }

        Some(self.add_failure_state(data, failure_transitions))
    }

    /// Like [`DFA::make_complete`], but the failure state is added even when no
    /// transition is missing. Nothing is added over an empty alphabet.
    pub fn add_dead_state(&mut self, data: N) -> Option<NodeIndex<u32>> {
        let failure_transitions = self.missing_transitions();
        self.complete = true;

        if self.alphabet.is_empty() {
            return None;
        }

        Some(self.add_failure_state(data, failure_transitions))
    }

    fn missing_transitions(&self) -> Vec<(NodeIndex<u32>, E)> {
        let mut missing = Vec::new();

        for state in self.graph.node_indices() {
            for letter in self.alphabet.iter() {
                if self.successor(state, letter).is_none() {
                    missing.push((state, letter.clone()));
                }
            }
        }

        missing
    }

    fn add_failure_state(
        &mut self,
        data: N,
        failure_transitions: Vec<(NodeIndex<u32>, E)>,
    ) -> NodeIndex<u32> {
        let failure_state = self.add_state(DfaNode::trap(data));

        for (state, letter) in failure_transitions {
            self.add_transition(state, failure_state, letter);
        }

        for letter in self.alphabet.clone() {
            self.add_transition(failure_state, failure_state, letter);
        }

        failure_state
    }

    /// Checks that every state has a transition for every letter in the
    /// alphabet, reporting the first gap otherwise.
    pub fn check_complete(&self) -> Result<(), AutomatonError> {
        for state in self.graph.node_indices() {
            for letter in self.alphabet.iter() {
                if self.successor(state, letter).is_none() {
                    return Err(AutomatonError::IncompleteDfa {
                        state: format!("{:?}", self.graph[state].data),
                        symbol: format!("{:?}", letter),
                    });
                }
            }
        }

        Ok(())
    }

    /// Flags every non accepting state whose transitions all loop back to
    /// itself as a trap.
    pub fn mark_sink_states(&mut self) {
        for node in self.graph.node_indices() {
            let sink = !self.graph[node].accepting
                && self
                    .graph
                    .edges_directed(node, Direction::Outgoing)
                    .all(|edge| edge.target() == node);

            if sink {
                self.graph[node].trap = true;
            }
        }
    }

    /// All states reachable from the start state, in breadth first order.
    pub fn reachable_states(&self) -> Vec<NodeIndex<u32>> {
        let Some(start) = self.start else {
            return vec![];
        };

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([start]);
        let mut order = vec![];
        visited.insert(start);

        while let Some(state) = queue.pop_front() {
            order.push(state);

            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                if visited.insert(edge.target()) {
                    queue.push_back(edge.target());
                }
            }
        }

        order
    }
}

impl<N: AutomatonNode + Display, E: Letter + Display> DFA<N, E> {
    pub fn to_graphviz(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph finite_state_machine {\n");
        dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape=point,label=\"\"]START\n");

        for node in self.graph.node_indices() {
            let shape = if self.graph[node].accepting {
                "doublecircle"
            } else {
                "circle"
            };
            let style = if self.graph[node].trap {
                " style=dashed"
            } else {
                ""
            };

            dot.push_str(&format!(
                "{} [shape={} label=\"{}\"{}];\n",
                node.index(),
                shape,
                self.graph[node].data,
                style
            ));
        }

        if let Some(start) = self.start {
            dot.push_str(&format!("START -> {};\n", start.index()));
        }

        // parallel edges between the same pair of states share one arrow
        let grouped = self
            .graph
            .edge_references()
            .map(|edge| ((edge.source().index(), edge.target().index()), edge.weight()))
            .into_group_map();

        for ((source, target), letters) in grouped.into_iter().sorted_by_key(|(k, _)| *k) {
            dot.push_str(&format!(
                "{} -> {} [ label=\"{}\" ];\n",
                source,
                target,
                letters.iter().sorted().join(", ")
            ));
        }

        dot.push_str("}\n");

        dot
    }
}

impl<N: AutomatonNode, E: Letter> AutBuild<NodeIndex, EdgeIndex, DfaNode<N>, E> for DFA<N, E> {
    fn add_state(&mut self, data: DfaNode<N>) -> NodeIndex<u32> {
        self.graph.add_node(data)
    }

    fn add_transition(
        &mut self,
        from: NodeIndex<u32>,
        to: NodeIndex<u32>,
        label: E,
    ) -> EdgeIndex<u32> {
        if let Some(target) = self.successor(from, &label)
            && target != to
        {
            panic!(
                "Transition conflict, adding the new transition causes this automaton to no longer be a DFA. Existing: {:?} -{:?}-> {:?}. New: {:?} -{:?}-> {:?}",
                from, label, target, from, label, to
            );
        }

        self.graph.add_edge(from, to, label)
    }
}

impl<N: AutomatonNode, E: Letter> Alphabet<E> for DFA<N, E> {
    fn alphabet(&self) -> &[E] {
        &self.alphabet
    }
}

impl<N: AutomatonNode, E: Letter> Language<E> for DFA<N, E> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a E>) -> bool
    where
        E: 'a,
    {
        let Some(mut current_state) = self.start else {
            return false;
        };

        for symbol in input {
            assert!(
                self.alphabet.contains(symbol),
                "Symbol {:?} not in alphabet",
                symbol
            );

            match self.successor(current_state, symbol) {
                Some(next) => current_state = next,
                None => return false,
            }
        }

        self.graph[current_state].accepting
    }
}

impl<N: AutomatonNode, E: Letter> Debug for DFA<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field(
                "states",
                &self
                    .graph
                    .node_indices()
                    .map(|node| (&self.graph[node].data, node))
                    .collect_vec(),
            )
            .field("initial_state", &self.start)
            .field(
                "final_states",
                &self
                    .graph
                    .node_indices()
                    .filter(|node| self.graph[*node].accepting)
                    .collect_vec(),
            )
            .field("edge_count", &self.graph.edge_count())
            .field(
                "edges",
                &self
                    .graph
                    .edge_references()
                    .map(|edge| {
                        format!(
                            "{:?} --- {:?} --> {:?}",
                            edge.source(),
                            edge.weight(),
                            edge.target()
                        )
                    })
                    .collect_vec(),
            )
            .finish()
    }
}
