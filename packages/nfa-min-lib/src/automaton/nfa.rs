use std::collections::VecDeque;

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};
use serde::Serialize;

use crate::{
    automaton::{
        AutBuild, Alphabet, AutomatonNode, Language, Letter,
        description::{NfaDescription, UnknownStatePolicy},
        dfa::{DFA, node::DfaNode},
        state_set::StateSet,
    },
    error::AutomatonError,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NFAEdge<E> {
    Symbol(E),
    Epsilon,
}

impl<E: PartialEq> NFAEdge<E> {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, NFAEdge::Epsilon)
    }

    pub fn matches(&self, symbol: &E) -> bool {
        match self {
            NFAEdge::Symbol(e) => e == symbol,
            NFAEdge::Epsilon => false,
        }
    }
}

impl<E> From<Option<E>> for NFAEdge<E> {
    fn from(value: Option<E>) -> Self {
        match value {
            Some(e) => NFAEdge::Symbol(e),
            None => NFAEdge::Epsilon,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NFA<N: AutomatonNode, E: Letter> {
    start: Option<NodeIndex>,
    pub graph: DiGraph<DfaNode<N>, NFAEdge<E>>,
    alphabet: Vec<E>,
    labels: HashMap<N, NodeIndex>,
}

impl<N: AutomatonNode + Ord, E: Letter> NFA<N, E> {
    pub fn new(alphabet: Vec<E>) -> Self {
        let graph = DiGraph::new();

        NFA {
            alphabet,
            start: None,
            graph,
            labels: HashMap::new(),
        }
    }

    /// Builds an NFA from a plain description. Labels that are referenced
    /// without being declared are handled according to `policy`.
    pub fn from_description(
        description: &NfaDescription<N, E>,
        policy: UnknownStatePolicy,
    ) -> Result<Self, AutomatonError> {
        let alphabet = description.alphabet.iter().unique().cloned().collect_vec();
        let mut nfa = NFA::new(alphabet);

        for state in &description.states {
            if nfa.state_index(state).is_none() {
                nfa.add_state(DfaNode::non_accepting(state.clone()));
            }
        }

        let start = nfa.resolve(&description.start, policy)?;
        nfa.set_start(start);

        for state in &description.finals {
            let node = nfa.resolve(state, policy)?;
            nfa.set_accepting(node);
        }

        for transition in &description.transitions {
            if let NFAEdge::Symbol(symbol) = &transition.symbol
                && !nfa.alphabet.contains(symbol)
            {
                return Err(AutomatonError::UnknownSymbol(format!("{:?}", symbol)));
            }

            let from = nfa.resolve(&transition.from, policy)?;
            let to = nfa.resolve(&transition.to, policy)?;
            nfa.add_transition(from, to, transition.symbol.clone());
        }

        tracing::debug!(
            states = nfa.graph.node_count(),
            transitions = nfa.graph.edge_count(),
            symbols = nfa.alphabet.len(),
            "built NFA from description"
        );

        Ok(nfa)
    }

    fn resolve(&mut self, label: &N, policy: UnknownStatePolicy) -> Result<NodeIndex, AutomatonError> {
        if let Some(node) = self.state_index(label) {
            return Ok(node);
        }

        match policy {
            UnknownStatePolicy::Strict => Err(AutomatonError::UnknownState(format!("{:?}", label))),
            UnknownStatePolicy::Permissive => {
                tracing::warn!(label = ?label, "treating undeclared label as a state");
                Ok(self.add_state(DfaNode::non_accepting(label.clone())))
            }
        }
    }

    pub fn state_index(&self, label: &N) -> Option<NodeIndex> {
        self.labels.get(label).copied()
    }

    pub fn set_start(&mut self, start: NodeIndex) {
        self.start = Some(start);
    }

    pub fn get_start(&self) -> Option<NodeIndex> {
        self.start
    }

    pub fn set_accepting(&mut self, state: NodeIndex) {
        self.graph[state].accepting = true;
    }

    /// Determinizes a NFA to a DFA.
    /// This is done by creating a new DFA where each state is a set of states
    /// from the NFA. This respects epsilon transitions.
    ///
    /// The result is complete. Moves without any successor lead to the dead
    /// state, named by the empty set, which is added after all other states
    /// whenever the alphabet is not empty.
    pub fn determinize(&self) -> Result<DFA<StateSet<N>, E>, AutomatonError> {
        let nfa_start = self.start.ok_or(AutomatonError::MissingStart)?;
        let mut state_map = HashMap::new();

        let mut dfa = DFA::<StateSet<N>, E>::new(self.alphabet.clone());

        let mut start_state_set = vec![nfa_start];
        self.extend_to_e_closure(&mut start_state_set);
        start_state_set.sort();
        let dfa_start = dfa.add_state(self.state_from_set(&start_state_set));
        dfa.set_start(dfa_start);
        state_map.insert(start_state_set.clone(), dfa_start);

        let mut queue = VecDeque::from([start_state_set]);

        while let Some(state) = queue.pop_front() {
            let source = state_map[&state];

            for symbol in &self.alphabet {
                let mut target_state = vec![];

                for &node in &state {
                    for edge in self.graph.edges_directed(node, Direction::Outgoing) {
                        if edge.weight().matches(symbol) {
                            target_state.push(edge.target());
                        }
                    }
                }

                if target_state.is_empty() {
                    continue;
                }

                self.extend_to_e_closure(&mut target_state);

                target_state.sort();
                target_state.dedup();

                let target_dfa_state = if let Some(&x) = state_map.get(&target_state) {
                    x
                } else {
                    let new_state = dfa.add_state(self.state_from_set(&target_state));
                    state_map.insert(target_state.clone(), new_state);
                    queue.push_back(target_state);
                    new_state
                };

                dfa.add_transition(source, target_dfa_state, symbol.clone());
            }
        }

        let dead = dfa.add_dead_state(StateSet::empty());

        tracing::debug!(
            composites = state_map.len(),
            dead = dead.is_some(),
            "subset construction explored all reachable sets"
        );

        #[cfg(debug_assertions)]
        dfa.check_complete()?;

        Ok(dfa)
    }

    /// Calculates the epsilon closure of a set of states.
    /// This set is duplicate free.
    pub fn extend_to_e_closure(&self, states: &mut Vec<NodeIndex>) {
        let mut stack = states.clone();

        while let Some(state) = stack.pop() {
            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                if edge.weight().is_epsilon() {
                    let target = edge.target();

                    if !states.contains(&target) {
                        states.push(target);
                        stack.push(target);
                    }
                }
            }
        }
    }

    pub fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &[NodeIndex]) -> bool {
        states.iter().any(|&x| self.is_accepting(x))
    }

    /// Creates a DFA state from a set of states, named by the members' data.
    pub fn state_from_set(&self, states: &[NodeIndex<u32>]) -> DfaNode<StateSet<N>> {
        DfaNode::new(
            self.is_accepting_set(states),
            false,
            StateSet::new(self.node_data_set(states)),
        )
    }

    pub fn node_data(&self, node: NodeIndex) -> &N {
        self.graph[node].data()
    }

    /// Maps a set of states to their data.
    pub fn node_data_set(&self, nodes: &[NodeIndex]) -> Vec<N> {
        nodes.iter().map(|&x| self.node_data(x).clone()).collect()
    }
}

impl<N: AutomatonNode + Ord, E: Letter> AutBuild<NodeIndex, EdgeIndex, DfaNode<N>, NFAEdge<E>>
    for NFA<N, E>
{
    fn add_state(&mut self, data: DfaNode<N>) -> NodeIndex {
        assert!(
            !self.labels.contains_key(&data.data),
            "State {:?} already exists in this NFA",
            data.data
        );

        let label = data.data.clone();
        let node = self.graph.add_node(data);
        self.labels.insert(label, node);
        node
    }

    fn add_transition(&mut self, from: NodeIndex, to: NodeIndex, label: NFAEdge<E>) -> EdgeIndex {
        self.graph.add_edge(from, to, label)
    }
}

impl<N: AutomatonNode, E: Letter> Alphabet<E> for NFA<N, E> {
    fn alphabet(&self) -> &[E] {
        self.alphabet.as_slice()
    }
}

impl<N: AutomatonNode + Ord, E: Letter> Language<E> for NFA<N, E> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a E>) -> bool
    where
        E: 'a,
    {
        let Some(start) = self.start else {
            return false;
        };

        let mut current_states = vec![start];
        self.extend_to_e_closure(&mut current_states);

        for symbol in input {
            let mut next_states = vec![];

            for &state in &current_states {
                for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                    if edge.weight().matches(symbol) {
                        next_states.push(edge.target());
                    }
                }
            }

            if next_states.is_empty() {
                return false;
            }

            next_states.sort();
            next_states.dedup();
            self.extend_to_e_closure(&mut next_states);

            current_states = next_states;
        }

        self.is_accepting_set(&current_states)
    }
}

#[cfg(test)]
mod tests {
    use super::NFAEdge;

    #[test]
    fn epsilon_never_matches() {
        let epsilon = NFAEdge::<char>::from(None);
        assert!(epsilon.is_epsilon());
        assert!(!epsilon.matches(&'a'));
        assert!(NFAEdge::Symbol('a').matches(&'a'));
        assert!(!NFAEdge::Symbol('a').matches(&'b'));
    }
}
