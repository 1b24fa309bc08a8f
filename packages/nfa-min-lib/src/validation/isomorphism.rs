use std::collections::VecDeque;

use hashbrown::HashMap;
use petgraph::algo::is_isomorphic_matching;

use crate::automaton::{Alphabet, AutomatonNode, Letter, dfa::DFA};

/// Checks whether two complete DFAs are equal up to renaming of their states.
///
/// Both automata are walked in lockstep from their start states, building a
/// bijection between the reachable states. When unreachable states remain, the
/// whole graphs are compared with acceptance, the start state and the
/// transition letters all preserved.
pub fn is_isomorphic<N1: AutomatonNode, N2: AutomatonNode, E: Letter>(
    a: &DFA<N1, E>,
    b: &DFA<N2, E>,
) -> bool {
    if a.alphabet() != b.alphabet() || a.state_count() != b.state_count() {
        return false;
    }

    let (Some(start_a), Some(start_b)) = (a.get_start(), b.get_start()) else {
        return a.get_start().is_none() && b.get_start().is_none();
    };

    let mut forward = HashMap::new();
    let mut backward = HashMap::new();
    let mut queue = VecDeque::from([(start_a, start_b)]);
    forward.insert(start_a, start_b);
    backward.insert(start_b, start_a);

    while let Some((state_a, state_b)) = queue.pop_front() {
        if a.is_accepting(state_a) != b.is_accepting(state_b) {
            return false;
        }

        for letter in a.alphabet() {
            let (next_a, next_b) = match (a.successor(state_a, letter), b.successor(state_b, letter)) {
                (Some(next_a), Some(next_b)) => (next_a, next_b),
                (None, None) => continue,
                _ => return false,
            };

            match (forward.get(&next_a), backward.get(&next_b)) {
                (Some(mapped_b), Some(mapped_a)) => {
                    if *mapped_b != next_b || *mapped_a != next_a {
                        return false;
                    }
                }
                (None, None) => {
                    forward.insert(next_a, next_b);
                    backward.insert(next_b, next_a);
                    queue.push_back((next_a, next_b));
                }
                _ => return false,
            }
        }
    }

    if forward.len() == a.state_count() {
        return true;
    }

    let graph_a = a
        .graph
        .map(|state, node| (node.accepting, Some(state) == a.get_start()), |_, letter| letter);
    let graph_b = b
        .graph
        .map(|state, node| (node.accepting, Some(state) == b.get_start()), |_, letter| letter);

    is_isomorphic_matching(&graph_a, &graph_b, |x, y| x == y, |x, y| x == y)
}
