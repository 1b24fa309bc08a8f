use std::collections::VecDeque;

use hashbrown::HashSet;
use petgraph::graph::NodeIndex;

use crate::{
    automaton::{
        AutomatonNode, Letter,
        dfa::{DFA, minimization::transition_matrix, partition::Partition},
    },
    error::AutomatonError,
};

/// Hopcroft's partition refinement. Starts from the split into accepting and
/// non accepting states and splits blocks by the predecessors of splitter
/// blocks until no splitter is left.
pub fn hopcroft_partition<N: AutomatonNode, E: Letter>(
    dfa: &DFA<N, E>,
) -> Result<Partition, AutomatonError> {
    let transitions = transition_matrix(dfa)?;
    let state_count = transitions.len();
    let letter_count = dfa.alphabet.len();

    if state_count == 0 {
        return Ok(Partition::new(vec![]));
    }

    // inverse[letter][state] lists all states moving to `state` on `letter`
    let mut inverse = vec![vec![vec![]; state_count]; letter_count];
    for (state, row) in transitions.iter().enumerate() {
        for (letter, &target) in row.iter().enumerate() {
            inverse[letter][target].push(state);
        }
    }

    let (accepting, rejecting): (Vec<usize>, Vec<usize>) =
        (0..state_count).partition(|state| dfa.is_accepting(NodeIndex::new(*state)));

    let mut blocks: Vec<Vec<usize>> = vec![];
    let mut block_of = vec![0; state_count];
    for block in [accepting, rejecting] {
        if block.is_empty() {
            continue;
        }
        for &state in &block {
            block_of[state] = blocks.len();
        }
        blocks.push(block);
    }

    let mut worklist = VecDeque::new();
    let mut pending = HashSet::new();
    if blocks.len() == 2 {
        let smaller = if blocks[0].len() <= blocks[1].len() { 0 } else { 1 };
        for letter in 0..letter_count {
            worklist.push_back((smaller, letter));
            pending.insert((smaller, letter));
        }
    }

    let mut splits = 0;
    while let Some((splitter, letter)) = worklist.pop_front() {
        pending.remove(&(splitter, letter));

        let predecessors = blocks[splitter]
            .iter()
            .flat_map(|state| inverse[letter][*state].iter().copied())
            .collect::<HashSet<_>>();

        let touched = predecessors
            .iter()
            .map(|state| block_of[*state])
            .collect::<HashSet<_>>();

        for block in touched {
            let (inside, outside): (Vec<usize>, Vec<usize>) = blocks[block]
                .iter()
                .partition(|state| predecessors.contains(*state));

            if outside.is_empty() {
                continue;
            }

            splits += 1;
            let new_block = blocks.len();
            blocks[block] = inside;
            for &state in &outside {
                block_of[state] = new_block;
            }
            blocks.push(outside);

            for l in 0..letter_count {
                if pending.contains(&(block, l)) {
                    worklist.push_back((new_block, l));
                    pending.insert((new_block, l));
                } else {
                    let smaller = if blocks[block].len() <= blocks[new_block].len() {
                        block
                    } else {
                        new_block
                    };
                    worklist.push_back((smaller, l));
                    pending.insert((smaller, l));
                }
            }
        }
    }

    tracing::debug!(splits, blocks = blocks.len(), "hopcroft refinement done");

    Ok(Partition::from_block_ids(&block_of))
}
