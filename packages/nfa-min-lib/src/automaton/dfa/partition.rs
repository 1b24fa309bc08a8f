use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::error::AutomatonError;

/// A partition of the states of a DFA into disjoint, non-empty groups.
///
/// Partitions are kept normalized: every group is sorted and the groups are
/// ordered by their smallest member. Two partitions describing the same
/// equivalence relation are therefore equal, independent of the algorithm
/// that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    groups: Vec<Vec<NodeIndex<u32>>>,
}

impl Partition {
    pub fn new(groups: Vec<Vec<NodeIndex<u32>>>) -> Self {
        let groups = groups
            .into_iter()
            .filter(|group| !group.is_empty())
            .map(|group| group.into_iter().sorted().dedup().collect_vec())
            .sorted_by_key(|group| group[0])
            .collect_vec();

        Partition { groups }
    }

    /// Builds a partition from a block id per state, where `block_of[i]` is
    /// the block of the state with index `i`.
    pub fn from_block_ids(block_of: &[usize]) -> Self {
        let groups = block_of
            .iter()
            .enumerate()
            .map(|(state, block)| (*block, NodeIndex::new(state)))
            .into_group_map()
            .into_values()
            .collect_vec();

        Partition::new(groups)
    }

    /// The partition where every state is its own group.
    pub fn identity(state_count: usize) -> Self {
        Partition::new((0..state_count).map(|i| vec![NodeIndex::new(i)]).collect_vec())
    }

    pub fn groups(&self) -> &[Vec<NodeIndex<u32>>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.groups.iter().all(|group| group.len() == 1)
    }

    /// Maps every state index to the index of its group.
    ///
    /// Fails if the partition does not cover exactly the states `0..state_count`
    /// or if a state is part of more than one group.
    pub fn group_lookup(&self, state_count: usize) -> Result<Vec<usize>, AutomatonError> {
        let mut group_of = vec![None; state_count];

        for (group_index, group) in self.groups.iter().enumerate() {
            for state in group {
                let slot = group_of.get_mut(state.index()).ok_or_else(|| {
                    AutomatonError::InvalidPartition(format!(
                        "state {} does not exist in an automaton with {} states",
                        state.index(),
                        state_count
                    ))
                })?;

                if slot.is_some() {
                    return Err(AutomatonError::InvalidPartition(format!(
                        "state {} is part of more than one group",
                        state.index()
                    )));
                }

                *slot = Some(group_index);
            }
        }

        group_of
            .into_iter()
            .enumerate()
            .map(|(state, group)| {
                group.ok_or_else(|| {
                    AutomatonError::InvalidPartition(format!(
                        "state {} is not part of any group",
                        state
                    ))
                })
            })
            .collect()
    }
}
