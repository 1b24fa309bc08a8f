use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::{
    automaton::{
        AutBuild, AutomatonNode, Letter,
        dfa::{DFA, node::DfaNode, partition::Partition},
        state_set::StateSet,
    },
    error::AutomatonError,
};

/// Collapses every group of the partition into a single state.
///
/// Each group is named by the set of its members' data. The transitions of a
/// group are taken from its first member and checked against all other
/// members, so a partition that is not a congruence of the DFA is rejected
/// instead of silently producing a different language.
pub fn quotient<N: AutomatonNode + Ord, E: Letter>(
    dfa: &DFA<N, E>,
    partition: &Partition,
) -> Result<DFA<StateSet<N>, E>, AutomatonError> {
    let start = dfa.get_start().ok_or(AutomatonError::MissingStart)?;
    let group_of = partition.group_lookup(dfa.state_count())?;

    let mut minimal = DFA::new(dfa.alphabet.clone());

    let group_nodes = partition
        .groups()
        .iter()
        .map(|group| {
            let name = group
                .iter()
                .map(|node| dfa.graph[*node].data.clone())
                .collect::<StateSet<N>>();

            let accepting = group.iter().map(|node| dfa.is_accepting(*node)).dedup().collect_vec();
            if accepting.len() > 1 {
                return Err(AutomatonError::InconsistentGroupAcceptance {
                    group: format!("{:?}", name),
                });
            }

            let node = if accepting[0] {
                DfaNode::accepting(name)
            } else {
                DfaNode::non_accepting(name)
            };

            Ok(minimal.add_state(node))
        })
        .collect::<Result<Vec<NodeIndex>, AutomatonError>>()?;

    for (group_index, group) in partition.groups().iter().enumerate() {
        let representative = group[0];

        for letter in dfa.alphabet.iter() {
            let target_group = |node: NodeIndex| {
                dfa.successor(node, letter)
                    .map(|target| group_of[target.index()])
                    .ok_or_else(|| AutomatonError::IncompleteDfa {
                        state: format!("{:?}", dfa.graph[node].data),
                        symbol: format!("{:?}", letter),
                    })
            };

            let destination = target_group(representative)?;

            for member in group.iter().skip(1) {
                if target_group(*member)? != destination {
                    return Err(AutomatonError::InconsistentGroupTransition {
                        group: format!("{:?}", minimal.graph[group_nodes[group_index]].data),
                        symbol: format!("{:?}", letter),
                    });
                }
            }

            minimal.add_transition(
                group_nodes[group_index],
                group_nodes[destination],
                letter.clone(),
            );
        }
    }

    minimal.set_start(group_nodes[group_of[start.index()]]);
    minimal.override_complete();
    minimal.mark_sink_states();

    tracing::debug!(
        before = dfa.state_count(),
        after = minimal.state_count(),
        "built quotient DFA"
    );

    Ok(minimal)
}
