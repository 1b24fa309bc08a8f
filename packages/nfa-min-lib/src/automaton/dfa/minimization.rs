use std::{fmt::Display, str::FromStr};

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{
        Alphabet, AutomatonNode, Letter,
        dfa::{DFA, hopcroft::hopcroft_partition, partition::Partition, quotient::quotient},
        state_set::StateSet,
    },
    error::AutomatonError,
};

/// The algorithm used to compute the state equivalence of a DFA. Both yield
/// the same partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimizationAlgorithm {
    /// Iterative marking of distinguishable state pairs.
    #[default]
    TableFilling,
    /// Worklist based partition refinement.
    Hopcroft,
}

impl FromStr for MinimizationAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "table_filling" | "table-filling" => Ok(MinimizationAlgorithm::TableFilling),
            "hopcroft" => Ok(MinimizationAlgorithm::Hopcroft),
            _ => Err(format!("Invalid minimization algorithm: {}", s)),
        }
    }
}

impl Display for MinimizationAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MinimizationAlgorithm::TableFilling => write!(f, "table-filling"),
            MinimizationAlgorithm::Hopcroft => write!(f, "hopcroft"),
        }
    }
}

/// Collects the transition function of a complete DFA into a dense matrix,
/// `matrix[state][letter]` being the index of the target state. Letters are
/// indexed like the alphabet.
pub(crate) fn transition_matrix<N: AutomatonNode, E: Letter>(
    dfa: &DFA<N, E>,
) -> Result<Vec<Vec<usize>>, AutomatonError> {
    dfa.graph
        .node_indices()
        .map(|node| {
            dfa.alphabet()
                .iter()
                .map(|letter| {
                    dfa.successor(node, letter)
                        .map(|target| target.index())
                        .ok_or_else(|| AutomatonError::IncompleteDfa {
                            state: format!("{:?}", dfa.graph[node].data),
                            symbol: format!("{:?}", letter),
                        })
                })
                .collect()
        })
        .collect()
}

/// Represents the table used in the minimization of a DFA.
///
/// For every unordered pair of distinct states the table stores whether the
/// pair is known to be distinguishable. Only the upper triangle (`i < j`) is
/// used.
#[derive(Debug, Clone)]
pub struct DistinguishabilityTable {
    transitions: Vec<Vec<usize>>,
    accepting: Vec<bool>,
    marked: Vec<Vec<bool>>,
}

impl DistinguishabilityTable {
    pub fn new<N: AutomatonNode, E: Letter>(dfa: &DFA<N, E>) -> Result<Self, AutomatonError> {
        let transitions = transition_matrix(dfa)?;
        let accepting = dfa
            .graph
            .node_indices()
            .map(|node| dfa.is_accepting(node))
            .collect::<Vec<_>>();
        let state_count = accepting.len();

        Ok(DistinguishabilityTable {
            transitions,
            accepting,
            marked: vec![vec![false; state_count]; state_count],
        })
    }

    fn state_count(&self) -> usize {
        self.accepting.len()
    }

    pub fn is_distinguished(&self, a: usize, b: usize) -> bool {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => self.marked[a][b],
            std::cmp::Ordering::Greater => self.marked[b][a],
            std::cmp::Ordering::Equal => false,
        }
    }

    /// Marks the table until a fixed point is reached and returns the number
    /// of passes needed.
    pub fn fill(&mut self) -> usize {
        let state_count = self.state_count();

        // mark all pairs of states (q1, q2) where q1 is accepting and q2 is not
        // accepting
        for i in 0..state_count {
            for j in (i + 1)..state_count {
                if self.accepting[i] != self.accepting[j] {
                    self.marked[i][j] = true;
                }
            }
        }

        // while there is an unmarked pair (q1, q2) in the table and a letter with q1 ->
        // q3 and q2 -> q4 so that (q3, q4) is marked, mark (q1, q2)
        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;

            for i in 0..state_count {
                for j in (i + 1)..state_count {
                    if self.marked[i][j] {
                        continue;
                    }

                    let distinguished = self.transitions[i]
                        .iter()
                        .zip(self.transitions[j].iter())
                        .any(|(&a, &b)| self.is_distinguished(a, b));

                    if distinguished {
                        self.marked[i][j] = true;
                        changed = true;
                    }
                }
            }
        }

        passes
    }

    /// Groups the states that were never distinguished. At the fixed point
    /// "not distinguished" is an equivalence relation, so each group is
    /// simply a state together with every later state it is not
    /// distinguished from.
    pub fn into_partition(self) -> Partition {
        let state_count = self.state_count();
        let mut block_of = vec![usize::MAX; state_count];

        for i in 0..state_count {
            if block_of[i] != usize::MAX {
                continue;
            }

            block_of[i] = i;
            for j in (i + 1)..state_count {
                if !self.marked[i][j] {
                    block_of[j] = i;
                }
            }
        }

        Partition::from_block_ids(&block_of)
    }
}

/// Computes the coarsest partition of the states of a complete DFA into
/// groups of states that no input word can tell apart.
pub fn refine<N: AutomatonNode, E: Letter>(
    dfa: &DFA<N, E>,
    algorithm: MinimizationAlgorithm,
) -> Result<Partition, AutomatonError> {
    let partition = match algorithm {
        MinimizationAlgorithm::TableFilling => {
            let mut table = DistinguishabilityTable::new(dfa)?;
            let passes = table.fill();
            tracing::debug!(passes, "table filling reached its fixed point");
            table.into_partition()
        }
        MinimizationAlgorithm::Hopcroft => hopcroft_partition(dfa)?,
    };

    tracing::debug!(
        states = dfa.state_count(),
        groups = partition.len(),
        %algorithm,
        "refined DFA states"
    );

    Ok(partition)
}

impl<N: AutomatonNode + Ord, E: Letter> DFA<N, E> {
    /// Minimizes the DFA with the table filling algorithm. The DFA must be
    /// complete. States unreachable from the start state take part in the
    /// refinement and stay in the result.
    pub fn minimize(&self) -> Result<DFA<StateSet<N>, E>, AutomatonError> {
        self.minimize_with(MinimizationAlgorithm::TableFilling)
    }

    pub fn minimize_with(
        &self,
        algorithm: MinimizationAlgorithm,
    ) -> Result<DFA<StateSet<N>, E>, AutomatonError> {
        let partition = refine(self, algorithm)?;
        quotient(self, &partition)
    }

    /// Groups of equivalent states, given by their data.
    pub fn equivalence_classes(
        &self,
        algorithm: MinimizationAlgorithm,
    ) -> Result<Vec<StateSet<N>>, AutomatonError> {
        let partition = refine(self, algorithm)?;

        Ok(partition
            .groups()
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|node: &NodeIndex| self.graph[*node].data.clone())
                    .collect()
            })
            .collect())
    }
}
