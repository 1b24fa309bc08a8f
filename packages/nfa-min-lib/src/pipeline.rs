//! The end to end pipeline: subset construction, refinement and quotient,
//! operating on plain descriptions and tables.

use serde::Serialize;

use crate::{
    automaton::{
        AutomatonNode, Letter,
        description::{NfaDescription, UnknownStatePolicy},
        dfa::{DFA, minimization::MinimizationAlgorithm},
        nfa::NFA,
        state_set::StateSet,
        table::DfaTable,
    },
    error::AutomatonError,
};

/// Turns an NFA description into the table of an equivalent total DFA. The
/// dead state is always part of the result unless the alphabet is empty.
pub fn subset_construct<L: AutomatonNode + Ord, S: Letter>(
    description: &NfaDescription<L, S>,
    policy: UnknownStatePolicy,
) -> Result<DfaTable<StateSet<L>, S>, AutomatonError> {
    NFA::from_description(description, policy)?
        .determinize()?
        .to_table()
}

/// Minimizes a total DFA given as a table using table filling.
pub fn minimize<L: AutomatonNode + Ord, S: Letter>(
    table: &DfaTable<L, S>,
) -> Result<DfaTable<StateSet<L>, S>, AutomatonError> {
    minimize_with(table, MinimizationAlgorithm::TableFilling)
}

pub fn minimize_with<L: AutomatonNode + Ord, S: Letter>(
    table: &DfaTable<L, S>,
    algorithm: MinimizationAlgorithm,
) -> Result<DfaTable<StateSet<L>, S>, AutomatonError> {
    DFA::from_table(table)?.minimize_with(algorithm)?.to_table()
}

/// Both automata produced for one description.
#[derive(Debug, Clone)]
pub struct PipelineOutput<L: AutomatonNode + Ord, S: Letter> {
    pub nfa: NFA<L, S>,
    pub dfa: DFA<StateSet<L>, S>,
    pub minimal: DFA<StateSet<StateSet<L>>, S>,
    pub algorithm: MinimizationAlgorithm,
}

pub fn run<L: AutomatonNode + Ord, S: Letter>(
    description: &NfaDescription<L, S>,
    policy: UnknownStatePolicy,
    algorithm: MinimizationAlgorithm,
) -> Result<PipelineOutput<L, S>, AutomatonError> {
    let nfa = NFA::from_description(description, policy)?;
    let dfa = nfa.determinize()?;
    let minimal = dfa.minimize_with(algorithm)?;

    tracing::info!(
        nfa_states = nfa.graph.node_count(),
        dfa_states = dfa.state_count(),
        minimal_states = minimal.state_count(),
        "pipeline finished"
    );

    Ok(PipelineOutput {
        nfa,
        dfa,
        minimal,
        algorithm,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport<L, S> {
    pub algorithm: MinimizationAlgorithm,
    pub dfa: DfaTable<StateSet<L>, S>,
    pub minimal: DfaTable<StateSet<StateSet<L>>, S>,
}

impl<L: Serialize, S: Serialize> PipelineReport<L, S> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<L: AutomatonNode + Ord, S: Letter> PipelineOutput<L, S> {
    pub fn report(&self) -> Result<PipelineReport<L, S>, AutomatonError> {
        Ok(PipelineReport {
            algorithm: self.algorithm,
            dfa: self.dfa.to_table()?,
            minimal: self.minimal.to_table()?,
        })
    }
}
