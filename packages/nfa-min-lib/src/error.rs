use thiserror::Error;

/// Errors raised by the automaton pipeline.
///
/// Labels and symbols are generic in the library, so they are carried in their
/// `Debug` representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("state {0} is referenced but was never declared")]
    UnknownState(String),
    #[error("symbol {0} is not part of the declared alphabet")]
    UnknownSymbol(String),
    #[error("automaton has no start state")]
    MissingStart,
    #[error("DFA is not complete: state {state} has no transition for symbol {symbol}")]
    IncompleteDfa { state: String, symbol: String },
    #[error("DFA is not deterministic: state {state} has more than one transition for symbol {symbol}")]
    NondeterministicTransition { state: String, symbol: String },
    #[error("invalid partition: {0}")]
    InvalidPartition(String),
    #[error("members of group {group} disagree on the destination group for symbol {symbol}")]
    InconsistentGroupTransition { group: String, symbol: String },
    #[error("group {group} mixes accepting and non-accepting states")]
    InconsistentGroupAcceptance { group: String },
}
