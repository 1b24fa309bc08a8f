use std::{fmt::Debug, hash::Hash};

pub mod description;
pub mod dfa;
pub mod nfa;
pub mod state_set;
pub mod table;

/// This trait represents types that can be used as node data in an automaton.
pub trait AutomatonNode: Debug + Clone + PartialEq + Eq + Hash {}
impl<T> AutomatonNode for T where T: Debug + Clone + PartialEq + Eq + Hash {}

/// This trait represents types that can be used as the letters along the edges
/// of an automaton. Letters need a total order so that alphabets and
/// transition tables can be printed deterministically.
pub trait Letter: Debug + Clone + PartialEq + Eq + Hash + Ord {}
impl<T: Debug + Clone + PartialEq + Eq + Hash + Ord> Letter for T {}

pub trait AutBuild<NIndex, EIndex, N, E> {
    /// Adds a new state with the given data, returning its index.
    fn add_state(&mut self, data: N) -> NIndex;
    /// Adds a new transition from `from` to `to` with the given label,
    /// returning the index of the new edge.
    fn add_transition(&mut self, from: NIndex, to: NIndex, label: E) -> EIndex;
}

pub trait Alphabet<E: Letter> {
    fn alphabet(&self) -> &[E];
}

/// The basic trait for anything that defines a language over a set alphabet.
pub trait Language<E: Letter>: Alphabet<E> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a E>) -> bool
    where
        E: 'a;
}
