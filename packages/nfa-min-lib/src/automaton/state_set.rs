use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A canonical, order independent set of states.
///
/// Members are kept sorted and duplicate free, so two sets built from the same
/// members compare (and hash) equal no matter in which order the members were
/// inserted. The subset construction uses this as the name of a DFA state, the
/// quotient builder uses it as the name of an equivalence class.
///
/// The empty set is the dead state. No set built from at least one member can
/// ever be equal to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSet<N>(Vec<N>);

impl<N: Ord> StateSet<N> {
    pub fn new(members: impl IntoIterator<Item = N>) -> Self {
        let mut members = members.into_iter().collect_vec();
        members.sort();
        members.dedup();
        StateSet(members)
    }

    /// The set representing the dead state.
    pub fn empty() -> Self {
        StateSet(vec![])
    }

    pub fn is_dead(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, member: &N) -> bool {
        self.0.binary_search(member).is_ok()
    }
}

impl<N> StateSet<N> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn members(&self) -> &[N] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &N> {
        self.0.iter()
    }
}

impl<N: Ord> FromIterator<N> for StateSet<N> {
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        StateSet::new(iter)
    }
}

impl<N: Display> Display for StateSet<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "∅");
        }

        write!(f, "{{{}}}", self.0.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::StateSet;

    #[test]
    fn order_does_not_matter() {
        let a = StateSet::new(vec!["3", "1", "2"]);
        let b = StateSet::new(vec!["2", "3", "1", "1"]);

        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.to_string(), "{1,2,3}");
    }

    #[test]
    fn dead_state_is_distinct() {
        let dead = StateSet::<String>::empty();

        assert!(dead.is_dead());
        assert_ne!(dead, StateSet::new(vec![String::new()]));
        assert_eq!(dead.to_string(), "∅");
    }

    #[test]
    fn nested_sets_display() {
        let inner_a = StateSet::new(vec![1, 2]);
        let inner_b = StateSet::new(vec![3]);
        let outer = StateSet::new(vec![inner_b, inner_a, StateSet::empty()]);

        assert_eq!(outer.to_string(), "{∅,{1,2},{3}}");
        assert!(outer.contains(&StateSet::new(vec![2, 1])));
    }
}
