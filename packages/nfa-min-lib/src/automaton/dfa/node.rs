use serde::Serialize;

use crate::automaton::AutomatonNode;

/// A node in a DFA or NFA.
/// It contains some data of type `T`, a boolean flag indicating whether the
/// node is accepting, and a boolean flag indicating whether the node is a trap
/// node.
///
/// Invariant: A node cannot be both accepting and a trap node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DfaNode<T: AutomatonNode> {
    pub accepting: bool,
    /// Whether the node is a trap node. Meaning from it there is no way to
    /// reach an accepting state. When it's unknown whether it's a trap
    /// node, this is set to false.
    pub trap: bool,
    pub data: T,
}

impl<T: AutomatonNode> DfaNode<T> {
    pub fn new(accepting: bool, trap: bool, data: T) -> Self {
        assert!(
            !(accepting && trap),
            "A node cannot be both accepting and a trap node"
        );
        DfaNode {
            accepting,
            trap,
            data,
        }
    }

    pub fn accepting(data: T) -> Self {
        DfaNode::new(true, false, data)
    }

    pub fn non_accepting(data: T) -> Self {
        DfaNode::new(false, false, data)
    }

    pub fn trap(data: T) -> Self {
        DfaNode::new(false, true, data)
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn set_accepting(&mut self) {
        assert!(!self.trap, "A trap node cannot become accepting");
        self.accepting = true;
    }
}
