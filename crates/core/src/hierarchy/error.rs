//! Hierarchy error types.

use thiserror::Error;

/// Parent link violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// A node was given itself as parent.
    #[error("{node} cannot be its own parent")]
    SelfParent {
        /// The offending node.
        node: String,
    },

    /// The proposed parent is already a descendant of the node.
    #[error("{parent} is a descendant of {node}; linking them would create a cycle")]
    Cycle {
        /// The node being re-parented.
        node: String,
        /// The proposed parent.
        parent: String,
    },
}
