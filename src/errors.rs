//! Shared error types used across submodules.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SfgError {
    /// Raised when a node index does not refer to a live node.
    #[error("invalid node index {0}")]
    InvalidNode(usize),
    /// Raised when an edge index does not refer to a live edge.
    #[error("invalid edge index {0}")]
    InvalidEdge(usize),
    /// Raised when growing an arena failed. The store is left untouched.
    #[error("allocation failure while growing the {0}")]
    AllocationFailure(&'static str),
    /// No forward path connects the requested input/output pair; the
    /// transfer function between them is identically zero.
    #[error("no forward path between the requested nodes")]
    Disconnected,
}
