//! Signal-flow graph storage, path search, and nontouching filters.

/// Arena-backed node and edge storage.
pub mod store;
/// Forward-path and loop enumeration.
pub mod paths;
/// Node-disjointness filtering.
pub mod nontouching;

pub use nontouching::find_nontouching;
pub use paths::{find_forward_paths, find_loops, Path, PathIter, PathSet};
pub use store::{Edge, EdgeId, EdgeIter, Graph, Node, NodeId};
