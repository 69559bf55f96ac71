#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Error types shared between modules.
pub mod errors;
/// Shared numerical primitives and aliases.
pub mod math;
/// Index-addressed signal-flow graph storage and path search.
pub mod graph;
/// Deduplicated symbolic expressions and transfer-function assembly.
pub mod symbolic;
/// Complex polynomial toolkit and the numeric analysis pipeline.
pub mod numeric;

/// Common exports for downstream crates.
pub mod prelude;
