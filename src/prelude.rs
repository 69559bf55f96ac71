//! Convenience re-exports for building signal-flow analyses.

pub use crate::errors::SfgError;
pub use crate::graph::{
    find_forward_paths, find_loops, find_nontouching, Edge, EdgeId, Graph, Node, NodeId, Path,
    PathSet,
};
pub use crate::math::{CScalar, Scalar};
pub use crate::numeric::{
    angular_frequency, find_roots, find_roots_from, linspace, logspace_hz, mag_db,
    partial_fractions, phase_deg, pole_term_response, sample_response, sweep_rational,
    time_response, write_frequency_points_csv, write_response_csv, CPoly, FrequencyPoint,
    PoleTerm, ResponseWaveform, RootFinderConfig, RootFinderReport,
};
pub use crate::symbolic::{
    calc_expr, graph_determinant, Coefficient, Expr, ExprId, ExprPool, SymbolicPoly,
    TransferFunction,
};
