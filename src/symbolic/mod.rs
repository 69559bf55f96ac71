//! Symbolic expression pooling and transfer-function assembly.

/// Deduplicating expression storage.
pub mod pool;
/// Symbolic polynomial coefficients.
pub mod poly;
/// Gain-formula evaluation.
pub mod mason;

pub use mason::{calc_expr, graph_determinant, TransferFunction};
pub use poly::{Coefficient, SymbolicPoly};
pub use pool::{Expr, ExprId, ExprPool};
