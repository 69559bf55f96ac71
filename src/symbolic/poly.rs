//! Symbolic polynomial coefficients and numeric extraction.

use crate::graph::EdgeId;
use crate::math::{CScalar, Scalar};
use crate::numeric::poly::CPoly;

use super::pool::{ExprId, ExprPool};

/// A numeric factor applied to a pooled expression: `factor × expr`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficient {
    /// Multiplier applied to the expression value.
    pub factor: Scalar,
    /// Pooled expression handle.
    pub expr: ExprId,
}

/// Polynomial in the transform variable with symbolic coefficients, ordered
/// by increasing power.
#[derive(Debug, Clone, Default)]
pub struct SymbolicPoly {
    coeffs: Vec<Coefficient>,
}

impl SymbolicPoly {
    /// Creates an empty polynomial.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a polynomial from coefficients in increasing-power order.
    #[must_use]
    pub fn from_coefficients(coeffs: Vec<Coefficient>) -> Self {
        Self { coeffs }
    }

    /// Appends the coefficient of the next power.
    pub fn push(&mut self, coefficient: Coefficient) {
        self.coeffs.push(coefficient);
    }

    /// Coefficients in increasing-power order.
    #[must_use]
    pub fn coefficients(&self) -> &[Coefficient] {
        &self.coeffs
    }

    /// Degree of the polynomial. Empty and constant polynomials report 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Evaluates every coefficient numerically, producing the complex
    /// polynomial the analysis pipeline consumes. `resolve` supplies the
    /// value of each referenced edge weight.
    #[must_use]
    pub fn to_numeric<F>(&self, pool: &ExprPool, resolve: &F) -> CPoly
    where
        F: Fn(EdgeId) -> CScalar,
    {
        CPoly::new(
            self.coeffs
                .iter()
                .map(|c| pool.eval(c.expr, resolve) * c.factor)
                .collect(),
        )
    }
}
