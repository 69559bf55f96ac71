//! Deduplicating storage for symbolic gain expressions.
//!
//! Expression nodes live in an arena and are addressed by handle; every
//! constructor interns through a structural key, so a subexpression built
//! twice occupies one slot and compares equal by handle. The sharing keeps
//! the inclusion-exclusion sums of the gain formula from materializing the
//! same loop-gain products over and over.

use std::collections::HashMap;

use crate::graph::EdgeId;
use crate::math::{CScalar, Scalar};

/// Handle to an expression owned by an [`ExprPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

impl ExprId {
    /// Arena position of the expression.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of a symbolic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value.
    Const(Scalar),
    /// The weight attached to a graph edge.
    Weight(EdgeId),
    /// Sum of previously pooled expressions.
    Sum(Vec<ExprId>),
    /// Product of previously pooled expressions.
    Product(Vec<ExprId>),
}

/// Interning key. Constants hash on their bit pattern so lookup is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ExprKey {
    Const(u64),
    Weight(u32),
    Sum(Vec<u32>),
    Product(Vec<u32>),
}

/// Sole owner of expression nodes; callers hold [`ExprId`] handles.
#[derive(Debug, Clone, Default)]
pub struct ExprPool {
    nodes: Vec<Expr>,
    interned: HashMap<ExprKey, ExprId>,
}

impl ExprPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pooled expression nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolves a handle. Handles stay valid for the pool's lifetime.
    #[must_use]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.nodes[id.index()]
    }

    fn intern(&mut self, key: ExprKey, node: Expr) -> ExprId {
        if let Some(&id) = self.interned.get(&key) {
            return id;
        }
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.interned.insert(key, id);
        id
    }

    /// Pools a literal value.
    pub fn constant(&mut self, value: Scalar) -> ExprId {
        self.intern(ExprKey::Const(value.to_bits()), Expr::Const(value))
    }

    /// Pools a reference to an edge's weight.
    pub fn weight(&mut self, edge: EdgeId) -> ExprId {
        self.intern(ExprKey::Weight(edge.0), Expr::Weight(edge))
    }

    /// Pools a sum. An empty sum folds to `0`, a one-element sum to its
    /// element.
    pub fn sum(&mut self, terms: Vec<ExprId>) -> ExprId {
        match terms.len() {
            0 => self.constant(0.0),
            1 => terms[0],
            _ => {
                let key = ExprKey::Sum(terms.iter().map(|t| t.0).collect());
                self.intern(key, Expr::Sum(terms))
            }
        }
    }

    /// Pools a product. An empty product folds to `1`, a one-element
    /// product to its element.
    pub fn product(&mut self, factors: Vec<ExprId>) -> ExprId {
        match factors.len() {
            0 => self.constant(1.0),
            1 => factors[0],
            _ => {
                let key = ExprKey::Product(factors.iter().map(|f| f.0).collect());
                self.intern(key, Expr::Product(factors))
            }
        }
    }

    /// Evaluates an expression numerically. `resolve` supplies the value of
    /// each referenced edge weight.
    pub fn eval<F>(&self, id: ExprId, resolve: &F) -> CScalar
    where
        F: Fn(EdgeId) -> CScalar,
    {
        match self.get(id) {
            Expr::Const(value) => CScalar::new(*value, 0.0),
            Expr::Weight(edge) => resolve(*edge),
            Expr::Sum(terms) => terms.iter().map(|&t| self.eval(t, resolve)).sum(),
            Expr::Product(factors) => factors.iter().map(|&f| self.eval(f, resolve)).product(),
        }
    }

    /// Renders an expression for diagnostics. Edge weights print as `w<i>`.
    #[must_use]
    pub fn format(&self, id: ExprId) -> String {
        match self.get(id) {
            Expr::Const(value) => format!("{value}"),
            Expr::Weight(edge) => format!("w{}", edge.index()),
            Expr::Sum(terms) => {
                let parts: Vec<String> = terms.iter().map(|&t| self.format(t)).collect();
                format!("({})", parts.join(" + "))
            }
            Expr::Product(factors) => {
                let parts: Vec<String> = factors.iter().map(|&f| self.format(f)).collect();
                parts.join("*")
            }
        }
    }
}
