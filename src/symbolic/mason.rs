//! Transfer-function assembly from forward paths and loop gains.
//!
//! The end-to-end gain between two nodes is the alternating-sign
//! inclusion-exclusion over loop gains: the graph determinant collects
//! every combination of mutually nontouching loops, and each forward path
//! contributes its gain scaled by the determinant of the subgraph it does
//! not touch. All terms are pooled, so identical loop-gain products appear
//! once no matter how many determinants reference them.

use crate::errors::SfgError;
use crate::graph::nontouching::{path_nodes, NodeMask};
use crate::graph::{find_forward_paths, find_loops, Graph, NodeId, Path};

use super::pool::{ExprId, ExprPool};

/// Symbolic transfer function kept as a numerator/denominator pair. The
/// ratio stays unformed; callers evaluate or extract the two sides
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferFunction {
    /// Sum of forward-path gains, each scaled by its subgraph determinant.
    pub numerator: ExprId,
    /// Graph determinant.
    pub denominator: ExprId,
}

/// Assembles the symbolic transfer function between `input` and `output`.
///
/// Returns [`SfgError::Disconnected`] when no forward path exists (the
/// distinguishable "gain is identically zero" outcome, not a fault) and
/// [`SfgError::InvalidNode`] when either endpoint is not live.
pub fn calc_expr(
    graph: &Graph,
    pool: &mut ExprPool,
    input: NodeId,
    output: NodeId,
) -> Result<TransferFunction, SfgError> {
    let paths = find_forward_paths(graph, input, output)?;
    if paths.is_empty() {
        return Err(SfgError::Disconnected);
    }
    let loops = find_loops(graph)?;

    let mut loop_gains = Vec::with_capacity(loops.len());
    let mut loop_masks = Vec::with_capacity(loops.len());
    for cycle in &loops {
        loop_gains.push(walk_gain(graph, pool, cycle)?);
        loop_masks.push(path_nodes(graph, cycle)?);
    }
    let everything: Vec<usize> = (0..loop_gains.len()).collect();
    let denominator = determinant_over(pool, &loop_gains, &loop_masks, &everything);

    let one = pool.constant(1.0);
    let mut terms = Vec::with_capacity(paths.len());
    for path in &paths {
        let mask = path_nodes(graph, path)?;
        let candidates: Vec<usize> = everything
            .iter()
            .copied()
            .filter(|&i| !loop_masks[i].intersects(&mask))
            .collect();
        let sub_determinant = determinant_over(pool, &loop_gains, &loop_masks, &candidates);
        let path_gain = walk_gain(graph, pool, path)?;
        terms.push(if sub_determinant == one {
            path_gain
        } else {
            pool.product(vec![path_gain, sub_determinant])
        });
    }
    let numerator = pool.sum(terms);
    Ok(TransferFunction {
        numerator,
        denominator,
    })
}

/// Graph determinant on its own: `1 - ΣL_i + ΣL_iL_j - …` over mutually
/// nontouching loop combinations.
pub fn graph_determinant(graph: &Graph, pool: &mut ExprPool) -> Result<ExprId, SfgError> {
    let loops = find_loops(graph)?;
    let mut loop_gains = Vec::with_capacity(loops.len());
    let mut loop_masks = Vec::with_capacity(loops.len());
    for cycle in &loops {
        loop_gains.push(walk_gain(graph, pool, cycle)?);
        loop_masks.push(path_nodes(graph, cycle)?);
    }
    let everything: Vec<usize> = (0..loop_gains.len()).collect();
    Ok(determinant_over(pool, &loop_gains, &loop_masks, &everything))
}

/// Product of the edge weights along a walk.
fn walk_gain(graph: &Graph, pool: &mut ExprPool, walk: Path<'_>) -> Result<ExprId, SfgError> {
    let mut factors = Vec::with_capacity(walk.len());
    for id in walk.edge_ids() {
        factors.push(graph.edge(id)?.weight());
    }
    Ok(pool.product(factors))
}

/// Alternating-sign sum over all mutually nontouching combinations drawn
/// from `candidates`: `1` plus one signed product per combination.
fn determinant_over(
    pool: &mut ExprPool,
    gains: &[ExprId],
    masks: &[NodeMask],
    candidates: &[usize],
) -> ExprId {
    let mut terms = vec![pool.constant(1.0)];
    let minus_one = pool.constant(-1.0);
    let mut chosen = Vec::new();
    grow_combinations(pool, gains, masks, candidates, minus_one, &mut chosen, &mut terms);
    pool.sum(terms)
}

fn grow_combinations(
    pool: &mut ExprPool,
    gains: &[ExprId],
    masks: &[NodeMask],
    candidates: &[usize],
    minus_one: ExprId,
    chosen: &mut Vec<ExprId>,
    terms: &mut Vec<ExprId>,
) {
    for (position, &index) in candidates.iter().enumerate() {
        chosen.push(gains[index]);
        let mut product = chosen.clone();
        // Odd-size combinations subtract.
        if chosen.len() % 2 == 1 {
            product.insert(0, minus_one);
        }
        terms.push(pool.product(product));
        // Later candidates were already nontouching with every earlier
        // choice; filtering against the newest choice keeps the set mutual.
        let rest: Vec<usize> = candidates[position + 1..]
            .iter()
            .copied()
            .filter(|&j| !masks[j].intersects(&masks[index]))
            .collect();
        if !rest.is_empty() {
            grow_combinations(pool, gains, masks, &rest, minus_one, chosen, terms);
        }
        chosen.pop();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::graph::EdgeId;
    use crate::math::CScalar;

    fn real(value: f64) -> CScalar {
        CScalar::new(value, 0.0)
    }

    #[test]
    fn loop_free_graph_reduces_to_path_sum() {
        let mut pool = ExprPool::new();
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let c = graph.add_node("c").unwrap();
        let g0 = pool.constant(2.0);
        let g1 = pool.constant(3.0);
        let g2 = pool.constant(5.0);
        graph.add_edge(a, b, g0).unwrap();
        graph.add_edge(b, c, g1).unwrap();
        graph.add_edge(a, c, g2).unwrap();

        let tf = calc_expr(&graph, &mut pool, a, c).unwrap();
        let one = pool.constant(1.0);
        assert_eq!(tf.denominator, one);
        let resolve = |_: EdgeId| real(0.0);
        let numerator = pool.eval(tf.numerator, &resolve);
        assert_relative_eq!(numerator.re, 11.0, epsilon = 1.0e-12);
    }

    #[test]
    fn single_feedback_loop_matches_closed_form() {
        // Forward gain G with feedback H: gain G / (1 - G*H).
        let mut pool = ExprPool::new();
        let mut graph = Graph::new();
        let a = graph.add_node("in").unwrap();
        let b = graph.add_node("out").unwrap();
        graph.add_variable_edge(a, b, &mut pool).unwrap();
        graph.add_variable_edge(b, a, &mut pool).unwrap();

        let tf = calc_expr(&graph, &mut pool, a, b).unwrap();
        let resolve = |edge: EdgeId| match edge.index() {
            0 => real(2.0),
            _ => real(0.25),
        };
        let numerator = pool.eval(tf.numerator, &resolve);
        let denominator = pool.eval(tf.denominator, &resolve);
        assert_relative_eq!(numerator.re, 2.0, epsilon = 1.0e-12);
        assert_relative_eq!(denominator.re, 0.5, epsilon = 1.0e-12);
        let gain = numerator / denominator;
        assert_relative_eq!(gain.re, 4.0, epsilon = 1.0e-12);
    }

    #[test]
    fn nontouching_loops_contribute_pair_products() {
        let mut pool = ExprPool::new();
        let mut graph = Graph::new();
        let n0 = graph.add_node("n0").unwrap();
        let n1 = graph.add_node("n1").unwrap();
        let l0 = pool.constant(0.5);
        let l1 = pool.constant(0.25);
        graph.add_edge(n0, n0, l0).unwrap();
        graph.add_edge(n1, n1, l1).unwrap();

        let delta = graph_determinant(&graph, &mut pool).unwrap();
        let resolve = |_: EdgeId| real(0.0);
        let value = pool.eval(delta, &resolve);
        // 1 - 0.5 - 0.25 + 0.5*0.25
        assert_relative_eq!(value.re, 0.375, epsilon = 1.0e-12);
    }

    #[test]
    fn touching_loops_have_no_pair_term() {
        let mut pool = ExprPool::new();
        let mut graph = Graph::new();
        let n0 = graph.add_node("n0").unwrap();
        let l0 = pool.constant(0.5);
        let l1 = pool.constant(0.25);
        graph.add_edge(n0, n0, l0).unwrap();
        graph.add_edge(n0, n0, l1).unwrap();

        let delta = graph_determinant(&graph, &mut pool).unwrap();
        let resolve = |_: EdgeId| real(0.0);
        let value = pool.eval(delta, &resolve);
        // 1 - 0.5 - 0.25, no pair: the loops share their node.
        assert_relative_eq!(value.re, 0.25, epsilon = 1.0e-12);
    }

    #[test]
    fn disconnected_endpoints_report_zero_gain() {
        let mut pool = ExprPool::new();
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        assert_eq!(
            calc_expr(&graph, &mut pool, a, b),
            Err(SfgError::Disconnected)
        );
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let mut pool = ExprPool::new();
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        assert_eq!(
            calc_expr(&graph, &mut pool, a, NodeId(9)),
            Err(SfgError::InvalidNode(9))
        );
    }

    #[test]
    fn shared_subterms_are_pooled_once() {
        // Two paths over the same feedback loop: both subgraph determinants
        // intern to the same handle.
        let mut pool = ExprPool::new();
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let c = graph.add_node("c").unwrap();
        let g0 = pool.constant(2.0);
        let g1 = pool.constant(3.0);
        let h = pool.constant(0.5);
        graph.add_edge(a, c, g0).unwrap();
        graph.add_edge(a, c, g1).unwrap();
        graph.add_edge(b, b, h).unwrap();

        let tf = calc_expr(&graph, &mut pool, a, c).unwrap();
        // Both paths reuse the same interned subgraph determinant, and a
        // repeated assembly adds nothing to the pool.
        let settled = pool.len();
        let again = calc_expr(&graph, &mut pool, a, c).unwrap();
        assert_eq!(pool.len(), settled);
        assert_eq!(again, tf);
        let resolve = |_: EdgeId| real(0.0);
        let numerator = pool.eval(tf.numerator, &resolve);
        let denominator = pool.eval(tf.denominator, &resolve);
        assert_relative_eq!(numerator.re, 2.5, epsilon = 1.0e-12);
        assert_relative_eq!(denominator.re, 0.5, epsilon = 1.0e-12);
    }
}
