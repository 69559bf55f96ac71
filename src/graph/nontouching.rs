//! Node-disjointness filtering between paths and loops.

use crate::errors::SfgError;

use super::paths::{Path, PathSet};
use super::store::{Graph, NodeId};

/// Bit set over the node arena.
#[derive(Debug, Clone)]
pub(crate) struct NodeMask {
    bits: Vec<u64>,
}

impl NodeMask {
    pub(crate) fn new(slots: usize) -> Self {
        Self {
            bits: vec![0; slots.div_ceil(64)],
        }
    }

    pub(crate) fn insert(&mut self, node: NodeId) {
        self.bits[node.index() / 64] |= 1 << (node.index() % 64);
    }

    pub(crate) fn intersects(&self, other: &Self) -> bool {
        self.bits
            .iter()
            .zip(&other.bits)
            .any(|(a, b)| a & b != 0)
    }
}

/// Collects the set of nodes a path visits.
pub(crate) fn path_nodes(graph: &Graph, path: Path<'_>) -> Result<NodeMask, SfgError> {
    let mut mask = NodeMask::new(graph.node_slots());
    for id in path.edge_ids() {
        let edge = graph.edge(id)?;
        mask.insert(edge.source());
        mask.insert(edge.target());
    }
    Ok(mask)
}

/// Returns the sublist of `paths` sharing no node with `check`, preserving
/// the original relative order.
///
/// The test is node-based: two paths with disjoint edge sets still touch
/// when any node is common to both.
pub fn find_nontouching(
    graph: &Graph,
    paths: &PathSet,
    check: Path<'_>,
) -> Result<PathSet, SfgError> {
    let check_mask = path_nodes(graph, check)?;
    let mut kept = PathSet::new();
    for path in paths {
        if !path_nodes(graph, path)?.intersects(&check_mask) {
            kept.push(path.raw());
        }
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::ExprPool;

    #[test]
    fn disjoint_paths_pass_and_touching_paths_are_dropped() {
        let mut pool = ExprPool::new();
        let w = pool.constant(1.0);
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let c = graph.add_node("c").unwrap();
        let d = graph.add_node("d").unwrap();
        let ab = graph.add_edge(a, b, w).unwrap();
        let cd = graph.add_edge(c, d, w).unwrap();
        let bc = graph.add_edge(b, c, w).unwrap();

        let mut candidates = PathSet::new();
        candidates.push(&[cd.0]);
        candidates.push(&[bc.0]);
        let mut check = PathSet::new();
        check.push(&[ab.0]);

        let kept = find_nontouching(&graph, &candidates, check.get(0).unwrap()).unwrap();
        // c->d shares no node with a->b; b->c touches it at b.
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.get(0).unwrap().raw(), &[cd.0]);
    }

    #[test]
    fn shared_node_without_shared_edge_still_touches() {
        let mut pool = ExprPool::new();
        let w = pool.constant(1.0);
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let c = graph.add_node("c").unwrap();
        let ab = graph.add_edge(a, b, w).unwrap();
        let bc = graph.add_edge(b, c, w).unwrap();

        let mut candidates = PathSet::new();
        candidates.push(&[bc.0]);
        let mut check = PathSet::new();
        check.push(&[ab.0]);

        let kept = find_nontouching(&graph, &candidates, check.get(0).unwrap()).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn order_of_survivors_is_preserved() {
        let mut pool = ExprPool::new();
        let w = pool.constant(1.0);
        let mut graph = Graph::new();
        let nodes: Vec<_> = (0..8).map(|i| graph.add_node(format!("n{i}")).unwrap()).collect();
        let e0 = graph.add_edge(nodes[2], nodes[3], w).unwrap();
        let e1 = graph.add_edge(nodes[4], nodes[5], w).unwrap();
        let e2 = graph.add_edge(nodes[6], nodes[7], w).unwrap();
        let check_edge = graph.add_edge(nodes[0], nodes[1], w).unwrap();

        let mut candidates = PathSet::new();
        candidates.push(&[e0.0]);
        candidates.push(&[e1.0]);
        candidates.push(&[e2.0]);
        let mut check = PathSet::new();
        check.push(&[check_edge.0]);

        let kept = find_nontouching(&graph, &candidates, check.get(0).unwrap()).unwrap();
        let raw: Vec<&[u32]> = kept.iter().map(|p| p.raw()).collect();
        assert_eq!(raw, vec![&[e0.0][..], &[e1.0][..], &[e2.0][..]]);
    }
}
