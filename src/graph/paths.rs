//! Forward-path and loop enumeration.
//!
//! Every discovered path is appended to one shared buffer of edge indices,
//! each run closed by the reserved terminator value. Iteration hands out
//! borrowed views by scanning to the next terminator, so enumerating an
//! exponential family of paths costs one allocation stream instead of one
//! allocation per path.

use crate::errors::SfgError;

use super::store::{EdgeId, Graph, NodeId};

/// Reserved terminator closing each path inside the shared buffer. Never a
/// valid edge index.
pub(crate) const PATH_END: u32 = u32::MAX;

/// A packed collection of paths or loops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    buf: Vec<u32>,
    count: usize,
}

impl PathSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when no path is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Appends one path given as raw edge indices.
    pub(crate) fn push(&mut self, edges: &[u32]) {
        debug_assert!(edges.iter().all(|&e| e != PATH_END));
        self.buf.extend_from_slice(edges);
        self.buf.push(PATH_END);
        self.count += 1;
    }

    /// Iterates the stored paths in insertion order.
    #[must_use]
    pub fn iter(&self) -> PathIter<'_> {
        PathIter { buf: &self.buf }
    }

    /// Returns the path at `index`, scanning the shared buffer.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Path<'_>> {
        self.iter().nth(index)
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = Path<'a>;
    type IntoIter = PathIter<'a>;

    fn into_iter(self) -> PathIter<'a> {
        self.iter()
    }
}

/// Borrowed view of one path: a run of edge indices in walk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Path<'a> {
    edges: &'a [u32],
}

impl<'a> Path<'a> {
    /// Number of edges on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True for a zero-length walk.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge handles in walk order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + 'a {
        self.edges.iter().map(|&raw| EdgeId(raw))
    }

    pub(crate) fn raw(&self) -> &'a [u32] {
        self.edges
    }
}

/// Cursor over the shared path buffer.
#[derive(Debug, Clone)]
pub struct PathIter<'a> {
    buf: &'a [u32],
}

impl<'a> Iterator for PathIter<'a> {
    type Item = Path<'a>;

    fn next(&mut self) -> Option<Path<'a>> {
        let end = self.buf.iter().position(|&raw| raw == PATH_END)?;
        let path = Path {
            edges: &self.buf[..end],
        };
        self.buf = &self.buf[end + 1..];
        Some(path)
    }
}

/// Enumerates every simple directed path from `input` to `output`.
///
/// Depth-first search: the walk extends along each outgoing edge whose
/// target is not already on the walk, records a path whenever `output` is
/// reached, and backtracks otherwise. Discovery order follows the
/// adjacency-list order at every branch point. `input == output` yields an
/// empty set; a zero-length walk is not a path.
pub fn find_forward_paths(
    graph: &Graph,
    input: NodeId,
    output: NodeId,
) -> Result<PathSet, SfgError> {
    graph.node(input)?;
    graph.node(output)?;
    let mut found = PathSet::new();
    if input == output {
        return Ok(found);
    }
    let mut visited = vec![false; graph.node_slots()];
    let mut walk = Vec::new();
    visited[input.index()] = true;
    descend_paths(graph, input, output, &mut visited, &mut walk, &mut found)?;
    Ok(found)
}

fn descend_paths(
    graph: &Graph,
    current: NodeId,
    output: NodeId,
    visited: &mut [bool],
    walk: &mut Vec<u32>,
    found: &mut PathSet,
) -> Result<(), SfgError> {
    for id in graph.out_edges(current)? {
        let target = graph.edge(id)?.target();
        graph.node(target)?;
        if target == output {
            walk.push(id.0);
            found.push(walk);
            walk.pop();
        } else if !visited[target.index()] {
            visited[target.index()] = true;
            walk.push(id.0);
            descend_paths(graph, target, output, visited, walk, found)?;
            walk.pop();
            visited[target.index()] = false;
        }
    }
    Ok(())
}

/// Enumerates every simple directed cycle in the graph.
///
/// Each cycle is reported exactly once, anchored at its lowest-index node:
/// the search rooted at node `s` only walks through nodes of strictly
/// greater index and records a loop on any edge returning to `s`. A
/// self-loop is the minimal case. Enumeration order is deterministic:
/// ascending anchor index, then adjacency-list order at each branch point.
pub fn find_loops(graph: &Graph) -> Result<PathSet, SfgError> {
    let mut found = PathSet::new();
    let mut visited = vec![false; graph.node_slots()];
    let mut walk = Vec::new();
    for anchor in graph.node_ids() {
        visited[anchor.index()] = true;
        descend_loops(graph, anchor, anchor, &mut visited, &mut walk, &mut found)?;
        visited[anchor.index()] = false;
    }
    Ok(found)
}

fn descend_loops(
    graph: &Graph,
    current: NodeId,
    anchor: NodeId,
    visited: &mut [bool],
    walk: &mut Vec<u32>,
    found: &mut PathSet,
) -> Result<(), SfgError> {
    for id in graph.out_edges(current)? {
        let target = graph.edge(id)?.target();
        graph.node(target)?;
        if target == anchor {
            walk.push(id.0);
            found.push(walk);
            walk.pop();
        } else if target.index() > anchor.index() && !visited[target.index()] {
            visited[target.index()] = true;
            walk.push(id.0);
            descend_loops(graph, target, anchor, visited, walk, found)?;
            walk.pop();
            visited[target.index()] = false;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::ExprPool;

    fn diamond() -> (Graph, NodeId, NodeId) {
        let mut pool = ExprPool::new();
        let w = pool.constant(1.0);
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let c = graph.add_node("c").unwrap();
        let d = graph.add_node("d").unwrap();
        graph.add_edge(a, b, w).unwrap();
        graph.add_edge(a, c, w).unwrap();
        graph.add_edge(b, d, w).unwrap();
        graph.add_edge(c, d, w).unwrap();
        graph.add_edge(a, d, w).unwrap();
        (graph, a, d)
    }

    #[test]
    fn forward_paths_are_exhaustive_and_simple() {
        let (graph, a, d) = diamond();
        let paths = find_forward_paths(&graph, a, d).unwrap();
        assert_eq!(paths.len(), 3);
        for path in &paths {
            let first = graph.edge(path.edge_ids().next().unwrap()).unwrap();
            assert_eq!(first.source(), a);
            let mut seen = vec![false; graph.node_slots()];
            seen[a.index()] = true;
            let mut last = a;
            for id in path.edge_ids() {
                let edge = graph.edge(id).unwrap();
                assert_eq!(edge.source(), last);
                last = edge.target();
                assert!(!seen[last.index()], "node revisited on a simple path");
                seen[last.index()] = true;
            }
            assert_eq!(last, d);
        }
    }

    #[test]
    fn forward_paths_follow_adjacency_order() {
        let (graph, a, d) = diamond();
        let paths = find_forward_paths(&graph, a, d).unwrap();
        let lengths: Vec<usize> = paths.iter().map(|p| p.len()).collect();
        // Newest edge first at every branch: the direct a->d edge leads.
        assert_eq!(lengths, vec![1, 2, 2]);
    }

    #[test]
    fn same_input_and_output_yields_no_paths() {
        let (graph, a, _) = diamond();
        let paths = find_forward_paths(&graph, a, a).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn loops_cover_self_loops_and_cycles_once() {
        let mut pool = ExprPool::new();
        let w = pool.constant(1.0);
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let c = graph.add_node("c").unwrap();
        graph.add_edge(a, a, w).unwrap();
        graph.add_edge(b, c, w).unwrap();
        graph.add_edge(c, b, w).unwrap();
        let loops = find_loops(&graph).unwrap();
        // One self-loop plus one two-edge cycle, the latter anchored at b.
        assert_eq!(loops.len(), 2);
        let lengths: Vec<usize> = loops.iter().map(|l| l.len()).collect();
        assert_eq!(lengths, vec![1, 2]);
        let cycle = loops.get(1).unwrap();
        let first = graph.edge(cycle.edge_ids().next().unwrap()).unwrap();
        assert_eq!(first.source(), b);
    }

    #[test]
    fn three_cycle_is_not_reported_per_rotation() {
        let mut pool = ExprPool::new();
        let w = pool.constant(1.0);
        let mut graph = Graph::new();
        let n0 = graph.add_node("n0").unwrap();
        let n1 = graph.add_node("n1").unwrap();
        let n2 = graph.add_node("n2").unwrap();
        graph.add_edge(n0, n1, w).unwrap();
        graph.add_edge(n1, n2, w).unwrap();
        graph.add_edge(n2, n0, w).unwrap();
        let loops = find_loops(&graph).unwrap();
        assert_eq!(loops.len(), 1);
        let cycle = loops.get(0).unwrap();
        assert_eq!(cycle.len(), 3);
        let first = graph.edge(cycle.edge_ids().next().unwrap()).unwrap();
        assert_eq!(first.source(), n0);
    }

    #[test]
    fn packed_buffer_round_trips_paths() {
        let mut set = PathSet::new();
        set.push(&[4, 1]);
        set.push(&[]);
        set.push(&[9]);
        assert_eq!(set.len(), 3);
        let collected: Vec<Vec<u32>> = set.iter().map(|p| p.raw().to_vec()).collect();
        assert_eq!(collected, vec![vec![4, 1], vec![], vec![9]]);
        assert!(set.get(1).unwrap().is_empty());
        assert_eq!(set.get(3), None);
    }
}
