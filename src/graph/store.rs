//! Index-addressed node and edge storage with intrusive adjacency lists.
//!
//! Nodes and edges live in two growable arenas and are addressed by stable
//! `u32` indices, so handles survive reallocation of the backing storage.
//! Adjacency is threaded through the edge slots themselves: every edge
//! carries the index of the next outgoing edge of its source and the next
//! incoming edge of its target, with `u32::MAX` terminating each list.
//! Removal unlinks the slot from both lists and leaves a tombstone so that
//! stale handles are rejected instead of resolving to recycled data.

use crate::errors::SfgError;
use crate::symbolic::{ExprId, ExprPool};

/// List terminator. Never a valid arena index.
pub(crate) const NIL: u32 = u32::MAX;

/// Stable handle to a node slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Arena position of the node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable handle to an edge slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Arena position of the edge.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A graph node: a name plus the heads of its two adjacency lists.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    first_out: u32,
    first_in: u32,
    alive: bool,
}

impl Node {
    /// Human-readable identifier (opaque to the algorithms).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A directed edge carrying a symbolic weight.
#[derive(Debug, Clone)]
pub struct Edge {
    weight: ExprId,
    source: NodeId,
    target: NodeId,
    next_out: u32,
    next_in: u32,
    alive: bool,
}

impl Edge {
    /// Handle of the pooled weight expression.
    #[must_use]
    pub fn weight(&self) -> ExprId {
        self.weight
    }

    /// Source node of the edge.
    #[must_use]
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Target node of the edge.
    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }
}

/// Owning store for one signal-flow graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    live_nodes: usize,
    live_edges: usize,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.live_nodes
    }

    /// Number of live edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    /// Arena length of the node store, counting tombstones. Visited-set
    /// buffers are sized from this.
    #[must_use]
    pub fn node_slots(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts a node and returns its handle.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<NodeId, SfgError> {
        self.nodes
            .try_reserve(1)
            .map_err(|_| SfgError::AllocationFailure("node arena"))?;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.into(),
            first_out: NIL,
            first_in: NIL,
            alive: true,
        });
        self.live_nodes += 1;
        Ok(id)
    }

    /// Inserts an edge between two live nodes and returns its handle. The
    /// new edge becomes the head of both endpoints' adjacency lists, so
    /// iteration visits edges newest-first.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        weight: ExprId,
    ) -> Result<EdgeId, SfgError> {
        self.node(source)?;
        self.node(target)?;
        self.edges
            .try_reserve(1)
            .map_err(|_| SfgError::AllocationFailure("edge arena"))?;
        let id = EdgeId(self.edges.len() as u32);
        let next_out = self.nodes[source.index()].first_out;
        let next_in = self.nodes[target.index()].first_in;
        self.edges.push(Edge {
            weight,
            source,
            target,
            next_out,
            next_in,
            alive: true,
        });
        self.nodes[source.index()].first_out = id.0;
        self.nodes[target.index()].first_in = id.0;
        self.live_edges += 1;
        Ok(id)
    }

    /// Inserts an edge whose weight is its own pooled reference, for gains
    /// resolved at evaluation time rather than fixed at build time.
    pub fn add_variable_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        pool: &mut ExprPool,
    ) -> Result<EdgeId, SfgError> {
        self.node(source)?;
        self.node(target)?;
        let weight = pool.weight(EdgeId(self.edges.len() as u32));
        self.add_edge(source, target, weight)
    }

    /// Resolves a node handle, rejecting tombstones and stray indices.
    pub fn node(&self, id: NodeId) -> Result<&Node, SfgError> {
        self.nodes
            .get(id.index())
            .filter(|node| node.alive)
            .ok_or(SfgError::InvalidNode(id.index()))
    }

    /// Resolves an edge handle, rejecting tombstones and stray indices.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge, SfgError> {
        self.edges
            .get(id.index())
            .filter(|edge| edge.alive)
            .ok_or(SfgError::InvalidEdge(id.index()))
    }

    /// Live node handles in index order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.alive)
            .map(|(index, _)| NodeId(index as u32))
    }

    /// Iterates the outgoing edges of `node` in list order.
    pub fn out_edges(&self, node: NodeId) -> Result<EdgeIter<'_>, SfgError> {
        Ok(EdgeIter {
            graph: self,
            cursor: self.node(node)?.first_out,
            incoming: false,
        })
    }

    /// Iterates the incoming edges of `node` in list order.
    pub fn in_edges(&self, node: NodeId) -> Result<EdgeIter<'_>, SfgError> {
        Ok(EdgeIter {
            graph: self,
            cursor: self.node(node)?.first_in,
            incoming: true,
        })
    }

    /// Removes an edge, unlinking it from both adjacency lists.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<(), SfgError> {
        self.edge(id)?;
        self.unlink_out(id);
        self.unlink_in(id);
        let slot = &mut self.edges[id.index()];
        slot.alive = false;
        slot.next_out = NIL;
        slot.next_in = NIL;
        self.live_edges -= 1;
        Ok(())
    }

    /// Removes a node together with every incident edge.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), SfgError> {
        self.node(id)?;
        loop {
            let head = self.nodes[id.index()].first_out;
            if head == NIL {
                break;
            }
            self.remove_edge(EdgeId(head))?;
        }
        loop {
            let head = self.nodes[id.index()].first_in;
            if head == NIL {
                break;
            }
            self.remove_edge(EdgeId(head))?;
        }
        self.nodes[id.index()].alive = false;
        self.live_nodes -= 1;
        Ok(())
    }

    fn unlink_out(&mut self, id: EdgeId) {
        let source = self.edges[id.index()].source;
        let after = self.edges[id.index()].next_out;
        if self.nodes[source.index()].first_out == id.0 {
            self.nodes[source.index()].first_out = after;
            return;
        }
        let mut cursor = self.nodes[source.index()].first_out;
        while cursor != NIL {
            let next = self.edges[cursor as usize].next_out;
            if next == id.0 {
                self.edges[cursor as usize].next_out = after;
                return;
            }
            cursor = next;
        }
    }

    fn unlink_in(&mut self, id: EdgeId) {
        let target = self.edges[id.index()].target;
        let after = self.edges[id.index()].next_in;
        if self.nodes[target.index()].first_in == id.0 {
            self.nodes[target.index()].first_in = after;
            return;
        }
        let mut cursor = self.nodes[target.index()].first_in;
        while cursor != NIL {
            let next = self.edges[cursor as usize].next_in;
            if next == id.0 {
                self.edges[cursor as usize].next_in = after;
                return;
            }
            cursor = next;
        }
    }
}

/// Iterator over one adjacency list.
#[derive(Debug, Clone)]
pub struct EdgeIter<'a> {
    graph: &'a Graph,
    cursor: u32,
    incoming: bool,
}

impl Iterator for EdgeIter<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        if self.cursor == NIL {
            return None;
        }
        let id = EdgeId(self.cursor);
        let edge = &self.graph.edges[self.cursor as usize];
        self.cursor = if self.incoming {
            edge.next_in
        } else {
            edge.next_out
        };
        Some(id)
    }
}
