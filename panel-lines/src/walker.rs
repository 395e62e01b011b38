//! The edge-walk traversal engine.
//!
//! [`EdgeWalker`] owns the per-session traversal state: the current
//! `(edge, vertex)` position, the sets of traversed vertices and edges, the
//! per-vertex traversed-edge counts, and the current sub-walk path.  The
//! walker exposes two stepping primitives — [`forward`](EdgeWalker::forward)
//! follows the edge loop straight across the next quad,
//! [`turn`](EdgeWalker::turn) picks a random side edge — and the query
//! primitives the orchestrator uses to select restart points between
//! sub-walks.
//!
//! The walker's position convention: `current_vertex` is the *tail* of
//! `current_edge`, i.e. the walk moves from the current vertex across the
//! current edge towards its other endpoint.  A step finding no continuation
//! leaves `current_edge` unset, which invalidates the walker until the next
//! [`start`](EdgeWalker::start).

use tracing::trace;

use crate::error::{Error, Result};
use crate::topology::QuadTopology;
use crate::{EdgeIndex, VertexIndex};

/// Stateful walker over the loop topology of one [`QuadTopology`] snapshot.
///
/// One walker is created per generation run and discarded afterwards.  The
/// traversed sets only grow; a restart ([`start`](Self::start)) resets the
/// current sub-walk path but never the session-wide sets.
#[derive(Debug)]
pub struct EdgeWalker<'a> {
    topology: &'a QuadTopology,
    current_vertex: Option<VertexIndex>,
    current_edge: Option<EdgeIndex>,
    traversed_vertices: Vec<bool>,
    traversed_edges: Vec<bool>,
    traversed_vertex_count: usize,
    traversed_edge_count: usize,
    /// Per-vertex count of traversed incident edges; 0 = untouched,
    /// 1 = open dead end, 2 = bi-connected.
    edge_count_by_vertex: Vec<u32>,
    current_path: Vec<VertexIndex>,
    current_path_corners: Vec<VertexIndex>,
}

impl<'a> EdgeWalker<'a> {
    /// Creates a walker with empty traversal state.
    pub fn new(topology: &'a QuadTopology) -> Self {
        Self {
            topology,
            current_vertex: None,
            current_edge: None,
            traversed_vertices: vec![false; topology.vertex_count()],
            traversed_edges: vec![false; topology.edge_count()],
            traversed_vertex_count: 0,
            traversed_edge_count: 0,
            edge_count_by_vertex: vec![0; topology.vertex_count()],
            current_path: Vec::new(),
            current_path_corners: Vec::new(),
        }
    }

    /// Starts a (sub-)walk at `vertex`, heading across `edge`.
    ///
    /// The vertex must be one of the edge's endpoints.  Both are marked
    /// traversed immediately; the current sub-walk path and its corner list
    /// are reset.
    pub fn start(&mut self, edge: EdgeIndex, vertex: VertexIndex) -> Result<()> {
        if self.topology.opposite_vertex(edge, vertex).is_none() {
            return Err(Error::VertexNotOnEdge { edge, vertex });
        }
        trace!(edge = edge.0, vertex = vertex.0, "walk start");
        self.current_edge = Some(edge);
        self.current_vertex = Some(vertex);
        self.current_path.clear();
        self.current_path_corners.clear();
        self.mark_current_traversed();
        Ok(())
    }

    /// Returns `true` while the walker has both a current edge and a current
    /// vertex.  A step that finds no continuation invalidates the walker.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.current_vertex.is_some() && self.current_edge.is_some()
    }

    /// Returns `true` when the far endpoint of the current edge has already
    /// been traversed — the sub-walk is about to close onto the existing
    /// pattern.  Returns `false` for an invalid walker.
    pub fn ends_at_traversed_vertex(&self) -> bool {
        let (Some(edge), Some(vertex)) = (self.current_edge, self.current_vertex) else {
            return false;
        };
        self.topology
            .opposite_vertex(edge, vertex)
            .is_some_and(|other| self.traversed_vertices[usize::from(other)])
    }

    /// Advances straight through the mesh, following the edge loop.
    ///
    /// Moves the current vertex to the far endpoint of the current edge and
    /// sets the current edge to the loop-continuation edge across the next
    /// face, or to none (invalidating the walker) at a dead end, boundary
    /// or non-manifold fan.
    pub fn forward(&mut self) {
        let (Some(edge), Some(vertex)) = (self.current_edge, self.current_vertex) else {
            return;
        };
        let next = self.next_edge_in_loop(edge, vertex);
        self.current_vertex = self.topology.opposite_vertex(edge, vertex);
        self.current_edge = next;
        self.mark_current_traversed();
    }

    /// Turns onto a random side edge at the far endpoint of the current
    /// edge.
    ///
    /// The pre-turn vertex is recorded as a corner of the current sub-walk
    /// path.  An empty candidate list invalidates the walker, the same as a
    /// [`forward`](Self::forward) dead end.
    pub fn turn(&mut self, rng: &mut fastrand::Rng) {
        let (Some(edge), Some(vertex)) = (self.current_edge, self.current_vertex) else {
            return;
        };
        self.current_path_corners.push(vertex);
        let next = self.random_next_edge_after_turn(edge, vertex, rng);
        self.current_vertex = self.topology.opposite_vertex(edge, vertex);
        self.current_edge = next;
        self.mark_current_traversed();
    }

    /// The loop-continuation edge: crossing from `edge` over its far
    /// endpoint, the edge that continues the edge loop straight through the
    /// neighbouring faces.
    ///
    /// For every loop bound to the edge, the radial opposites of its
    /// previous and next loops are the face corners across the side edges;
    /// their own previous/next edges are the candidates.  The first
    /// candidate that is not the current edge and is incident to the far
    /// endpoint wins.
    fn next_edge_in_loop(&self, edge: EdgeIndex, vertex: VertexIndex) -> Option<EdgeIndex> {
        let topology = self.topology;
        let across = topology.opposite_vertex(edge, vertex)?;
        for &l in topology.loops_of_edge(edge) {
            for side in [topology.previous_loop(l), topology.next_loop(l)] {
                let Some(continuation) = topology.radial_opposite_loop(side) else {
                    continue;
                };
                for candidate in [
                    topology.previous_loop(continuation),
                    topology.next_loop(continuation),
                ] {
                    let candidate_edge = topology.loop_edge(candidate);
                    if candidate_edge != edge
                        && topology.opposite_vertex(candidate_edge, across).is_some()
                    {
                        return Some(candidate_edge);
                    }
                }
            }
        }
        None
    }

    /// A uniformly random side edge at the far endpoint of `edge`, drawn
    /// from the previous/next loops of every loop bound to the edge.
    fn random_next_edge_after_turn(
        &self,
        edge: EdgeIndex,
        vertex: VertexIndex,
        rng: &mut fastrand::Rng,
    ) -> Option<EdgeIndex> {
        let topology = self.topology;
        let across = topology.opposite_vertex(edge, vertex)?;
        let choices: Vec<EdgeIndex> = topology
            .loops_of_edge(edge)
            .iter()
            .flat_map(|&l| [topology.previous_loop(l), topology.next_loop(l)])
            .map(|side| topology.loop_edge(side))
            .filter(|&side_edge| topology.opposite_vertex(side_edge, across).is_some())
            .collect();
        if choices.is_empty() {
            None
        } else {
            Some(choices[rng.usize(..choices.len())])
        }
    }

    fn mark_current_traversed(&mut self) {
        if let Some(vertex) = self.current_vertex {
            let i = usize::from(vertex);
            if !self.traversed_vertices[i] {
                self.traversed_vertices[i] = true;
                self.traversed_vertex_count += 1;
            }
            self.current_path.push(vertex);
        }
        if let Some(edge) = self.current_edge {
            let i = usize::from(edge);
            // Counts are bumped only on first traversal so that
            // `edge_count_by_vertex` stays equal to the number of traversed
            // incident edges even when a walk re-enters a traversed edge.
            if !self.traversed_edges[i] {
                self.traversed_edges[i] = true;
                self.traversed_edge_count += 1;
                let [a, b] = self.topology.edge_endpoints(edge);
                self.edge_count_by_vertex[usize::from(a)] += 1;
                self.edge_count_by_vertex[usize::from(b)] += 1;
            }
        }
    }

    /// First vertex, in vertex-index order, with exactly one traversed
    /// incident edge — a dead end the walk can be resumed from.
    pub fn first_open_vert(&self) -> Option<VertexIndex> {
        self.edge_count_by_vertex
            .iter()
            .position(|&count| count == 1)
            .map(VertexIndex::from)
    }

    /// A uniformly random vertex that has not been traversed yet, from the
    /// whole mesh.  `None` once every vertex is traversed.
    pub fn random_non_traversed_vert(&self, rng: &mut fastrand::Rng) -> Option<VertexIndex> {
        let choices: Vec<VertexIndex> = (0..self.topology.vertex_count())
            .filter(|&i| !self.traversed_vertices[i])
            .map(VertexIndex::from)
            .collect();
        if choices.is_empty() {
            None
        } else {
            Some(choices[rng.usize(..choices.len())])
        }
    }

    /// A uniformly random vertex with exactly two traversed incident edges.
    pub fn random_bi_connected_vert(&self, rng: &mut fastrand::Rng) -> Option<VertexIndex> {
        let choices: Vec<VertexIndex> = self
            .edge_count_by_vertex
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == 2)
            .map(|(i, _)| VertexIndex::from(i))
            .collect();
        if choices.is_empty() {
            None
        } else {
            Some(choices[rng.usize(..choices.len())])
        }
    }

    /// A uniformly random non-traversed edge incident to `vertex`, drawn
    /// from the two face-corner edges of every loop at the vertex.
    ///
    /// An edge shared by two face corners appears twice in the candidate
    /// list and is accordingly twice as likely to be drawn.  `None` when
    /// `vertex` is `None` or no candidate remains.
    pub fn random_non_traversed_edge_from_vertex(
        &self,
        vertex: Option<VertexIndex>,
        rng: &mut fastrand::Rng,
    ) -> Option<EdgeIndex> {
        let vertex = vertex?;
        let topology = self.topology;
        let mut choices = Vec::new();
        for &l in topology.loops_of_vertex(vertex) {
            // The previous loop shares the vertex but has a different edge.
            for corner in [l, topology.previous_loop(l)] {
                let edge = topology.loop_edge(corner);
                if !self.traversed_edges[usize::from(edge)] {
                    choices.push(edge);
                }
            }
        }
        if choices.is_empty() {
            None
        } else {
            Some(choices[rng.usize(..choices.len())])
        }
    }

    /// If the current sub-walk ends on a vertex it already visited, returns
    /// the vertices of the enclosed loop, walking the path backwards from
    /// the current position to the closure point (exclusive).  With
    /// `corners_only` the result is restricted to vertices where a turn
    /// occurred.
    ///
    /// Returns `None` for an invalid walker or a path that does not close.
    pub fn closed_loop_segment(&self, corners_only: bool) -> Option<Vec<VertexIndex>> {
        let (Some(edge), Some(vertex)) = (self.current_edge, self.current_vertex) else {
            return None;
        };
        if !self.ends_at_traversed_vertex() {
            return None;
        }
        let endpoint = self.topology.opposite_vertex(edge, vertex)?;
        let mut segment = Vec::new();
        for &v in self.current_path.iter().rev() {
            if v == endpoint {
                return Some(segment);
            }
            if !corners_only || self.current_path_corners.contains(&v) {
                segment.push(v);
            }
        }
        None
    }

    /// Current vertex, if the walker has one.
    #[inline]
    pub fn current_vertex(&self) -> Option<VertexIndex> {
        self.current_vertex
    }

    /// Current edge, if the walker has one.
    #[inline]
    pub fn current_edge(&self) -> Option<EdgeIndex> {
        self.current_edge
    }

    /// Vertices of the current sub-walk, in visit order.
    #[inline]
    pub fn current_path(&self) -> &[VertexIndex] {
        &self.current_path
    }

    /// Subsequence of the current sub-walk path at which a turn occurred.
    #[inline]
    pub fn current_path_corners(&self) -> &[VertexIndex] {
        &self.current_path_corners
    }

    /// Returns `true` when `edge` has been traversed in this session.
    #[inline]
    pub fn is_edge_traversed(&self, edge: EdgeIndex) -> bool {
        self.traversed_edges[usize::from(edge)]
    }

    /// Returns `true` when `vertex` has been traversed in this session.
    #[inline]
    pub fn is_vertex_traversed(&self, vertex: VertexIndex) -> bool {
        self.traversed_vertices[usize::from(vertex)]
    }

    /// Number of traversed edges.
    #[inline]
    pub fn traversed_edge_count(&self) -> usize {
        self.traversed_edge_count
    }

    /// Number of traversed vertices.
    #[inline]
    pub fn traversed_vertex_count(&self) -> usize {
        self.traversed_vertex_count
    }

    /// Traversed edges in ascending index order.
    pub fn traversed_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.traversed_edges
            .iter()
            .enumerate()
            .filter(|&(_, &traversed)| traversed)
            .map(|(i, _)| EdgeIndex::from(i))
    }

    /// Traversed vertices in ascending index order.
    pub fn traversed_vertices(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.traversed_vertices
            .iter()
            .enumerate()
            .filter(|&(_, &traversed)| traversed)
            .map(|(i, _)| VertexIndex::from(i))
    }

    /// Number of traversed edges incident to `vertex`; 0 when untouched.
    #[inline]
    pub fn traversed_edge_count_at(&self, vertex: VertexIndex) -> u32 {
        self.edge_count_by_vertex[usize::from(vertex)]
    }
}
