//! An immutable loop-topology snapshot of a polygon mesh.
//!
//! [`QuadTopology`] is built once from flat index buffers — the number of
//! vertices for each face and a flat list of vertex indices per face — and
//! answers the adjacency queries the edge walker needs: edge endpoints,
//! loops around a vertex or an edge, and face-boundary/radial loop
//! navigation.  It never mutates; hosts keep their live mesh and apply the
//! generation result to it afterwards.
//!
//! ## Example
//! ```
//! # use panel_lines::QuadTopology;
//! // A single quad in the XY plane.
//! let positions = [
//!     0.0, 0.0, 0.0, //
//!     1.0, 0.0, 0.0, //
//!     1.0, 1.0, 0.0, //
//!     0.0, 1.0, 0.0,
//! ];
//! let topology = QuadTopology::new(&positions, &[4], &[0, 1, 2, 3])?;
//! assert_eq!(topology.vertex_count(), 4);
//! assert_eq!(topology.edge_count(), 4);
//! # Ok::<(), panel_lines::Error>(())
//! ```

use std::collections::HashMap;

use slice_of_array::prelude::*;

use crate::error::{Error, Result};
use crate::{EdgeIndex, FaceIndex, LoopIndex, VertexIndex};

/// One directed edge-use bound to a face corner.
#[derive(Debug, Clone, Copy)]
struct Loop {
    vertex: VertexIndex,
    edge: EdgeIndex,
    next: LoopIndex,
    prev: LoopIndex,
    face: FaceIndex,
}

/// Read-only loop topology of a polygon mesh, plus vertex positions.
///
/// Edges are assigned indices in first-encounter order while scanning the
/// faces; loops are assigned one per face corner in face order.  All
/// adjacency lists are stored in that deterministic order, which makes every
/// walk over the snapshot reproducible.
#[derive(Debug, Clone)]
pub struct QuadTopology {
    positions: Vec<[f32; 3]>,
    edge_vertices: Vec<[VertexIndex; 2]>,
    loops: Vec<Loop>,
    /// Loop range per face: face `f` owns loops
    /// `face_loop_offsets[f]..face_loop_offsets[f + 1]`.
    face_loop_offsets: Vec<u32>,
    /// Edges per face, flat, sharing `face_loop_offsets`.
    face_edges: Vec<EdgeIndex>,
    edge_loops: Vec<Vec<LoopIndex>>,
    vertex_loops: Vec<Vec<LoopIndex>>,
    vertex_edges: Vec<Vec<EdgeIndex>>,
}

impl QuadTopology {
    /// Builds a topology snapshot from flat buffers.
    ///
    /// # Arguments
    ///
    /// * `positions` - Vertex positions as a flat `x y z` buffer.  The
    ///   number of vertices is `positions.len() / 3`.
    /// * `vertices_per_face` - A slice containing the number of vertices for
    ///   each face in the mesh.  The length of this is the number of faces
    ///   in the mesh.
    /// * `vertex_indices_per_face` - A flat list of the vertex indices for
    ///   each face.
    pub fn new(
        positions: &[f32],
        vertices_per_face: &[u32],
        vertex_indices_per_face: &[u32],
    ) -> Result<Self> {
        if !positions.len().is_multiple_of(3) {
            return Err(Error::InvalidTopology(
                "The position buffer length is not a multiple of 3.".to_string(),
            ));
        }

        let vertex_count = positions.len() / 3;

        #[cfg(feature = "topology_validation")]
        {
            if vertex_indices_per_face.len() != vertices_per_face.iter().sum::<u32>() as usize {
                return Err(Error::InvalidTopology(
                    "The number of vertex indices is not equal to the sum of face arities."
                        .to_string(),
                ));
            }
            for (i, &arity) in vertices_per_face.iter().enumerate() {
                if arity < 3 {
                    return Err(Error::InvalidTopology(format!(
                        "Face[{}] has arity {} (should be at least 3).",
                        i, arity
                    )));
                }
            }
            for (i, &vertex_index) in vertex_indices_per_face.iter().enumerate() {
                if vertex_count <= vertex_index as usize {
                    return Err(Error::InvalidTopology(format!(
                        "Vertex index[{}] = {} is out of range (should be < {}).",
                        i, vertex_index, vertex_count
                    )));
                }
            }
        }

        let positions = positions.nest::<[_; 3]>().to_vec();

        let face_count = vertices_per_face.len();
        let loop_count = vertex_indices_per_face.len();

        let mut edge_vertices: Vec<[VertexIndex; 2]> = Vec::new();
        let mut edge_by_endpoints: HashMap<(u32, u32), EdgeIndex> = HashMap::new();
        let mut loops: Vec<Loop> = Vec::with_capacity(loop_count);
        let mut face_loop_offsets: Vec<u32> = Vec::with_capacity(face_count + 1);
        let mut face_edges: Vec<EdgeIndex> = Vec::with_capacity(loop_count);
        let mut edge_loops: Vec<Vec<LoopIndex>> = Vec::new();
        let mut vertex_loops: Vec<Vec<LoopIndex>> = vec![Vec::new(); vertex_count];
        let mut vertex_edges: Vec<Vec<EdgeIndex>> = vec![Vec::new(); vertex_count];

        face_loop_offsets.push(0);

        let mut cursor = 0_usize;
        for (face, &arity) in vertices_per_face.iter().enumerate() {
            let arity = arity as usize;
            let corners = &vertex_indices_per_face[cursor..cursor + arity];
            cursor += arity;

            let base = loops.len();
            for (i, &v1) in corners.iter().enumerate() {
                let v2 = corners[(i + 1) % arity];

                // Canonical endpoint order so both windings map to one edge.
                let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };
                let edge = *edge_by_endpoints.entry(key).or_insert_with(|| {
                    let edge = EdgeIndex::from(edge_vertices.len());
                    edge_vertices.push([VertexIndex(key.0), VertexIndex(key.1)]);
                    edge_loops.push(Vec::new());
                    vertex_edges[key.0 as usize].push(edge);
                    vertex_edges[key.1 as usize].push(edge);
                    edge
                });

                let loop_index = LoopIndex::from(base + i);
                loops.push(Loop {
                    vertex: VertexIndex(v1),
                    edge,
                    next: LoopIndex::from(base + (i + 1) % arity),
                    prev: LoopIndex::from(base + (i + arity - 1) % arity),
                    face: FaceIndex::from(face),
                });
                edge_loops[usize::from(edge)].push(loop_index);
                vertex_loops[v1 as usize].push(loop_index);
                face_edges.push(edge);
            }
            face_loop_offsets.push(loops.len() as u32);
        }

        Ok(Self {
            positions,
            edge_vertices,
            loops,
            face_loop_offsets,
            face_edges,
            edge_loops,
            vertex_loops,
            vertex_edges,
        })
    }

    /// Returns the number of vertices in the snapshot.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of edges in the snapshot.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_vertices.len()
    }

    /// Returns the number of faces in the snapshot.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_loop_offsets.len() - 1
    }

    /// Returns the number of loops (face corners) in the snapshot.
    #[inline]
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    /// Returns the position of a vertex.
    #[inline]
    pub fn position(&self, vertex: VertexIndex) -> [f32; 3] {
        self.positions[usize::from(vertex)]
    }

    /// Returns the two endpoints of an edge, in canonical order.
    #[inline]
    pub fn edge_endpoints(&self, edge: EdgeIndex) -> [VertexIndex; 2] {
        self.edge_vertices[usize::from(edge)]
    }

    /// Returns the endpoint of `edge` that is not `vertex`.
    ///
    /// Fails with [`Error::InvalidTopology`] when `vertex` is not one of the
    /// edge's two endpoints; use [`opposite_vertex`](Self::opposite_vertex)
    /// where a miss is an expected outcome.
    pub fn other_endpoint(&self, edge: EdgeIndex, vertex: VertexIndex) -> Result<VertexIndex> {
        self.opposite_vertex(edge, vertex).ok_or_else(|| {
            Error::InvalidTopology(format!(
                "Vertex {} is not an endpoint of edge {}.",
                vertex.0, edge.0
            ))
        })
    }

    /// Returns the endpoint of `edge` that is not `vertex`, or `None` when
    /// `vertex` is not on the edge.
    #[inline]
    pub fn opposite_vertex(&self, edge: EdgeIndex, vertex: VertexIndex) -> Option<VertexIndex> {
        let [a, b] = self.edge_vertices[usize::from(edge)];
        if vertex == a {
            Some(b)
        } else if vertex == b {
            Some(a)
        } else {
            None
        }
    }

    /// Returns the loops bound to an edge.
    ///
    /// One loop for a boundary edge, two for a manifold interior edge, more
    /// for a non-manifold fan.
    #[inline]
    pub fn loops_of_edge(&self, edge: EdgeIndex) -> &[LoopIndex] {
        &self.edge_loops[usize::from(edge)]
    }

    /// Returns the loops whose corner sits at `vertex`, one per face corner
    /// touching the vertex.
    #[inline]
    pub fn loops_of_vertex(&self, vertex: VertexIndex) -> &[LoopIndex] {
        &self.vertex_loops[usize::from(vertex)]
    }

    /// Returns the edges incident to `vertex`, each exactly once.
    #[inline]
    pub fn edges_of_vertex(&self, vertex: VertexIndex) -> &[EdgeIndex] {
        &self.vertex_edges[usize::from(vertex)]
    }

    /// Returns the next loop around the owning face.
    #[inline]
    pub fn next_loop(&self, l: LoopIndex) -> LoopIndex {
        self.loops[usize::from(l)].next
    }

    /// Returns the previous loop around the owning face.
    #[inline]
    pub fn previous_loop(&self, l: LoopIndex) -> LoopIndex {
        self.loops[usize::from(l)].prev
    }

    /// Returns the loop on the opposite side of this loop's edge, or `None`
    /// for a boundary edge.
    ///
    /// For a non-manifold fan of more than two loops this returns the next
    /// loop in the edge's radial list, cyclically.
    pub fn radial_opposite_loop(&self, l: LoopIndex) -> Option<LoopIndex> {
        let radial = &self.edge_loops[usize::from(self.loops[usize::from(l)].edge)];
        if radial.len() < 2 {
            return None;
        }
        let position = radial.iter().position(|&r| r == l)?;
        Some(radial[(position + 1) % radial.len()])
    }

    /// Returns the edge this loop is bound to.
    #[inline]
    pub fn loop_edge(&self, l: LoopIndex) -> EdgeIndex {
        self.loops[usize::from(l)].edge
    }

    /// Returns the vertex this loop's corner sits at.
    #[inline]
    pub fn loop_vertex(&self, l: LoopIndex) -> VertexIndex {
        self.loops[usize::from(l)].vertex
    }

    /// Returns the face owning this loop.
    #[inline]
    pub fn loop_face(&self, l: LoopIndex) -> FaceIndex {
        self.loops[usize::from(l)].face
    }

    /// Returns the edges of a face, in corner order.
    #[inline]
    pub fn face_edges(&self, face: FaceIndex) -> &[EdgeIndex] {
        let face = usize::from(face);
        let start = self.face_loop_offsets[face] as usize;
        let end = self.face_loop_offsets[face + 1] as usize;
        &self.face_edges[start..end]
    }

    /// Returns the number of corners of a face.
    #[inline]
    pub fn face_arity(&self, face: FaceIndex) -> usize {
        self.face_edges(face).len()
    }

    /// Looks up the edge connecting two vertices, if any.
    pub fn edge_between(&self, a: VertexIndex, b: VertexIndex) -> Option<EdgeIndex> {
        self.vertex_edges[usize::from(a)]
            .iter()
            .copied()
            .find(|&edge| self.opposite_vertex(edge, a) == Some(b))
    }
}
