//! Corner reshaping.
//!
//! A quad whose traversed edges form an L around one corner leaves a sharp
//! 90° kink in the panel line.  The reshaper relocates that corner vertex to
//! the midpoint of the two far endpoints, flattening the kink into a chamfer
//! before the host cuts the groove geometry.

use itertools::Itertools;
use tracing::debug;

type Point = ultraviolet::vec::Vec3;

use crate::topology::QuadTopology;
use crate::{EdgeIndex, FaceIndex, VertexIndex};

/// A vertex the host should move to a new position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRelocation {
    /// The vertex to move.
    pub vertex: VertexIndex,
    /// Its new position.
    pub position: [f32; 3],
}

/// Detects quad corners fully enclosed by two traversed edges and computes
/// relocations that smooth them.
///
/// A corner is eligible when its face is a quad with *exactly two* traversed
/// edges that are adjacent within the face, the shared vertex has exactly
/// two traversed incident edges globally and exactly four face corners (a
/// manifold interior quad-valence vertex), and neither the shared vertex nor
/// the two far endpoints were consumed by an earlier corner in this run.
/// Each eligible corner is then reshaped with probability `chance`.
///
/// The snapshot is never mutated; the returned relocations are for the host
/// to apply.  No vertex appears in more than one relocation, and no far
/// endpoint of a reshaped corner is itself reshaped.
pub fn reshape_corners(
    topology: &QuadTopology,
    traversed_edges: &[EdgeIndex],
    chance: f32,
    rng: &mut fastrand::Rng,
) -> Vec<VertexRelocation> {
    let mut traversed = vec![false; topology.edge_count()];
    for &edge in traversed_edges {
        traversed[usize::from(edge)] = true;
    }

    let mut affected = vec![false; topology.vertex_count()];
    let mut relocations = Vec::new();

    for face in (0..topology.face_count()).map(FaceIndex::from) {
        if topology.face_arity(face) != 4 {
            continue;
        }
        let edges = topology.face_edges(face);
        let traversed_count = edges
            .iter()
            .filter(|&&edge| traversed[usize::from(edge)])
            .count();
        if traversed_count != 2 {
            continue;
        }

        for (&current, &next) in edges.iter().circular_tuple_windows::<(_, _)>() {
            if !traversed[usize::from(current)] || !traversed[usize::from(next)] {
                continue;
            }
            let Some(vertex) = shared_vertex(topology, current, next) else {
                continue;
            };
            if affected[usize::from(vertex)] {
                continue;
            }

            // The shared vertex must connect to only the two traversed edges
            // of this face, and cannot be on a boundary, thus must have four
            // face corners.
            let traversed_incident = topology
                .edges_of_vertex(vertex)
                .iter()
                .filter(|&&edge| traversed[usize::from(edge)])
                .count();
            if traversed_incident != 2 || topology.loops_of_vertex(vertex).len() != 4 {
                continue;
            }

            let Some(current_far) = topology.opposite_vertex(current, vertex) else {
                continue;
            };
            let Some(next_far) = topology.opposite_vertex(next, vertex) else {
                continue;
            };
            if affected[usize::from(current_far)] || affected[usize::from(next_far)] {
                continue;
            }

            if rng.f32() < chance {
                let a = topology.position(current_far);
                let b = topology.position(next_far);
                let midpoint = (Point::new(a[0], a[1], a[2]) + Point::new(b[0], b[1], b[2])) * 0.5;
                debug!(vertex = vertex.0, face = face.0, "reshaping corner");
                relocations.push(VertexRelocation {
                    vertex,
                    position: [midpoint.x, midpoint.y, midpoint.z],
                });
                affected[usize::from(vertex)] = true;
                affected[usize::from(current_far)] = true;
                affected[usize::from(next_far)] = true;
            }
        }
    }

    relocations
}

/// The vertex shared by two edges, if any.
fn shared_vertex(topology: &QuadTopology, a: EdgeIndex, b: EdgeIndex) -> Option<VertexIndex> {
    let [a0, a1] = topology.edge_endpoints(a);
    let [b0, b1] = topology.edge_endpoints(b);
    if a0 == b0 || a0 == b1 {
        Some(a0)
    } else if a1 == b0 || a1 == b1 {
        Some(a1)
    } else {
        None
    }
}
