//! Tests for the corner reshaper: eligibility rules, midpoint math and the
//! affected-vertex guard.

use panel_lines::{reshape_corners, EdgeIndex, QuadTopology, VertexIndex};

fn grid(nx: u32, ny: u32) -> QuadTopology {
    let mut positions = Vec::new();
    for y in 0..=ny {
        for x in 0..=nx {
            positions.extend_from_slice(&[x as f32, y as f32, 0.0]);
        }
    }
    let mut counts = Vec::new();
    let mut indices = Vec::new();
    for y in 0..ny {
        for x in 0..nx {
            let corner = y * (nx + 1) + x;
            counts.push(4);
            indices.extend_from_slice(&[corner, corner + 1, corner + nx + 2, corner + nx + 1]);
        }
    }
    QuadTopology::new(&positions, &counts, &indices).expect("Failed to build grid")
}

fn v(i: usize) -> VertexIndex {
    VertexIndex::from(i)
}

fn edge(topology: &QuadTopology, a: usize, b: usize) -> EdgeIndex {
    topology
        .edge_between(v(a), v(b))
        .unwrap_or_else(|| panic!("no edge {}--{}", a, b))
}

#[test]
fn reshapes_an_interior_corner_to_the_midpoint() {
    let topology = grid(3, 3);
    let mut rng = fastrand::Rng::with_seed(1);

    // An L around interior vertex 5, inside the first quad.
    let traversed = [edge(&topology, 1, 5), edge(&topology, 4, 5)];
    let relocations = reshape_corners(&topology, &traversed, 1.0, &mut rng);

    assert_eq!(relocations.len(), 1);
    assert_eq!(relocations[0].vertex, v(5));
    // Midpoint of vertices 1 (1,0,0) and 4 (0,1,0).
    assert_eq!(relocations[0].position, [0.5, 0.5, 0.0]);
}

#[test]
fn zero_chance_reshapes_nothing() {
    let topology = grid(3, 3);
    let mut rng = fastrand::Rng::with_seed(1);
    let traversed = [edge(&topology, 1, 5), edge(&topology, 4, 5)];
    let relocations = reshape_corners(&topology, &traversed, 0.0, &mut rng);
    assert!(relocations.is_empty());
}

#[test]
fn opposite_edges_are_not_a_corner() {
    let topology = grid(3, 3);
    let mut rng = fastrand::Rng::with_seed(1);
    // Two opposite edges of the first quad: two traversed edges, but no
    // shared vertex.
    let traversed = [edge(&topology, 0, 1), edge(&topology, 4, 5)];
    let relocations = reshape_corners(&topology, &traversed, 1.0, &mut rng);
    assert!(relocations.is_empty());
}

#[test]
fn boundary_corners_are_not_reshaped() {
    let topology = grid(3, 3);
    let mut rng = fastrand::Rng::with_seed(1);
    // An L around vertex 1, which sits on the grid border (two face
    // corners, not four).
    let traversed = [edge(&topology, 0, 1), edge(&topology, 1, 5)];
    let relocations = reshape_corners(&topology, &traversed, 1.0, &mut rng);
    assert!(relocations.is_empty());
}

#[test]
fn corner_vertex_with_extra_traversed_edges_is_not_reshaped() {
    let topology = grid(3, 3);
    let mut rng = fastrand::Rng::with_seed(1);
    // Vertex 5 connects to three traversed edges; the line continues
    // through the corner, so it must stay sharp.
    let traversed = [
        edge(&topology, 1, 5),
        edge(&topology, 4, 5),
        edge(&topology, 5, 6),
    ];
    let relocations = reshape_corners(&topology, &traversed, 1.0, &mut rng);
    assert!(relocations.is_empty());
}

#[test]
fn faces_with_more_than_two_traversed_edges_are_skipped() {
    let topology = grid(3, 3);
    let mut rng = fastrand::Rng::with_seed(1);
    let traversed = [
        edge(&topology, 0, 1),
        edge(&topology, 1, 5),
        edge(&topology, 4, 5),
    ];
    // The first quad has three traversed edges; vertex 5 still has only
    // two, but the face fails the exactly-two filter and vertex 1 is on the
    // boundary.
    let relocations = reshape_corners(&topology, &traversed, 1.0, &mut rng);
    assert!(relocations.is_empty());
}

// Two chained corners share a far endpoint; only the first (in face order)
// may be reshaped, and no vertex is consumed twice.
#[test]
fn chained_corners_consume_their_far_endpoints() {
    let topology = grid(4, 4);
    let mut rng = fastrand::Rng::with_seed(1);

    // A staircase: 6--7, 7--12, 12--13.  Corners at vertex 7 and vertex 12
    // are both individually eligible, but reshaping 7 consumes 12.
    let traversed = [
        edge(&topology, 6, 7),
        edge(&topology, 7, 12),
        edge(&topology, 12, 13),
    ];
    let relocations = reshape_corners(&topology, &traversed, 1.0, &mut rng);

    assert_eq!(relocations.len(), 1);
    assert_eq!(relocations[0].vertex, v(7));
    // Midpoint of vertices 6 (1,1,0) and 12 (2,2,0).
    assert_eq!(relocations[0].position, [1.5, 1.5, 0.0]);
}

#[test]
fn distant_corners_are_reshaped_independently() {
    let topology = grid(4, 4);
    let mut rng = fastrand::Rng::with_seed(1);

    let traversed = [
        edge(&topology, 6, 7),
        edge(&topology, 7, 12),
        edge(&topology, 16, 17),
        edge(&topology, 17, 22),
    ];
    let relocations = reshape_corners(&topology, &traversed, 1.0, &mut rng);

    let mut vertices: Vec<VertexIndex> = relocations.iter().map(|r| r.vertex).collect();
    vertices.sort();
    assert_eq!(vertices, vec![v(7), v(17)]);
}

#[test]
fn reshaping_is_deterministic_per_seed() {
    let topology = grid(4, 4);
    let traversed = [
        edge(&topology, 6, 7),
        edge(&topology, 7, 12),
        edge(&topology, 16, 17),
        edge(&topology, 17, 22),
    ];

    let mut rng = fastrand::Rng::with_seed(77);
    let first = reshape_corners(&topology, &traversed, 0.5, &mut rng);
    let mut rng = fastrand::Rng::with_seed(77);
    let second = reshape_corners(&topology, &traversed, 0.5, &mut rng);
    assert_eq!(first, second);
}
