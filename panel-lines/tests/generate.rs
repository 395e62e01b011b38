//! Tests for the walk orchestrator: determinism, parameter validation and
//! the step cap.

use panel_lines::{generate_panel_lines, Error, PanelLineOptions, QuadTopology};

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

fn cube() -> QuadTopology {
    let positions = [
        -0.5, -0.5, -0.5, //
        0.5, -0.5, -0.5, //
        -0.5, 0.5, -0.5, //
        0.5, 0.5, -0.5, //
        -0.5, 0.5, 0.5, //
        0.5, 0.5, 0.5, //
        -0.5, -0.5, 0.5, //
        0.5, -0.5, 0.5,
    ];
    let face_vertex_indices = [
        0, 1, 3, 2, //
        2, 3, 5, 4, //
        4, 5, 7, 6, //
        6, 7, 1, 0, //
        0, 2, 4, 6, //
        1, 7, 5, 3,
    ];
    QuadTopology::new(&positions, &[4; 6], &face_vertex_indices).expect("Failed to build cube")
}

#[test]
fn same_seed_reproduces_the_same_lines() {
    let topology = grid(5, 5);
    let options = PanelLineOptions {
        seed: 42,
        forward_chance: 0.65,
        bevel_corners: true,
        bevel_corner_chance: 0.75,
        ..Default::default()
    };

    let first = generate_panel_lines(&topology, &options).unwrap();
    let second = generate_panel_lines(&topology, &options).unwrap();
    assert_eq!(first, second);
    assert!(!first.edges.is_empty());
}

#[test]
fn selected_edges_are_sorted_unique_and_in_range() {
    let topology = grid(5, 5);
    for seed in 1..=8 {
        let lines = generate_panel_lines(
            &topology,
            &PanelLineOptions {
                seed,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!lines.edges.is_empty());
        for pair in lines.edges.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for &edge in &lines.edges {
            assert!(usize::from(edge) < topology.edge_count());
        }
    }
}

#[test]
fn forward_heavy_runs_work_on_closed_meshes() {
    let topology = cube();
    let lines = generate_panel_lines(
        &topology,
        &PanelLineOptions {
            seed: 7,
            forward_chance: 1.0,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(!lines.edges.is_empty());
    assert!(lines.edges.len() <= topology.edge_count());
}

#[test]
fn turn_only_runs_terminate() {
    let topology = grid(4, 4);
    let lines = generate_panel_lines(
        &topology,
        &PanelLineOptions {
            seed: 3,
            forward_chance: 0.0,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(!lines.edges.is_empty());
}

#[test]
fn relocations_are_empty_unless_enabled() {
    let topology = grid(5, 5);
    let lines = generate_panel_lines(
        &topology,
        &PanelLineOptions {
            seed: 13,
            bevel_corners: false,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(lines.relocated_vertices.is_empty());
}

#[test]
fn relocated_vertices_are_unique_per_run() {
    let topology = grid(6, 6);
    for seed in 1..=8 {
        let lines = generate_panel_lines(
            &topology,
            &PanelLineOptions {
                seed,
                bevel_corners: true,
                bevel_corner_chance: 1.0,
                ..Default::default()
            },
        )
        .unwrap();
        let mut seen = Vec::new();
        for relocation in &lines.relocated_vertices {
            assert!(
                !seen.contains(&relocation.vertex),
                "vertex {:?} reshaped twice",
                relocation.vertex
            );
            seen.push(relocation.vertex);
        }
    }
}

#[test]
fn rejects_out_of_range_parameters() {
    let topology = grid(2, 2);
    for options in [
        PanelLineOptions {
            seed: 0,
            ..Default::default()
        },
        PanelLineOptions {
            forward_chance: 1.5,
            ..Default::default()
        },
        PanelLineOptions {
            forward_chance: -0.1,
            ..Default::default()
        },
        PanelLineOptions {
            bevel_corner_chance: 2.0,
            ..Default::default()
        },
    ] {
        assert!(matches!(
            generate_panel_lines(&topology, &options),
            Err(Error::InvalidParameter { .. })
        ));
    }
}

#[test]
fn step_cap_fails_the_run_instead_of_hanging() {
    let topology = grid(5, 5);
    let result = generate_panel_lines(
        &topology,
        &PanelLineOptions {
            seed: 1,
            max_steps: 0,
            ..Default::default()
        },
    );
    assert!(matches!(
        result,
        Err(Error::GenerationIncomplete { steps: 0 })
    ));

    // A handful of steps cannot saturate a 5×5 grid either.
    let result = generate_panel_lines(
        &topology,
        &PanelLineOptions {
            seed: 1,
            max_steps: 3,
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(Error::GenerationIncomplete { .. })));
}

#[test]
fn empty_mesh_yields_an_empty_selection() {
    let topology = QuadTopology::new(&[], &[], &[]).unwrap();
    let lines = generate_panel_lines(&topology, &PanelLineOptions::default()).unwrap();
    assert!(lines.edges.is_empty());
    assert!(lines.relocated_vertices.is_empty());
    assert!(!lines.has_open_vertex);
    assert_eq!(lines.steps, 0);
}

// Restart selection once chained two independent 0.5 coin flips, which
// could fire both or neither branch and burn a different number of RNG
// draws per attempt.  It now draws once and partitions 0.50/0.25/0.25 —
// the same marginal distribution, but a different RNG stream, so seeds
// from builds predating the change reproduce different patterns.
#[test]
fn distinct_seeds_are_reproducible_independently() {
    let topology = grid(5, 5);
    for seed in [1, 2, 99, 1234] {
        let options = PanelLineOptions {
            seed,
            ..Default::default()
        };
        let first = generate_panel_lines(&topology, &options).unwrap();
        let second = generate_panel_lines(&topology, &options).unwrap();
        assert_eq!(first, second);
    }
}
