//! Generates panel lines on a flat grid of quads and prints the selection.
//!
//! ```sh
//! cargo run --example grid_panels -- [seed] [forward_chance]
//! ```

use anyhow::Result;
use panel_lines::{generate_panel_lines, PanelLineOptions, QuadTopology};

/// Builds an `nx`×`ny` grid of unit quads in the XY plane.
fn grid(nx: u32, ny: u32) -> Result<QuadTopology> {
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

    Ok(QuadTopology::new(&positions, &counts, &indices)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().as_deref().unwrap_or("1").parse()?;
    let forward_chance: f32 = args.next().as_deref().unwrap_or("0.65").parse()?;

    let topology = grid(10, 10)?;
    let lines = generate_panel_lines(
        &topology,
        &PanelLineOptions {
            seed,
            forward_chance,
            bevel_corners: true,
            ..Default::default()
        },
    )?;

    println!(
        "seed {}: {} of {} edges selected, {} corners reshaped, open vertex: {}",
        seed,
        lines.edges.len(),
        topology.edge_count(),
        lines.relocated_vertices.len(),
        lines.has_open_vertex,
    );
    for edge in &lines.edges {
        let [a, b] = topology.edge_endpoints(*edge);
        println!("  edge {:>3}: {} -- {}", edge.0, a.0, b.0);
    }
    for relocation in &lines.relocated_vertices {
        println!(
            "  move vertex {} to {:?}",
            relocation.vertex.0, relocation.position
        );
    }

    Ok(())
}
