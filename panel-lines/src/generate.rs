//! Walk orchestration.
//!
//! [`generate_panel_lines`] drives repeated sub-walks of an [`EdgeWalker`]
//! until the pattern saturates: seed a walk at a random edge, step it with a
//! biased coin between [`forward`](EdgeWalker::forward) and
//! [`turn`](EdgeWalker::turn), and when the sub-walk terminates pick a
//! restart point — open dead ends first, then randomly a bi-connected vertex
//! or a fully untouched one.  The run ends probabilistically once no restart
//! point can be found, or with [`Error::GenerationIncomplete`] when the step
//! cap is exhausted first.

use tracing::{debug, info};

use crate::corner::{reshape_corners, VertexRelocation};
use crate::error::{Error, Result};
use crate::topology::QuadTopology;
use crate::walker::EdgeWalker;
use crate::EdgeIndex;

/// Parameters of one generation run.
///
/// Uses the init struct pattern; `..Default::default()` fills the fields you
/// don't care about.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLineOptions {
    /// PRNG seed, `>= 1`.  The same seed on the same topology reproduces
    /// the identical result.
    pub seed: u64,
    /// Probability of stepping straight along the edge loop instead of
    /// turning, in `[0, 1]`.  `1.0` yields nearly straight lines, `0.0` a
    /// pure random walk.
    pub forward_chance: f32,
    /// Reshape corners enclosed by two traversed edges.
    pub bevel_corners: bool,
    /// Per-corner probability of reshaping, in `[0, 1]`.  Only read when
    /// `bevel_corners` is set.
    pub bevel_corner_chance: f32,
    /// Upper bound on walk steps and restart attempts.  Termination of the
    /// walk is probabilistic; exhausting the cap fails the run with
    /// [`Error::GenerationIncomplete`] instead of looping forever on a
    /// degenerate mesh.
    pub max_steps: usize,
}

impl Default for PanelLineOptions {
    fn default() -> Self {
        Self {
            seed: 1,
            forward_chance: 0.65,
            bevel_corners: false,
            bevel_corner_chance: 0.75,
            max_steps: 100_000,
        }
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLines {
    /// The traversed edges, sorted ascending.  These are the edges the host
    /// should cut grooves along.
    pub edges: Vec<EdgeIndex>,
    /// Corner vertices to relocate, with their new positions.  Empty unless
    /// [`PanelLineOptions::bevel_corners`] was set.
    pub relocated_vertices: Vec<VertexRelocation>,
    /// `true` when the final pattern still contains a vertex with exactly
    /// one traversed incident edge.  Diagnostic only.
    pub has_open_vertex: bool,
    /// Steps and restart attempts consumed by the run.
    pub steps: usize,
}

/// Generates a panel-line edge selection over `topology`.
///
/// Runs to completion synchronously; the only sources of failure are
/// out-of-range parameters and the [`PanelLineOptions::max_steps`] cap.  A
/// mesh without edges yields an empty selection.
pub fn generate_panel_lines(
    topology: &QuadTopology,
    options: &PanelLineOptions,
) -> Result<PanelLines> {
    validate(options)?;

    if topology.edge_count() == 0 {
        return Ok(PanelLines {
            edges: Vec::new(),
            relocated_vertices: Vec::new(),
            has_open_vertex: false,
            steps: 0,
        });
    }

    let mut rng = fastrand::Rng::with_seed(options.seed);
    let mut walker = EdgeWalker::new(topology);

    let start_edge = EdgeIndex::from(rng.usize(..topology.edge_count()));
    let start_vertex = topology.edge_endpoints(start_edge)[rng.usize(..2)];
    walker.start(start_edge, start_vertex)?;

    let steps = walk(&mut walker, &mut rng, options)?;

    let edges: Vec<EdgeIndex> = walker.traversed_edges().collect();
    let has_open_vertex = walker.first_open_vert().is_some();

    let relocated_vertices = if options.bevel_corners {
        reshape_corners(topology, &edges, options.bevel_corner_chance, &mut rng)
    } else {
        Vec::new()
    };

    info!(
        edges = edges.len(),
        has_open_vertex,
        relocated = relocated_vertices.len(),
        steps,
        "panel line generation finished"
    );

    Ok(PanelLines {
        edges,
        relocated_vertices,
        has_open_vertex,
        steps,
    })
}

/// The outer walk loop: step the current sub-walk to its end, then select a
/// restart point until the stop condition fires.  Returns the number of
/// steps consumed.
fn walk(
    walker: &mut EdgeWalker<'_>,
    rng: &mut fastrand::Rng,
    options: &PanelLineOptions,
) -> Result<usize> {
    let mut steps = 0_usize;
    loop {
        while walker.is_valid() && !walker.ends_at_traversed_vertex() {
            if steps >= options.max_steps {
                return Err(Error::GenerationIncomplete { steps });
            }
            steps += 1;
            if rng.f32() < options.forward_chance {
                walker.forward();
            } else {
                walker.turn(rng);
            }
        }

        if steps >= options.max_steps {
            return Err(Error::GenerationIncomplete { steps });
        }
        steps += 1;

        // Restart selection.  Open dead ends are always drained first; the
        // rest is one weighted draw: 0.50 bi-connected vertex, 0.25
        // untouched vertex, 0.25 neither.
        let mut next_vertex = walker.first_open_vert();
        let mut next_edge = walker.random_non_traversed_edge_from_vertex(next_vertex, rng);

        if next_edge.is_none() || next_vertex.is_none() {
            let r = rng.f32();
            if r < 0.5 {
                next_vertex = walker.random_bi_connected_vert(rng);
                next_edge = walker.random_non_traversed_edge_from_vertex(next_vertex, rng);
            } else if r < 0.75 {
                next_vertex = walker.random_non_traversed_vert(rng);
                next_edge = walker.random_non_traversed_edge_from_vertex(next_vertex, rng);
            }
        }

        match (next_edge, next_vertex) {
            (Some(edge), Some(vertex)) => {
                debug!(
                    edge = edge.0,
                    vertex = vertex.0,
                    traversed = walker.traversed_edge_count(),
                    "walk restart"
                );
                walker.start(edge, vertex)?;
            }
            _ => {
                if rng.f32() < 0.1 {
                    return Ok(steps);
                }
                // No continuation this time around; keep drawing restart
                // candidates until the stop chance fires.
            }
        }
    }
}

fn validate(options: &PanelLineOptions) -> Result<()> {
    if options.seed < 1 {
        return Err(Error::InvalidParameter {
            name: "seed",
            value: options.seed as f64,
        });
    }
    if !(0.0..=1.0).contains(&options.forward_chance) {
        return Err(Error::InvalidParameter {
            name: "forward_chance",
            value: options.forward_chance as f64,
        });
    }
    if !(0.0..=1.0).contains(&options.bevel_corner_chance) {
        return Err(Error::InvalidParameter {
            name: "bevel_corner_chance",
            value: options.bevel_corner_chance as f64,
        });
    }
    Ok(())
}
