//! Boundary interface to the host's mesh-modification operators.
//!
//! Turning the selected edges into physical grooves — a bevel along the
//! lines followed by an inset of the resulting strip — is geometry work the
//! host's mesh kernel already does well, so the core hands it off.  The
//! orchestrating caller runs [`generate_panel_lines`] first, applies the
//! returned [`VertexRelocation`]s, then invokes the collaborator with the
//! edge selection:
//!
//! ```no_run
//! # use panel_lines::*;
//! # fn demo(
//! #     host: &mut dyn MeshModification,
//! #     topology: &QuadTopology,
//! # ) -> Result<()> {
//! let lines = generate_panel_lines(topology, &PanelLineOptions::default())?;
//! host.bevel_and_inset(&lines.edges, &GrooveOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! [`generate_panel_lines`]: crate::generate_panel_lines
//! [`VertexRelocation`]: crate::VertexRelocation

use crate::error::Result;
use crate::EdgeIndex;

/// Numeric parameters of the groove geometry.  Consumed only by the
/// [`MeshModification`] collaborator, never by the traversal core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrooveOptions {
    /// Bevel width along the selected edges, `>= 0`.
    pub line_bevel_offset: f32,
    /// Inset thickness of the groove strip.
    pub inset_thickness: f32,
    /// Inset depth of the groove strip.
    pub inset_depth: f32,
}

impl Default for GrooveOptions {
    fn default() -> Self {
        Self {
            line_bevel_offset: 0.01,
            inset_thickness: 0.0,
            inset_depth: 0.1,
        }
    }
}

/// Host-side mesh modification the core delegates groove cutting to.
pub trait MeshModification {
    /// Bevels the selected edges and insets the resulting strip by the
    /// groove parameters.
    fn bevel_and_inset(&mut self, edges: &[EdgeIndex], groove: &GrooveOptions) -> Result<()>;
}
