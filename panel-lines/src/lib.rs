#![warn(missing_docs)]
//! # Panel Lines
//!
//! Generates randomized *panel line* patterns on a quadrilateral mesh by
//! running a biased random walk across the mesh's edge-loop topology.
//!
//! A panel line is the visual groove running along mesh edges on hard-surface
//! models (spaceship hulls, armor plating).  This crate produces the *edge
//! selection* for such grooves: starting from a random edge it repeatedly
//! either follows the edge loop straight across the next quad
//! ([`EdgeWalker::forward`]) or turns onto a random side edge
//! ([`EdgeWalker::turn`]), restarts from dead ends until the pattern is
//! saturated, and optionally smooths traversed corners by relocating the
//! corner vertex ([`corner`]).
//!
//! The crate operates on an immutable topology snapshot ([`QuadTopology`])
//! built from flat index buffers and returns edge handles plus vertex
//! relocations.  Applying the actual groove geometry (bevel + inset) is the
//! host's job, via the [`MeshModification`] boundary trait.
//!
//! ## Example
//!
//! ```
//! use panel_lines::{generate_panel_lines, PanelLineOptions, QuadTopology};
//!
//! // A 2×2 grid of quads (nine vertices).
//! let positions = [
//!     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0, //
//!     0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 2.0, 1.0, 0.0, //
//!     0.0, 2.0, 0.0, 1.0, 2.0, 0.0, 2.0, 2.0, 0.0,
//! ];
//! let topology = QuadTopology::new(
//!     &positions,
//!     &[4; 4],
//!     &[0, 1, 4, 3, 1, 2, 5, 4, 3, 4, 7, 6, 4, 5, 8, 7],
//! )?;
//!
//! let lines = generate_panel_lines(
//!     &topology,
//!     &PanelLineOptions {
//!         seed: 7,
//!         forward_chance: 0.8,
//!         ..Default::default()
//!     },
//! )?;
//! assert!(!lines.edges.is_empty());
//! # Ok::<(), panel_lines::Error>(())
//! ```
//!
//! ## Determinism
//!
//! All randomness is drawn from a single [`fastrand::Rng`] seeded once per
//! generation run.  The same seed on the same topology reproduces the exact
//! same edge selection and corner relocations.
//!
//! ## Feature Flags
#![doc = document_features::document_features!()]

pub mod corner;
pub mod error;
pub mod generate;
pub mod modify;
pub mod topology;
pub mod walker;

pub use corner::{reshape_corners, VertexRelocation};
pub use error::{Error, Result};
pub use generate::{generate_panel_lines, PanelLineOptions, PanelLines};
pub use modify::{GrooveOptions, MeshModification};
pub use topology::QuadTopology;
pub use walker::EdgeWalker;

macro_rules! index_type {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        ///
        /// A stable handle into a [`QuadTopology`] snapshot.  Handles are
        /// dense indices; they compare, hash and convert to/from `u32` and
        /// `usize`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                $name(value)
            }
        }

        impl From<$name> for u32 {
            fn from(index: $name) -> Self {
                index.0
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                $name(value as u32)
            }
        }

        impl From<$name> for usize {
            fn from(index: $name) -> Self {
                index.0 as usize
            }
        }
    };
}

index_type! {
    /// A vertex index in the topology.
    VertexIndex
}

index_type! {
    /// An edge index in the topology.
    EdgeIndex
}

index_type! {
    /// A loop index in the topology.
    ///
    /// A *loop* is a directed edge-use bound to one face corner, the minimal
    /// half-edge structure needed to answer "which edge continues straight
    /// across this face boundary".
    LoopIndex
}

index_type! {
    /// A face index in the topology.
    FaceIndex
}
