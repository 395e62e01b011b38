//! Error types for the panel-lines crate.

use thiserror::Error;

use crate::{EdgeIndex, VertexIndex};

/// Main error type for panel-lines operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid topology input, or an adjacency query that violates the
    /// adapter contract.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// A walk was started with a vertex that is not an endpoint of the
    /// start edge.
    #[error("Vertex {vertex:?} is not an endpoint of edge {edge:?}")]
    VertexNotOnEdge {
        /// The edge the walk was started on.
        edge: EdgeIndex,
        /// The vertex that is not one of the edge's endpoints.
        vertex: VertexIndex,
    },

    /// A generation parameter is outside its documented range.
    #[error("Parameter `{name}` is out of range: {value}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The step cap was exhausted before the walk terminated on its own.
    ///
    /// Termination of the walk is probabilistic; the cap turns an unlucky
    /// run on a degenerate mesh into an error instead of a hang.
    #[error("Generation incomplete: step cap exhausted after {steps} steps")]
    GenerationIncomplete {
        /// Number of steps taken when the cap was hit.
        steps: usize,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
