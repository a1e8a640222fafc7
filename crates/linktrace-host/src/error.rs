//! Error types for the host seam.

use linktrace_sketch::SketchError;
use thiserror::Error;

/// Errors raised by a [`TraceHost`](crate::TraceHost) implementation.
#[derive(Debug, Error)]
pub enum HostError {
    /// Joint not found in the document.
    #[error("joint not found: {0}")]
    MissingJoint(String),

    /// Tracked point not found in the document.
    #[error("tracked point not found: {0}")]
    MissingPoint(String),

    /// Planar reference not found in the document.
    #[error("planar reference not found: {0}")]
    MissingReference(String),

    /// A sketch point's owning sketch is absent from the document.
    #[error("sketch not found: {0}")]
    MissingSketch(String),

    /// Joint axis has zero length.
    #[error("joint {0} has a degenerate axis")]
    DegenerateAxis(String),

    /// A planar reference or sketch placement is not invertible.
    #[error("placement of {0} is degenerate")]
    DegeneratePlacement(String),

    /// A sketch handle does not refer to a live working sketch.
    #[error("invalid working sketch handle {0}")]
    InvalidSketchHandle(usize),

    /// A curve index does not exist on the working sketch.
    #[error("no curve {curve} on working sketch {sketch}")]
    InvalidCurve {
        /// Working sketch handle.
        sketch: usize,
        /// Curve index within the sketch.
        curve: usize,
    },

    /// Curve authoring failed.
    #[error(transparent)]
    Sketch(#[from] SketchError),

    /// Injected or host-internal failure (used by tests and wrappers).
    #[error("host fault: {0}")]
    Internal(String),
}
