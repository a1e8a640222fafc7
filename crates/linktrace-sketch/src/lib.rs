#![warn(missing_docs)]

//! Output sketch model for linktrace.
//!
//! A trace invocation authors its results into a [`Sketch`]: one closed
//! [`FittedSpline`] per tracked point, each interpolating the point's
//! sample sequence in the sketch's local coordinates and marked fixed so
//! downstream sketch edits cannot disturb it.

mod sketch;
mod spline;

pub use sketch::Sketch;
pub use spline::FittedSpline;

use thiserror::Error;

/// Errors from sketch curve authoring.
#[derive(Debug, Clone, Error)]
pub enum SketchError {
    /// Too few points to fit a curve through.
    #[error("cannot fit a spline through {0} points (need at least 3)")]
    TooFewPoints(usize),

    /// The point sequence does not close (gap between first and last).
    #[error("fitted spline sequence is not closed: gap of {0:.6} mm")]
    NotClosed(f64),

    /// The sketch placement is degenerate (non-invertible).
    #[error("sketch placement is degenerate")]
    DegeneratePlacement,
}
