#![warn(missing_docs)]

//! Host seam for linktrace.
//!
//! The trace algorithm was written against a CAD host that owns joints,
//! geometry, sketches, and the viewport. [`TraceHost`] captures exactly the
//! contract the algorithm consumes: joint motion get/set with optional
//! limits, tracked point geometry queries, sketch creation on a planar
//! reference, fitted-spline authoring, and a synchronous viewport refresh.
//!
//! [`LinkageWorld`] is the in-memory implementation: a
//! [`LinkageDocument`](linktrace_ir::LinkageDocument)-backed world with
//! single-revolute forward kinematics, enough to run traces end to end
//! without a CAD host.

mod error;
mod host;
mod world;

pub use error::HostError;
pub use host::{PointGeometry, SketchHandle, TraceHost};
pub use world::LinkageWorld;
