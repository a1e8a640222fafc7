//! The contract the trace algorithm consumes from its host.

use linktrace_ir::RotationLimits;
use linktrace_math::{Frame, Point3, Transform};

use crate::HostError;

/// Handle to a working sketch created for one trace invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SketchHandle(
    /// Index into the host's working sketch list.
    pub usize,
);

/// Native geometry of a tracked point at the host's current pose.
#[derive(Debug, Clone)]
pub enum PointGeometry {
    /// The point is expressed directly in document space.
    Document(Point3),
    /// The point is expressed in its owning sketch's local space and must
    /// be mapped through that sketch's placement before document-space use.
    SketchLocal {
        /// Position in the owning sketch's coordinates.
        position: Point3,
        /// The owning sketch's placement transform (local to document).
        sketch_transform: Transform,
    },
}

impl PointGeometry {
    /// Resolve to a document-space position.
    pub fn to_document(&self) -> Point3 {
        match self {
            PointGeometry::Document(p) => *p,
            PointGeometry::SketchLocal {
                position,
                sketch_transform,
            } => sketch_transform.apply_point(position),
        }
    }
}

/// External collaborators of a trace: joint motion, point geometry,
/// sketching, and the viewport.
///
/// Joint values set through this trait become visible to geometry queries
/// only after [`refresh`](TraceHost::refresh), mirroring hosts where a
/// motion-value write marks the model dirty and a synchronous viewport
/// refresh forces the recompute.
pub trait TraceHost {
    /// Current motion value of a joint, in radians.
    fn joint_value(&self, joint: &str) -> Result<f64, HostError>;

    /// Set a joint's motion value. Takes effect on the next refresh.
    fn set_joint_value(&mut self, joint: &str, value: f64) -> Result<(), HostError>;

    /// Configured rotation limits of a joint.
    fn joint_limits(&self, joint: &str) -> Result<RotationLimits, HostError>;

    /// Native geometry of a tracked point at the current (refreshed) pose.
    fn point_geometry(&self, point: &str) -> Result<PointGeometry, HostError>;

    /// Create a working sketch on a planar reference. A new sketch is
    /// created per call; sketches are never reused across invocations.
    fn create_sketch(&mut self, reference: &str) -> Result<SketchHandle, HostError>;

    /// Placement frame of a working sketch.
    fn sketch_frame(&self, sketch: SketchHandle) -> Result<Frame, HostError>;

    /// Fit a closed spline through `points` (sketch-local) on a working
    /// sketch. Returns the curve index within that sketch.
    fn add_fitted_spline(
        &mut self,
        sketch: SketchHandle,
        points: Vec<Point3>,
    ) -> Result<usize, HostError>;

    /// Mark a curve fixed so downstream sketch edits cannot disturb it.
    fn fix_curve(&mut self, sketch: SketchHandle, curve: usize) -> Result<(), HostError>;

    /// Force pending geometry recomputation to become queryable.
    /// Synchronous and blocking.
    fn refresh(&mut self);
}
