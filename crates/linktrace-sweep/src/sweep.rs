//! The sweep: sample a joint's motion, project tracked points, fit curves.

use std::f64::consts::TAU;

use linktrace_host::{PointGeometry, SketchHandle, TraceHost};
use linktrace_ir::RotationLimits;
use linktrace_math::Point3;

use crate::{TraceError, TraceSelections};

/// Number of motion samples taken across the swept range.
pub const RESOLUTION: usize = 100;

/// The angular range a sweep covers, resolved from a joint's limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    /// Sweep start: the configured minimum if enabled, else `0`.
    pub start: f64,
    /// The configured maximum if enabled, else `2π`.
    ///
    /// Recorded for callers but deliberately NOT applied to the sweep: the
    /// sweep always spans a full turn from `start`, matching the behavior
    /// this command has always had. See `angle_at`.
    pub resolved_max: f64,
}

impl SweepRange {
    /// Resolve a sweep range from a joint's configured limits.
    pub fn from_limits(limits: &RotationLimits) -> Self {
        Self {
            start: limits.minimum.unwrap_or(0.0),
            resolved_max: limits.maximum.unwrap_or(TAU),
        }
    }

    /// Motion value for sample `i` of `resolution`: a full turn from
    /// `start` regardless of `resolved_max`.
    pub fn angle_at(&self, i: usize, resolution: usize) -> f64 {
        self.start + (TAU / resolution as f64) * i as f64
    }
}

/// Result of a successful trace.
#[derive(Debug, Clone)]
pub struct TraceOutcome {
    /// The working sketch the curves were authored on.
    pub sketch: SketchHandle,
    /// Curve index on the working sketch for each tracked point, in
    /// selection order.
    pub curves: Vec<usize>,
    /// Samples interpolated by each curve (`RESOLUTION + 1`, loop form).
    pub samples_per_curve: usize,
}

/// Trace the paths of the selected points as the joint sweeps a full turn.
///
/// Builds a working sketch on the reference, samples each point's position
/// in the sketch's local frame at [`RESOLUTION`] joint poses, restores the
/// joint, then fits one closed fixed spline per point.
///
/// # Errors
///
/// - [`TraceError::MissingSelection`] if a selection class is empty;
///   checked before anything is mutated.
/// - [`TraceError::Fault`] if the host fails during setup or sampling. The
///   working sketch may already exist and, for faults raised inside the
///   sample loop, the joint is left at the last sampled pose — nothing is
///   rolled back.
pub fn trace<H: TraceHost>(
    host: &mut H,
    selections: &TraceSelections,
) -> Result<TraceOutcome, TraceError> {
    let sel = selections.validate()?;
    tracing::debug!(
        joint = sel.joint,
        reference = sel.reference,
        points = sel.points.len(),
        "trace command executing"
    );

    let sketch = host.create_sketch(sel.reference)?;
    let frame = host.sketch_frame(sketch)?;

    let original_value = host.joint_value(sel.joint)?;
    let range = SweepRange::from_limits(&host.joint_limits(sel.joint)?);

    let mut tracks: Vec<Vec<Point3>> = sel
        .points
        .iter()
        .map(|_| Vec::with_capacity(RESOLUTION + 1))
        .collect();

    for i in 0..RESOLUTION {
        host.set_joint_value(sel.joint, range.angle_at(i, RESOLUTION))?;
        // Geometry reflects the new pose only after a forced recompute.
        host.refresh();

        for (track, point) in tracks.iter_mut().zip(sel.points) {
            let document_pos = match host.point_geometry(point)? {
                PointGeometry::Document(p) => p,
                // Sketch-native points are local to their own sketch; lift
                // them into document space before projecting.
                PointGeometry::SketchLocal {
                    position,
                    sketch_transform,
                } => sketch_transform.apply_point(&position),
            };
            track.push(frame.to_local(&document_pos));
        }
    }

    host.set_joint_value(sel.joint, original_value)?;
    host.refresh();

    let mut curves = Vec::with_capacity(tracks.len());
    for mut track in tracks {
        // Close the loop so the fitted spline wraps seamlessly.
        let first = track[0];
        track.push(first);
        let curve = host.add_fitted_spline(sketch, track)?;
        host.fix_curve(sketch, curve)?;
        curves.push(curve);
    }

    host.refresh();
    tracing::info!(curves = curves.len(), "trace complete");

    Ok(TraceOutcome {
        sketch,
        curves,
        samples_per_curve: RESOLUTION + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_defaults_to_zero_and_full_turn() {
        let range = SweepRange::from_limits(&RotationLimits::default());
        assert_eq!(range.start, 0.0);
        assert_eq!(range.resolved_max, TAU);
    }

    #[test]
    fn range_takes_enabled_bounds() {
        let limits = RotationLimits {
            minimum: Some(0.5),
            maximum: Some(1.5),
        };
        let range = SweepRange::from_limits(&limits);
        assert_eq!(range.start, 0.5);
        assert_eq!(range.resolved_max, 1.5);
    }

    #[test]
    fn angles_step_uniformly_from_start() {
        let range = SweepRange::from_limits(&RotationLimits::default());
        assert_eq!(range.angle_at(0, RESOLUTION), 0.0);
        let step = TAU / RESOLUTION as f64;
        for i in 0..RESOLUTION {
            assert!((range.angle_at(i, RESOLUTION) - step * i as f64).abs() < 1e-15);
        }
        // Last sample stops one step short of a full turn.
        let last = range.angle_at(RESOLUTION - 1, RESOLUTION);
        assert!((last - (TAU - step)).abs() < 1e-12);
    }

    #[test]
    fn configured_maximum_does_not_shrink_the_sweep() {
        let limits = RotationLimits {
            minimum: Some(0.0),
            maximum: Some(std::f64::consts::PI),
        };
        let range = SweepRange::from_limits(&limits);
        // Samples past the configured maximum are still visited.
        let last = range.angle_at(RESOLUTION - 1, RESOLUTION);
        assert!(last > range.resolved_max);
    }
}
