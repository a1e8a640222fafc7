//! Closed fitted splines through ordered point sequences.

use linktrace_math::{Point3, Tolerance};

use crate::SketchError;

/// A smooth closed curve interpolating an ordered point sequence.
///
/// The sequence is expected in loop form: the last point repeats the first.
/// Evaluation uses periodic Catmull-Rom interpolation, so the curve passes
/// through every sample and wraps seamlessly.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedSpline {
    points: Vec<Point3>,
    /// Fixed curves are excluded from downstream sketch edits.
    pub is_fixed: bool,
}

impl FittedSpline {
    /// Fit a closed spline through `points` (sketch-local coordinates).
    ///
    /// # Errors
    ///
    /// - [`SketchError::TooFewPoints`] if fewer than 3 points are given.
    /// - [`SketchError::NotClosed`] if the last point does not coincide
    ///   with the first.
    pub fn through(points: Vec<Point3>) -> Result<Self, SketchError> {
        if points.len() < 3 {
            return Err(SketchError::TooFewPoints(points.len()));
        }
        let gap = (points[points.len() - 1] - points[0]).norm();
        if gap >= Tolerance::DEFAULT.linear {
            return Err(SketchError::NotClosed(gap));
        }
        Ok(Self {
            points,
            is_fixed: false,
        })
    }

    /// The interpolation points, loop form included (last == first).
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of distinct interpolation points (the closing duplicate is
    /// not counted).
    pub fn span_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Evaluate the curve at parameter `t` in `[0, 1)`, periodic outside.
    pub fn evaluate(&self, t: f64) -> Point3 {
        let n = self.span_count();
        let t = t.rem_euclid(1.0) * n as f64;
        let span = (t as usize).min(n - 1);
        let u = t - span as f64;

        // Control points wrap around the loop (periodic Catmull-Rom).
        let p0 = self.points[(span + n - 1) % n];
        let p1 = self.points[span];
        let p2 = self.points[(span + 1) % n];
        let p3 = self.points[(span + 2) % n];

        let u2 = u * u;
        let u3 = u2 * u;
        let blend = |a: f64, b: f64, c: f64, d: f64| {
            0.5 * ((2.0 * b)
                + (-a + c) * u
                + (2.0 * a - 5.0 * b + 4.0 * c - d) * u2
                + (-a + 3.0 * b - 3.0 * c + d) * u3)
        };
        Point3::new(
            blend(p0.x, p1.x, p2.x, p3.x),
            blend(p0.y, p1.y, p2.y, p3.y),
            blend(p0.z, p1.z, p2.z, p3.z),
        )
    }

    /// Flatten the curve into a closed polyline with `per_span` segments
    /// between consecutive interpolation points.
    pub fn to_polyline(&self, per_span: usize) -> Vec<Point3> {
        let n = self.span_count();
        let steps = n * per_span.max(1);
        let mut out = Vec::with_capacity(steps + 1);
        for i in 0..steps {
            out.push(self.evaluate(i as f64 / steps as f64));
        }
        let first = out[0];
        out.push(first);
        out
    }
}
