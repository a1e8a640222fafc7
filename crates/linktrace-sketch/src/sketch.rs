//! Sketches authored on a planar reference.

use linktrace_math::{Frame, Point3};

use crate::{FittedSpline, SketchError};

/// A sketch on a planar reference, holding the curves a trace authors.
///
/// Curve coordinates are local to the sketch plane; the placement [`Frame`]
/// maps them to document space.
#[derive(Debug, Clone)]
pub struct Sketch {
    frame: Frame,
    curves: Vec<FittedSpline>,
}

impl Sketch {
    /// Create an empty sketch with the given placement.
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            curves: Vec::new(),
        }
    }

    /// The sketch placement frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Fit a closed spline through `points` (sketch-local) and add it to
    /// the sketch. Returns the index of the new curve.
    pub fn add_fitted_spline(&mut self, points: Vec<Point3>) -> Result<usize, SketchError> {
        let spline = FittedSpline::through(points)?;
        self.curves.push(spline);
        Ok(self.curves.len() - 1)
    }

    /// The curves authored so far.
    pub fn curves(&self) -> &[FittedSpline] {
        &self.curves
    }

    /// Mutable access to a curve by index.
    pub fn curve_mut(&mut self, index: usize) -> Option<&mut FittedSpline> {
        self.curves.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linktrace_math::Vec3;

    #[test]
    fn add_and_fix_a_curve() {
        let frame = Frame::from_plane(Point3::origin(), Vec3::x(), Vec3::y()).unwrap();
        let mut sketch = Sketch::new(frame);
        let idx = sketch
            .add_fitted_spline(vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
            ])
            .unwrap();
        assert_eq!(sketch.curves().len(), 1);
        assert!(!sketch.curves()[idx].is_fixed);

        sketch.curve_mut(idx).unwrap().is_fixed = true;
        assert!(sketch.curves()[idx].is_fixed);
    }

    #[test]
    fn bad_curve_leaves_sketch_unchanged() {
        let mut sketch = Sketch::new(Frame::identity());
        let err = sketch.add_fitted_spline(vec![Point3::origin()]);
        assert!(err.is_err());
        assert!(sketch.curves().is_empty());
    }
}
