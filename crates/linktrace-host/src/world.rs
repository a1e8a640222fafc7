//! In-memory linkage world backed by a document.

use std::collections::HashMap;

use linktrace_ir::{LinkageDocument, RotationLimits, TrackedPointKind};
use linktrace_math::{Dir3, Frame, Point3, Tolerance, Transform, Vec3};
use linktrace_sketch::Sketch;

use crate::{HostError, PointGeometry, SketchHandle, TraceHost};

fn to_point(v: &linktrace_ir::Vec3) -> Point3 {
    Point3::new(v.x, v.y, v.z)
}

fn to_vec(v: &linktrace_ir::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// A document-backed [`TraceHost`] with single-revolute forward kinematics.
///
/// Each body driven by a joint rotates rigidly about the joint's pivot
/// axis; a tracked point at rest position `p` sits at
/// `R(axis, value) · p` (rotation taken about the pivot). Motion-value
/// writes are buffered and committed by [`refresh`](TraceHost::refresh),
/// so geometry queries always reflect the last refreshed pose.
pub struct LinkageWorld {
    doc: LinkageDocument,
    /// Committed joint values — what geometry queries see.
    committed: HashMap<String, f64>,
    /// Written but not yet refreshed joint values.
    pending: HashMap<String, f64>,
    /// Placements of the document's own sketches, keyed by sketch id.
    sketch_frames: HashMap<String, Frame>,
    /// Working sketches created by trace invocations.
    working: Vec<Sketch>,
    refreshes: u64,
}

impl LinkageWorld {
    /// Build a world from a document.
    ///
    /// Validates joint axes and document sketch placements up front.
    pub fn from_document(doc: LinkageDocument) -> Result<Self, HostError> {
        for joint in &doc.joints {
            if to_vec(&joint.axis).norm() < Tolerance::DEFAULT.linear {
                return Err(HostError::DegenerateAxis(joint.id.clone()));
            }
        }

        let mut sketch_frames = HashMap::new();
        for sketch in &doc.sketches {
            let frame = Frame::from_plane(
                to_point(&sketch.origin),
                to_vec(&sketch.x_axis),
                to_vec(&sketch.y_axis),
            )
            .ok_or_else(|| HostError::DegeneratePlacement(sketch.id.clone()))?;
            sketch_frames.insert(sketch.id.clone(), frame);
        }

        let committed: HashMap<String, f64> = doc
            .joints
            .iter()
            .map(|j| (j.id.clone(), j.value))
            .collect();

        tracing::debug!(
            joints = doc.joints.len(),
            points = doc.points.len(),
            "linkage world created"
        );

        Ok(Self {
            doc,
            committed,
            pending: HashMap::new(),
            sketch_frames,
            working: Vec::new(),
            refreshes: 0,
        })
    }

    /// The underlying document.
    pub fn document(&self) -> &LinkageDocument {
        &self.doc
    }

    /// Working sketches created so far, in creation order.
    pub fn working_sketches(&self) -> &[Sketch] {
        &self.working
    }

    /// A working sketch by handle.
    pub fn working_sketch(&self, handle: SketchHandle) -> Option<&Sketch> {
        self.working.get(handle.0)
    }

    /// How many viewport refreshes have been forced.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    /// Rigid transform of a body at the committed pose.
    fn body_pose(&self, body: &str) -> Transform {
        // Single-joint scope: the first joint driving the body wins.
        let Some(joint) = self.doc.joints.iter().find(|j| j.body == body) else {
            return Transform::identity();
        };
        let value = self.committed.get(&joint.id).copied().unwrap_or(joint.value);
        let axis = Dir3::new_normalize(to_vec(&joint.axis));
        Transform::rotation_about_pivot(&to_point(&joint.pivot), &axis, value)
    }
}

impl TraceHost for LinkageWorld {
    fn joint_value(&self, joint: &str) -> Result<f64, HostError> {
        // The motion parameter reads back the latest write even before a
        // refresh; only geometry lags.
        if let Some(v) = self.pending.get(joint) {
            return Ok(*v);
        }
        self.committed
            .get(joint)
            .copied()
            .ok_or_else(|| HostError::MissingJoint(joint.to_string()))
    }

    fn set_joint_value(&mut self, joint: &str, value: f64) -> Result<(), HostError> {
        if !self.committed.contains_key(joint) {
            return Err(HostError::MissingJoint(joint.to_string()));
        }
        self.pending.insert(joint.to_string(), value);
        Ok(())
    }

    fn joint_limits(&self, joint: &str) -> Result<RotationLimits, HostError> {
        self.doc
            .joint(joint)
            .map(|j| j.limits)
            .ok_or_else(|| HostError::MissingJoint(joint.to_string()))
    }

    fn point_geometry(&self, point: &str) -> Result<PointGeometry, HostError> {
        let def = self
            .doc
            .point(point)
            .ok_or_else(|| HostError::MissingPoint(point.to_string()))?;

        match &def.kind {
            TrackedPointKind::Vertex { body, at } => {
                let pose = self.body_pose(body);
                Ok(PointGeometry::Document(pose.apply_point(&to_point(at))))
            }
            TrackedPointKind::ConstructionPoint { body, at } => {
                let pose = body
                    .as_deref()
                    .map(|b| self.body_pose(b))
                    .unwrap_or_default();
                Ok(PointGeometry::Document(pose.apply_point(&to_point(at))))
            }
            TrackedPointKind::SketchPoint { sketch, at } => {
                let frame = self
                    .sketch_frames
                    .get(sketch)
                    .ok_or_else(|| HostError::MissingSketch(sketch.clone()))?;
                Ok(PointGeometry::SketchLocal {
                    position: to_point(at),
                    sketch_transform: frame.forward().clone(),
                })
            }
        }
    }

    fn create_sketch(&mut self, reference: &str) -> Result<SketchHandle, HostError> {
        let planar = self
            .doc
            .reference(reference)
            .ok_or_else(|| HostError::MissingReference(reference.to_string()))?;
        let frame = Frame::from_plane(
            to_point(&planar.origin),
            to_vec(&planar.x_axis),
            to_vec(&planar.y_axis),
        )
        .ok_or_else(|| HostError::DegeneratePlacement(planar.id.clone()))?;

        self.working.push(Sketch::new(frame));
        let handle = SketchHandle(self.working.len() - 1);
        tracing::debug!(reference, handle = handle.0, "working sketch created");
        Ok(handle)
    }

    fn sketch_frame(&self, sketch: SketchHandle) -> Result<Frame, HostError> {
        self.working
            .get(sketch.0)
            .map(|s| s.frame().clone())
            .ok_or(HostError::InvalidSketchHandle(sketch.0))
    }

    fn add_fitted_spline(
        &mut self,
        sketch: SketchHandle,
        points: Vec<Point3>,
    ) -> Result<usize, HostError> {
        let target = self
            .working
            .get_mut(sketch.0)
            .ok_or(HostError::InvalidSketchHandle(sketch.0))?;
        Ok(target.add_fitted_spline(points)?)
    }

    fn fix_curve(&mut self, sketch: SketchHandle, curve: usize) -> Result<(), HostError> {
        let target = self
            .working
            .get_mut(sketch.0)
            .ok_or(HostError::InvalidSketchHandle(sketch.0))?;
        let spline = target
            .curve_mut(curve)
            .ok_or(HostError::InvalidCurve {
                sketch: sketch.0,
                curve,
            })?;
        spline.is_fixed = true;
        Ok(())
    }

    fn refresh(&mut self) {
        for (id, value) in self.pending.drain() {
            self.committed.insert(id, value);
        }
        self.refreshes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linktrace_ir::{Body, Joint, PlanarRef, PlanarRefKind, SketchDef, TrackedPointDef};
    use std::f64::consts::FRAC_PI_2;

    fn crank_doc() -> LinkageDocument {
        LinkageDocument {
            bodies: vec![Body {
                id: "crank".into(),
                name: None,
            }],
            joints: vec![Joint {
                id: "hinge".into(),
                name: None,
                body: "crank".into(),
                pivot: linktrace_ir::Vec3::new(0.0, 0.0, 0.0),
                axis: linktrace_ir::Vec3::new(0.0, 0.0, 1.0),
                value: 0.0,
                limits: RotationLimits::default(),
            }],
            references: vec![PlanarRef {
                id: "base".into(),
                kind: PlanarRefKind::ConstructionPlane,
                origin: linktrace_ir::Vec3::new(0.0, 0.0, 0.0),
                x_axis: linktrace_ir::Vec3::new(1.0, 0.0, 0.0),
                y_axis: linktrace_ir::Vec3::new(0.0, 1.0, 0.0),
            }],
            points: vec![TrackedPointDef {
                id: "tip".into(),
                kind: TrackedPointKind::Vertex {
                    body: "crank".into(),
                    at: linktrace_ir::Vec3::new(1.0, 0.0, 0.0),
                },
            }],
            sketches: vec![SketchDef {
                id: "s0".into(),
                origin: linktrace_ir::Vec3::new(0.0, 0.0, 5.0),
                x_axis: linktrace_ir::Vec3::new(1.0, 0.0, 0.0),
                y_axis: linktrace_ir::Vec3::new(0.0, 1.0, 0.0),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn geometry_lags_until_refresh() {
        let mut world = LinkageWorld::from_document(crank_doc()).unwrap();

        world.set_joint_value("hinge", FRAC_PI_2).unwrap();
        // Motion parameter reads back immediately.
        assert_eq!(world.joint_value("hinge").unwrap(), FRAC_PI_2);

        // Geometry still at the old pose.
        let before = world.point_geometry("tip").unwrap().to_document();
        assert!((before - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-12);

        world.refresh();
        let after = world.point_geometry("tip").unwrap().to_document();
        assert!((after - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn sketch_point_carries_owning_sketch_transform() {
        let mut doc = crank_doc();
        doc.points.push(TrackedPointDef {
            id: "sp".into(),
            kind: TrackedPointKind::SketchPoint {
                sketch: "s0".into(),
                at: linktrace_ir::Vec3::new(2.0, 3.0, 0.0),
            },
        });
        let world = LinkageWorld::from_document(doc).unwrap();

        let geom = world.point_geometry("sp").unwrap();
        // Owning sketch sits at z = 5: local (2,3,0) is document (2,3,5).
        let doc_pos = geom.to_document();
        assert!((doc_pos - Point3::new(2.0, 3.0, 5.0)).norm() < 1e-12);
        assert!(matches!(geom, PointGeometry::SketchLocal { .. }));
    }

    #[test]
    fn degenerate_joint_axis_is_rejected() {
        let mut doc = crank_doc();
        doc.joints[0].axis = linktrace_ir::Vec3::new(0.0, 0.0, 0.0);
        assert!(matches!(
            LinkageWorld::from_document(doc),
            Err(HostError::DegenerateAxis(_))
        ));
    }

    #[test]
    fn create_sketch_requires_known_reference() {
        let mut world = LinkageWorld::from_document(crank_doc()).unwrap();
        assert!(matches!(
            world.create_sketch("nope"),
            Err(HostError::MissingReference(_))
        ));
        assert!(world.working_sketches().is_empty());

        let handle = world.create_sketch("base").unwrap();
        assert_eq!(world.working_sketches().len(), 1);
        assert!(world.sketch_frame(handle).is_ok());
    }

    #[test]
    fn fix_curve_marks_spline() {
        let mut world = LinkageWorld::from_document(crank_doc()).unwrap();
        let sketch = world.create_sketch("base").unwrap();
        let curve = world
            .add_fitted_spline(
                sketch,
                vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.0, 1.0, 0.0),
                    Point3::new(0.0, 0.0, 0.0),
                ],
            )
            .unwrap();
        world.fix_curve(sketch, curve).unwrap();
        assert!(world.working_sketch(sketch).unwrap().curves()[curve].is_fixed);
    }
}
