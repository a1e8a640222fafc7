#![warn(missing_docs)]

//! Linkage document model for linktrace.
//!
//! Defines the serializable description of a linkage: rigid bodies, the
//! revolute joints that drive them, the points a trace can track, the
//! planar references a trace sketch can be placed on, and any sketches the
//! document already contains.
//!
//! The document is purely declarative. Evaluating joint motion (forward
//! kinematics) is handled by `linktrace-host`.

use serde::{Deserialize, Serialize};

/// 3D vector with f64 components (conventionally millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A rigid body in the linkage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Unique identifier.
    pub id: String,
    /// Optional human-readable name.
    pub name: Option<String>,
}

/// Optional angular bounds on a revolute joint, in radians.
///
/// Each bound is individually optional: `None` means that side of the
/// range is unbounded, matching hosts where minimum and maximum have
/// independent enable flags.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationLimits {
    /// Lower bound in radians, if enabled.
    pub minimum: Option<f64>,
    /// Upper bound in radians, if enabled.
    pub maximum: Option<f64>,
}

/// A revolute joint driving one body about a fixed pivot axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    /// Unique identifier.
    pub id: String,
    /// Optional human-readable name.
    pub name: Option<String>,
    /// Id of the [`Body`] this joint rotates.
    pub body: String,
    /// Pivot point on the rotation axis, in document space.
    pub pivot: Vec3,
    /// Rotation axis direction (need not be normalized).
    pub axis: Vec3,
    /// Current motion value in radians.
    pub value: f64,
    /// Configured rotation limits.
    #[serde(default)]
    pub limits: RotationLimits,
}

/// The geometric kind of a tracked point selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrackedPointKind {
    /// A body vertex. `at` is its rest position in document space; the
    /// point moves with the body's joint.
    Vertex {
        /// Owning body id.
        body: String,
        /// Rest position in document space.
        at: Vec3,
    },
    /// A construction point, optionally attached to a body.
    ConstructionPoint {
        /// Owning body id, or `None` for a document-fixed point.
        body: Option<String>,
        /// Rest position in document space.
        at: Vec3,
    },
    /// A point belonging to a sketch. `at` is in the sketch's own local
    /// coordinates and must be mapped through the sketch placement before
    /// any document-space use.
    SketchPoint {
        /// Owning sketch id.
        sketch: String,
        /// Position in sketch-local coordinates.
        at: Vec3,
    },
}

/// A point whose path a trace can record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedPointDef {
    /// Unique identifier.
    pub id: String,
    /// What kind of point this is and where it lives.
    #[serde(flatten)]
    pub kind: TrackedPointKind,
}

/// The selection kind of a planar reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlanarRefKind {
    /// A planar face of a body.
    PlanarFace,
    /// A closed sketch profile.
    Profile,
    /// A construction plane.
    ConstructionPlane,
}

/// A planar reference a trace sketch can be built on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarRef {
    /// Unique identifier.
    pub id: String,
    /// Selection kind.
    pub kind: PlanarRefKind,
    /// Plane origin in document space.
    pub origin: Vec3,
    /// In-plane x axis direction.
    pub x_axis: Vec3,
    /// In-plane y axis direction.
    pub y_axis: Vec3,
}

/// A sketch already present in the document (owner of sketch points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchDef {
    /// Unique identifier.
    pub id: String,
    /// Sketch plane origin in document space.
    pub origin: Vec3,
    /// In-plane x axis direction.
    pub x_axis: Vec3,
    /// In-plane y axis direction.
    pub y_axis: Vec3,
}

/// A linkage document — the `.json` file format consumed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkageDocument {
    /// Format version string (e.g. "0.1").
    pub version: String,
    /// Rigid bodies.
    pub bodies: Vec<Body>,
    /// Revolute joints.
    pub joints: Vec<Joint>,
    /// Planar references.
    pub references: Vec<PlanarRef>,
    /// Trackable points.
    pub points: Vec<TrackedPointDef>,
    /// Existing sketches.
    #[serde(default)]
    pub sketches: Vec<SketchDef>,
}

impl Default for LinkageDocument {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            bodies: Vec::new(),
            joints: Vec::new(),
            references: Vec::new(),
            points: Vec::new(),
            sketches: Vec::new(),
        }
    }
}

impl LinkageDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a joint by id.
    pub fn joint(&self, id: &str) -> Option<&Joint> {
        self.joints.iter().find(|j| j.id == id)
    }

    /// Look up a planar reference by id.
    pub fn reference(&self, id: &str) -> Option<&PlanarRef> {
        self.references.iter().find(|r| r.id == id)
    }

    /// Look up a tracked point by id.
    pub fn point(&self, id: &str) -> Option<&TrackedPointDef> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Look up a sketch by id.
    pub fn sketch(&self, id: &str) -> Option<&SketchDef> {
        self.sketches.iter().find(|s| s.id == id)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> LinkageDocument {
        LinkageDocument {
            bodies: vec![Body {
                id: "crank".into(),
                name: Some("Crank".into()),
            }],
            joints: vec![Joint {
                id: "hinge".into(),
                name: None,
                body: "crank".into(),
                pivot: Vec3::new(0.0, 0.0, 0.0),
                axis: Vec3::new(0.0, 0.0, 1.0),
                value: 0.25,
                limits: RotationLimits {
                    minimum: Some(0.0),
                    maximum: None,
                },
            }],
            references: vec![PlanarRef {
                id: "base".into(),
                kind: PlanarRefKind::ConstructionPlane,
                origin: Vec3::new(0.0, 0.0, 0.0),
                x_axis: Vec3::new(1.0, 0.0, 0.0),
                y_axis: Vec3::new(0.0, 1.0, 0.0),
            }],
            points: vec![TrackedPointDef {
                id: "tip".into(),
                kind: TrackedPointKind::Vertex {
                    body: "crank".into(),
                    at: Vec3::new(5.0, 0.0, 0.0),
                },
            }],
            ..Default::default()
        }
    }

    #[test]
    fn json_round_trip() {
        let doc = sample_doc();
        let json = doc.to_json().unwrap();
        let back = LinkageDocument::from_json(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn lookups_by_id() {
        let doc = sample_doc();
        assert!(doc.joint("hinge").is_some());
        assert!(doc.joint("nope").is_none());
        assert!(doc.reference("base").is_some());
        assert!(doc.point("tip").is_some());
        assert!(doc.sketch("none").is_none());
    }

    #[test]
    fn tracked_point_kind_serializes_tagged() {
        let point = TrackedPointDef {
            id: "p".into(),
            kind: TrackedPointKind::SketchPoint {
                sketch: "s0".into(),
                at: Vec3::new(1.0, 2.0, 0.0),
            },
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"type\":\"SketchPoint\""));
        let back: TrackedPointDef = serde_json::from_str(&json).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn limits_default_to_unbounded() {
        let json = r#"{
            "id": "j", "name": null, "body": "b",
            "pivot": {"x":0.0,"y":0.0,"z":0.0},
            "axis": {"x":0.0,"y":0.0,"z":1.0},
            "value": 0.0
        }"#;
        let joint: Joint = serde_json::from_str(json).unwrap();
        assert_eq!(joint.limits, RotationLimits::default());
        assert!(joint.limits.minimum.is_none());
        assert!(joint.limits.maximum.is_none());
    }
}
