#![warn(missing_docs)]

//! Math types for linktrace.
//!
//! Thin wrappers around nalgebra providing the geometry needed to trace
//! joint-driven point paths: 3D points and vectors, affine transforms,
//! placement frames with cached inverses, and tolerance constants.

use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// A point in 3D document space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D sketch space.
pub type Point2 = nalgebra::Point2<f64>;

/// A 4x4 affine transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `offset`.
    pub fn translation(offset: Vec3) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = offset.x;
        m[(1, 3)] = offset.y;
        m[(2, 3)] = offset.z;
        Self { matrix: m }
    }

    /// Rotation by `angle` radians about an axis through the origin.
    ///
    /// Rodrigues' rotation formula.
    pub fn rotation(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Rotation by `angle` radians about an axis through `pivot`.
    ///
    /// This is the motion of a revolute joint: translate the pivot to the
    /// origin, rotate about the axis, translate back.
    pub fn rotation_about_pivot(pivot: &Point3, axis: &Dir3, angle: f64) -> Self {
        let to_origin = Self::translation(-pivot.coords);
        let back = Self::translation(pivot.coords);
        back.then(&Self::rotation(axis, angle)).then(&to_origin)
    }

    /// Compose: apply `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A placement frame: a forward transform from local to document space,
/// paired with its cached inverse.
///
/// A sketch plane's placement is captured once per trace invocation and its
/// inverse is applied to every sample, so the inverse is computed eagerly at
/// construction rather than per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    forward: Transform,
    inverse: Transform,
}

impl Frame {
    /// Build a frame from a forward transform.
    ///
    /// Returns `None` if the transform is not invertible (degenerate
    /// placement).
    pub fn new(forward: Transform) -> Option<Self> {
        let inverse = forward.inverse()?;
        Some(Self { forward, inverse })
    }

    /// Build a frame from a plane placement: origin plus in-plane x and y
    /// axes. The plane normal is `x_dir × y_dir`.
    ///
    /// Returns `None` if the axes are parallel or zero-length.
    pub fn from_plane(origin: Point3, x_dir: Vec3, y_dir: Vec3) -> Option<Self> {
        let normal = x_dir.cross(&y_dir);
        if normal.norm() < Tolerance::DEFAULT.linear {
            return None;
        }
        let x = x_dir.normalize();
        let z = normal.normalize();
        let y = z.cross(&x);
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 1>(0, 0).copy_from(&x);
        m.fixed_view_mut::<3, 1>(0, 1).copy_from(&y);
        m.fixed_view_mut::<3, 1>(0, 2).copy_from(&z);
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&origin.coords);
        Frame::new(Transform { matrix: m })
    }

    /// The identity frame (document space itself).
    pub fn identity() -> Self {
        Self {
            forward: Transform::identity(),
            inverse: Transform::identity(),
        }
    }

    /// The local-to-document transform.
    pub fn forward(&self) -> &Transform {
        &self.forward
    }

    /// The document-to-local transform.
    pub fn inverse(&self) -> &Transform {
        &self.inverse
    }

    /// Map a document-space point into this frame's local space.
    pub fn to_local(&self, p: &Point3) -> Point3 {
        self.inverse.apply_point(p)
    }

    /// Map a local point into document space.
    pub fn to_document(&self, p: &Point3) -> Point3 {
        self.forward.apply_point(p)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default CAD tolerances (1e-6 mm linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
