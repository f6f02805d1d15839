//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{hittable::Hittable, Ray};
use cornell_math::{normalize, Vec3};

/// Smallest determinant accepted as a front-facing hit. Rejects back faces
/// and rays (nearly) parallel to the plane.
pub const DETERMINANT_EPSILON: f32 = 1e-7;

/// Barycentric coordinates may dip this far below zero, so rays grazing a
/// shared edge still hit one side.
pub const BARYCENTRIC_EPSILON: f32 = 1e-10;

/// A triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The face normal is `(v1 - v0) x (v2 - v0)`; rays only hit the side it
    /// points toward.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        Self {
            v0,
            v1,
            v2,
            normal: normalize(edge1.cross(edge2)),
        }
    }

    /// Unit face normal.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    /// One-sided Möller-Trumbore ray-triangle intersection.
    fn hit(&self, ray: &Ray) -> Option<f32> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let pvec = ray.direction().cross(edge2);
        let determinant = edge1.dot(pvec);

        // Back facing or parallel to the plane
        if determinant <= DETERMINANT_EPSILON {
            return None;
        }

        let tvec = ray.origin() - self.v0;
        let qvec = tvec.cross(edge1);

        let beta = tvec.dot(pvec) / determinant;
        let gamma = ray.direction().dot(qvec) / determinant;
        let alpha = 1.0 - beta - gamma;

        if alpha < -BARYCENTRIC_EPSILON || beta < -BARYCENTRIC_EPSILON || gamma < -BARYCENTRIC_EPSILON {
            return None;
        }

        let t = edge2.dot(qvec) / determinant;
        if t < 0.0 {
            return None;
        }

        Some(t)
    }
}
