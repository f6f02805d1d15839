//! Planar quadrilateral made of two triangles sharing a diagonal.

use crate::{
    hittable::{hit_either, Hittable},
    Ray, Triangle,
};
use cornell_math::Vec3;

/// A rectangle built from two coplanar triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    t1: Triangle,
    t2: Triangle,
}

impl Quad {
    /// Create a quad from its two halves. The first triangle supplies the
    /// normal for the whole quad.
    pub fn new(t1: Triangle, t2: Triangle) -> Self {
        Self { t1, t2 }
    }

    /// Quad over corners `a, b, c, d` in winding order, split along `a-c`.
    pub fn from_corners(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        Self::new(Triangle::new(a, b, c), Triangle::new(a, c, d))
    }

    /// Unit normal shared by both halves.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.t1.normal()
    }

    /// The two constituent triangles.
    pub fn triangles(&self) -> (&Triangle, &Triangle) {
        (&self.t1, &self.t2)
    }
}

impl Hittable for Quad {
    fn hit(&self, ray: &Ray) -> Option<f32> {
        hit_either(&self.t1, &self.t2, ray)
    }
}
