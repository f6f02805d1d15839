//! Rectangular area light.

use crate::{
    hittable::{hit_either, Hittable},
    sampling::gen_range,
    Ray, Triangle,
};
use cornell_math::{normalize, Color, Vec2, Vec3};
use rand::RngCore;

/// Emissive quad made of two triangles.
///
/// The sampling frame is derived from the first triangle: `u` runs from
/// `v1` to `v2`, `v` from `v1` to `v0`, and the centre sits halfway along
/// both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLight {
    t1: Triangle,
    t2: Triangle,
    emission: Color,
    power: f32,

    // Derived at construction
    u: Vec3,
    v: Vec3,
    normal: Vec3,
    extent: Vec2,
    centre: Vec3,
}

impl AreaLight {
    /// Create a new area light from its two halves.
    pub fn new(t1: Triangle, t2: Triangle, emission: Color, power: f32) -> Self {
        let u = t1.v2 - t1.v1;
        let v = t1.v0 - t1.v1;
        let centre = t1.v1 + u / 2.0 + v / 2.0;

        Self {
            t1,
            t2,
            emission,
            power,
            u: normalize(u),
            v: normalize(v),
            normal: t1.normal(),
            extent: Vec2::new(u.length(), v.length()),
            centre,
        }
    }

    /// Uniformly sample a point on the light's surface.
    pub fn sample_point(&self, rng: &mut dyn RngCore) -> Vec3 {
        let su = gen_range(rng, -0.5, 0.5) * self.extent.x;
        let sv = gen_range(rng, -0.5, 0.5) * self.extent.y;
        self.centre + self.u * su + self.v * sv
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    /// Direction the light emits toward.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn centre(&self) -> Vec3 {
        self.centre
    }

    /// In-plane unit axes `(u, v)`.
    pub fn axes(&self) -> (Vec3, Vec3) {
        (self.u, self.v)
    }

    /// Side lengths along `u` and `v`.
    pub fn extent(&self) -> Vec2 {
        self.extent
    }
}

impl Hittable for AreaLight {
    fn hit(&self, ray: &Ray) -> Option<f32> {
        hit_either(&self.t1, &self.t2, ray)
    }
}
