//! Random sampling helpers.
//!
//! Every sampler takes the random source explicitly so renders are
//! reproducible from a seed and safe to run one-generator-per-worker.

use cornell_math::{normalize, Vec3};
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in [lo, hi).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * gen_f32(rng)
}

/// Tangent and bitangent completing an orthonormal frame around `n`.
///
/// The tangent is built from whichever of x/y has the larger magnitude, so
/// the division never approaches zero for a unit normal.
pub fn coordinate_frame(n: Vec3) -> (Vec3, Vec3) {
    let t = if n.x.abs() > n.y.abs() {
        Vec3::new(n.z, 0.0, -n.x) / (n.x * n.x + n.z * n.z).sqrt()
    } else {
        Vec3::new(0.0, -n.z, n.y) / (n.y * n.y + n.z * n.z).sqrt()
    };
    let b = n.cross(t);
    (t, b)
}

/// Direction on the unit hemisphere around +y in local coordinates.
///
/// `y = r1` is the polar cosine and `phi = 2 pi r2` the azimuth.
pub fn sample_hemisphere(rng: &mut dyn RngCore) -> Vec3 {
    let r1 = gen_f32(rng);
    let r2 = gen_f32(rng);

    let sin_theta = (1.0 - r1 * r1).max(0.0).sqrt();
    let phi = 2.0 * PI * r2;

    normalize(Vec3::new(sin_theta * phi.cos(), r1, sin_theta * phi.sin()))
}

/// Map a local hemisphere sample into world space: the local y axis lands
/// on `n`, x on the bitangent and z on the tangent.
#[inline]
pub fn to_world(sample: Vec3, n: Vec3, t: Vec3, b: Vec3) -> Vec3 {
    b * sample.x + n * sample.y + t * sample.z
}
