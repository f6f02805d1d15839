//! Hittable trait for ray-primitive intersection.

use crate::Ray;

/// Trait for objects that can be hit by rays.
///
/// A hit is reported as the distance along the ray; `None` means the ray
/// misses. Implementations are one-sided: back faces never report a hit.
pub trait Hittable: Send + Sync {
    /// Distance along `ray` to the intersection, if any.
    fn hit(&self, ray: &Ray) -> Option<f32>;
}

/// Hit the first primitive, falling back to the second.
///
/// Shared by quads and the area light, which are both a pair of coplanar
/// triangles sharing a diagonal.
#[inline]
pub(crate) fn hit_either<A: Hittable, B: Hittable>(first: &A, second: &B, ray: &Ray) -> Option<f32> {
    first.hit(ray).or_else(|| second.hit(ray))
}
