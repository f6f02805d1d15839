use crate::{normalize, Vec3};

/// A ray in 3D space with an origin and a unit direction.
///
/// Rays are built per primary sample, per bounce and per shadow test, and
/// never outlive the call that made them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized on the way in.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: normalize(direction),
        }
    }

    /// Ray starting at `from` and heading toward `to`.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
