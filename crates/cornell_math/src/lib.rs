//! Cornell math - vector types shared by the renderer crates.
//!
//! Re-exports `glam` and adds the few value-level helpers the light
//! transport code leans on.

// Re-export glam for convenience
pub use glam::*;

mod ray;
pub use ray::Ray;

/// RGB color, linear. Same layout as a `Vec3`.
pub type Color = Vec3;

/// Normalize `v`, leaving a zero-length vector unchanged.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}
