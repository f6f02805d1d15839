//! Reflectance model: normalized Blinn-Phong over a Lambertian base.

use cornell_math::{normalize, Color, Vec3};
use std::f32::consts::PI;

/// Lambertian + glossy BSDF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bsdf {
    /// Lambertian (diffuse) coefficient
    pub diffuse: Color,
    /// Glossy coefficient
    pub glossy: Color,
    /// Blinn-Phong exponent
    pub shininess: f32,
}

impl Bsdf {
    /// Create a new BSDF.
    pub fn new(diffuse: Color, glossy: Color, shininess: f32) -> Self {
        Self {
            diffuse,
            glossy,
            shininess,
        }
    }

    /// Purely diffuse surface.
    pub fn lambertian(diffuse: Color) -> Self {
        Self::new(diffuse, Color::ZERO, 0.0)
    }

    /// Reflectance for light arriving along `w_i` and leaving along `w_o`
    /// at a surface with normal `n`.
    ///
    /// `(diffuse + glossy * (s + 8) / 8 * cos_h^s) / pi`, with `cos_h` the
    /// half-vector cosine clamped to [0, 1].
    pub fn evaluate(&self, w_i: Vec3, w_o: Vec3, n: Vec3) -> Color {
        let halfway = normalize(w_i + w_o);
        let cos_h = halfway.dot(n).clamp(0.0, 1.0);
        let lobe = cos_h.powf(self.shininess);

        (self.diffuse + self.glossy * ((self.shininess + 8.0) * lobe / 8.0)) / PI
    }
}

impl Default for Bsdf {
    fn default() -> Self {
        Self::lambertian(Color::ONE)
    }
}
