//! Scene representation: named surfaces plus a single area light.
//!
//! A scene is built once before rendering and only read afterwards, so a
//! `&Scene` can be shared freely between render workers.
//!
//! # Surface order
//!
//! [`Scene::first_hit`] returns the first surface, in insertion order, that a
//! ray hits at all. That equals the nearest hit only when no surface lies in
//! front of another along any ray the renderer casts, which holds for a
//! closed box viewed from inside. Scenes that break this should be rendered
//! with [`Scene::nearest_hit`] instead.

use crate::{hittable::Hittable, AreaLight, Bsdf, Quad, Ray};
use cornell_math::Vec3;

/// A named quad with a reflectance model.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// Name, for diagnostics only
    name: String,
    quad: Quad,
    bsdf: Bsdf,
}

impl Surface {
    /// Create a new surface.
    pub fn new(name: impl Into<String>, quad: Quad, bsdf: Bsdf) -> Self {
        Self {
            name: name.into(),
            quad,
            bsdf,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    pub fn bsdf(&self) -> &Bsdf {
        &self.bsdf
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.quad.normal()
    }
}

impl Hittable for Surface {
    fn hit(&self, ray: &Ray) -> Option<f32> {
        self.quad.hit(ray)
    }
}

/// Immutable scene: ordered surfaces and exactly one area light.
#[derive(Debug, Clone)]
pub struct Scene {
    surfaces: Vec<Surface>,
    light: AreaLight,
}

impl Scene {
    /// Create a scene. Surface order is significant for [`Scene::first_hit`].
    pub fn new(surfaces: Vec<Surface>, light: AreaLight) -> Self {
        Self { surfaces, light }
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn light(&self) -> &AreaLight {
        &self.light
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the scene has no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// First surface in scene order that `ray` hits, with its distance.
    pub fn first_hit(&self, ray: &Ray) -> Option<(&Surface, f32)> {
        self.surfaces
            .iter()
            .find_map(|surface| surface.hit(ray).map(|t| (surface, t)))
    }

    /// Closest surface along `ray`, with its distance.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<(&Surface, f32)> {
        let mut closest: Option<(&Surface, f32)> = None;

        for surface in &self.surfaces {
            if let Some(t) = surface.hit(ray) {
                if closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((surface, t));
                }
            }
        }

        closest
    }

    /// True when no surface hits the segment from `p1` to `p2`.
    ///
    /// Callers offset both endpoints along their surface normals first; the
    /// test itself applies no bias. Hits at exactly zero distance or at or
    /// beyond `p2` do not block.
    pub fn has_line_of_sight(&self, p1: Vec3, p2: Vec3) -> bool {
        let dist = (p2 - p1).length();
        let ray = Ray::between(p1, p2);

        !self
            .surfaces
            .iter()
            .filter_map(|surface| surface.hit(&ray))
            .any(|t| t > 0.0 && t < dist)
    }
}
