//! Render configuration.
//!
//! Every field has a default, so a JSON config file only needs to list
//! what it changes.

use std::fs;
use std::path::Path;

use cornell_math::Color;
use serde::{Deserialize, Serialize};

use crate::{RenderError, RenderResult};

/// Which surface a ray is considered to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// First surface in scene order with any hit. Correct only for scenes
    /// where no surface occludes another, and the reference behaviour.
    #[default]
    FirstHit,
    /// True nearest-hit scan. Changes output for occluding scenes.
    Nearest,
}

/// How the recursive indirect estimate is folded into a surface's radiance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndirectWeighting {
    /// Add the bounce's radiance as returned. Reference behaviour; not an
    /// unbiased estimator.
    #[default]
    Unweighted,
    /// Scale by `bsdf * cos / pdf / continuation_probability`.
    Throughput,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum number of indirect bounces before a path is cut off
    pub max_depth: u32,
    /// Chance an indirect bounce is traced at all
    pub continuation_probability: f32,
    /// Offset along surface normals for shadow-ray endpoints
    pub bias: f32,
    /// Color returned when a ray hits nothing
    pub background: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Apply gamma 2.2 when quantizing to 8 bits
    pub gamma_correction: bool,
    pub hit_policy: HitPolicy,
    pub indirect_weighting: IndirectWeighting,
    /// Seed for the per-bucket random sources; random when unset
    pub seed: Option<u64>,
    /// Side length of a render bucket in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            samples_per_pixel: 1,
            max_depth: 64,
            continuation_probability: 0.7,
            bias: 1e-5,
            background: [0.0, 0.0, 0.0],
            fov_degrees: 50.0,
            gamma_correction: false,
            hit_policy: HitPolicy::FirstHit,
            indirect_weighting: IndirectWeighting::Unweighted,
            seed: None,
            bucket_size: 64,
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Background as a color.
    pub fn background(&self) -> Color {
        Color::from_array(self.background)
    }

    /// Reject settings the renderer cannot honour.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSamples);
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidDepth);
        }
        if !(0.0..1.0).contains(&self.continuation_probability) {
            return Err(RenderError::InvalidContinuation(self.continuation_probability));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidBucketSize);
        }
        Ok(())
    }
}
