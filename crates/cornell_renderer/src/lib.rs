//! Cornell renderer - CPU path tracing for a single-light box scene.
//!
//! A Monte Carlo path tracer with next-event estimation: every surface hit
//! takes one shadow-ray sample of the area light plus one randomly
//! terminated indirect bounce, weighted by a normalized Blinn-Phong BSDF.
//!
//! The scene is built once and shared read-only; all randomness flows
//! through explicitly passed generators.

mod bucket;
mod camera;
mod config;
mod error;
mod hittable;
mod integrator;
mod light;
mod material;
mod output;
mod quad;
mod renderer;
mod sampling;
mod scene;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult};
pub use camera::Camera;
pub use config::{HitPolicy, IndirectWeighting, RenderConfig};
pub use error::{RenderError, RenderResult};
pub use hittable::Hittable;
pub use integrator::Integrator;
pub use light::AreaLight;
pub use material::Bsdf;
pub use output::{save, write_ppm};
pub use quad::Quad;
pub use renderer::{camera_for, color_to_rgb, render, render_parallel, render_pixel, ImageBuffer};
pub use sampling::{coordinate_frame, gen_f32, gen_range, sample_hemisphere, to_world};
pub use scene::{Scene, Surface};
pub use triangle::{Triangle, BARYCENTRIC_EPSILON, DETERMINANT_EPSILON};

/// Re-export math types from cornell_math
pub use cornell_math::{Color, Ray, Vec3};
