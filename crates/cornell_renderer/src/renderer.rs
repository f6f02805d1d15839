//! Image driver.
//!
//! Generates jittered primary rays per pixel, averages their radiance and
//! collects the result in an [`ImageBuffer`]. Rendering is either
//! single-threaded with a caller-owned random source, or parallel over
//! buckets with rayon.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::{Camera, Color, Integrator, RenderConfig, RenderResult, Scene};
use rand::RngCore;
use rayon::prelude::*;

/// Apply gamma correction (gamma = 2.2).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.powf(1.0 / 2.2)
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGB: clamp to [0, 1], optionally gamma
/// correct, scale to 255 and truncate.
pub fn color_to_rgb(color: Color, gamma_correction: bool) -> [u8; 3] {
    let encode = |c: f32| {
        let c = clamp_01(c);
        let c = if gamma_correction { linear_to_gamma(c) } else { c };
        (255.0 * c) as u8
    };
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    integrator: &Integrator,
    x: u32,
    y: u32,
    samples: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += integrator.radiance(&ray, rng);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Linear RGB image, row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Offset of (x, y) in `pixels`, computed in `usize` so large images
    /// don't overflow.
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn blit(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let x = bucket.x + i as u32 % bucket.width;
            let y = bucket.y + i as u32 / bucket.width;
            self.set(x, y, *color);
        }
    }

    /// Convert to packed RGB bytes.
    pub fn to_rgb8(&self, gamma_correction: bool) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb(*color, gamma_correction))
            .collect()
    }
}

/// Camera matching the configured resolution and field of view.
pub fn camera_for(config: &RenderConfig) -> Camera {
    Camera::new(config.width, config.height).with_fov(config.fov_degrees)
}

/// Render the entire scene on the calling thread.
pub fn render(scene: &Scene, config: &RenderConfig, rng: &mut dyn RngCore) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let camera = camera_for(config);
    let integrator = Integrator::new(scene, config);
    let mut image = ImageBuffer::new(config.width, config.height);

    for y in 0..config.height {
        log::trace!("Row {}/{}", y + 1, config.height);
        for x in 0..config.width {
            let color = render_pixel(&camera, &integrator, x, y, config.samples_per_pixel, rng);
            image.set(x, y, color);
        }
    }

    Ok(image)
}

/// Render the entire scene in parallel over buckets.
///
/// Uses `config.seed`, or a random seed (logged) when unset.
pub fn render_parallel(scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let camera = camera_for(config);
    let integrator = Integrator::new(scene, config);
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, {} buckets, seed {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        buckets.len(),
        seed
    );

    let start = Instant::now();
    let done = AtomicUsize::new(0);
    let total = buckets.len();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, &camera, &integrator, seed);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {} done ({}/{})", bucket.index, finished, total);
            result
        })
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.blit(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}
