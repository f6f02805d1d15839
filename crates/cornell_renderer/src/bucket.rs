//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently.
//! Each bucket owns its random source, seeded from the render seed and the
//! bucket index, so a seeded render is identical on any number of threads.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Integrator};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Random source for this bucket.
    pub fn rng(&self, seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed ^ (self.index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Split an image into row-major buckets of at most `bucket_size` square.
/// A zero size is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

/// Render a single bucket with its own seeded random source.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    integrator: &Integrator,
    seed: u64,
) -> BucketResult {
    let mut rng = bucket.rng(seed);
    let samples = integrator.config().samples_per_pixel;
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                integrator,
                bucket.x + local_x,
                bucket.y + local_y,
                samples,
                &mut rng,
            );
            pixels.push(color);
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
    }
}
