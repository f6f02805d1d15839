//! Pinhole camera for primary ray generation.

use crate::{sampling::gen_f32, Ray};
use cornell_math::Vec3;
use rand::RngCore;

/// Camera looking down -z from `position`.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    position: Vec3,
    /// Vertical field of view in degrees
    fov_degrees: f32,

    // Cached computed values
    aspect_ratio: f32,
    /// Half the width of the image plane at distance 1
    opposite: f32,
}

impl Camera {
    /// Create a camera at the origin with a 50 degree field of view.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        let mut camera = Self {
            image_width,
            image_height,
            position: Vec3::ZERO,
            fov_degrees: 50.0,
            aspect_ratio: 1.0,
            opposite: 0.0,
        };
        camera.update();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set field of view.
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self.update();
        self
    }

    fn update(&mut self) {
        self.aspect_ratio = self.image_width as f32 / self.image_height as f32;
        self.opposite = (self.fov_degrees * 0.5).to_radians().tan();
    }

    /// Generate a ray through pixel (x, y), jittered inside the disk
    /// inscribed in the pixel.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let (x_off, y_off) = sample_pixel_disk(rng);
        self.ray_through(x as f32 + x_off, y as f32 + y_off)
    }

    /// Ray through a continuous image position, (0, 0) being the top-left
    /// corner of the image.
    pub fn ray_through(&self, px: f32, py: f32) -> Ray {
        let xx = (2.0 * px / self.image_width as f32 - 1.0) * self.aspect_ratio * self.opposite;
        let yy = (1.0 - 2.0 * py / self.image_height as f32) * self.opposite;

        Ray::new(self.position, Vec3::new(xx, yy, -1.0))
    }
}

/// Rejection-sample an offset in [0, 1)^2 lying within 0.5 of the pixel
/// centre.
fn sample_pixel_disk(rng: &mut dyn RngCore) -> (f32, f32) {
    loop {
        let x_off = gen_f32(rng);
        let y_off = gen_f32(rng);
        let dx = x_off - 0.5;
        let dy = y_off - 0.5;
        if dx * dx + dy * dy <= 0.25 {
            return (x_off, y_off);
        }
    }
}
