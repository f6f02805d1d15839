//! The Cornell box scene table.
//!
//! A 4x4x4 room from z = -4 to z = -8 viewed from the origin, with a 1x1
//! light flush with the ceiling. Every wall faces inward and none occludes
//! another, so first-hit shading sees the right surface.

use cornell_math::{Color, Vec3};
use cornell_renderer::{AreaLight, Bsdf, Quad, Scene, Surface, Triangle};

/// Build the Cornell box.
pub fn cornell_box() -> Scene {
    let top_left_front = Vec3::new(-2.0, 2.0, -4.0);
    let top_left_back = Vec3::new(-2.0, 2.0, -8.0);
    let top_right_front = Vec3::new(2.0, 2.0, -4.0);
    let top_right_back = Vec3::new(2.0, 2.0, -8.0);

    let bot_left_front = Vec3::new(-2.0, -2.0, -4.0);
    let bot_left_back = Vec3::new(-2.0, -2.0, -8.0);
    let bot_right_front = Vec3::new(2.0, -2.0, -4.0);
    let bot_right_back = Vec3::new(2.0, -2.0, -8.0);

    let white = Bsdf::lambertian(Color::ONE);

    let surfaces = vec![
        Surface::new(
            "back_wall",
            Quad::from_corners(top_left_back, bot_left_back, bot_right_back, top_right_back),
            white,
        ),
        Surface::new(
            "left_wall",
            Quad::from_corners(top_left_front, bot_left_front, bot_left_back, top_left_back),
            Bsdf::lambertian(Color::new(1.0, 0.0, 0.0)),
        ),
        Surface::new(
            "right_wall",
            Quad::from_corners(top_right_back, bot_right_back, bot_right_front, top_right_front),
            Bsdf::lambertian(Color::new(0.25, 1.0, 1.0)),
        ),
        Surface::new(
            "ceiling",
            Quad::from_corners(top_left_front, top_left_back, top_right_back, top_right_front),
            white,
        ),
        Surface::new(
            "ground",
            Quad::from_corners(bot_left_back, bot_left_front, bot_right_front, bot_right_back),
            white,
        ),
    ];

    // Light corners: top left, bottom left, bottom right, top right
    let l0 = Vec3::new(-0.5, 2.0, -5.5);
    let l1 = Vec3::new(-0.5, 2.0, -6.5);
    let l2 = Vec3::new(0.5, 2.0, -6.5);
    let l3 = Vec3::new(0.5, 2.0, -5.5);
    let light = AreaLight::new(
        Triangle::new(l0, l1, l2),
        Triangle::new(l0, l2, l3),
        Color::ONE,
        80.0,
    );

    Scene::new(surfaces, light)
}
