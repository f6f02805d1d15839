//! Radiance estimator: path tracing with next-event estimation.
//!
//! At every surface hit the outgoing radiance is the sum of
//! - a direct term, from one shadow ray to a random point on the area light,
//! - an indirect term, from one recursive trace along a random hemisphere
//!   direction, taken with probability `continuation_probability`.
//!
//! Only the light emits, and its emission is seen directly by primary rays
//! alone. Recursion is cut off at `max_depth` bounces.

use crate::{
    hittable::Hittable,
    sampling::{coordinate_frame, gen_f32, sample_hemisphere, to_world},
    HitPolicy, IndirectWeighting, Ray, RenderConfig, Scene, Surface,
};
use cornell_math::{normalize, Color, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

/// Relative slack for the light beating a coplanar surface under
/// [`HitPolicy::Nearest`].
const COPLANAR_TOLERANCE: f32 = 1e-4;

/// Path tracer over a read-only scene.
#[derive(Clone, Copy)]
pub struct Integrator<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
}

impl<'a> Integrator<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self { scene, config }
    }

    pub fn config(&self) -> &'a RenderConfig {
        self.config
    }

    /// Radiance arriving along a camera ray.
    pub fn radiance(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        self.trace(ray, true, 0, rng)
    }

    /// Radiance along `ray`. `depth` counts the indirect bounces already
    /// taken on this path.
    pub fn trace(&self, ray: &Ray, is_primary: bool, depth: u32, rng: &mut dyn RngCore) -> Color {
        let hit = self.intersect(ray);

        // Lights are not shaded; primary rays just see their emission
        if is_primary {
            if let Some(t_light) = self.scene.light().hit(ray) {
                let light_in_front = match (self.config.hit_policy, hit) {
                    (HitPolicy::FirstHit, _) | (HitPolicy::Nearest, None) => true,
                    (HitPolicy::Nearest, Some((_, t_surface))) => {
                        t_light <= t_surface * (1.0 + COPLANAR_TOLERANCE)
                    }
                };
                if light_in_front {
                    return self.scene.light().emission();
                }
            }
        }

        let Some((surface, t)) = hit else {
            return self.config.background();
        };

        let point = ray.at(t);
        let normal = surface.normal();

        self.estimate_direct(point, normal, ray, surface, rng)
            + self.estimate_indirect(point, normal, ray, surface, depth, rng)
    }

    /// Surface hit by `ray` under the configured policy.
    fn intersect(&self, ray: &Ray) -> Option<(&'a Surface, f32)> {
        match self.config.hit_policy {
            HitPolicy::FirstHit => self.scene.first_hit(ray),
            HitPolicy::Nearest => self.scene.nearest_hit(ray),
        }
    }

    /// Next-event estimate: one shadow ray to a uniformly sampled point on
    /// the light. Occluded samples contribute nothing.
    pub fn estimate_direct(
        &self,
        point: Vec3,
        normal: Vec3,
        incoming: &Ray,
        surface: &Surface,
        rng: &mut dyn RngCore,
    ) -> Color {
        let light = self.scene.light();
        let light_point = light.sample_point(rng);
        let light_normal = light.normal();
        let bias = self.config.bias;

        if !self
            .scene
            .has_line_of_sight(point + normal * bias, light_point + light_normal * bias)
        {
            return Color::ZERO;
        }

        let to_light = light_point - point;
        let dist = to_light.length();
        let shadow_dir = normalize(to_light);

        // Light treated as a point source of its total power at the sample
        let incident = light.emission() * light.power() / (PI * dist * dist);

        let reflectance = surface.bsdf().evaluate(shadow_dir, -incoming.direction(), normal);

        // Foreshortening at both the receiver and the emitter
        let cosines = shadow_dir.dot(normal).max(0.0) * (-shadow_dir).dot(light_normal).max(0.0);

        reflectance * incident * cosines
    }

    /// Indirect estimate: with probability `continuation_probability`, trace
    /// one bounce along a random hemisphere direction around `normal`.
    pub fn estimate_indirect(
        &self,
        point: Vec3,
        normal: Vec3,
        incoming: &Ray,
        surface: &Surface,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let continuation = self.config.continuation_probability;
        if gen_f32(rng) >= continuation || depth >= self.config.max_depth {
            return Color::ZERO;
        }

        let (tangent, bitangent) = coordinate_frame(normal);
        let local = sample_hemisphere(rng);
        let direction = normalize(to_world(local, normal, tangent, bitangent));

        let bounce = Ray::new(point, direction);
        let radiance = self.trace(&bounce, false, depth + 1, rng);

        match self.config.indirect_weighting {
            IndirectWeighting::Unweighted => radiance,
            IndirectWeighting::Throughput => {
                // local.y is cos(theta); the sampler is uniform over the
                // hemisphere, so pdf = 1 / (2 pi)
                let reflectance = surface.bsdf().evaluate(direction, -incoming.direction(), normal);
                radiance * reflectance * (local.y * 2.0 * PI / continuation)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AreaLight, Bsdf, Quad, Triangle};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Floor at y = 0 facing up, light at y = 2 facing down.
    fn floor_and_light(emission: Color) -> Scene {
        let floor = Quad::from_corners(
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(-5.0, 0.0, 5.0),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(5.0, 0.0, -5.0),
        );
        let a = Vec3::new(-0.5, 2.0, 0.5);
        let b = Vec3::new(-0.5, 2.0, -0.5);
        let c = Vec3::new(0.5, 2.0, -0.5);
        let d = Vec3::new(0.5, 2.0, 0.5);
        let light = AreaLight::new(Triangle::new(a, b, c), Triangle::new(a, c, d), emission, 10.0);

        Scene::new(vec![Surface::new("floor", floor, Bsdf::default())], light)
    }

    fn down_ray() -> Ray {
        Ray::new(Vec3::new(0.2, 1.0, 0.3), -Vec3::Y)
    }

    #[test]
    fn test_primary_ray_sees_emission() {
        let scene = floor_and_light(Color::new(1.0, 0.5, 0.25));
        let config = RenderConfig::default();
        let integrator = Integrator::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(1);

        let up = Ray::new(Vec3::new(0.1, 1.0, 0.2), Vec3::Y);
        assert_eq!(integrator.radiance(&up, &mut rng), Color::new(1.0, 0.5, 0.25));
    }

    #[test]
    fn test_secondary_ray_does_not_see_emission() {
        let scene = floor_and_light(Color::ONE);
        let config = RenderConfig::default();
        let integrator = Integrator::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(1);

        // Nothing but the light is above, and it is not shaded for bounces
        let up = Ray::new(Vec3::new(0.1, 1.0, 0.2), Vec3::Y);
        assert_eq!(integrator.trace(&up, false, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = floor_and_light(Color::ONE);
        let config = RenderConfig {
            background: [0.1, 0.2, 0.3],
            ..Default::default()
        };
        let integrator = Integrator::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(1);

        let sideways = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert_eq!(integrator.radiance(&sideways, &mut rng), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_direct_light_matches_closed_form_directly_below() {
        let scene = floor_and_light(Color::ONE);
        let config = RenderConfig::default();
        let integrator = Integrator::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(2);
        let floor = &scene.surfaces()[0];

        let mut total = Color::ZERO;
        let n = 4000;
        for _ in 0..n {
            total += integrator.estimate_direct(Vec3::ZERO, Vec3::Y, &down_ray(), floor, &mut rng);
        }
        let mean = total / n as f32;

        // Per sample at squared distance d2 from the origin:
        // (1 / pi) * 10 / (pi * d2) * (2 / d) * (2 / d) = 40 / (pi^2 d2^2),
        // with d2 between 4 (centre) and 4.5 (corners).
        let upper = 40.0 / (PI * PI * 16.0);
        let lower = 40.0 / (PI * PI * 4.5 * 4.5);
        assert!(mean.x >= lower * 0.999 && mean.x <= upper * 1.001, "{mean:?}");
        assert_eq!(mean.x, mean.y);
        assert_eq!(mean.y, mean.z);
    }

    #[test]
    fn test_direct_light_blocked_by_occluder() {
        let base = floor_and_light(Color::ONE);
        let floor = base.surfaces()[0].clone();

        // Big panel at y = 1 facing down, between the floor and the light
        let panel = Quad::from_corners(
            Vec3::new(-5.0, 1.0, 5.0),
            Vec3::new(-5.0, 1.0, -5.0),
            Vec3::new(5.0, 1.0, -5.0),
            Vec3::new(5.0, 1.0, 5.0),
        );
        let scene = Scene::new(
            vec![floor.clone(), Surface::new("panel", panel, Bsdf::default())],
            *base.light(),
        );
        let config = RenderConfig::default();
        let integrator = Integrator::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(3);

        let incoming = Ray::new(Vec3::new(0.2, 0.5, 0.3), -Vec3::Y);
        for _ in 0..100 {
            let value = integrator.estimate_direct(Vec3::ZERO, Vec3::Y, &incoming, &floor, &mut rng);
            assert_eq!(value, Color::ZERO);
        }
    }

    #[test]
    fn test_indirect_never_fires_without_continuation() {
        let scene = floor_and_light(Color::ONE);
        let config = RenderConfig {
            continuation_probability: 0.0,
            ..Default::default()
        };
        let integrator = Integrator::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(4);
        let floor = &scene.surfaces()[0];

        for _ in 0..100 {
            let value =
                integrator.estimate_indirect(Vec3::ZERO, Vec3::Y, &down_ray(), floor, 0, &mut rng);
            assert_eq!(value, Color::ZERO);
        }
    }

    #[test]
    fn test_indirect_cut_off_at_max_depth() {
        let scene = floor_and_light(Color::ONE);
        let config = RenderConfig {
            max_depth: 3,
            ..Default::default()
        };
        let integrator = Integrator::new(&scene, &config);
        let mut rng = StdRng::seed_from_u64(5);
        let floor = &scene.surfaces()[0];

        for _ in 0..100 {
            let value =
                integrator.estimate_indirect(Vec3::ZERO, Vec3::Y, &down_ray(), floor, 3, &mut rng);
            assert_eq!(value, Color::ZERO);
        }
    }

    /// Floor and light as above, plus a ceiling at y = 3 facing down. A
    /// bounce leaving the ceiling passes the (unshaded) light plane and lands
    /// on the directly lit floor.
    fn room_with_ceiling() -> Scene {
        let base = floor_and_light(Color::ONE);
        let ceiling = Quad::from_corners(
            Vec3::new(-5.0, 3.0, 5.0),
            Vec3::new(-5.0, 3.0, -5.0),
            Vec3::new(5.0, 3.0, -5.0),
            Vec3::new(5.0, 3.0, 5.0),
        );
        Scene::new(
            vec![
                base.surfaces()[0].clone(),
                Surface::new("ceiling", ceiling, Bsdf::lambertian(Color::new(0.5, 0.6, 0.7))),
            ],
            *base.light(),
        )
    }

    /// Replays the draws `estimate_indirect` makes from `rng`: the roulette
    /// value, then the hemisphere sample. Returns the local sample and the
    /// world direction when the bounce is taken.
    fn replay_bounce(rng: &mut StdRng, normal: Vec3, continuation: f32) -> Option<(Vec3, Vec3)> {
        if gen_f32(rng) >= continuation {
            return None;
        }
        let (tangent, bitangent) = coordinate_frame(normal);
        let local = sample_hemisphere(rng);
        Some((local, normalize(to_world(local, normal, tangent, bitangent))))
    }

    #[test]
    fn test_unweighted_indirect_returns_bounce_radiance() {
        let scene = room_with_ceiling();
        let config = RenderConfig::default();
        let integrator = Integrator::new(&scene, &config);
        let ceiling = &scene.surfaces()[1];
        let point = Vec3::new(0.1, 3.0, 0.2);
        let normal = -Vec3::Y;
        let incoming = Ray::new(Vec3::new(0.3, 1.0, -0.2), Vec3::new(-0.1, 1.0, 0.2));

        let mut taken = 0;
        let mut lit = 0;
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut replay = rng.clone();

            let value = integrator.estimate_indirect(point, normal, &incoming, ceiling, 0, &mut rng);

            match replay_bounce(&mut replay, normal, config.continuation_probability) {
                Some((_, direction)) => {
                    let bounce = Ray::new(point, direction);
                    let expected = integrator.trace(&bounce, false, 1, &mut replay);
                    assert_eq!(value, expected, "seed {seed}");
                    taken += 1;
                    if expected.x > 0.0 {
                        lit += 1;
                    }
                }
                None => assert_eq!(value, Color::ZERO, "seed {seed}"),
            }
        }

        assert!(taken > 0 && taken < 64);
        assert!(lit > 0, "some bounces should reach the lit floor");
    }

    #[test]
    fn test_throughput_indirect_scales_by_bsdf_cosine_and_pdf() {
        let scene = room_with_ceiling();
        let config = RenderConfig {
            indirect_weighting: IndirectWeighting::Throughput,
            ..Default::default()
        };
        let integrator = Integrator::new(&scene, &config);
        let ceiling = &scene.surfaces()[1];
        let point = Vec3::new(0.1, 3.0, 0.2);
        let normal = -Vec3::Y;
        let incoming = Ray::new(Vec3::new(0.3, 1.0, -0.2), Vec3::new(-0.1, 1.0, 0.2));
        let continuation = config.continuation_probability;

        let mut lit = 0;
        for seed in 100..164 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut replay = rng.clone();

            let value = integrator.estimate_indirect(point, normal, &incoming, ceiling, 0, &mut rng);

            let Some((local, direction)) = replay_bounce(&mut replay, normal, continuation) else {
                assert_eq!(value, Color::ZERO, "seed {seed}");
                continue;
            };
            let bounce = Ray::new(point, direction);
            let radiance = integrator.trace(&bounce, false, 1, &mut replay);
            let reflectance = ceiling.bsdf().evaluate(direction, -incoming.direction(), normal);
            let cos_theta = direction.dot(normal);

            // pdf of the uniform hemisphere sampler is 1 / (2 pi)
            let expected = radiance * reflectance * cos_theta * 2.0 * PI / continuation;
            assert!((value - expected).abs().max_element() <= 1e-5 * expected.max_element().max(1.0));
            assert!((local.y - cos_theta).abs() < 1e-5);

            if radiance.x > 0.0 {
                lit += 1;
                // Lambertian ceiling: ratio to the bounce radiance is
                // albedo * cos * 2 / continuation per channel
                let ratio = value / radiance;
                let albedo = Color::new(0.5, 0.6, 0.7);
                let closed_form = albedo * (cos_theta * 2.0 / continuation);
                assert!((ratio - closed_form).abs().max_element() < 1e-4, "seed {seed}");
            }
        }

        assert!(lit > 0, "some bounces should reach the lit floor");
    }

    #[test]
    fn test_trace_is_deterministic_for_a_seed() {
        let scene = floor_and_light(Color::ONE);
        let config = RenderConfig::default();
        let integrator = Integrator::new(&scene, &config);

        let a = integrator.radiance(&down_ray(), &mut StdRng::seed_from_u64(77));
        let b = integrator.radiance(&down_ray(), &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
        assert!(a.x > 0.0, "floor under the light should be lit");
    }

    #[test]
    fn test_nearest_policy_lets_occluder_hide_light() {
        let base = floor_and_light(Color::ONE);
        let blocker = Quad::from_corners(
            Vec3::new(-5.0, 1.5, 5.0),
            Vec3::new(-5.0, 1.5, -5.0),
            Vec3::new(5.0, 1.5, -5.0),
            Vec3::new(5.0, 1.5, 5.0),
        );
        let scene = Scene::new(
            vec![Surface::new("blocker", blocker, Bsdf::lambertian(Color::ZERO))],
            *base.light(),
        );
        let up = Ray::new(Vec3::new(0.1, 1.0, 0.2), Vec3::Y);

        let first_hit = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(Integrator::new(&scene, &first_hit).radiance(&up, &mut rng), Color::ONE);

        let nearest = RenderConfig {
            hit_policy: HitPolicy::Nearest,
            continuation_probability: 0.0,
            ..Default::default()
        };
        let value = Integrator::new(&scene, &nearest).radiance(&up, &mut rng);
        assert_eq!(value, Color::ZERO);
    }
}
