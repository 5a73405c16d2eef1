//! The particle field animator.
//!
//! A [`ParticleField`] owns every live particle. Hosts drive it with three
//! calls:
//!
//! - [`spawn_burst`](ParticleField::spawn_burst) from a click or the burst timer
//! - [`tick`](ParticleField::tick) once per animation frame
//! - [`render`](ParticleField::render) right after the tick
//!
//! ```ignore
//! let mut field = ParticleField::new(PhysicsConfig::default(), BurstConfig::default().to_spec(), 800, 600, 1);
//! field.spawn_burst(400.0, 200.0);
//! loop {
//!     field.tick();
//!     field.render(&mut canvas);
//! }
//! ```
//!
//! Expired particles are dropped in a single `retain` pass after the
//! update, so nothing with `opacity <= 0` ever reaches the canvas.

use crate::canvas::Canvas;
use crate::config::{PhysicsConfig, SkyburstConfig};
use crate::palette::Palette;
use crate::particle::Particle;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::FRAC_PI_2;
use std::ops::Range;

/// How initial velocities are drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum Velocity {
    /// Uniform in `-half_extent..half_extent` on each axis.
    Box {
        /// Half the side of the square.
        half_extent: f32,
    },
    /// Launched upward within a cone.
    Cone {
        /// Maximum launch speed; each particle gets 50-100% of it.
        speed: f32,
        /// Full cone angle in radians. `TAU` covers every direction.
        spread: f32,
    },
}

/// Recipe for one burst.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstSpec {
    /// Particles spawned per burst.
    pub count: usize,
    /// Initial velocity distribution.
    pub velocity: Velocity,
    /// Per-particle opacity decay band.
    pub decay: Range<f32>,
    /// Colors to pick from.
    pub palette: Palette,
    /// Pick a color per particle instead of one per burst.
    pub color_per_particle: bool,
}

impl BurstSpec {
    /// 50 particles, ±4 px/tick, decay 0.015-0.03, fireworks palette.
    pub fn fireworks() -> Self {
        crate::config::BurstConfig::default().to_spec()
    }
}

impl Default for BurstSpec {
    fn default() -> Self {
        Self::fireworks()
    }
}

/// Uniform sample that tolerates an empty or unbounded range.
#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f32>) -> f32 {
    if range.start < range.end && (range.end - range.start).is_finite() {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

fn spawn_into(particles: &mut Vec<Particle>, rng: &mut SmallRng, spec: &BurstSpec, origin: Vec2) {
    let burst_color = spec.palette.choose(rng);
    particles.reserve(spec.count);

    for _ in 0..spec.count {
        let velocity = match spec.velocity {
            Velocity::Box { half_extent } => {
                let r = -half_extent..half_extent;
                Vec2::new(sample(rng, &r), sample(rng, &r))
            }
            Velocity::Cone { speed, spread } => {
                let half = spread * 0.5;
                let angle = -FRAC_PI_2 + sample(rng, &(-half..half));
                Vec2::from_angle(angle) * sample(rng, &(speed * 0.5..speed))
            }
        };
        let color = if spec.color_per_particle {
            spec.palette.choose(rng)
        } else {
            burst_color
        };
        let decay = sample(rng, &spec.decay);
        particles.push(Particle::new(origin, velocity, color, decay));
    }
}

/// A self-cleaning particle simulation over a viewport.
pub struct ParticleField {
    particles: Vec<Particle>,
    physics: PhysicsConfig,
    burst: BurstSpec,
    viewport: (u32, u32),
    rng: SmallRng,
}

impl ParticleField {
    /// Create an empty field.
    pub fn new(physics: PhysicsConfig, burst: BurstSpec, width: u32, height: u32, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            physics,
            burst,
            viewport: (width, height),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create an empty field from a loaded config.
    pub fn from_config(config: &SkyburstConfig, width: u32, height: u32, seed: u64) -> Self {
        Self::new(config.physics, config.fireworks.to_spec(), width, height, seed)
    }

    /// Append one default burst at `(x, y)`.
    ///
    /// The origin is not checked against the viewport.
    pub fn spawn_burst(&mut self, x: f32, y: f32) {
        let origin = Vec2::new(x, y);
        spawn_into(&mut self.particles, &mut self.rng, &self.burst, origin);
        tracing::debug!(x, y, count = self.burst.count, live = self.particles.len(), "burst");
    }

    /// Append a burst with an explicit recipe.
    pub fn spawn_with(&mut self, spec: &BurstSpec, origin: Vec2) {
        spawn_into(&mut self.particles, &mut self.rng, spec, origin);
        tracing::debug!(x = origin.x, y = origin.y, count = spec.count, live = self.particles.len(), "burst");
    }

    /// Advance every particle one frame, then drop the expired ones.
    ///
    /// Returns how many particles were removed.
    pub fn tick(&mut self) -> usize {
        let physics = self.physics;
        for particle in &mut self.particles {
            particle.update(&physics);
        }

        let before = self.particles.len();
        self.particles.retain(Particle::is_alive);
        let removed = before - self.particles.len();
        if removed > 0 {
            tracing::trace!(removed, live = self.particles.len(), "expired");
        }
        removed
    }

    /// Clear the canvas and draw every live particle.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.clear();
        for particle in &self.particles {
            debug_assert!(particle.is_alive());
            canvas.fill_circle(
                particle.position,
                self.physics.radius,
                particle.color,
                particle.opacity,
            );
        }
    }

    /// Record a new viewport size. Particles keep their positions.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// A random point in the upper half of the viewport.
    pub fn random_origin(&mut self) -> Vec2 {
        let (w, h) = self.viewport;
        Vec2::new(
            sample(&mut self.rng, &(0.0..w as f32)),
            sample(&mut self.rng, &(0.0..h as f32 * 0.5)),
        )
    }

    /// Drop every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Live particles.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current viewport `(width, height)`.
    #[inline]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Physics in effect.
    #[inline]
    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Recipe used by [`spawn_burst`](Self::spawn_burst).
    #[inline]
    pub fn burst_spec(&self) -> &BurstSpec {
        &self.burst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn field() -> ParticleField {
        ParticleField::new(PhysicsConfig::default(), BurstSpec::fireworks(), 800, 600, 42)
    }

    #[test]
    fn test_spawn_burst_adds_fifty() {
        let mut f = field();
        f.spawn_burst(100.0, 100.0);
        assert_eq!(f.len(), 50);
        f.spawn_burst(200.0, 50.0);
        assert_eq!(f.len(), 100);
    }

    #[test]
    fn test_burst_ranges() {
        let mut f = field();
        f.spawn_burst(10.0, 20.0);
        let first = f.particles()[0].color;
        for p in f.particles() {
            assert_eq!(p.position, Vec2::new(10.0, 20.0));
            assert!(p.velocity.x >= -4.0 && p.velocity.x < 4.0);
            assert!(p.velocity.y >= -4.0 && p.velocity.y < 4.0);
            assert!(p.decay >= 0.015 && p.decay < 0.03);
            assert_eq!(p.opacity, 1.0);
            assert_eq!(p.color, first);
        }
        assert!(Palette::fireworks().colors().contains(&first));
    }

    #[test]
    fn test_cone_velocity_points_up() {
        let mut f = field();
        let spec = BurstSpec {
            count: 200,
            velocity: Velocity::Cone {
                speed: 10.0,
                spread: 70f32.to_radians(),
            },
            decay: 0.01..0.02,
            palette: Palette::golds(),
            color_per_particle: true,
        };
        f.spawn_with(&spec, Vec2::new(50.0, 50.0));
        for p in f.particles() {
            assert!(p.velocity.y < 0.0);
            let speed = p.velocity.length();
            assert!(speed >= 5.0 - 1e-4 && speed <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_full_spread_cone_reaches_all_directions() {
        let mut f = field();
        let spec = BurstSpec {
            count: 400,
            velocity: Velocity::Cone { speed: 4.0, spread: TAU },
            decay: 0.01..0.02,
            palette: Palette::celebration(),
            color_per_particle: true,
        };
        f.spawn_with(&spec, Vec2::ZERO);
        assert!(f.particles().iter().any(|p| p.velocity.y > 0.0));
        assert!(f.particles().iter().any(|p| p.velocity.y < 0.0));
    }

    #[test]
    fn test_tick_removes_only_expired() {
        let mut f = field();
        f.spawn_burst(100.0, 100.0);
        for _ in 0..80 {
            let snapshot: Vec<Particle> = f.particles().to_vec();
            f.tick();
            for p in f.particles() {
                assert!(p.opacity > 0.0);
            }
            let expected = snapshot
                .iter()
                .filter(|p| p.opacity - p.decay > 0.0)
                .count();
            assert_eq!(f.len(), expected);
        }
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut f = field();
        f.spawn_burst(700.0, 500.0);
        f.tick();
        let before = f.particles().to_vec();
        f.resize(320, 240);
        assert_eq!(f.viewport(), (320, 240));
        assert_eq!(f.particles(), &before[..]);
    }

    #[test]
    fn test_random_origin_upper_half() {
        let mut f = field();
        for _ in 0..200 {
            let o = f.random_origin();
            assert!(o.x >= 0.0 && o.x < 800.0);
            assert!(o.y >= 0.0 && o.y < 300.0);
        }
    }

    #[test]
    fn test_random_origin_zero_viewport() {
        let mut f = field();
        f.resize(0, 0);
        assert_eq!(f.random_origin(), Vec2::ZERO);
    }

    #[test]
    fn test_unbounded_spec_does_not_panic() {
        let mut f = field();
        let spec = BurstSpec {
            count: 5,
            velocity: Velocity::Box {
                half_extent: f32::INFINITY,
            },
            decay: 0.01..f32::INFINITY,
            palette: Palette::fireworks(),
            color_per_particle: false,
        };
        f.spawn_with(&spec, Vec2::ZERO);
        assert_eq!(f.len(), 5);
        assert!(f.particles().iter().all(|p| p.decay == 0.01));
    }

    #[test]
    fn test_clear() {
        let mut f = field();
        f.spawn_burst(1.0, 1.0);
        f.clear();
        assert!(f.is_empty());
    }
}
