//! Confetti shots and the countdown-complete celebration.
//!
//! A [`ConfettiShot`] is a burst expressed in viewport fractions so it can
//! be fired at any window size. [`Celebration`] produces pairs of shots on a
//! fixed interval with counts that shrink linearly to zero.

use crate::animator::{BurstSpec, Velocity};
use crate::config::CelebrationConfig;
use crate::palette::Palette;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Launch speed of the one-shot presets, in pixels per tick.
const PRESET_SPEED: f32 = 11.0;
/// Lifetime of the one-shot presets, in ticks.
const PRESET_TICKS: u32 = 120;

/// One confetti burst.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiShot {
    /// Particles to spawn.
    pub count: usize,
    /// Origin as a fraction of the viewport (0,0 top-left, 1,1 bottom-right).
    pub origin: Vec2,
    /// Full cone angle in degrees.
    pub spread_degrees: f32,
    /// Launch speed in pixels per tick.
    pub speed: f32,
    /// Rough lifetime in ticks.
    pub ticks: u32,
    /// Colors, picked per particle.
    pub palette: Palette,
}

impl ConfettiShot {
    /// Shot fired with a new greeting.
    pub fn greeting() -> Self {
        Self {
            count: 100,
            origin: Vec2::new(0.5, 0.6),
            spread_degrees: 70.0,
            speed: PRESET_SPEED,
            ticks: PRESET_TICKS,
            palette: Palette::golds(),
        }
    }

    /// Shot fired after the link is copied.
    pub fn copy_link() -> Self {
        Self {
            count: 50,
            origin: Vec2::new(0.5, 0.8),
            ..Self::greeting()
        }
    }

    /// Shot fired from a share button at the given viewport fraction.
    pub fn share(x: f32, y: f32) -> Self {
        Self {
            count: 30,
            origin: Vec2::new(x, y),
            spread_degrees: 50.0,
            palette: Palette::share(),
            ..Self::greeting()
        }
    }

    /// Origin in pixels for a viewport.
    pub fn origin_in(&self, width: u32, height: u32) -> Vec2 {
        self.origin * Vec2::new(width as f32, height as f32)
    }

    /// The particle recipe for this shot.
    pub fn to_burst_spec(&self) -> BurstSpec {
        let base = 1.0 / self.ticks.max(1) as f32;
        BurstSpec {
            count: self.count,
            velocity: Velocity::Cone {
                speed: self.speed,
                spread: self.spread_degrees.to_radians(),
            },
            decay: base..base * 1.25,
            palette: self.palette.clone(),
            color_per_particle: true,
        }
    }
}

/// A timed confetti shower.
#[derive(Debug)]
pub struct Celebration {
    config: CelebrationConfig,
    elapsed: Duration,
    since_shot: Duration,
    finished: bool,
    rng: SmallRng,
}

impl Celebration {
    /// Begin a shower. The first pair fires one interval from now.
    pub fn start(config: &CelebrationConfig, seed: u64) -> Self {
        tracing::info!(duration_ms = config.duration_ms, "celebration started");
        Self {
            config: config.clone(),
            elapsed: Duration::ZERO,
            since_shot: Duration::ZERO,
            finished: config.duration_ms == 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Let `dt` pass and return the shots that fired during it.
    pub fn advance(&mut self, dt: Duration) -> Vec<ConfettiShot> {
        let mut shots = Vec::new();
        let interval = self.config.interval().max(Duration::from_millis(1));
        let duration = self.config.duration();
        if self.finished {
            return shots;
        }

        self.since_shot += dt;
        while self.since_shot >= interval {
            self.since_shot -= interval;
            self.elapsed += interval;

            let time_left = duration.saturating_sub(self.elapsed);
            if time_left.is_zero() {
                self.finished = true;
                tracing::debug!("celebration finished");
                break;
            }

            let count = (self.config.particles as u128 * time_left.as_millis()
                / duration.as_millis()) as usize;
            if count == 0 {
                continue;
            }
            let left = Vec2::new(self.rng.gen_range(0.1..0.3), self.rng.gen::<f32>() - 0.2);
            let right = Vec2::new(self.rng.gen_range(0.7..0.9), self.rng.gen::<f32>() - 0.2);
            for origin in [left, right] {
                shots.push(ConfettiShot {
                    count,
                    origin,
                    spread_degrees: 360.0,
                    speed: self.config.speed,
                    ticks: self.config.ticks,
                    palette: self.config.palette.clone(),
                });
            }
        }
        shots
    }

    /// Whether the shower is over.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Time until the shower ends.
    pub fn time_left(&self) -> Duration {
        self.config.duration().saturating_sub(self.elapsed)
    }
}
