//! Tunable constants, loadable from JSON.
//!
//! Every section has `#[serde(default)]`, so a config file only needs the
//! keys it changes:
//!
//! ```json
//! { "physics": { "gravity": 0.1 }, "timer": { "min_delay_ms": 1000 } }
//! ```

use crate::animator::{BurstSpec, Velocity};
use crate::countdown::NEW_YEAR_2026_UNIX;
use crate::error::ConfigError;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Per-tick physics shared by every particle in a field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity multiplier applied each tick.
    pub drag: f32,
    /// Downward acceleration added to vertical velocity each tick.
    pub gravity: f32,
    /// Radius of the drawn circle in pixels.
    pub radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            drag: 0.98,
            gravity: 0.2,
            radius: 3.0,
        }
    }
}

/// Shape of a fireworks burst.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Particles per burst.
    pub count: usize,
    /// Velocity is uniform in `-half_extent..half_extent` on each axis.
    pub velocity_half_extent: f32,
    /// Lower bound of the per-particle opacity decay.
    pub decay_min: f32,
    /// Upper bound (exclusive) of the per-particle opacity decay.
    pub decay_max: f32,
    /// Colors a burst picks from.
    pub palette: Palette,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 50,
            velocity_half_extent: 4.0,
            decay_min: 0.015,
            decay_max: 0.03,
            palette: Palette::fireworks(),
        }
    }
}

impl BurstConfig {
    /// The spawn recipe described by this config.
    pub fn to_spec(&self) -> BurstSpec {
        BurstSpec {
            count: self.count,
            velocity: Velocity::Box {
                half_extent: self.velocity_half_extent,
            },
            decay: self.decay_min..self.decay_max,
            palette: self.palette.clone(),
            color_per_particle: false,
        }
    }
}

/// Random burst timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Delay before the first automatic burst.
    pub initial_delay_ms: u64,
    /// Lower bound of the delay between bursts.
    pub min_delay_ms: u64,
    /// Upper bound (exclusive) of the delay between bursts.
    pub max_delay_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 2000,
            min_delay_ms: 3000,
            max_delay_ms: 5000,
        }
    }
}

/// Confetti shower played when the countdown reaches zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    /// Total length of the shower.
    pub duration_ms: u64,
    /// Time between paired shots.
    pub interval_ms: u64,
    /// Particles per shot at the very start; scales down linearly.
    pub particles: usize,
    /// Launch speed in pixels per tick.
    pub speed: f32,
    /// Lifetime in ticks; decay is drawn near `1 / ticks`.
    pub ticks: u32,
    /// Colors for celebration confetti.
    pub palette: Palette,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 5000,
            interval_ms: 250,
            particles: 50,
            speed: 7.5,
            ticks: 60,
            palette: Palette::celebration(),
        }
    }
}

impl CelebrationConfig {
    /// Shower length.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Time between shots.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Interactive window settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title prefix.
    pub title: String,
    /// Initial logical width.
    pub width: u32,
    /// Initial logical height.
    pub height: u32,
    /// URL the share actions link to.
    pub share_url: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Skyburst".into(),
            width: 1280,
            height: 720,
            share_url: "https://example.com/new-year".into(),
        }
    }
}

/// Complete configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyburstConfig {
    /// Particle physics.
    pub physics: PhysicsConfig,
    /// Fireworks burst shape.
    pub fireworks: BurstConfig,
    /// Automatic burst timer.
    pub timer: TimerConfig,
    /// Countdown-complete confetti shower.
    pub celebration: CelebrationConfig,
    /// Countdown target as Unix seconds.
    pub countdown_target_unix: Option<i64>,
    /// Interactive window.
    pub window: WindowConfig,
}

impl SkyburstConfig {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The countdown target, defaulting to 2026-01-01T00:00:00Z.
    pub fn countdown_target(&self) -> i64 {
        self.countdown_target_unix.unwrap_or(NEW_YEAR_2026_UNIX)
    }

    /// Check every constraint the animator and schedulers rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let p = &self.physics;
        if !(p.drag > 0.0 && p.drag <= 1.0) {
            return invalid(format!("physics.drag must be in (0, 1], got {}", p.drag));
        }
        if !p.gravity.is_finite() {
            return invalid("physics.gravity must be finite".into());
        }
        if !(p.radius > 0.0 && p.radius.is_finite()) {
            return invalid(format!("physics.radius must be positive and finite, got {}", p.radius));
        }

        let f = &self.fireworks;
        if f.count == 0 {
            return invalid("fireworks.count must be at least 1".into());
        }
        // The sampled range is twice the half extent wide and must not overflow.
        if !(f.velocity_half_extent >= 0.0 && (2.0 * f.velocity_half_extent).is_finite()) {
            return invalid(format!(
                "fireworks.velocity_half_extent must be non-negative and finite, got {}",
                f.velocity_half_extent
            ));
        }
        if !(f.decay_min > 0.0 && f.decay_min <= f.decay_max && f.decay_max.is_finite()) {
            return invalid(format!(
                "fireworks decay band must satisfy 0 < min <= max < inf, got {}..{}",
                f.decay_min, f.decay_max
            ));
        }
        if f.palette.is_empty() {
            return invalid("fireworks.palette must not be empty".into());
        }

        let t = &self.timer;
        if t.min_delay_ms == 0 || t.min_delay_ms > t.max_delay_ms {
            return invalid(format!(
                "timer delays must satisfy 0 < min <= max, got {}..{}",
                t.min_delay_ms, t.max_delay_ms
            ));
        }

        let c = &self.celebration;
        if c.interval_ms == 0 {
            return invalid("celebration.interval_ms must be at least 1".into());
        }
        if !(c.speed >= 0.0 && c.speed.is_finite()) {
            return invalid(format!(
                "celebration.speed must be non-negative and finite, got {}",
                c.speed
            ));
        }
        if c.ticks == 0 {
            return invalid("celebration.ticks must be at least 1".into());
        }
        if c.palette.is_empty() {
            return invalid("celebration.palette must not be empty".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        SkyburstConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_constants() {
        let config = SkyburstConfig::default();
        assert_eq!(config.physics.drag, 0.98);
        assert_eq!(config.physics.gravity, 0.2);
        assert_eq!(config.fireworks.count, 50);
        assert_eq!(config.fireworks.palette.len(), 6);
        assert_eq!(config.timer.min_delay_ms, 3000);
        assert_eq!(config.timer.max_delay_ms, 5000);
        assert_eq!(config.countdown_target(), NEW_YEAR_2026_UNIX);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SkyburstConfig::from_json(r#"{ "physics": { "gravity": 0.1 }, "fireworks": { "count": 10 } }"#)
                .unwrap();
        assert_eq!(config.physics.gravity, 0.1);
        assert_eq!(config.physics.drag, 0.98);
        assert_eq!(config.fireworks.count, 10);
        assert_eq!(config.fireworks.decay_min, 0.015);
        assert_eq!(config.timer, TimerConfig::default());
    }

    #[test]
    fn test_palette_from_json() {
        let config =
            SkyburstConfig::from_json(r##"{ "fireworks": { "palette": ["#FFFFFF", "#000000"] } }"##)
                .unwrap();
        assert_eq!(config.fireworks.palette.len(), 2);
    }

    #[test]
    fn test_rejects_bad_hex() {
        let err = SkyburstConfig::from_json(r##"{ "fireworks": { "palette": ["#FFF"] } }"##);
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_empty_palette() {
        let err = SkyburstConfig::from_json(r#"{ "fireworks": { "palette": [] } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_inverted_decay_band() {
        let err = SkyburstConfig::from_json(
            r#"{ "fireworks": { "decay_min": 0.05, "decay_max": 0.01 } }"#,
        );
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_delay() {
        let err = SkyburstConfig::from_json(r#"{ "timer": { "min_delay_ms": 0 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_drag_above_one() {
        let err = SkyburstConfig::from_json(r#"{ "physics": { "drag": 1.5 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_finite_half_extent() {
        // 1e39 overflows f32 and parses as infinity.
        let err = SkyburstConfig::from_json(r#"{ "fireworks": { "velocity_half_extent": 1e39 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));

        let err = SkyburstConfig::from_json(r#"{ "fireworks": { "velocity_half_extent": 3e38 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_finite_decay_max() {
        let err = SkyburstConfig::from_json(r#"{ "fireworks": { "decay_max": 1e39 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_finite_radius_and_speed() {
        let err = SkyburstConfig::from_json(r#"{ "physics": { "radius": 1e39 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
        let err = SkyburstConfig::from_json(r#"{ "celebration": { "speed": 1e39 } }"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_large_finite_half_extent_spawns() {
        let config =
            SkyburstConfig::from_json(r#"{ "fireworks": { "velocity_half_extent": 1e30 } }"#).unwrap();
        let mut field = crate::ParticleField::from_config(&config, 100, 100, 1);
        field.spawn_burst(1.0, 1.0);
        assert_eq!(field.len(), 50);
    }

    #[test]
    fn test_to_spec() {
        let spec = BurstConfig::default().to_spec();
        assert_eq!(spec.count, 50);
        assert_eq!(spec.decay, 0.015..0.03);
        assert!(!spec.color_per_particle);
    }
}
