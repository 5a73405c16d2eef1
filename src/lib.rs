//! # Skyburst
//!
//! A self-cleaning fireworks particle field for celebratory pages, with the
//! small widgets that go around it: countdown, confetti shower, greetings,
//! share links and a music toggle.
//!
//! ## Quick Start
//!
//! ```ignore
//! use skyburst::prelude::*;
//!
//! let config = SkyburstConfig::default();
//! let mut field = ParticleField::from_config(&config, 800, 600, 7);
//! let mut canvas = RasterCanvas::new(800, 600)?;
//!
//! field.spawn_burst(400.0, 200.0);   // 50 particles
//! for _ in 0..120 {
//!     field.tick();                  // drag, gravity, fade, drop expired
//!     field.render(&mut canvas);     // full clear, then one circle each
//! }
//! assert!(field.is_empty());
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! Each [`Particle`] has a position, velocity, a palette color and an
//! opacity that falls by its own `decay` every tick. The tick it reaches
//! zero it is removed, so the field never grows without bound: live count
//! is roughly burst rate × lifetime × burst size.
//!
//! ### Physics
//!
//! Per tick, in order:
//!
//! | Step | Default |
//! |------|---------|
//! | `velocity *= drag` | 0.98 |
//! | `velocity.y += gravity` | 0.2 px/tick² |
//! | `position += velocity` | |
//! | `opacity -= decay` | 0.015-0.03 |
//!
//! ### Canvases
//!
//! [`ParticleField::render`] draws through the [`Canvas`] trait.
//! [`RasterCanvas`] renders on the CPU (tests, PNG export);
//! [`gpu::GpuCanvas`] renders instanced circles with `wgpu` in the window.
//!
//! ### Scheduling
//!
//! The random [`BurstTimer`] and the [`FrameClock`] are independent
//! repeating tasks, each stoppable through its own [`TaskHandle`].

pub mod animator;
pub mod canvas;
pub mod config;
pub mod confetti;
pub mod countdown;
pub mod error;
pub mod export;
pub mod gpu;
pub mod greeting;
pub mod input;
pub mod music;
mod palette;
mod particle;
pub mod scene;
pub mod schedule;
pub mod share;
pub mod window;

pub use animator::{BurstSpec, ParticleField, Velocity};
pub use canvas::{Canvas, RasterCanvas};
pub use config::{
    BurstConfig, CelebrationConfig, PhysicsConfig, SkyburstConfig, TimerConfig, WindowConfig,
};
pub use confetti::{Celebration, ConfettiShot};
pub use countdown::{Countdown, CountdownDisplay, Remaining, TimeLeft};
pub use glam::Vec2;
pub use music::MusicToggle;
pub use palette::{Color, Palette};
pub use particle::Particle;
pub use scene::{Scene, SceneEvent};
pub use schedule::{BurstTimer, FrameClock, TaskHandle};
pub use share::{Platform, ShareAction, ShareData};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use skyburst::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animator::{BurstSpec, ParticleField, Velocity};
    pub use crate::canvas::{Canvas, RasterCanvas};
    pub use crate::config::{PhysicsConfig, SkyburstConfig};
    pub use crate::confetti::{Celebration, ConfettiShot};
    pub use crate::input::Command;
    pub use crate::palette::{Color, Palette};
    pub use crate::particle::Particle;
    pub use crate::scene::{Scene, SceneEvent};
    pub use crate::schedule::{BurstTimer, FrameClock, TaskHandle};
    pub use crate::Vec2;
}
