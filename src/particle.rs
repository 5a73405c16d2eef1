//! The particle record.

use crate::config::PhysicsConfig;
use crate::palette::Color;
use glam::Vec2;

/// One spark of a burst.
///
/// Owned by a [`ParticleField`](crate::ParticleField). `color` and `decay`
/// are fixed at spawn; everything else changes once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in viewport pixels.
    pub position: Vec2,
    /// Velocity in pixels per tick.
    pub velocity: Vec2,
    /// Fill color.
    pub color: Color,
    /// Fill alpha. Starts at 1 and only decreases.
    pub opacity: f32,
    /// Opacity lost per tick.
    pub decay: f32,
}

impl Particle {
    /// A fully opaque particle.
    pub fn new(position: Vec2, velocity: Vec2, color: Color, decay: f32) -> Self {
        Self {
            position,
            velocity,
            color,
            opacity: 1.0,
            decay,
        }
    }

    /// Advance one tick: drag, gravity, integrate, fade.
    #[inline]
    pub fn update(&mut self, physics: &PhysicsConfig) {
        self.velocity *= physics.drag;
        self.velocity.y += physics.gravity;
        self.position += self.velocity;
        self.opacity -= self.decay;
    }

    /// Whether the particle should still be drawn.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0
    }
}
