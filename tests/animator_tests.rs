//! Integration tests for the particle field animator.
//!
//! These drive a [`ParticleField`] through whole burst lifetimes and check
//! the lifecycle guarantees hosts rely on.

use skyburst::prelude::*;

fn field(seed: u64) -> ParticleField {
    ParticleField::new(PhysicsConfig::default(), BurstSpec::fireworks(), 800, 600, seed)
}

/// Canvas that records every draw call.
#[derive(Default)]
struct RecordingCanvas {
    size: (u32, u32),
    clears: usize,
    circles: Vec<(Vec2, f32, Color, f32)>,
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.circles.clear();
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.circles.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.circles.push((center, radius, color, alpha));
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_burst_size_is_exactly_fifty() {
    let mut f = field(1);
    for i in 1..=5 {
        f.spawn_burst(100.0 * i as f32, 50.0);
        assert_eq!(f.len(), 50 * i);
    }
}

#[test]
fn test_burst_fully_expires_within_67_ticks() {
    let mut f = field(2);
    f.spawn_burst(100.0, 100.0);
    for _ in 0..67 {
        f.tick();
    }
    assert_eq!(f.len(), 0);
}

#[test]
fn test_opacity_follows_linear_decay() {
    let mut f = field(3);
    f.spawn_burst(100.0, 100.0);
    let decays: Vec<f32> = f.particles().iter().map(|p| p.decay).collect();

    // Every particle lives at least 33 ticks (decay < 0.03), so indices stay aligned.
    for n in 1..=33 {
        let before: Vec<f32> = f.particles().iter().map(|p| p.opacity).collect();
        f.tick();
        assert_eq!(f.len(), 50);
        for (i, p) in f.particles().iter().enumerate() {
            let expected = 1.0 - n as f32 * decays[i];
            assert!((p.opacity - expected).abs() < 1e-4, "tick {n}: {} vs {expected}", p.opacity);
            assert!(p.opacity <= before[i]);
        }
    }
}

#[test]
fn test_no_survivor_has_non_positive_opacity() {
    let mut f = field(4);
    for tick in 0..300 {
        if tick % 20 == 0 {
            let origin = f.random_origin();
            f.spawn_burst(origin.x, origin.y);
        }
        f.tick();
        assert!(f.particles().iter().all(|p| p.opacity > 0.0));
    }
}

#[test]
fn test_steady_state_is_bounded() {
    let mut f = field(5);
    let mut peak = 0;
    for tick in 0..2000 {
        if tick % 10 == 0 {
            f.spawn_burst(400.0, 100.0);
        }
        f.tick();
        peak = peak.max(f.len());
    }
    // One burst every 10 ticks, each living at most 67 ticks.
    assert!(peak <= 50 * 7, "peak {peak}");
}

#[test]
fn test_velocity_after_one_tick() {
    let spec = BurstSpec {
        count: 1,
        velocity: Velocity::Box { half_extent: 0.0 },
        decay: 0.02..0.02,
        palette: Palette::fireworks(),
        color_per_particle: false,
    };
    let mut f = ParticleField::new(PhysicsConfig::default(), spec.clone(), 800, 600, 6);
    f.spawn_with(&spec, Vec2::ZERO);
    f.tick();
    let p = f.particles()[0];
    assert!((p.velocity.x - 0.0).abs() < 1e-6);
    assert!((p.velocity.y - 0.2).abs() < 1e-6);
    assert!((p.opacity - 0.98).abs() < 1e-6);
}

#[test]
fn test_resize_mid_burst_keeps_collection() {
    let mut f = field(7);
    f.spawn_burst(700.0, 500.0);
    for _ in 0..10 {
        f.tick();
    }
    let before = f.particles().to_vec();
    f.resize(200, 100);
    assert_eq!(f.len(), before.len());
    assert_eq!(f.particles(), &before[..]);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_clears_then_draws_each_particle() {
    let mut f = field(8);
    let mut canvas = RecordingCanvas::default();
    f.spawn_burst(300.0, 300.0);
    f.tick();
    f.render(&mut canvas);

    assert_eq!(canvas.clears, 1);
    assert_eq!(canvas.circles.len(), f.len());
    for ((center, radius, color, alpha), p) in canvas.circles.iter().zip(f.particles()) {
        assert_eq!(*center, p.position);
        assert_eq!(*radius, 3.0);
        assert_eq!(*color, p.color);
        assert_eq!(*alpha, p.opacity);
        assert!(*alpha > 0.0);
    }
}

#[test]
fn test_render_twice_is_identical() {
    let mut f = field(9);
    let mut canvas = RasterCanvas::new(400, 300).unwrap();
    f.spawn_burst(200.0, 100.0);
    f.spawn_burst(100.0, 50.0);
    for _ in 0..5 {
        f.tick();
    }

    f.render(&mut canvas);
    let first = canvas.image().clone();
    f.render(&mut canvas);
    assert_eq!(canvas.image().as_raw(), first.as_raw());
}

#[test]
fn test_expired_field_renders_blank() {
    let mut f = field(10);
    let mut canvas = RasterCanvas::new(400, 300).unwrap();
    f.spawn_burst(200.0, 100.0);
    f.render(&mut canvas);
    assert!(!canvas.is_blank());

    for _ in 0..67 {
        f.tick();
    }
    f.render(&mut canvas);
    assert!(canvas.is_blank());
}
