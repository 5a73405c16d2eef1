//! Repeating tasks: the random burst timer and the frame clock.
//!
//! Both are advanced by the host's event loop and each carries its own
//! [`TaskHandle`], so one can be stopped without touching the other.
//!
//! ```ignore
//! let mut timer = BurstTimer::new(&config.timer, seed);
//! let mut clock = FrameClock::new();
//!
//! // each loop iteration:
//! for _ in 0..timer.advance(clock.update()) {
//!     let origin = field.random_origin();
//!     field.spawn_burst(origin.x, origin.y);
//! }
//!
//! // teardown:
//! timer.handle().cancel();
//! clock.handle().cancel();
//! ```

use crate::config::TimerConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Cancel flag shared between a task and whoever may stop it.
///
/// Clones observe the same flag. Cancellation is permanent.
#[derive(Clone, Debug, Default)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    /// A live handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the task.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Fires after an initial delay, then re-arms with a random delay each time.
#[derive(Debug)]
pub struct BurstTimer {
    until_next: Duration,
    min_delay_ms: u64,
    max_delay_ms: u64,
    fired: u64,
    rng: SmallRng,
    handle: TaskHandle,
}

impl BurstTimer {
    /// Arm a timer whose first fire is `initial_delay_ms` from now.
    pub fn new(config: &TimerConfig, seed: u64) -> Self {
        Self {
            until_next: Duration::from_millis(config.initial_delay_ms),
            min_delay_ms: config.min_delay_ms,
            max_delay_ms: config.max_delay_ms,
            fired: 0,
            rng: SmallRng::seed_from_u64(seed),
            handle: TaskHandle::new(),
        }
    }

    fn next_delay(&mut self) -> Duration {
        let ms = if self.min_delay_ms < self.max_delay_ms {
            self.rng.gen_range(self.min_delay_ms..self.max_delay_ms)
        } else {
            self.min_delay_ms
        };
        // A zero delay would fire forever within one advance.
        Duration::from_millis(ms.max(1))
    }

    /// Let `dt` pass. Returns how many times the timer fired.
    ///
    /// Always 0 once cancelled.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.handle.is_cancelled() {
            return 0;
        }

        let mut remaining = dt;
        let mut fires = 0;
        while remaining >= self.until_next {
            remaining -= self.until_next;
            fires += 1;
            self.until_next = self.next_delay();
        }
        self.until_next -= remaining;
        self.fired += u64::from(fires);
        fires
    }

    /// Time until the next fire, or `None` once cancelled.
    pub fn next_deadline(&self) -> Option<Duration> {
        if self.handle.is_cancelled() {
            None
        } else {
            Some(self.until_next)
        }
    }

    /// Total fires so far.
    #[inline]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Handle that cancels this timer.
    pub fn handle(&self) -> TaskHandle {
        self.handle.clone()
    }
}

/// Frame timing for the animation loop.
///
/// Tracks delta time, frame count and a periodically refreshed FPS value.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    handle: TaskHandle,
}

impl FrameClock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            handle: TaskHandle::new(),
        }
    }

    /// Mark a new frame. Returns the time since the previous one.
    ///
    /// Paused or cancelled clocks report zero and do not count frames.
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();
        if self.paused || self.handle.is_cancelled() {
            self.last_frame = now;
            self.delta = Duration::ZERO;
            return self.delta;
        }

        self.delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta
    }

    /// Time between the last two frames.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Frames counted since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS estimate.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the clock is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop counting frames until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue after a pause without a delta spike.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Whether the animation loop should keep running.
    pub fn is_running(&self) -> bool {
        !self.handle.is_cancelled()
    }

    /// Handle that stops the animation loop.
    pub fn handle(&self) -> TaskHandle {
        self.handle.clone()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_first_fire_after_initial_delay() {
        let mut timer = BurstTimer::new(&TimerConfig::default(), 1);
        assert_eq!(timer.advance(ms(1999)), 0);
        assert_eq!(timer.advance(ms(1)), 1);
        assert_eq!(timer.fired(), 1);
    }

    #[test]
    fn test_rearm_delay_in_range() {
        let mut timer = BurstTimer::new(&TimerConfig::default(), 9);
        timer.advance(ms(2000));
        for _ in 0..50 {
            let gap = timer.next_deadline().unwrap();
            assert!(gap >= ms(3000) && gap < ms(5000), "gap {gap:?}");
            assert_eq!(timer.advance(gap - ms(1)), 0);
            assert_eq!(timer.advance(ms(1)), 1);
        }
    }

    #[test]
    fn test_large_step_fires_multiple_times() {
        let mut timer = BurstTimer::new(&TimerConfig::default(), 3);
        // 2000 + at most two 5000ms gaps fit in 12000, at least two 3000ms gaps do too.
        let fires = timer.advance(ms(12_000));
        assert!((3..=4).contains(&fires), "fires {fires}");
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = BurstTimer::new(&TimerConfig::default(), 1);
        timer.handle().cancel();
        assert_eq!(timer.advance(ms(60_000)), 0);
        assert_eq!(timer.next_deadline(), None);
        assert_eq!(timer.fired(), 0);
    }

    #[test]
    fn test_cancelling_clock_leaves_timer_running() {
        let mut timer = BurstTimer::new(&TimerConfig::default(), 1);
        let clock = FrameClock::new();
        clock.handle().cancel();
        assert!(!clock.is_running());
        assert_eq!(timer.advance(ms(2000)), 1);
    }

    #[test]
    fn test_equal_bounds_use_fixed_delay() {
        let config = TimerConfig {
            initial_delay_ms: 0,
            min_delay_ms: 100,
            max_delay_ms: 100,
        };
        let mut timer = BurstTimer::new(&config, 1);
        assert_eq!(timer.advance(ms(0)), 1);
        assert_eq!(timer.next_deadline(), Some(ms(100)));
        assert_eq!(timer.advance(ms(1000)), 10);
    }

    #[test]
    fn test_clock_update() {
        let mut clock = FrameClock::new();
        thread::sleep(ms(10));
        let delta = clock.update();
        assert!(delta >= ms(10));
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_clock_pause() {
        let mut clock = FrameClock::new();
        clock.update();
        clock.pause();
        thread::sleep(ms(5));
        assert_eq!(clock.update(), Duration::ZERO);
        assert_eq!(clock.frame(), 1);
        clock.resume();
        assert!(!clock.is_paused());
    }
}
