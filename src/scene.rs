//! Everything the page shows, minus the window.
//!
//! A [`Scene`] ties the particle field to its schedulers and to the small
//! page widgets (countdown, greeting, music, share). Hosts feed it
//! [`Command`]s and elapsed time, and call [`Scene::frame`] once per redraw.
//! It never touches a window or GPU, so the exporter and tests drive it
//! directly.

use crate::animator::ParticleField;
use crate::canvas::Canvas;
use crate::config::SkyburstConfig;
use crate::confetti::{Celebration, ConfettiShot};
use crate::countdown::{ChangedFields, Countdown, CountdownDisplay, Remaining, TimeLeft};
use crate::greeting;
use crate::input::Command;
use crate::music::MusicToggle;
use crate::schedule::BurstTimer;
use crate::share::{share_action, ShareAction, ShareData};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::{Duration, SystemTime};

/// How long the "link copied" notice stays up.
const COPY_FEEDBACK: Duration = Duration::from_millis(3000);
/// Longest idle wait when nothing else is scheduled.
const MAX_IDLE: Duration = Duration::from_secs(1);

/// Something the host may want to show or log.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    /// A greeting to display.
    Greeting(&'static str),
    /// Music toggled; carries the new button label.
    Music(&'static str),
    /// A share button was pressed.
    Share(ShareAction),
    /// The page link should be copied and the notice shown.
    CopyLink(String),
    /// The "link copied" notice timed out.
    CopyFeedbackHidden,
    /// Countdown boxes changed.
    Countdown(TimeLeft, ChangedFields),
    /// The countdown finished and the shower began.
    CelebrationStarted,
    /// The user asked to close.
    Quit,
}

/// The widget state behind one page.
pub struct Scene {
    field: ParticleField,
    timer: BurstTimer,
    celebration: Option<Celebration>,
    celebrated: bool,
    countdown: Countdown,
    display: CountdownDisplay,
    music: MusicToggle,
    copy_feedback: Option<Duration>,
    share: ShareData,
    config: SkyburstConfig,
    rng: SmallRng,
    seed: u64,
}

impl Scene {
    /// Build a scene for a `width`x`height` viewport.
    pub fn new(config: &SkyburstConfig, width: u32, height: u32, seed: u64) -> Self {
        Self {
            field: ParticleField::from_config(config, width, height, seed),
            timer: BurstTimer::new(&config.timer, seed.wrapping_add(1)),
            celebration: None,
            celebrated: false,
            countdown: Countdown::from_unix(config.countdown_target()),
            display: CountdownDisplay::new(),
            music: MusicToggle::new(),
            copy_feedback: None,
            share: ShareData::new_year(config.window.share_url.clone()),
            config: config.clone(),
            rng: SmallRng::seed_from_u64(seed.wrapping_add(2)),
            seed,
        }
    }

    /// The particle field.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Mutable access to the particle field.
    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    /// The automatic burst timer.
    pub fn timer(&self) -> &BurstTimer {
        &self.timer
    }

    /// Music toggle state.
    pub fn music(&self) -> &MusicToggle {
        &self.music
    }

    /// Whether the "link copied" notice is showing.
    pub fn copy_feedback_visible(&self) -> bool {
        self.copy_feedback.is_some()
    }

    /// Whether a confetti shower is running.
    pub fn is_celebrating(&self) -> bool {
        self.celebration.as_ref().is_some_and(|c| !c.is_finished())
    }

    /// Viewport changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.field.resize(width, height);
    }

    /// Spawn a confetti shot at its viewport-relative origin.
    pub fn fire(&mut self, shot: &ConfettiShot) {
        let (w, h) = self.field.viewport();
        let origin = shot.origin_in(w, h);
        self.field.spawn_with(&shot.to_burst_spec(), origin);
    }

    /// Start the confetti shower now.
    pub fn celebrate(&mut self) {
        self.celebrated = true;
        let seed = self.seed.wrapping_add(3).wrapping_add(self.timer.fired());
        self.celebration = Some(Celebration::start(&self.config.celebration, seed));
    }

    /// Handle a user command.
    pub fn apply(&mut self, command: Command) -> Option<SceneEvent> {
        match command {
            Command::Burst(at) => {
                self.field.spawn_burst(at.x, at.y);
                None
            }
            Command::Greet => {
                let wish = greeting::pick(&mut self.rng);
                self.fire(&ConfettiShot::greeting());
                Some(SceneEvent::Greeting(wish))
            }
            Command::ToggleMusic => Some(SceneEvent::Music(self.music.toggle())),
            Command::Celebrate => {
                self.celebrate();
                Some(SceneEvent::CelebrationStarted)
            }
            Command::CopyLink => {
                self.copy_feedback = Some(COPY_FEEDBACK);
                self.fire(&ConfettiShot::copy_link());
                Some(SceneEvent::CopyLink(self.share.url.clone()))
            }
            Command::Share(platform) => {
                // Buttons sit in a row across the lower middle of the page.
                let x = 0.35 + 0.1 * platform.index() as f32;
                self.fire(&ConfettiShot::share(x, 0.85));
                Some(SceneEvent::Share(share_action(platform, &self.share)))
            }
            Command::Quit => Some(SceneEvent::Quit),
        }
    }

    /// Let `dt` pass with the wall clock at `now`.
    ///
    /// Fires timer bursts and confetti shots, and checks the countdown.
    pub fn advance(&mut self, dt: Duration, now: SystemTime) -> Vec<SceneEvent> {
        let mut events = Vec::new();

        for _ in 0..self.timer.advance(dt) {
            let origin = self.field.random_origin();
            self.field.spawn_burst(origin.x, origin.y);
        }

        let shots = match self.celebration.as_mut() {
            Some(celebration) => celebration.advance(dt),
            None => Vec::new(),
        };
        for shot in &shots {
            self.fire(shot);
        }

        match self.countdown.remaining(now) {
            Remaining::Counting(left) => {
                let changed = self.display.update(&left);
                if changed.any() {
                    events.push(SceneEvent::Countdown(left, changed));
                }
            }
            Remaining::Celebrate if !self.celebrated => {
                self.celebrate();
                events.push(SceneEvent::CelebrationStarted);
            }
            Remaining::Celebrate => {}
        }

        if let Some(left) = self.copy_feedback {
            match left.checked_sub(dt).filter(|d| !d.is_zero()) {
                Some(rest) => self.copy_feedback = Some(rest),
                None => {
                    self.copy_feedback = None;
                    events.push(SceneEvent::CopyFeedbackHidden);
                }
            }
        }

        self.music.advance(dt);
        events
    }

    /// How long the host may sleep before the next [`advance`](Self::advance).
    ///
    /// `None` while anything is animating. Otherwise the time until the
    /// next timer burst, countdown tick or notice timeout, capped at one
    /// second.
    pub fn idle_for(&self, now: SystemTime) -> Option<Duration> {
        if !self.field.is_empty() || self.is_celebrating() {
            return None;
        }
        let wake = [
            self.timer.next_deadline(),
            self.countdown.until_next_change(now),
            self.copy_feedback,
        ]
        .into_iter()
        .flatten()
        .fold(MAX_IDLE, Duration::min);
        Some(wake)
    }

    /// One animation frame: tick then redraw. Returns particles removed.
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> usize {
        let removed = self.field.tick();
        self.field.render(canvas);
        removed
    }

    /// Stop the burst timer and drop every particle.
    pub fn stop(&mut self) {
        self.timer.handle().cancel();
        self.celebration = None;
        self.field.clear();
    }
}
