//! Background-music toggle state.
//!
//! Tracks only what the button shows. Actual playback belongs to the host.

use std::time::Duration;

const TOOLTIP_TIMEOUT: Duration = Duration::from_millis(5000);

/// Play/pause button with its hint tooltip.
#[derive(Clone, Debug, Default)]
pub struct MusicToggle {
    playing: bool,
    tooltip_hidden: bool,
    since_start: Duration,
}

impl MusicToggle {
    /// Paused, tooltip visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip play state. Returns the new aria label.
    ///
    /// The first click also hides the tooltip.
    pub fn toggle(&mut self) -> &'static str {
        self.tooltip_hidden = true;
        self.playing = !self.playing;
        tracing::info!(playing = self.playing, "music toggled");
        self.aria_label()
    }

    /// Let time pass; the tooltip hides itself after five seconds if music never started.
    pub fn advance(&mut self, dt: Duration) {
        self.since_start += dt;
        if self.since_start >= TOOLTIP_TIMEOUT && !self.playing {
            self.tooltip_hidden = true;
        }
    }

    /// Tooltip opacity while hovering (or not) over the button.
    pub fn hover(&self, hovering: bool) -> f32 {
        if hovering && self.tooltip_visible() && !self.playing {
            0.5
        } else {
            1.0
        }
    }

    /// Label describing what a click will do.
    pub fn aria_label(&self) -> &'static str {
        if self.playing {
            "Pause background music"
        } else {
            "Play background music"
        }
    }

    /// Whether music is marked as playing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the hint tooltip is shown.
    #[inline]
    pub fn tooltip_visible(&self) -> bool {
        !self.tooltip_hidden
    }
}
