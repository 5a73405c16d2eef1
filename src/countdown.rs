//! Countdown to a target instant.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// 2026-01-01T00:00:00Z as Unix seconds.
///
/// This is midnight UTC, not local midnight. Set `countdown_target_unix`
/// to count down to a local New Year.
pub const NEW_YEAR_2026_UNIX: i64 = 1_767_225_600;

const MS_PER_SECOND: u128 = 1000;
const MS_PER_MINUTE: u128 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u128 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u128 = 24 * MS_PER_HOUR;

/// Time remaining, split into display units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeLeft {
    /// Whole days.
    pub days: u64,
    /// Hours past the whole days (0-23).
    pub hours: u64,
    /// Minutes past the whole hours (0-59).
    pub minutes: u64,
    /// Seconds past the whole minutes (0-59).
    pub seconds: u64,
}

impl TimeLeft {
    /// Floor-divide a duration into days/hours/minutes/seconds.
    pub fn from_duration(distance: Duration) -> Self {
        let ms = distance.as_millis();
        Self {
            days: (ms / MS_PER_DAY) as u64,
            hours: ((ms % MS_PER_DAY) / MS_PER_HOUR) as u64,
            minutes: ((ms % MS_PER_HOUR) / MS_PER_MINUTE) as u64,
            seconds: ((ms % MS_PER_MINUTE) / MS_PER_SECOND) as u64,
        }
    }

    /// The four boxes as zero-padded text, days first.
    pub fn fields(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds].map(|v| format!("{v:02}"))
    }
}

impl std::fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [d, h, m, s] = self.fields();
        write!(f, "{d}d {h}:{m}:{s}")
    }
}

/// Result of checking the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Remaining {
    /// Still counting down.
    Counting(TimeLeft),
    /// The target has passed.
    Celebrate,
}

/// Counts down to a fixed instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    target: SystemTime,
}

impl Countdown {
    /// Count down to `target`.
    pub fn new(target: SystemTime) -> Self {
        Self { target }
    }

    /// Count down to a Unix timestamp in seconds.
    pub fn from_unix(seconds: i64) -> Self {
        let offset = Duration::from_secs(seconds.unsigned_abs());
        let target = if seconds >= 0 {
            UNIX_EPOCH + offset
        } else {
            UNIX_EPOCH.checked_sub(offset).unwrap_or(UNIX_EPOCH)
        };
        Self { target }
    }

    /// The target instant.
    pub fn target(&self) -> SystemTime {
        self.target
    }

    /// Time left at `now`. Exactly at the target it still reads all zeros.
    pub fn remaining(&self, now: SystemTime) -> Remaining {
        match self.target.duration_since(now) {
            Ok(distance) => Remaining::Counting(TimeLeft::from_duration(distance)),
            Err(_) => Remaining::Celebrate,
        }
    }

    /// Time from `now` until the shown seconds next change, or `None`
    /// once the target has passed.
    pub fn until_next_change(&self, now: SystemTime) -> Option<Duration> {
        let distance = self.target.duration_since(now).ok()?;
        Some(Duration::from_nanos(u64::from(distance.subsec_nanos()) + 1))
    }
}

/// Which countdown boxes changed text since the previous update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangedFields {
    /// Days box changed.
    pub days: bool,
    /// Hours box changed.
    pub hours: bool,
    /// Minutes box changed.
    pub minutes: bool,
    /// Seconds box changed.
    pub seconds: bool,
}

impl ChangedFields {
    /// Whether anything changed.
    pub fn any(&self) -> bool {
        self.days || self.hours || self.minutes || self.seconds
    }
}

/// Remembers the last shown text of each box so only changed boxes animate.
#[derive(Clone, Debug, Default)]
pub struct CountdownDisplay {
    shown: Option<[String; 4]>,
}

impl CountdownDisplay {
    /// An empty display; the first update reports every box as changed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `left` and report which boxes changed.
    pub fn update(&mut self, left: &TimeLeft) -> ChangedFields {
        let next = left.fields();
        let changed = match &self.shown {
            None => ChangedFields {
                days: true,
                hours: true,
                minutes: true,
                seconds: true,
            },
            Some(prev) => ChangedFields {
                days: prev[0] != next[0],
                hours: prev[1] != next[1],
                minutes: prev[2] != next[2],
                seconds: prev[3] != next[3],
            },
        };
        self.shown = Some(next);
        changed
    }

    /// Text currently shown, if any update happened.
    pub fn shown(&self) -> Option<&[String; 4]> {
        self.shown.as_ref()
    }
}
