//! Slider staging and the debounce committer.
//!
//! While a slider is dragged its value lands in a staged (pending) color so
//! the preview stays responsive. The staged color reaches the canonical
//! store either after a quiet period (debounced) or when the drag is released.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::models::rgb::parse_channel_input;
use crate::models::{RgbChannel, RgbColor};

/// Default quiet period before a staged slider value is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(20);

/// When staged slider values are committed to the canonical color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Commit once no slider change has happened for `delay`.
    Debounced {
        /// Quiet period
        delay: Duration,
    },
    /// Commit exactly once per release gesture.
    OnRelease,
}

impl CommitPolicy {
    /// Debounced policy with the given delay in milliseconds.
    #[must_use]
    pub const fn debounced_ms(ms: u64) -> Self {
        Self::Debounced {
            delay: Duration::from_millis(ms),
        }
    }
}

impl Default for CommitPolicy {
    fn default() -> Self {
        Self::Debounced {
            delay: DEFAULT_DEBOUNCE,
        }
    }
}

/// Name of a commit policy as it appears in config files and on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicyKind {
    /// See [`CommitPolicy::Debounced`]
    #[default]
    Debounced,
    /// See [`CommitPolicy::OnRelease`]
    OnRelease,
}

impl CommitPolicyKind {
    /// Combine with a delay to get the runtime policy.
    #[must_use]
    pub const fn with_delay_ms(self, ms: u64) -> CommitPolicy {
        match self {
            Self::Debounced => CommitPolicy::debounced_ms(ms),
            Self::OnRelease => CommitPolicy::OnRelease,
        }
    }
}

impl FromStr for CommitPolicyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "debounced" | "debounce" => Ok(Self::Debounced),
            "on_release" | "release" => Ok(Self::OnRelease),
            other => anyhow::bail!(
                "Invalid commit policy '{other}'. Must be 'debounced' or 'on_release'"
            ),
        }
    }
}

impl fmt::Display for CommitPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debounced => write!(f, "debounced"),
            Self::OnRelease => write!(f, "on_release"),
        }
    }
}

/// A restartable single-deadline timer.
///
/// Trailing edge only: restarting pushes the deadline out, and nothing fires
/// until a full quiet period has passed since the last restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebounceTimer {
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Create a disarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm (or re-arm) the timer to fire `delay` after `now`.
    pub fn restart(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarm and return true if the deadline has been reached.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Staged slider color plus the commit timer that drains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderStaging {
    pending: RgbColor,
    policy: CommitPolicy,
    timer: DebounceTimer,
    dragging: bool,
}

impl SliderStaging {
    /// Start with `pending` equal to the committed color.
    #[must_use]
    pub const fn new(color: RgbColor, policy: CommitPolicy) -> Self {
        Self {
            pending: color,
            policy,
            timer: DebounceTimer::new(),
            dragging: false,
        }
    }

    /// Staged color (what sliders and the preview show).
    #[must_use]
    pub const fn pending(&self) -> RgbColor {
        self.pending
    }

    /// Active commit policy.
    #[must_use]
    pub const fn policy(&self) -> CommitPolicy {
        self.policy
    }

    /// Whether a staged value is waiting to be committed.
    #[must_use]
    pub const fn has_uncommitted(&self) -> bool {
        self.dragging || self.timer.is_armed()
    }

    /// When the pending debounce commit is due, if one is armed.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Record a slider movement. Only the staged color changes.
    pub fn input(&mut self, channel: RgbChannel, raw: &str, now: Instant) {
        let value = parse_channel_input(raw);
        self.pending = self.pending.with_channel(channel, value);
        self.dragging = true;
        if let CommitPolicy::Debounced { delay } = self.policy {
            self.timer.restart(now, delay);
        }
    }

    /// End of a drag gesture.
    ///
    /// Returns the color to commit under [`CommitPolicy::OnRelease`];
    /// under the debounced policy the timer commits instead.
    pub fn release(&mut self) -> Option<RgbColor> {
        match self.policy {
            CommitPolicy::OnRelease if self.dragging => {
                self.dragging = false;
                Some(self.pending)
            }
            CommitPolicy::OnRelease | CommitPolicy::Debounced { .. } => None,
        }
    }

    /// Returns the staged color once the debounce window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<RgbColor> {
        if self.timer.fire_if_due(now) {
            self.dragging = false;
            Some(self.pending)
        } else {
            None
        }
    }

    /// Overwrite the staged color with a committed one and drop any pending
    /// commit (a typed value supersedes a staged drag).
    pub fn reset_to(&mut self, color: RgbColor) {
        self.pending = color;
        self.timer.cancel();
        self.dragging = false;
    }

    /// Switch policy at `now`. The staged value is kept. Moving to
    /// release-based commits drops a pending debounce; moving to debounced
    /// commits mid-drag arms the timer so the drag still settles.
    pub fn set_policy(&mut self, policy: CommitPolicy, now: Instant) {
        match policy {
            CommitPolicy::OnRelease => self.timer.cancel(),
            CommitPolicy::Debounced { delay } => {
                if self.dragging {
                    self.timer.restart(now, delay);
                }
            }
        }
        self.policy = policy;
    }
}
