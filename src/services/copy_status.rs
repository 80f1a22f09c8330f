//! Copy-to-clipboard action and its transient "Copied!" flag.

use anyhow::Result;
use std::time::{Duration, Instant};

/// How long the copied flag stays up after a successful copy.
pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Something that can put text on the system clipboard.
///
/// The terminal host backs this with `arboard`; tests use an in-memory fake.
pub trait ClipboardWriter {
    /// Write `text` to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is unavailable or access is denied.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Transient copied flag.
///
/// A second successful copy inside the window restarts it, so the flag stays
/// up until `window` after the most recent copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyStatus {
    window: Duration,
    reset_at: Option<Instant>,
}

impl CopyStatus {
    /// Create a lowered flag with the given feedback window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            reset_at: None,
        }
    }

    /// Whether the flag is up.
    #[must_use]
    pub const fn is_copied(&self) -> bool {
        self.reset_at.is_some()
    }

    /// When the flag will drop, if it is up.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.reset_at
    }

    /// Raise the flag after a successful copy at `now`.
    pub fn mark_copied(&mut self, now: Instant) {
        self.reset_at = Some(now + self.window);
    }

    /// Lower the flag if its window has elapsed. Returns true if it changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.reset_at {
            Some(reset_at) if now >= reset_at => {
                self.reset_at = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for CopyStatus {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_FEEDBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_copy_status_window() {
        let t0 = Instant::now();
        let mut status = CopyStatus::default();
        assert!(!status.is_copied());

        status.mark_copied(t0);
        assert!(status.is_copied());
        assert_eq!(status.deadline(), Some(t0 + ms(2000)));
        assert!(!status.poll(t0 + ms(1999)));
        assert!(status.is_copied());
        assert!(status.poll(t0 + ms(2000)));
        assert!(!status.is_copied());
        assert!(!status.poll(t0 + ms(3000)));
    }

    #[test]
    fn test_copy_status_restart_extends_window() {
        let t0 = Instant::now();
        let mut status = CopyStatus::default();
        status.mark_copied(t0);
        status.mark_copied(t0 + ms(500));

        assert!(!status.poll(t0 + ms(2000)));
        assert!(status.is_copied());
        assert!(status.poll(t0 + ms(2500)));
        assert!(!status.is_copied());
    }

    #[test]
    fn test_copy_status_custom_window() {
        let t0 = Instant::now();
        let mut status = CopyStatus::new(ms(100));
        status.mark_copied(t0);
        assert!(status.poll(t0 + ms(100)));
    }
}
