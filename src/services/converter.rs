//! Color state manager behind the converter form.
//!
//! `ColorConverter` owns the canonical store, the slider staging area and the
//! copy flag, and exposes one method per input event. Every method that can
//! involve a timer takes the current instant explicitly; the host calls
//! [`ColorConverter::tick`] from its event loop so deadlines fire.

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::color_store::ColorStore;
use super::copy_status::{ClipboardWriter, CopyStatus, DEFAULT_COPY_FEEDBACK};
use super::slider::{CommitPolicy, SliderStaging};
use crate::models::rgb::HexCase;
use crate::models::{RgbChannel, RgbColor};

/// Construction options for [`ColorConverter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Color shown at startup
    pub initial_color: RgbColor,
    /// Slider commit policy
    pub commit_policy: CommitPolicy,
    /// Hex display case
    pub hex_case: HexCase,
    /// How long "Copied!" stays visible
    pub copy_feedback: Duration,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            initial_color: RgbColor::default(),
            commit_policy: CommitPolicy::default(),
            hex_case: HexCase::default(),
            copy_feedback: DEFAULT_COPY_FEEDBACK,
        }
    }
}

/// Everything a view needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterSnapshot {
    /// Committed color (numeric fields)
    pub color: RgbColor,
    /// Staged color (slider thumbs)
    pub sliders: RgbColor,
    /// Hex field text
    pub hex_text: String,
    /// Whether "Copied!" should show
    pub copied: bool,
    /// Preview swatch color
    pub preview: RgbColor,
}

/// The converter's state machine.
#[derive(Debug, Clone)]
pub struct ColorConverter {
    store: ColorStore,
    staging: SliderStaging,
    copy_status: CopyStatus,
    commits: u64,
}

impl ColorConverter {
    /// Create a converter from options.
    #[must_use]
    pub fn new(options: ConverterOptions) -> Self {
        Self {
            store: ColorStore::new(options.initial_color, options.hex_case),
            staging: SliderStaging::new(options.initial_color, options.commit_policy),
            copy_status: CopyStatus::new(options.copy_feedback),
            commits: 0,
        }
    }

    /// Committed color.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        self.store.color()
    }

    /// Staged slider color.
    #[must_use]
    pub const fn pending_color(&self) -> RgbColor {
        self.staging.pending()
    }

    /// Hex field text.
    #[must_use]
    pub fn hex_text(&self) -> &str {
        self.store.hex_text()
    }

    /// Whether the copied flag is up.
    #[must_use]
    pub const fn is_copied(&self) -> bool {
        self.copy_status.is_copied()
    }

    /// Active slider commit policy.
    #[must_use]
    pub const fn commit_policy(&self) -> CommitPolicy {
        self.staging.policy()
    }

    /// Display case used for the hex text.
    #[must_use]
    pub const fn hex_case(&self) -> HexCase {
        self.store.hex_case()
    }

    /// Number of slider commits that reached the canonical color.
    #[must_use]
    pub const fn slider_commits(&self) -> u64 {
        self.commits
    }

    /// Whether a slider value is staged but not yet committed.
    #[must_use]
    pub const fn has_pending_commit(&self) -> bool {
        self.staging.has_uncommitted()
    }

    /// Numeric field edit. Commits immediately to both the color and the
    /// staged color. Returns true if the color changed.
    pub fn on_number_input(&mut self, channel: RgbChannel, raw: &str) -> bool {
        let changed = self.store.set_channel(channel, raw);
        self.staging.reset_to(self.store.color());
        changed
    }

    /// Slider movement. Only the staged color changes.
    pub fn on_slider_input(&mut self, channel: RgbChannel, raw: &str, now: Instant) {
        self.staging.input(channel, raw, now);
    }

    /// Step a slider by `delta` from its current staged position.
    pub fn nudge_channel(&mut self, channel: RgbChannel, delta: i16, now: Instant) {
        let current = i16::from(self.staging.pending().channel(channel));
        let value = (current + delta).clamp(0, i16::from(u8::MAX));
        self.on_slider_input(channel, &value.to_string(), now);
    }

    /// Slider released. Commits under the release policy.
    /// Returns true if the color changed.
    pub fn on_slider_release(&mut self, _now: Instant) -> bool {
        match self.staging.release() {
            Some(color) => self.commit_staged(color),
            None => false,
        }
    }

    /// Hex field edit. The text is kept verbatim; a complete hex applies.
    /// Returns true if the color changed.
    pub fn on_hex_input(&mut self, raw: &str) -> bool {
        let changed = self.store.set_hex_text(raw);
        if changed {
            self.staging.reset_to(self.store.color());
        }
        changed
    }

    /// Copy the hex text to the clipboard and raise the copied flag.
    ///
    /// # Errors
    ///
    /// Returns the clipboard error; the copied flag is left untouched.
    pub fn copy(&mut self, clipboard: &mut dyn ClipboardWriter, now: Instant) -> Result<()> {
        let text = self.store.hex_text().to_string();
        match clipboard.write_text(&text) {
            Ok(()) => {
                info!(hex = %text, "copied to clipboard");
                self.copy_status.mark_copied(now);
                Ok(())
            }
            Err(e) => {
                warn!("Copy failed: {e:#}");
                Err(e)
            }
        }
    }

    /// Drive timers. Returns true if anything observable changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(color) = self.staging.poll(now) {
            // The staged color may equal the committed one (drag returned
            // to its start), which still counts as a settled commit.
            self.commit_staged(color);
            changed = true;
        }
        if self.copy_status.poll(now) {
            changed = true;
        }
        changed
    }

    /// Switch the slider commit policy at runtime.
    pub fn set_commit_policy(&mut self, policy: CommitPolicy, now: Instant) {
        self.staging.set_policy(policy, now);
    }

    /// Earliest pending timer deadline (debounce commit or copied-flag reset).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.staging.deadline(), self.copy_status.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Switch the hex display case at runtime.
    pub fn set_hex_case(&mut self, hex_case: HexCase) {
        self.store.set_hex_case(hex_case);
    }

    /// Render-ready view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ConverterSnapshot {
        ConverterSnapshot {
            color: self.store.color(),
            sliders: self.staging.pending(),
            hex_text: self.store.hex_text().to_string(),
            copied: self.copy_status.is_copied(),
            preview: self.staging.pending(),
        }
    }

    fn commit_staged(&mut self, color: RgbColor) -> bool {
        self.commits += 1;
        debug!(commit = self.commits, color = %color, "slider commit");
        self.store.set_color(color)
    }
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new(ConverterOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeClipboard {
        written: Vec<String>,
        deny: bool,
    }

    impl ClipboardWriter for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            if self.deny {
                anyhow::bail!("clipboard access denied");
            }
            self.written.push(text.to_string());
            Ok(())
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_default_state() {
        let converter = ColorConverter::default();
        let snap = converter.snapshot();
        assert_eq!(snap.color, RgbColor::new(141, 182, 150));
        assert_eq!(snap.sliders, snap.color);
        assert_eq!(snap.hex_text, "#8db696");
        assert!(!snap.copied);
        assert_eq!(snap.preview, snap.color);
    }

    #[test]
    fn test_number_input_updates_color_and_pending() {
        let t0 = Instant::now();
        let mut converter = ColorConverter::default();
        converter.on_slider_input(RgbChannel::Red, "10", t0);

        assert!(converter.on_number_input(RgbChannel::Red, "200"));
        assert_eq!(converter.color().r, 200);
        assert_eq!(converter.pending_color().r, 200);
        assert_eq!(converter.hex_text(), "#c8b696");

        // the stale slider commit was superseded
        assert!(!converter.tick(t0 + ms(100)));
        assert_eq!(converter.color().r, 200);
    }

    #[test]
    fn test_slider_input_only_touches_pending() {
        let t0 = Instant::now();
        let mut converter = ColorConverter::default();
        converter.on_slider_input(RgbChannel::Blue, "0", t0);

        assert_eq!(converter.pending_color().b, 0);
        assert_eq!(converter.color().b, 150);
        assert_eq!(converter.hex_text(), "#8db696");
        assert_eq!(converter.snapshot().preview.b, 0);
        assert!(converter.has_pending_commit());

        assert!(converter.tick(t0 + ms(20)));
        assert_eq!(converter.color().b, 0);
        assert_eq!(converter.hex_text(), "#8db600");
        assert!(!converter.has_pending_commit());
    }

    #[test]
    fn test_hex_input_moves_sliders() {
        let mut converter = ColorConverter::default();
        assert!(converter.on_hex_input("#FF0000"));
        assert_eq!(converter.pending_color(), RgbColor::new(255, 0, 0));
        assert_eq!(converter.hex_text(), "#FF0000");
    }

    #[test]
    fn test_nudge_channel_saturates() {
        let t0 = Instant::now();
        let mut converter = ColorConverter::default();
        converter.nudge_channel(RgbChannel::Green, 100, t0);
        assert_eq!(converter.pending_color().g, 255);
        converter.nudge_channel(RgbChannel::Green, -300, t0);
        assert_eq!(converter.pending_color().g, 0);
    }

    #[test]
    fn test_release_policy() {
        let t0 = Instant::now();
        let mut converter = ColorConverter::new(ConverterOptions {
            commit_policy: CommitPolicy::OnRelease,
            ..ConverterOptions::default()
        });
        converter.on_slider_input(RgbChannel::Red, "0", t0);
        assert!(!converter.tick(t0 + ms(500)));
        assert_eq!(converter.color().r, 141);

        assert!(converter.on_slider_release(t0 + ms(600)));
        assert_eq!(converter.color().r, 0);
        assert_eq!(converter.slider_commits(), 1);
    }

    #[test]
    fn test_copy_success_and_failure() {
        let t0 = Instant::now();
        let mut converter = ColorConverter::default();

        let mut denied = FakeClipboard {
            deny: true,
            ..FakeClipboard::default()
        };
        assert!(converter.copy(&mut denied, t0).is_err());
        assert!(!converter.is_copied());

        let mut clipboard = FakeClipboard::default();
        converter.copy(&mut clipboard, t0).unwrap();
        assert_eq!(clipboard.written, vec!["#8db696".to_string()]);
        assert!(converter.is_copied());
        assert!(converter.tick(t0 + ms(2000)));
        assert!(!converter.is_copied());
    }

    #[test]
    fn test_copy_writes_text_verbatim() {
        let t0 = Instant::now();
        let mut converter = ColorConverter::default();
        converter.on_hex_input("#ab");
        let mut clipboard = FakeClipboard::default();
        converter.copy(&mut clipboard, t0).unwrap();
        assert_eq!(clipboard.written, vec!["#ab".to_string()]);
    }

    #[test]
    fn test_policy_switch_mid_drag_settles() {
        let t0 = Instant::now();
        let mut converter = ColorConverter::new(ConverterOptions {
            commit_policy: CommitPolicy::OnRelease,
            ..ConverterOptions::default()
        });
        converter.on_slider_input(RgbChannel::Red, "0", t0);
        converter.set_commit_policy(CommitPolicy::default(), t0);
        assert!(!converter.on_slider_release(t0 + ms(1)));

        assert!(converter.tick(t0 + ms(20)));
        assert_eq!(converter.color(), converter.pending_color());
        assert_eq!(converter.color().r, 0);
        assert!(!converter.has_pending_commit());
    }

    #[test]
    fn test_next_deadline_picks_earliest() {
        let t0 = Instant::now();
        let mut converter = ColorConverter::default();
        assert_eq!(converter.next_deadline(), None);

        converter.copy(&mut FakeClipboard::default(), t0).unwrap();
        assert_eq!(converter.next_deadline(), Some(t0 + ms(2000)));

        converter.on_slider_input(RgbChannel::Green, "1", t0 + ms(10));
        assert_eq!(converter.next_deadline(), Some(t0 + ms(30)));

        converter.tick(t0 + ms(30));
        assert_eq!(converter.next_deadline(), Some(t0 + ms(2000)));
    }

    #[test]
    fn test_set_hex_case_runtime() {
        let mut converter = ColorConverter::default();
        converter.set_hex_case(HexCase::Upper);
        assert_eq!(converter.hex_text(), "#8DB696");
        assert_eq!(converter.hex_case(), HexCase::Upper);
    }
}
