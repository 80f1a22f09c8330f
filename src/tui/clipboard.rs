//! System clipboard access for the copy button.

use anyhow::{Context, Result};

use crate::services::ClipboardWriter;

/// Clipboard backed by `arboard`.
///
/// The handle is opened on first use and kept for the rest of the session;
/// a failed open is retried on the next copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Create an unopened clipboard handle.
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: None }
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().context("Clipboard unavailable")?);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .context("Failed to write to clipboard"),
            None => anyhow::bail!("Clipboard unavailable"),
        }
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}
