//! Clipboard writer
//!
//! Copies rendered content through a prioritised chain of strategies. Each
//! tier either succeeds, ending the chain with its [`CopyOutcome`], or fails
//! and hands over to the next one:
//!
//! 1. [`RichClipboardTier`] - async clipboard write of html + plain text
//! 2. [`SelectionCopyTier`] - select an off-screen html container, legacy copy
//! 3. [`PlainTextTier`] - select a temporary text input, legacy copy

pub mod surface;
pub mod tiers;
#[cfg(target_arch = "wasm32")]
pub mod web;

use futures::future::LocalBoxFuture;
use thiserror::Error;

use crate::models::ClipboardPayload;

pub use surface::{ScopedSurface, SurfaceHost, SurfaceKind};
pub use tiers::{PlainTextTier, RichClipboard, RichClipboardTier, SelectionCopyTier};

/// Which tier placed the content on the clipboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    RichHtml,
    LegacyHtml,
    PlainTextOnly,
}

impl CopyOutcome {
    pub fn success_message(self) -> &'static str {
        match self {
            CopyOutcome::RichHtml => "Content copied to clipboard with formatting!",
            CopyOutcome::LegacyHtml => "Content copied to clipboard!",
            CopyOutcome::PlainTextOnly => "Content copied to clipboard (plain text only)!",
        }
    }
}

/// Why a copy request put nothing on the clipboard.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    /// Nothing has been formatted yet
    #[error("No formatted content to copy.")]
    EmptyContent,

    /// Every tier failed
    #[error("Unable to copy to clipboard. Please select and copy manually.")]
    Unrecoverable,
}

/// Failure of a single tier; the chain logs it and moves on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierFailure {
    #[error("{0} is not available")]
    Unavailable(&'static str),

    #[error("{0}")]
    Rejected(String),
}

/// One strategy in the copy chain
pub trait CopyStrategy {
    /// Outcome reported when this strategy succeeds
    fn outcome(&self) -> CopyOutcome;

    fn attempt<'a>(&'a self, payload: &'a ClipboardPayload)
        -> LocalBoxFuture<'a, Result<(), TierFailure>>;
}

/// Ordered chain of copy strategies
#[derive(Default)]
pub struct ClipboardWriter {
    tiers: Vec<Box<dyn CopyStrategy>>,
}

impl ClipboardWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy; it is tried after every strategy added before it
    pub fn with_tier(mut self, tier: impl CopyStrategy + 'static) -> Self {
        self.tiers.push(Box::new(tier));
        self
    }

    /// Copy `html` with `plain_text` as its plain representation
    pub async fn copy_rich_content(
        &self,
        html: &str,
        plain_text: &str,
    ) -> Result<CopyOutcome, CopyError> {
        let payload = ClipboardPayload {
            html: html.to_string(),
            text: plain_text.to_string(),
        };
        self.copy_payload(&payload).await
    }

    pub async fn copy_payload(&self, payload: &ClipboardPayload) -> Result<CopyOutcome, CopyError> {
        if payload.is_empty() {
            return Err(CopyError::EmptyContent);
        }

        for tier in &self.tiers {
            match tier.attempt(payload).await {
                Ok(()) => {
                    log::info!("Copied via {:?}", tier.outcome());
                    return Ok(tier.outcome());
                }
                Err(failure) => {
                    log::warn!("{:?} copy failed: {}", tier.outcome(), failure);
                }
            }
        }

        log::error!("All {} clipboard tiers failed", self.tiers.len());
        Err(CopyError::Unrecoverable)
    }
}
