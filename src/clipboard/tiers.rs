//! The three copy strategies, in fallback order

use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};

use super::{CopyOutcome, CopyStrategy, ScopedSurface, SurfaceHost, SurfaceKind, TierFailure};
use crate::models::ClipboardPayload;

/// Clipboard able to hold html and plain text as one atomic item
pub trait RichClipboard {
    fn write_rich<'a>(&'a self, html: &'a str, text: &'a str)
        -> LocalBoxFuture<'a, Result<(), TierFailure>>;
}

/// Tier 1: dual-representation clipboard write
pub struct RichClipboardTier<C> {
    clipboard: C,
}

impl<C: RichClipboard> RichClipboardTier<C> {
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }
}

impl<C: RichClipboard> CopyStrategy for RichClipboardTier<C> {
    fn outcome(&self) -> CopyOutcome {
        CopyOutcome::RichHtml
    }

    fn attempt<'a>(&'a self, payload: &'a ClipboardPayload)
        -> LocalBoxFuture<'a, Result<(), TierFailure>> {
        self.clipboard.write_rich(&payload.html, &payload.text)
    }
}

/// Tier 2: select rendered html in an off-screen container
pub struct SelectionCopyTier<H> {
    host: Rc<H>,
}

impl<H: SurfaceHost> SelectionCopyTier<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self { host }
    }
}

impl<H: SurfaceHost> CopyStrategy for SelectionCopyTier<H> {
    fn outcome(&self) -> CopyOutcome {
        CopyOutcome::LegacyHtml
    }

    fn attempt<'a>(&'a self, payload: &'a ClipboardPayload)
        -> LocalBoxFuture<'a, Result<(), TierFailure>> {
        let result = ScopedSurface::acquire(&*self.host, SurfaceKind::HtmlContainer, &payload.html)
            .and_then(|surface| surface.copy_selection());
        Box::pin(future::ready(result))
    }
}

/// Tier 3: select plain text in a temporary input
pub struct PlainTextTier<H> {
    host: Rc<H>,
}

impl<H: SurfaceHost> PlainTextTier<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self { host }
    }
}

impl<H: SurfaceHost> CopyStrategy for PlainTextTier<H> {
    fn outcome(&self) -> CopyOutcome {
        CopyOutcome::PlainTextOnly
    }

    fn attempt<'a>(&'a self, payload: &'a ClipboardPayload)
        -> LocalBoxFuture<'a, Result<(), TierFailure>> {
        let result = ScopedSurface::acquire(&*self.host, SurfaceKind::TextInput, &payload.text)
            .and_then(|surface| surface.copy_selection());
        Box::pin(future::ready(result))
    }
}
