//! Session controller
//!
//! Turns user intents (format, copy) into calls on the transport client and
//! clipboard writer, keeps the [`AppState`], toggles the loading affordance
//! and routes every outcome to the notification presenter. Errors stop here:
//! each one becomes a single error notification.

pub mod keyboard;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::clipboard::{ClipboardWriter, CopyError, CopyOutcome};
use crate::models::{FormatRequest, FormatResponse, RenderedOutput};
use crate::notify::NotificationPresenter;
use crate::transport::{TransportClient, TransportError};

pub use keyboard::{shortcut_for, Intent, KeyChord};
pub use state::{AppState, RequestSeq, ResponseOrdering};

pub const FORMAT_SUCCESS_MESSAGE: &str = "Text formatted successfully!";

/// The page elements the controller drives
pub trait SessionView {
    /// Current contents of the text input
    fn input_text(&self) -> String;

    /// Hide the format trigger and show the loading indicator, or the reverse
    fn set_loading(&self, loading: bool);

    fn show_output(&self, output: &RenderedOutput);

    /// Brief confirmation on the copy control after a formatted copy
    fn flash_copied(&self) {}
}

/// Anything that ends a user action early; `Display` is the user message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Copy(#[from] CopyError),
}

#[derive(Clone)]
pub struct SessionController {
    inner: Rc<SessionInner>,
}

struct SessionInner {
    state: RefCell<AppState>,
    transport: TransportClient,
    clipboard: ClipboardWriter,
    notifier: NotificationPresenter,
    view: Rc<dyn SessionView>,
}

/// `Formatting` for as long as it lives; dropping the last one in flight
/// restores the affordance
struct FormattingScope<'a> {
    inner: &'a SessionInner,
}

impl<'a> FormattingScope<'a> {
    fn enter(inner: &'a SessionInner) -> (Self, RequestSeq) {
        let seq = inner.state.borrow_mut().begin_format();
        inner.view.set_loading(true);
        (Self { inner }, seq)
    }
}

impl Drop for FormattingScope<'_> {
    fn drop(&mut self) {
        let idle = self.inner.state.borrow_mut().finish_format();
        if idle {
            self.inner.view.set_loading(false);
        }
    }
}

struct CopyingScope<'a> {
    inner: &'a SessionInner,
}

impl<'a> CopyingScope<'a> {
    fn enter(inner: &'a SessionInner) -> Self {
        inner.state.borrow_mut().begin_copy();
        Self { inner }
    }
}

impl Drop for CopyingScope<'_> {
    fn drop(&mut self) {
        self.inner.state.borrow_mut().finish_copy();
    }
}

impl SessionController {
    pub fn new(
        transport: TransportClient,
        clipboard: ClipboardWriter,
        notifier: NotificationPresenter,
        view: Rc<dyn SessionView>,
        ordering: ResponseOrdering,
    ) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                state: RefCell::new(AppState::new(ordering)),
                transport,
                clipboard,
                notifier,
                view,
            }),
        }
    }

    pub fn is_formatting(&self) -> bool {
        self.inner.state.borrow().is_formatting()
    }

    pub fn is_copying(&self) -> bool {
        self.inner.state.borrow().is_copying()
    }

    pub fn output(&self) -> RenderedOutput {
        self.inner.state.borrow().output().clone()
    }

    pub fn notifier(&self) -> &NotificationPresenter {
        &self.inner.notifier
    }

    /// Run whichever action an intent names
    pub async fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::Format => self.format().await,
            Intent::Copy => self.copy().await,
        }
    }

    /// Send the current input to the formatting service and render the result
    pub async fn format(&self) {
        let text = self.inner.view.input_text();
        let Some(request) = FormatRequest::from_input(&text) else {
            self.report(TransportError::Validation.into());
            return;
        };

        let (_scope, seq) = FormattingScope::enter(&self.inner);
        log::info!("Format request {} dispatched ({} chars)", seq, request.text.len());

        match self.inner.transport.submit(&request).await {
            Ok(response) => self.apply(seq, response),
            Err(err) => self.report(err.into()),
        }
    }

    /// Copy the rendered output to the clipboard
    pub async fn copy(&self) {
        let payload = self.inner.state.borrow().output().clipboard_payload();
        let Some(payload) = payload else {
            self.report(CopyError::EmptyContent.into());
            return;
        };

        let _scope = CopyingScope::enter(&self.inner);
        match self.inner.clipboard.copy_payload(&payload).await {
            Ok(outcome) => {
                self.inner.notifier.success(outcome.success_message());
                if outcome == CopyOutcome::RichHtml {
                    self.inner.view.flash_copied();
                }
            }
            Err(err) => self.report(err.into()),
        }
    }

    fn apply(&self, seq: RequestSeq, response: FormatResponse) {
        let applied = self.inner.state.borrow_mut().apply_response(seq, response).cloned();
        match applied {
            Some(output) => {
                log::info!("Format response {} applied", seq);
                self.inner.view.show_output(&output);
                self.inner.notifier.success(FORMAT_SUCCESS_MESSAGE);
            }
            None => log::debug!("Format response {} is stale; discarded", seq),
        }
    }

    fn report(&self, err: SessionError) {
        log::warn!("{}", err);
        self.inner.notifier.error(&err.to_string());
    }
}
