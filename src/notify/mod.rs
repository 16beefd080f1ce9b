//! Notification presenter
//!
//! Transient error/success messages. Each channel shows one message at a
//! time; posting again replaces the text and restarts the dismiss window,
//! and a dismissal only hides the element so it is reused next time.

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Channel, DismissTicket, NotificationState};

/// Where messages are displayed
pub trait NotificationSurface {
    fn show(&self, channel: Channel, message: &str);
    fn hide(&self, channel: Channel);
}

/// Runs a task once after a delay
pub trait DismissTimer {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// How long each channel stays visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DismissWindows {
    pub error_ms: u32,
    pub success_ms: u32,
}

impl Default for DismissWindows {
    fn default() -> Self {
        Self {
            error_ms: 5000,
            success_ms: 3000,
        }
    }
}

impl DismissWindows {
    pub fn for_channel(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Error => self.error_ms,
            Channel::Success => self.success_ms,
        }
    }
}

#[derive(Clone)]
pub struct NotificationPresenter {
    inner: Rc<PresenterInner>,
}

struct PresenterInner {
    state: RefCell<NotificationState>,
    surface: Box<dyn NotificationSurface>,
    timer: Box<dyn DismissTimer>,
    windows: DismissWindows,
}

impl PresenterInner {
    fn expire(&self, ticket: DismissTicket) {
        let dismissed = self.state.borrow_mut().dismiss(ticket);
        if dismissed {
            self.surface.hide(ticket.channel);
        }
    }
}

impl NotificationPresenter {
    pub fn new(
        surface: impl NotificationSurface + 'static,
        timer: impl DismissTimer + 'static,
        windows: DismissWindows,
    ) -> Self {
        Self {
            inner: Rc::new(PresenterInner {
                state: RefCell::new(NotificationState::new()),
                surface: Box::new(surface),
                timer: Box::new(timer),
                windows,
            }),
        }
    }

    pub fn notify(&self, channel: Channel, message: &str) {
        log::debug!("notify {:?}: {}", channel, message);

        let ticket = self.inner.state.borrow_mut().post(channel, message);
        self.inner.surface.show(channel, message);

        // A later post bumps the generation, so this task becomes a no-op
        let weak = Rc::downgrade(&self.inner);
        self.inner.timer.schedule(
            self.inner.windows.for_channel(channel),
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.expire(ticket);
                }
            }),
        );
    }

    pub fn error(&self, message: &str) {
        self.notify(Channel::Error, message);
    }

    pub fn success(&self, message: &str) {
        self.notify(Channel::Success, message);
    }

    pub fn is_visible(&self, channel: Channel) -> bool {
        self.inner.state.borrow().is_visible(channel)
    }

    pub fn message(&self, channel: Channel) -> Option<String> {
        self.inner.state.borrow().message(channel).map(str::to_string)
    }
}
