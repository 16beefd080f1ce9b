//! DOM notification elements and `gloo-timers` dismissal

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::{DismissTimer, NotificationSurface};
use crate::models::Channel;

/// One fixed element per channel, found by class or created on first use
pub struct DomNotificationSurface {
    document: Document,
}

impl DomNotificationSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, channel: Channel) -> Option<HtmlElement> {
        let class = channel.css_class();
        if let Ok(Some(existing)) = self.document.query_selector(&format!(".{}", class)) {
            return existing.dyn_into().ok();
        }

        let element = self.document.create_element("div").ok()?;
        element.set_class_name(class);
        self.document.body()?.append_child(&element).ok()?;
        element.dyn_into().ok()
    }
}

impl NotificationSurface for DomNotificationSurface {
    fn show(&self, channel: Channel, message: &str) {
        let Some(element) = self.element(channel) else {
            log::warn!("No element available for {:?} notification: {}", channel, message);
            return;
        };
        element.set_text_content(Some(message));
        let _ = element.style().set_property("display", "block");
    }

    fn hide(&self, channel: Channel) {
        if let Some(element) = self.element(channel) {
            let _ = element.style().set_property("display", "none");
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimer;

impl DismissTimer for GlooTimer {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}
