//! Page wiring for the formatter

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Document, Event, EventTarget, HtmlElement, HtmlTextAreaElement, KeyboardEvent};

use super::helpers::{deserialize, to_js_error};
use crate::clipboard::web::browser_clipboard;
use crate::config::ClientConfig;
use crate::models::RenderedOutput;
use crate::notify::web::{DomNotificationSurface, GlooTimer};
use crate::notify::NotificationPresenter;
use crate::session::{shortcut_for, KeyChord, SessionController, SessionView};
use crate::transport::fetch::FetchBackend;
use crate::transport::TransportClient;

const COPIED_LABEL: &str = "✓ Copied!";

/// The page's input, trigger, output and copy controls
struct DomSessionView {
    input: HtmlTextAreaElement,
    format_button: HtmlElement,
    output: HtmlElement,
    copy_button: HtmlElement,
    loading: HtmlElement,
    copy_label: Option<String>,
    copied_feedback_ms: u32,
}

impl DomSessionView {
    fn locate(document: &Document, config: &ClientConfig) -> Result<Self, JsValue> {
        let copy_button: HtmlElement = element_by_id(document, &config.copy_button_id)?;
        Ok(Self {
            input: element_by_id(document, &config.input_id)?,
            format_button: element_by_id(document, &config.format_button_id)?,
            output: element_by_id(document, &config.output_id)?,
            copy_label: copy_button.text_content(),
            copy_button,
            loading: element_by_id(document, &config.loading_id)?,
            copied_feedback_ms: config.copied_feedback_ms,
        })
    }

    /// Grow the input to fit its content
    fn fit_input_height(&self) {
        let style = self.input.style();
        let _ = style.set_property("height", "auto");
        let _ = style.set_property("height", &format!("{}px", self.input.scroll_height()));
    }
}

impl SessionView for DomSessionView {
    fn input_text(&self) -> String {
        self.input.value()
    }

    fn set_loading(&self, loading: bool) {
        let (button_display, loading_hidden) = if loading { ("none", false) } else { ("flex", true) };
        let _ = self.format_button.style().set_property("display", button_display);
        let classes = self.loading.class_list();
        let _ = if loading_hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }

    fn show_output(&self, output: &RenderedOutput) {
        self.output.set_inner_html(output.display_html());
        if output.has_content() {
            let _ = self.output.class_list().remove_1("placeholder");
        }
    }

    fn flash_copied(&self) {
        let button = self.copy_button.clone();
        let label = self.copy_label.clone();
        button.set_text_content(Some(COPIED_LABEL));
        let _ = button.class_list().add_1("copied");

        Timeout::new(self.copied_feedback_ms, move || {
            button.set_text_content(label.as_deref());
            let _ = button.class_list().remove_1("copied");
        })
        .forget();
    }
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| to_js_error(format!("Element #{} not found", id)))?
        .dyn_into::<T>()
        .map_err(|_| to_js_error(format!("Element #{} has an unexpected type", id)))
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire(document: &Document, view: &Rc<DomSessionView>, controller: &SessionController) -> Result<(), JsValue> {
    let session = controller.clone();
    listen(&view.format_button, "click", move |_| {
        let session = session.clone();
        spawn_local(async move { session.format().await });
    })?;

    let session = controller.clone();
    listen(&view.copy_button, "click", move |_| {
        let session = session.clone();
        spawn_local(async move { session.copy().await });
    })?;

    let session = controller.clone();
    listen(document, "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(intent) = shortcut_for(&KeyChord::from(key_event)) {
            event.prevent_default();
            let session = session.clone();
            spawn_local(async move { session.dispatch(intent).await });
        }
    })?;

    let resized = Rc::clone(view);
    listen(&view.input, "input", move |_| resized.fit_input_height())?;

    Ok(())
}

/// Handle returned to JavaScript; the page listeners stay wired without it
#[wasm_bindgen]
pub struct FormatterHandle {
    controller: SessionController,
}

#[wasm_bindgen]
impl FormatterHandle {
    /// Same as clicking the format button
    pub fn format(&self) -> Promise {
        let controller = self.controller.clone();
        future_to_promise(async move {
            controller.format().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Same as clicking the copy button
    pub fn copy(&self) -> Promise {
        let controller = self.controller.clone();
        future_to_promise(async move {
            controller.copy().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = isFormatting)]
    pub fn is_formatting(&self) -> bool {
        self.controller.is_formatting()
    }
}

/// Wire the formatter into the current page
///
/// # Parameters
/// - `config`: optional `ClientConfig` object; `undefined` uses the defaults
#[wasm_bindgen(js_name = startFormatter)]
pub fn start_formatter(config: JsValue) -> Result<FormatterHandle, JsValue> {
    let config: ClientConfig = if config.is_undefined() || config.is_null() {
        ClientConfig::default()
    } else {
        deserialize(config, "Invalid formatter config")?
    };
    config.validate().map_err(to_js_error)?;

    let window = web_sys::window().ok_or_else(|| to_js_error("No global window"))?;
    let document = window.document().ok_or_else(|| to_js_error("Window has no document"))?;

    let view = Rc::new(DomSessionView::locate(&document, &config)?);
    let notifier = NotificationPresenter::new(
        DomNotificationSurface::new(document.clone()),
        GlooTimer,
        config.dismiss_windows(),
    );
    let controller = SessionController::new(
        TransportClient::new(config.endpoint.clone(), Box::new(FetchBackend)),
        browser_clipboard(&window)?,
        notifier,
        view.clone(),
        config.response_ordering,
    );

    wire(&document, &view, &controller)?;
    let _ = view.input.focus();

    log::info!("Formatter started (endpoint {})", config.endpoint);
    Ok(FormatterHandle { controller })
}
