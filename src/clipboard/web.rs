//! Browser implementations of the clipboard seams

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlDocument, HtmlElement, HtmlTextAreaElement, Window};

use super::{
    ClipboardWriter, PlainTextTier, RichClipboard, RichClipboardTier, SelectionCopyTier,
    SurfaceHost, SurfaceKind, TierFailure,
};
use crate::api::helpers::js_error_message;

#[wasm_bindgen]
extern "C" {
    type ClipboardItem;

    #[wasm_bindgen(constructor, js_class = "ClipboardItem", catch)]
    fn new(items: &Object) -> Result<ClipboardItem, JsValue>;

    type AsyncClipboard;

    #[wasm_bindgen(method, catch)]
    fn write(this: &AsyncClipboard, items: &Array) -> Result<Promise, JsValue>;
}

fn rejected(err: JsValue) -> TierFailure {
    TierFailure::Rejected(js_error_message(&err))
}

/// Build the standard three-tier chain for the page
pub fn browser_clipboard(window: &Window) -> Result<ClipboardWriter, JsValue> {
    let host = Rc::new(DomSurfaceHost::new(window)?);
    Ok(ClipboardWriter::new()
        .with_tier(RichClipboardTier::new(AsyncClipboardApi::new(window.clone())))
        .with_tier(SelectionCopyTier::new(Rc::clone(&host)))
        .with_tier(PlainTextTier::new(host)))
}

/// `navigator.clipboard.write` with a `ClipboardItem`
pub struct AsyncClipboardApi {
    window: Window,
}

impl AsyncClipboardApi {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn clipboard(&self) -> Option<AsyncClipboard> {
        let clipboard = Reflect::get(&self.window.navigator(), &JsValue::from_str("clipboard")).ok()?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return None;
        }
        Some(clipboard.unchecked_into())
    }

    async fn write(&self, html: &str, text: &str) -> Result<(), TierFailure> {
        let clipboard = self
            .clipboard()
            .ok_or(TierFailure::Unavailable("navigator.clipboard"))?;

        let items = Object::new();
        Reflect::set(&items, &JsValue::from_str("text/html"), &blob(html, "text/html")?)
            .map_err(rejected)?;
        Reflect::set(&items, &JsValue::from_str("text/plain"), &blob(text, "text/plain")?)
            .map_err(rejected)?;

        let item = ClipboardItem::new(&items).map_err(rejected)?;
        let pending = clipboard.write(&Array::of1(&item)).map_err(rejected)?;
        JsFuture::from(pending).await.map_err(rejected)?;
        Ok(())
    }
}

impl RichClipboard for AsyncClipboardApi {
    fn write_rich<'a>(&'a self, html: &'a str, text: &'a str)
        -> LocalBoxFuture<'a, Result<(), TierFailure>> {
        Box::pin(self.write(html, text))
    }
}

fn blob(content: &str, mime: &str) -> Result<Blob, TierFailure> {
    let parts = Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_str_sequence_and_options(&parts, &options).map_err(rejected)
}

/// Temporary elements appended to `document.body`
pub enum DomSurface {
    Container(HtmlElement),
    Input(HtmlTextAreaElement),
}

pub struct DomSurfaceHost {
    window: Window,
    document: HtmlDocument,
}

impl DomSurfaceHost {
    pub fn new(window: &Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| JsValue::from_str("document is not an HTML document"))?;
        Ok(Self {
            window: window.clone(),
            document,
        })
    }

    fn create_element<T: JsCast>(&self, tag: &str) -> Result<T, TierFailure> {
        self.document
            .create_element(tag)
            .map_err(rejected)?
            .dyn_into::<T>()
            .map_err(|_| TierFailure::Rejected(format!("<{}> has an unexpected type", tag)))
    }

    fn hide_off_screen(element: &HtmlElement) -> Result<(), TierFailure> {
        let style = element.style();
        style.set_property("position", "absolute").map_err(rejected)?;
        style.set_property("left", "-9999px").map_err(rejected)?;
        style.set_property("top", "-9999px").map_err(rejected)?;
        Ok(())
    }
}

impl SurfaceHost for DomSurfaceHost {
    type Surface = DomSurface;

    fn create_surface(&self, kind: SurfaceKind, content: &str) -> Result<DomSurface, TierFailure> {
        let body = self
            .document
            .body()
            .ok_or(TierFailure::Unavailable("document.body"))?;

        match kind {
            SurfaceKind::HtmlContainer => {
                let container: HtmlElement = self.create_element("div")?;
                container.set_inner_html(content);
                Self::hide_off_screen(&container)?;
                body.append_child(&container).map_err(rejected)?;
                Ok(DomSurface::Container(container))
            }
            SurfaceKind::TextInput => {
                let input: HtmlTextAreaElement = self.create_element("textarea")?;
                input.set_value(content);
                Self::hide_off_screen(&input)?;
                body.append_child(&input).map_err(rejected)?;
                Ok(DomSurface::Input(input))
            }
        }
    }

    fn select_contents(&self, surface: &DomSurface) -> Result<(), TierFailure> {
        match surface {
            DomSurface::Container(container) => {
                let range = self.document.create_range().map_err(rejected)?;
                range.select_node_contents(container).map_err(rejected)?;
                let selection = self
                    .window
                    .get_selection()
                    .map_err(rejected)?
                    .ok_or(TierFailure::Unavailable("window.getSelection"))?;
                selection.remove_all_ranges().map_err(rejected)?;
                selection.add_range(&range).map_err(rejected)?;
            }
            DomSurface::Input(input) => input.select(),
        }
        Ok(())
    }

    fn exec_copy(&self) -> Result<bool, TierFailure> {
        self.document.exec_command("copy").map_err(rejected)
    }

    fn release(&self, surface: DomSurface) {
        match surface {
            DomSurface::Container(container) => {
                if let Ok(Some(selection)) = self.window.get_selection() {
                    let _ = selection.remove_all_ranges();
                }
                container.remove();
            }
            DomSurface::Input(input) => input.remove(),
        }
    }
}
