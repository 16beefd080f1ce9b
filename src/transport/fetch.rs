//! `window.fetch` backend

use futures::future::LocalBoxFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::HttpBackend;
use crate::api::helpers::js_error_message;

/// Posts through the browser's fetch API
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchBackend;

impl HttpBackend for FetchBackend {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, Result<String, String>> {
        Box::pin(async move { post(url, &body).await.map_err(|e| js_error_message(&e)) })
    }
}

async fn post(url: &str, body: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &init)?;
    request.headers().set("Content-Type", "application/json")?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    // The service reports its own errors in the body, so the status is not checked
    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}
