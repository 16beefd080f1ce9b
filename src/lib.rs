//! SciENcv Markdown Formatter WASM Module
//!
//! Browser-side client for the SciENcv formatting service. It submits the
//! user's Markdown to the service, renders the returned html and copies that
//! html to the clipboard, falling back from a rich clipboard write to legacy
//! selection-based copies when the browser can't do better.

pub mod clipboard;
pub mod config;
pub mod models;
pub mod notify;
pub mod session;
pub mod transport;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod api;

// Re-export commonly used types
pub use clipboard::{ClipboardWriter, CopyError, CopyOutcome};
pub use config::ClientConfig;
pub use models::{Channel, ClipboardPayload, FormatRequest, FormatResponse, RenderedOutput};
pub use notify::NotificationPresenter;
pub use session::{SessionController, SessionError, SessionView};
pub use transport::{TransportClient, TransportError};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("SciENcv formatter WASM module initialized");
}
