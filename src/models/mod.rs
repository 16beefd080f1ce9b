//! Data model for the formatter client
//!
//! Format request/response payloads, the rendered output with its clipboard
//! payload, and per-channel notification state.

pub mod format;
pub mod notification;
pub mod output;

pub use format::{FormatRequest, FormatResponse};
pub use notification::{Channel, DismissTicket, NotificationState};
pub use output::{ClipboardPayload, RenderedOutput, NO_CONTENT_HTML};
