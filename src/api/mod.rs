//! Formatter WASM API
//!
//! The JavaScript-facing surface: `startFormatter` wires the page to a
//! [`SessionController`](crate::session::SessionController) and returns a
//! [`FormatterHandle`].
//!
//! - `helpers`: config deserialization and boundary error conversions
//! - `client`: DOM view, event wiring and the exported handle

pub mod client;
pub mod helpers;

pub use client::{start_formatter, FormatterHandle};
