//! Utility modules for the formatter client

pub mod html_text;

pub use html_text::strip_tags;
