//! Payloads exchanged with the formatting service

use serde::{Deserialize, Serialize};

/// Body of a format request: the trimmed, non-empty input text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FormatRequest {
    pub text: String,
}

impl FormatRequest {
    /// Build a request from raw user input.
    ///
    /// Surrounding whitespace is trimmed; returns `None` when nothing remains.
    pub fn from_input(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self {
                text: text.to_string(),
            })
        }
    }
}

/// A successful format: the service's HTML, verbatim
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatResponse {
    pub html: String,
}

impl FormatResponse {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// True when the service produced no content (blank html)
    pub fn is_blank(&self) -> bool {
        self.html.trim().is_empty()
    }
}
