//! Rendered output and the clipboard payload derived from it

use crate::models::FormatResponse;
use crate::utils::strip_tags;

/// Markup shown when a format succeeded but produced nothing
pub const NO_CONTENT_HTML: &str = r#"<p class="placeholder">No content to display</p>"#;

/// What the output region currently shows
///
/// Replaced wholesale on every applied format response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RenderedOutput {
    /// Nothing formatted yet; the page's own placeholder is showing
    #[default]
    Placeholder,
    /// The service answered with blank html
    NoContent,
    /// Formatted html from the service
    Html(String),
}

impl RenderedOutput {
    pub fn from_response(response: FormatResponse) -> Self {
        if response.is_blank() {
            RenderedOutput::NoContent
        } else {
            RenderedOutput::Html(response.html)
        }
    }

    /// True when there is formatted content worth copying
    pub fn has_content(&self) -> bool {
        matches!(self, RenderedOutput::Html(_))
    }

    /// Markup to place in the output region
    pub fn display_html(&self) -> &str {
        match self {
            RenderedOutput::Html(html) => html,
            RenderedOutput::Placeholder | RenderedOutput::NoContent => NO_CONTENT_HTML,
        }
    }

    /// Both clipboard representations of the current content, if any
    pub fn clipboard_payload(&self) -> Option<ClipboardPayload> {
        match self {
            RenderedOutput::Html(html) => Some(ClipboardPayload::from_html(html)),
            _ => None,
        }
    }
}

/// The html and plain-text representations written to the clipboard together
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub html: String,
    pub text: String,
}

impl ClipboardPayload {
    /// Derive the plain text from the html so both describe the same content
    pub fn from_html(html: &str) -> Self {
        Self {
            html: html.to_string(),
            text: strip_tags(html),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.html.trim().is_empty()
    }
}
