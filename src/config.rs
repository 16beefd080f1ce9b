//! Client configuration
//!
//! Passed from JavaScript to `startFormatter`; every field has a default so
//! `startFormatter()` with no argument works against the stock page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notify::DismissWindows;
use crate::session::ResponseOrdering;

pub const DEFAULT_ENDPOINT: &str = "/sciencv/format";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("successDismissMs ({success}) must be shorter than errorDismissMs ({error})")]
    DismissOrder { success: u32, error: u32 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub endpoint: String,
    pub input_id: String,
    pub format_button_id: String,
    pub output_id: String,
    pub copy_button_id: String,
    pub loading_id: String,
    pub error_dismiss_ms: u32,
    pub success_dismiss_ms: u32,
    pub copied_feedback_ms: u32,
    pub response_ordering: ResponseOrdering,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let windows = DismissWindows::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            input_id: "markdown-input".to_string(),
            format_button_id: "format-btn".to_string(),
            output_id: "formatted-output".to_string(),
            copy_button_id: "copy-btn".to_string(),
            loading_id: "loading".to_string(),
            error_dismiss_ms: windows.error_ms,
            success_dismiss_ms: windows.success_ms,
            copied_feedback_ms: 2000,
            response_ordering: ResponseOrdering::default(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("endpoint", &self.endpoint),
            ("inputId", &self.input_id),
            ("formatButtonId", &self.format_button_id),
            ("outputId", &self.output_id),
            ("copyButtonId", &self.copy_button_id),
            ("loadingId", &self.loading_id),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::EmptyField(*name));
        }

        if self.success_dismiss_ms >= self.error_dismiss_ms {
            return Err(ConfigError::DismissOrder {
                success: self.success_dismiss_ms,
                error: self.error_dismiss_ms,
            });
        }
        Ok(())
    }

    pub fn dismiss_windows(&self) -> DismissWindows {
        DismissWindows {
            error_ms: self.error_dismiss_ms,
            success_ms: self.success_dismiss_ms,
        }
    }
}
