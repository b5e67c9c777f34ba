use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum DsxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Input not found: {0}")]
    InputNotFound(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DsxError {
    pub fn capture(message: impl Into<String>) -> Self {
        DsxError::Capture(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        DsxError::Config(message.into())
    }

    /// Convert to the structured payload written on the error stream.
    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            DsxError::Io(e) => ErrorPayload::new(e.to_string(), "Check file paths/permissions."),
            DsxError::Image(e) => ErrorPayload::new(
                e.to_string(),
                "Verify image path/format and readability (png, jpg, webp, gif).",
            ),
            DsxError::Serialization(e) => ErrorPayload::new(
                e.to_string(),
                "Check JSON inputs; region files must be a JSON array of {name, bounds} objects.",
            ),
            DsxError::InvalidUrl(e) => ErrorPayload::new(
                e.to_string(),
                "Verify URL format (e.g., http://localhost:3000).",
            ),
            DsxError::InputNotFound(path) => ErrorPayload::new(
                format!("Input not found: {}", path),
                "Verify the file exists; use an absolute path or run from the working directory.",
            ),
            DsxError::Capture(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("cannot find module 'playwright'")
                    || lower.contains("playwright npm package is missing")
                {
                    ErrorPayload::new(
                        msg.to_string(),
                        "Install Playwright (`npm install playwright` and `npx playwright install chromium`).",
                    )
                } else if lower.contains("not found on path") || lower.contains("node command") {
                    ErrorPayload::new(
                        msg.to_string(),
                        "Install Node.js and ensure the node binary is on PATH.",
                    )
                } else if lower.contains("timeout") || lower.contains("timed out") {
                    ErrorPayload::new(
                        msg.to_string(),
                        "Try increasing --nav-timeout/--process-timeout or a longer --wait.",
                    )
                } else if lower.contains("selector not found") {
                    ErrorPayload::new(
                        msg.to_string(),
                        "Check the --selector value against the rendered page.",
                    )
                } else {
                    ErrorPayload::new(msg.to_string(), "Re-run with --verbose for details.")
                }
            }
            DsxError::Config(msg) => ErrorPayload::new(
                msg.to_string(),
                "Check flags/paths (e.g., --viewport WIDTHxHEIGHT) and the config file.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, DsxError>;

/// Structured error payload emitted as `{success: false, error, remediation}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(error: String, remediation: impl Into<String>) -> Self {
        Self {
            success: false,
            error,
            remediation: Some(remediation.into()),
        }
    }
}
