//! Error types surfaced by the blog core

use serde::Serialize;

/// Errors raised while reading posts from the content source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlogError {
    /// The record or page does not exist, or is invisible to the integration
    #[error("Not found: {0}")]
    NotFound(String),

    /// The record exists but the integration lacks permission
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The source could not be reached or rejected the credentials
    #[error("Notion connection failed: {0}")]
    Connection(String),

    /// Any other failure reported by the source, message kept verbatim
    #[error("{0}")]
    Source(String),
}

/// Coarse error classification for callers that branch on failure type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    Connection,
    Source,
}

impl BlogError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::NotFound(_) => ErrorKind::NotFound,
            BlogError::AccessDenied(_) => ErrorKind::AccessDenied,
            BlogError::Connection(_) => ErrorKind::Connection,
            BlogError::Source(_) => ErrorKind::Source,
        }
    }

    /// Map a Notion API error code to an error
    pub fn from_api_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            "object_not_found" => BlogError::NotFound(message),
            "unauthorized" | "restricted_resource" => BlogError::AccessDenied(message),
            _ => BlogError::Source(message),
        }
    }

    /// Help text shown next to the error in API responses
    pub fn help(&self) -> &'static str {
        match self {
            BlogError::NotFound(_) => {
                "Check that the ID is correct and the page is shared with your integration"
            }
            BlogError::AccessDenied(_) => {
                "Open the page in Notion, click 'Share' and invite your integration"
            }
            BlogError::Connection(_) => {
                "Verify your Notion secret and that the integration is active"
            }
            BlogError::Source(_) => "Please check your Notion setup",
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
