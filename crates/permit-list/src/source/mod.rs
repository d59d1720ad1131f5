//! Access to the third-party form-management API that holds permit applications.

mod screendoor;

use std::future::Future;

use serde_json::Value;

pub use screendoor::ScreendoorClient;

/// Query parameters understood by the form response API.
///
/// `advanced_search` is the raw JSON filter; transports are responsible for URL-encoding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub per_page: usize,
    pub page: usize,
    pub label: Option<String>,
    pub advanced_search: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            per_page: 100,
            page: 1,
            label: None,
            advanced_search: None,
        }
    }
}

/// Source of raw form responses for a project.
///
/// Implementations return whatever JSON the API produced: an array of responses on
/// success, or the API's own error payload. Callers decide what a non-array means.
pub trait ResponseSource: Send + Sync {
    fn get_project_responses(
        &self,
        project_id: &str,
        params: &QueryParams,
        max_count: usize,
    ) -> impl Future<Output = Result<Value, SourceError>> + Send;
}

/// Failures talking to, or understanding, the form response API.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("form response request failed: {0}")]
    Transport(String),
    #[error("form response API returned HTTP {status}")]
    Status { status: u16, payload: Value },
    #[error("form response API returned an unexpected payload")]
    Payload { payload: Value },
}

impl SourceError {
    /// Body returned by the API, when there was one.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            SourceError::Transport(_) => None,
            SourceError::Status { payload, .. } | SourceError::Payload { payload } => Some(payload),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
