//! Houston client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoustonError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Houston returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Houston API error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HoustonError {
    /// 認証エラーかどうか
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, HoustonError::Status { status: 401 | 403, .. })
    }
}

pub type Result<T> = std::result::Result<T, HoustonError>;
