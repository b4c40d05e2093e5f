use thiserror::Error;

/// elevdesk 統一エラー型
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {message} (status: {status})")]
    Api { status: u16, message: String },

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid data source: {0}")]
    InvalidSource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session expired for '{0}'")]
    SessionExpired(String),

    #[error("Permission denied: role '{role}' cannot {permission}")]
    PermissionDenied { role: String, permission: String },
}

pub type Result<T> = std::result::Result<T, DeskError>;

impl DeskError {
    /// リトライ可能なエラーかどうか
    pub fn is_retryable(&self) -> bool {
        match self {
            DeskError::Http(e) => e.is_timeout() || e.is_connect(),
            DeskError::Api { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}
