use thiserror::Error;

/// apptrack error types
#[derive(Error, Debug)]
pub enum AppTrackError {
    /// Usage access has not been granted
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Failed to parse JSON/JSONL
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl AppTrackError {
    /// True when the caller should send the user to grant usage access
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, AppTrackError::PermissionDenied(_))
    }
}

/// Result type alias for apptrack
pub type Result<T> = std::result::Result<T, AppTrackError>;
