//! Error types for session management and configuration

use std::path::PathBuf;

use thiserror::Error;

use crate::host::SessionHandle;

/// Misuse of the session lifecycle by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `start_session` called while another session is still live
    #[error("session {0} is already active; tear it down before starting another")]
    AlreadyActive(SessionHandle),
    /// Handle is unknown or was torn down
    #[error("invalid session {0}")]
    InvalidSession(SessionHandle),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
