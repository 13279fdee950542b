use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostPickError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Backend channel closed")]
    ChannelClosed,
}

impl From<serde_json::Error> for HostPickError {
    fn from(err: serde_json::Error) -> Self {
        HostPickError::Protocol(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HostPickError>;
