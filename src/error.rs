use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceControlError>;

#[derive(Debug, Error)]
pub enum ServiceControlError {
    /// A required argument was missing or blank. Raised before any process is launched.
    #[error("{name} must not be empty")]
    InvalidArgument { name: &'static str },

    /// Failure from launching or waiting on the child, passed through untouched.
    #[error(transparent)]
    Process(#[from] io::Error),

    #[error("failed to load service settings from {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: SettingsSource,
    },
}

#[derive(Debug, Error)]
pub enum SettingsSource {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ServiceControlError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ServiceControlError::InvalidArgument { .. })
    }
}
