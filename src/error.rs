use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by rustspeaker operations.
#[derive(Debug, Error)]
pub enum SpeakerIdError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("malformed template '{label}': {reason}")]
    TemplateFormat { label: String, reason: String },

    #[error("unable to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template bundle error: {0}")]
    Bundle(String),
}

impl SpeakerIdError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SpeakerIdError::Io {
            path: path.into(),
            source,
        }
    }
}
