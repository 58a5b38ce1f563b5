use std::path::PathBuf;

use thiserror::Error;

use crate::{config::EnvError, severity::Severity};

/// Errors raised while setting up a logger.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to open log file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "log level must be between {} and {}, got {value}",
        Severity::MIN as u8,
        Severity::MAX as u8
    )]
    InvalidLevel { value: i64 },

    #[error(transparent)]
    Env(#[from] EnvError),
}
