use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] daylog_core::Error),

    #[error("unable to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to decode YAML config {}: {source}", path.display())]
    DecodeYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unable to decode JSON config {}: {source}", path.display())]
    DecodeJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
