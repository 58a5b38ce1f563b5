//! Logger configuration and the file loaders producing it.

use std::path::Path;

use daylog_core::Severity;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::Error;

/// Settings of the process-wide logger, usually read once at startup.
///
/// ```yaml
/// file_path: /var/log/myapp/server   # empty or missing: console only
/// level: 3                           # 0 (ERROR) ..= 4 (DEBUG)
/// stdout: true                       # mirror to the console
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix of the log files; `_logs_<date>.log` and `_errors_<date>.log` are appended.
    #[serde(alias = "file-path")]
    pub file_path: String,
    /// Raw threshold, validated by [`Config::severity`].
    pub level: i64,
    pub stdout: bool,
}

impl Config {
    pub fn new<S: Into<String>>(file_path: S, level: Severity, stdout: bool) -> Self {
        Self {
            file_path: file_path.into(),
            level: level as i64,
            stdout,
        }
    }

    /// Console-only configuration.
    pub fn console(level: Severity) -> Self {
        Self::new("", level, true)
    }

    pub fn severity(&self) -> Result<Severity, Error> {
        Ok(Severity::try_from(self.level)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        read_yaml(path)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        read_json(path)
    }
}

/// Decodes the YAML file at `path` into any deserializable type.
pub fn read_yaml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, Error> {
    let path = path.as_ref();
    let bytes = read(path)?;
    serde_yaml::from_slice(&bytes).map_err(|source| Error::DecodeYaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes the JSON file at `path` into any deserializable type.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, Error> {
    let path = path.as_ref();
    let bytes = read(path)?;
    serde_json::from_slice(&bytes).map_err(|source| Error::DecodeJson {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })
}
