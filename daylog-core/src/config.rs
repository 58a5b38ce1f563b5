use std::{fmt::Write, sync::LazyLock};

use chrono::{
    NaiveDate,
    format::{Item, StrftimeItems},
};
use derive_from_env::FromEnv;
use thiserror::Error;

const DEFAULT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

#[derive(FromEnv)]
#[from_env(prefix = "DAYLOG")]
#[allow(non_snake_case)]
pub struct DaylogConfig {
    /// chrono format string for the timestamp of every line.
    #[from_env(default = "%Y/%m/%d %H:%M:%S%.6f")]
    pub TIME_FORMAT: String,
    /// Colorize the level tag of console lines.
    #[from_env(default = "true")]
    pub COLOR: bool,
}

/// A `DAYLOG_*` variable that cannot be used.
#[derive(Debug, Clone, Error)]
pub enum EnvError {
    #[error("invalid DAYLOG_* environment variable: {0}")]
    Var(String),
    #[error("invalid DAYLOG_TIME_FORMAT {0:?}")]
    TimeFormat(String),
}

/// Read once from the environment. Loggers refuse to build when it is an error.
pub static DAYLOG_CONFIG: LazyLock<Result<DaylogConfig, EnvError>> = LazyLock::new(|| {
    let config = DaylogConfig::from_env().map_err(|e| EnvError::Var(format!("{e:?}")))?;
    validate_time_format(&config.TIME_FORMAT)?;
    Ok(config)
});

static FALLBACK: LazyLock<DaylogConfig> = LazyLock::new(|| DaylogConfig {
    TIME_FORMAT: DEFAULT_TIME_FORMAT.into(),
    COLOR: true,
});

pub fn daylog_config() -> Result<&'static DaylogConfig, EnvError> {
    DAYLOG_CONFIG.as_ref().map_err(Clone::clone)
}

/// The environment settings, or the defaults when they are invalid.
pub(crate) fn settings() -> &'static DaylogConfig {
    DAYLOG_CONFIG.as_ref().unwrap_or(&*FALLBACK)
}

/// Rejects unknown specifiers, and specifiers a local timestamp cannot fill (`%z`).
pub fn validate_time_format(format: &str) -> Result<(), EnvError> {
    let invalid = || EnvError::TimeFormat(format.to_owned());
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
    write!(String::new(), "{}", sample.format(format)).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_time_format_is_valid() {
        assert!(validate_time_format(DEFAULT_TIME_FORMAT).is_ok());
        assert!(validate_time_format("%Y-%m-%dT%H:%M:%S").is_ok());
    }

    #[test]
    fn test_unknown_specifier_is_rejected() {
        assert!(matches!(
            validate_time_format("%Q"),
            Err(EnvError::TimeFormat(f)) if f == "%Q"
        ));
    }

    #[test]
    fn test_offset_specifier_is_rejected() {
        assert!(validate_time_format("%H:%M %z").is_err());
    }
}
