use std::fmt;

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

use crate::error::Error;

/// Verbosity of a log call. A higher value is more verbose.
///
/// A threshold `T` lets through every severity whose value is `<= T`.
/// `Error` (and fatal calls, which have no severity of their own) are never filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    #[default]
    Error = 0,
    Warning = 1,
    Important = 2,
    Info = 3,
    Debug = 4,
}

impl Severity {
    pub const MIN: Severity = Severity::Error;
    pub const MAX: Severity = Severity::Debug;

    /// Whether a call at `self` passes the given threshold.
    pub fn passes(self, threshold: Severity) -> bool {
        self == Severity::Error || self <= threshold
    }

    /// The tag written on the line. `Important` and `Debug` share the `INFO` path.
    pub fn tag(self) -> Tag {
        match self {
            Severity::Error => Tag::Error,
            Severity::Warning => Tag::Warning,
            Severity::Important | Severity::Info | Severity::Debug => Tag::Info,
        }
    }

    /// The most verbose `log` level that can still produce output at this threshold.
    /// `log` has no IMPORTANT level, so nothing above `Warn` gets through it.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Severity::Error => LevelFilter::Error,
            Severity::Warning | Severity::Important => LevelFilter::Warn,
            Severity::Info => LevelFilter::Info,
            Severity::Debug => LevelFilter::Trace,
        }
    }
}

impl TryFrom<i64> for Severity {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Error> {
        match value {
            0 => Ok(Severity::Error),
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Important),
            3 => Ok(Severity::Info),
            4 => Ok(Severity::Debug),
            value => Err(Error::InvalidLevel { value }),
        }
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warning,
            Level::Info => Severity::Info,
            Level::Debug | Level::Trace => Severity::Debug,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Important => "IMPORTANT",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        };
        f.write_str(name)
    }
}

/// Label written on each line, one per write path of a rotating logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Fatal,
    Error,
    Warning,
    Info,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Fatal => "FATAL",
            Tag::Error => "ERROR",
            Tag::Warning => "WARN",
            Tag::Info => "INFO",
        }
    }

    pub fn colored(self) -> ColoredString {
        match self {
            Tag::Fatal => self.as_str().red().bold(),
            Tag::Error => self.as_str().red(),
            Tag::Warning => self.as_str().yellow(),
            Tag::Info => self.as_str().green(),
        }
    }

    /// Errors and fatals go to stderr when mirrored to the console.
    pub fn is_error(self) -> bool {
        matches!(self, Tag::Fatal | Tag::Error)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
