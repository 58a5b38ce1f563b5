use std::fmt;

use chrono::NaiveDateTime;

use crate::{config, severity::Tag};

/// Source position reported on a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> Location<'a> {
    pub fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// The location of the caller, following `#[track_caller]` frames.
    #[track_caller]
    pub fn caller() -> Location<'static> {
        std::panic::Location::caller().into()
    }
}

impl From<&'static std::panic::Location<'static>> for Location<'static> {
    fn from(location: &'static std::panic::Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A fully resolved log line, handed to every sink of a logger.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub tag: Tag,
    pub time: NaiveDateTime,
    pub location: Location<'a>,
    pub message: String,
}

impl LogRecord<'_> {
    /// `[time TAG file:line] message`, without a trailing newline.
    pub fn format(&self, colored: bool) -> String {
        let time = self.time.format(&config::settings().TIME_FORMAT);
        let Self {
            tag,
            location,
            message,
            ..
        } = self;
        if colored && config::settings().COLOR {
            format!("[{time} {} {location}] {message}", tag.colored())
        } else {
            format!("[{time} {tag} {location}] {message}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_plain_format() {
        let record = LogRecord {
            tag: Tag::Warning,
            time: NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_micro_opt(7, 5, 3, 42)
                .unwrap(),
            location: Location::new("src/main.rs", 12),
            message: "disk almost full".into(),
        };
        assert_eq!(
            record.format(false),
            "[2024/03/09 07:05:03.000042 WARN src/main.rs:12] disk almost full"
        );
    }

    #[test]
    fn test_caller_location_points_here() {
        let location = Location::caller();
        assert!(location.file.ends_with("utils.rs"));
        assert_eq!(location.line, line!() - 2);
    }
}
