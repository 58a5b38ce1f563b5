//! # daylog
//! Leveled process-wide logger with daily file rotation and a dedicated error stream.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! daylog = "0.1.0"
//! ```
//!
//! ```rust
//! use daylog::{Config, Severity};
//!
//! daylog::open(&Config::new("/tmp/daylog_doc/app", Severity::Info, false))
//!     .expect("Unable to open log files");
//! daylog::info!("listening on port {}", 8080);
//! daylog::error!("upstream {} unreachable", "db-1"); // also written to the error file
//! daylog::debug!("not written, threshold is INFO");
//! daylog::close();
//! ```
//!
//! Files are named after the configured prefix and the local date:
//! `/tmp/daylog_doc/app_logs_<YYYYMMDD>.log` receives every level that passes the
//! threshold, `/tmp/daylog_doc/app_errors_<YYYYMMDD>.log` receives errors and fatals only.
//! A new pair of files is started on the first write of each day.
//!
//! ## Loading the configuration
//! ```rust,no_run
//! let config = daylog::Config::from_yaml_file("config/log.yaml")?;
//! daylog::open(&config)?;
//! # Ok::<(), daylog::Error>(())
//! ```
//!
//! ## Explicit logger
//! The process-wide functions wrap a [`Daylog`], which can also be used on its own.
//!
//! ```rust
//! use daylog::{Config, Daylog, Severity};
//!
//! let logger = Daylog::open(&Config::new("/tmp/daylog_doc/worker", Severity::Debug, false))
//!     .expect("Unable to open log files");
//! std::thread::scope(|s| {
//!     for i in 0..4 {
//!         let logger = &logger;
//!         s.spawn(move || logger.info(format_args!("hello from thread {i}")));
//!     }
//! });
//! ```

mod config;
mod error;
mod facade;
mod log_bridge;

use std::{
    fmt::Display,
    sync::{PoisonError, RwLock},
};

pub use config::{Config, read_json, read_yaml};
pub use daylog_core::{
    Clock, DAYLOG_CONFIG, EnvError, Location, LogRecord, LogStdout, LogWriter, ManualClock,
    RotatingFileLogger, Severity, SystemClock, Tag, daylog_config,
};
pub use error::Error;
pub use facade::{Daylog, DaylogBuilder};
pub use log_bridge::init_log_bridge;

/// The process-wide logger, set by [`open`] or [`install`].
static GLOBAL: RwLock<Option<Daylog>> = RwLock::new(None);

/// Opens the process-wide logger. Call once at startup, before logging.
///
/// An error means the process has no working log files; callers are expected to abort.
pub fn open(config: &Config) -> Result<(), Error> {
    install(Daylog::open(config)?);
    Ok(())
}

/// Makes `daylog` the process-wide logger, closing any previous one.
pub fn install(daylog: Daylog) {
    log_bridge::sync_max_level(Some(daylog.threshold()));
    let previous = GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(daylog);
    if let Some(previous) = previous {
        previous.close();
    }
}

/// Closes the process-wide logger. Does nothing if it was never opened.
pub fn close() {
    let current = GLOBAL.write().unwrap_or_else(PoisonError::into_inner).take();
    log_bridge::sync_max_level(None);
    if let Some(current) = current {
        current.close();
    }
}

pub fn is_open() -> bool {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Threshold of the process-wide logger, if open.
pub fn threshold() -> Option<Severity> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(Daylog::threshold)
}

/// Routes one call through the process-wide logger. Dropped if it is not open.
///
/// The message is rendered before the logger is borrowed, so a `Display` impl
/// may itself log, or even close the logger.
pub fn emit(severity: Severity, location: Location<'_>, message: &dyn Display) {
    if !threshold().is_some_and(|threshold| severity.passes(threshold)) {
        return;
    }
    let message = message.to_string();
    if let Some(daylog) = GLOBAL.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
        daylog.emit(severity, location, &message);
    }
}

pub fn flush() {
    if let Some(daylog) = GLOBAL.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
        daylog.flush();
    }
}

/// Logs and exits with status 1. Without an open logger the line goes to stderr.
#[track_caller]
pub fn fatal(message: impl Display) -> ! {
    let location = Location::caller();
    let message = message.to_string();
    if let Some(daylog) = GLOBAL.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
        daylog.emit_fatal(location, &message);
    }
    LogStdout.regular(&LogRecord {
        tag: Tag::Fatal,
        time: SystemClock.now(),
        location,
        message,
    });
    std::process::exit(1)
}

#[track_caller]
pub fn error(message: impl Display) {
    emit(Severity::Error, Location::caller(), &message);
}

#[track_caller]
pub fn warning(message: impl Display) {
    emit(Severity::Warning, Location::caller(), &message);
}

#[track_caller]
pub fn important(message: impl Display) {
    emit(Severity::Important, Location::caller(), &message);
}

#[track_caller]
pub fn info(message: impl Display) {
    emit(Severity::Info, Location::caller(), &message);
}

#[track_caller]
pub fn debug(message: impl Display) {
    emit(Severity::Debug, Location::caller(), &message);
}

/// Logs a formatted message at FATAL level and exits the process.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::fatal(::std::format_args!($($arg)+))
    };
}

/// Logs a formatted message to the default and error streams.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::error(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => {
        $crate::warning(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! important {
    ($($arg:tt)+) => {
        $crate::important(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::info(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::debug(::std::format_args!($($arg)+))
    };
}
