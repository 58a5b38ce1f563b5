//! # daylog-core
//! Core of daylog - daily rotating file loggers with console mirroring.

mod clock;
mod config;
mod error;
mod log_rotation;
mod log_writer;
mod severity;
mod utils;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DAYLOG_CONFIG, DaylogConfig, EnvError, daylog_config, validate_time_format};
pub use error::Error;
pub use log_rotation::{RotatingFileLogger, RotatingLoggerBuilder};
pub use log_writer::{LogFile, LogStdout, LogWriter, dated_path};
pub use severity::{Severity, Tag};
pub use utils::{Location, LogRecord};
