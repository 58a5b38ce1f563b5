use std::{fmt::Display, sync::Arc};

use daylog_core::{
    Clock, Location, LogStdout, LogWriter, RotatingFileLogger, Severity, SystemClock, Tag,
};

use crate::{config::Config, error::Error};

const LOGS_SUFFIX: &str = "_logs";
const ERRORS_SUFFIX: &str = "_errors";

/// A default stream plus an optional error-only stream, filtered by a threshold.
///
/// Errors and fatals go to both streams; every other level goes to the default
/// stream only, and only when the threshold allows it.
pub struct Daylog {
    default: RotatingFileLogger,
    errors: Option<RotatingFileLogger>,
    threshold: Severity,
}

/// Builder for [`Daylog`].
pub struct DaylogBuilder {
    config: Config,
    console: Option<Box<dyn LogWriter>>,
    clock: Arc<dyn Clock>,
}

impl DaylogBuilder {
    /// Console writer used when the config asks for console mirroring.
    pub fn with_console<W: LogWriter + 'static>(self, writer: W) -> Self {
        Self {
            console: Some(Box::new(writer)),
            ..self
        }
    }
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    pub fn open(self) -> Result<Daylog, Error> {
        let Self {
            config,
            console,
            clock,
        } = self;
        let threshold = config.severity()?;
        let console = if config.stdout {
            Some(console.unwrap_or_else(|| Box::new(LogStdout)))
        } else {
            None
        };
        let (default, errors) = if config.file_path.is_empty() {
            let default = RotatingFileLogger::builder("")
                .maybe_with_console(console)
                .with_clock(clock)
                .build()?;
            (default, None)
        } else {
            let default = RotatingFileLogger::builder(format!("{}{LOGS_SUFFIX}", config.file_path))
                .maybe_with_console(console)
                .with_clock(Arc::clone(&clock))
                .build()?;
            let errors =
                RotatingFileLogger::builder(format!("{}{ERRORS_SUFFIX}", config.file_path))
                    .with_clock(clock)
                    .build()?;
            (default, Some(errors))
        };
        Ok(Daylog {
            default,
            errors,
            threshold,
        })
    }
}

impl Daylog {
    pub fn builder(config: &Config) -> DaylogBuilder {
        DaylogBuilder {
            config: config.clone(),
            console: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Validates `config` and opens today's files.
    pub fn open(config: &Config) -> Result<Self, Error> {
        Self::builder(config).open()
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity.passes(self.threshold)
    }

    pub fn default_logger(&self) -> &RotatingFileLogger {
        &self.default
    }

    pub fn error_logger(&self) -> Option<&RotatingFileLogger> {
        self.errors.as_ref()
    }

    #[track_caller]
    pub fn fatal(&self, message: impl Display) -> ! {
        self.emit_fatal(Location::caller(), &message)
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.emit(Severity::Error, Location::caller(), &message);
    }

    #[track_caller]
    pub fn warning(&self, message: impl Display) {
        self.emit(Severity::Warning, Location::caller(), &message);
    }

    #[track_caller]
    pub fn important(&self, message: impl Display) {
        self.emit(Severity::Important, Location::caller(), &message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.emit(Severity::Info, Location::caller(), &message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Display) {
        self.emit(Severity::Debug, Location::caller(), &message);
    }

    /// Routes one call at `severity`, attributed to `location`.
    pub fn emit(&self, severity: Severity, location: Location<'_>, message: &dyn Display) {
        if !self.enabled(severity) {
            return;
        }
        let tag = severity.tag();
        if tag == Tag::Error
            && let Some(errors) = &self.errors
        {
            errors.write(tag, location, message);
        }
        self.default.write(tag, location, message);
    }

    /// Writes to the error stream and the default stream, then exits with status 1.
    pub fn emit_fatal(&self, location: Location<'_>, message: &dyn Display) -> ! {
        if let Some(errors) = &self.errors {
            errors.write(Tag::Fatal, location, message);
            errors.flush();
        }
        self.default.write(Tag::Fatal, location, message);
        self.default.flush();
        std::process::exit(1)
    }

    pub fn flush(&self) {
        if let Some(errors) = &self.errors {
            errors.flush();
        }
        self.default.flush();
    }

    /// Releases every stream. Later calls are dropped.
    pub fn close(&self) {
        if let Some(errors) = &self.errors {
            errors.close();
        }
        self.default.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daylog_core::{LogRecord, ManualClock};
    use std::{
        fs,
        path::{Path, PathBuf},
        sync::Mutex,
    };

    const TODAY: &str = "20240517";

    fn test_dir(name: &str) -> PathBuf {
        PathBuf::from(format!(
            "/tmp/daylog_test_facade_{name}_{}",
            uuid::Uuid::new_v4()
        ))
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()))
    }

    fn open(dir: &Path, level: Severity) -> Daylog {
        let config = Config::new(dir.join("svc").to_string_lossy(), level, false);
        Daylog::builder(&config).with_clock(clock()).open().unwrap()
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    fn logs(dir: &Path) -> String {
        read(dir.join(format!("svc_logs_{TODAY}.log")))
    }

    fn errors(dir: &Path) -> String {
        read(dir.join(format!("svc_errors_{TODAY}.log")))
    }

    fn log_everything(daylog: &Daylog) {
        daylog.error("an error");
        daylog.warning("a warning");
        daylog.important("an important");
        daylog.info("an info");
        daylog.debug("a debug");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<String>>>);

    impl LogWriter for Captured {
        fn regular(&self, record: &LogRecord<'_>) {
            self.0.lock().unwrap().push(record.format(false));
        }
    }

    #[test]
    fn test_open_creates_both_streams() {
        let dir = test_dir("streams");
        let daylog = open(&dir, Severity::Info);
        assert_eq!(
            daylog.default_logger().current_path(),
            Some(dir.join(format!("svc_logs_{TODAY}.log")))
        );
        assert_eq!(
            daylog.error_logger().and_then(|l| l.current_path()),
            Some(dir.join(format!("svc_errors_{TODAY}.log")))
        );
        assert_eq!(daylog.threshold(), Severity::Info);
    }

    #[test]
    fn test_errors_are_written_to_both_streams() {
        let dir = test_dir("dual_write");
        let daylog = open(&dir, Severity::Debug);
        daylog.error(format_args!("code {}", 42));
        daylog.warning("only in the main stream");
        let logs = logs(&dir);
        let errors = errors(&dir);
        assert!(logs.contains("ERROR") && logs.contains("code 42"));
        assert!(errors.contains("ERROR") && errors.contains("code 42"));
        assert!(logs.contains("only in the main stream"));
        assert!(!errors.contains("only in the main stream"));
        assert_eq!(errors.lines().count(), 1);
    }

    #[test]
    fn test_error_threshold_only_writes_errors() {
        let dir = test_dir("threshold_error");
        let daylog = open(&dir, Severity::Error);
        log_everything(&daylog);
        let logs = logs(&dir);
        assert_eq!(logs.lines().count(), 1);
        assert!(logs.contains("an error"));
    }

    #[test]
    fn test_debug_threshold_writes_everything() {
        let dir = test_dir("threshold_debug");
        let daylog = open(&dir, Severity::Debug);
        log_everything(&daylog);
        let logs = logs(&dir);
        for message in ["an error", "a warning", "an important", "an info", "a debug"] {
            assert!(logs.contains(message), "missing {message}");
        }
        assert_eq!(logs.lines().count(), 5);
    }

    #[test]
    fn test_important_passes_where_info_does_not() {
        let dir = test_dir("threshold_important");
        let daylog = open(&dir, Severity::Important);
        log_everything(&daylog);
        let logs = logs(&dir);
        assert!(logs.contains("a warning"));
        assert!(logs.contains("an important"));
        assert!(!logs.contains("an info"));
        assert!(!logs.contains("a debug"));
        // Important shares the INFO write path.
        let important = logs.lines().find(|l| l.contains("an important")).unwrap();
        assert!(important.contains(" INFO "));
    }

    #[test]
    fn test_lines_point_at_the_caller() {
        let dir = test_dir("location");
        let daylog = open(&dir, Severity::Info);
        daylog.info("here");
        let expected = format!("{}:{}]", file!(), line!() - 1);
        assert!(logs(&dir).contains(&expected));
    }

    #[test]
    fn test_console_only_mode() {
        let dir = test_dir("console_only");
        fs::create_dir_all(&dir).unwrap();
        let captured = Captured::default();
        let daylog = Daylog::builder(&Config::console(Severity::Info))
            .with_console(captured.clone())
            .open()
            .unwrap();
        assert!(daylog.error_logger().is_none());
        assert!(!daylog.default_logger().uses_file());
        daylog.info("hello console");
        daylog.error("bad console");
        daylog.debug("filtered");
        let lines = captured.0.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO") && lines[0].contains("hello console"));
        assert!(lines[1].contains("ERROR"));
        assert!(fs::read_dir(&dir).unwrap().next().is_none());
    }

    #[test]
    fn test_console_writer_ignored_without_stdout() {
        let captured = Captured::default();
        let config = Config::new("", Severity::Debug, false);
        let daylog = Daylog::builder(&config)
            .with_console(captured.clone())
            .open()
            .unwrap();
        daylog.error("nowhere");
        assert!(captured.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_error_stream_never_mirrors() {
        let dir = test_dir("mirror");
        let captured = Captured::default();
        let config = Config::new(dir.join("svc").to_string_lossy(), Severity::Info, true);
        let daylog = Daylog::builder(&config)
            .with_clock(clock())
            .with_console(captured.clone())
            .open()
            .unwrap();
        daylog.error("once on the console");
        assert_eq!(captured.0.lock().unwrap().len(), 1);
        assert!(errors(&dir).contains("once on the console"));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        for level in [-1, 5] {
            let config = Config {
                level,
                ..Config::default()
            };
            assert!(matches!(
                Daylog::open(&config),
                Err(Error::Core(daylog_core::Error::InvalidLevel { .. }))
            ));
        }
        for level in [0, 4] {
            let config = Config {
                level,
                ..Config::default()
            };
            assert!(Daylog::open(&config).is_ok());
        }
    }

    #[test]
    fn test_close_releases_both_streams() {
        let dir = test_dir("close");
        let daylog = open(&dir, Severity::Info);
        daylog.error("before close");
        daylog.close();
        daylog.error("after close");
        daylog.close();
        assert!(daylog.default_logger().current_path().is_none());
        assert!(!logs(&dir).contains("after close"));
        assert!(!errors(&dir).contains("after close"));
    }
}
