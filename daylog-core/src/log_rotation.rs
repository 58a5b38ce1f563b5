use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, PoisonError, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{
    clock::{Clock, SystemClock},
    config::daylog_config,
    error::Error,
    log_writer::{LogFile, LogStdout, LogWriter},
    severity::Tag,
    utils::{Location, LogRecord},
};

/// A leveled logger writing to `<base>_<YYYYMMDD>.log`, switching to a new file
/// on the first write of each local calendar day.
///
/// An empty base path gives a console-only logger, which writes nothing unless
/// console mirroring is enabled.
pub struct RotatingFileLogger {
    base_path: Option<PathBuf>,
    console: Option<Box<dyn LogWriter>>,
    clock: Arc<dyn Clock>,
    current: RwLock<Option<Arc<LogFile>>>,
    rollover: Mutex<()>,
    closed: AtomicBool,
}

/// Builder for [`RotatingFileLogger`].
pub struct RotatingLoggerBuilder {
    base_path: PathBuf,
    console: Option<Box<dyn LogWriter>>,
    clock: Arc<dyn Clock>,
}

impl RotatingLoggerBuilder {
    /// Mirror every line to stdout/stderr.
    pub fn with_stdout(self, yes: bool) -> Self {
        Self {
            console: yes.then(|| Box::new(LogStdout) as Box<dyn LogWriter>),
            ..self
        }
    }
    /// Mirror every line to a custom console writer.
    pub fn with_console<W: LogWriter + 'static>(self, writer: W) -> Self {
        Self {
            console: Some(Box::new(writer)),
            ..self
        }
    }
    /// Maybe mirror to a custom console writer.
    pub fn maybe_with_console(self, writer: Option<Box<dyn LogWriter>>) -> Self {
        Self {
            console: writer,
            ..self
        }
    }
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    /// Opens today's file right away, so a bad path is reported here
    /// rather than on the first write. Invalid `DAYLOG_*` settings are reported too.
    pub fn build(self) -> Result<RotatingFileLogger, Error> {
        daylog_config()?;
        let Self {
            base_path,
            console,
            clock,
        } = self;
        let logger = RotatingFileLogger {
            base_path: (!base_path.as_os_str().is_empty()).then_some(base_path),
            console,
            clock,
            current: RwLock::new(None),
            rollover: Mutex::new(()),
            closed: AtomicBool::new(false),
        };
        logger.try_active_file()?;
        Ok(logger)
    }
}

impl RotatingFileLogger {
    pub fn builder<P: AsRef<Path>>(base_path: P) -> RotatingLoggerBuilder {
        RotatingLoggerBuilder {
            base_path: base_path.as_ref().to_path_buf(),
            console: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn new<P: AsRef<Path>>(base_path: P, stdout: bool) -> Result<Self, Error> {
        Self::builder(base_path).with_stdout(stdout).build()
    }

    pub fn uses_file(&self) -> bool {
        self.base_path.is_some()
    }

    /// Path of the file currently written to, if any.
    pub fn current_path(&self) -> Option<PathBuf> {
        self.read_current().map(|file| file.path().to_path_buf())
    }

    #[track_caller]
    pub fn fatal(&self, message: impl Display) -> ! {
        self.write(Tag::Fatal, Location::caller(), &message);
        self.flush();
        std::process::exit(1)
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.write(Tag::Error, Location::caller(), &message);
    }

    #[track_caller]
    pub fn warning(&self, message: impl Display) {
        self.write(Tag::Warning, Location::caller(), &message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.write(Tag::Info, Location::caller(), &message);
    }

    /// Writes one line attributed to `location`. Never terminates the process,
    /// even for [`Tag::Fatal`].
    ///
    /// # Panics
    /// When the file of a new day cannot be opened.
    pub fn write(&self, tag: Tag, location: Location<'_>, message: &dyn Display) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        let file = self.active_file();
        if file.is_none() && self.console.is_none() {
            return;
        }
        let record = LogRecord {
            tag,
            time: self.clock.now(),
            location,
            message: message.to_string(),
        };
        if let Some(file) = file {
            file.regular(&record);
        }
        if let Some(console) = &self.console {
            console.regular(&record);
        }
    }

    pub fn flush(&self) {
        if let Some(file) = self.read_current() {
            file.flush();
        }
        if let Some(console) = &self.console {
            console.flush();
        }
    }

    /// Releases the current file. Later writes are dropped. Calling it again is a no-op.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        let _guard = self.rollover.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = self.current.write().unwrap_or_else(PoisonError::into_inner).take() {
            file.flush();
        }
    }

    fn read_current(&self) -> Option<Arc<LogFile>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn active_file(&self) -> Option<Arc<LogFile>> {
        self.try_active_file()
            .unwrap_or_else(|e| panic!("daylog: log rollover failed: {e}"))
    }

    /// Rollover check: returns today's file, opening it first if the day changed.
    fn try_active_file(&self) -> Result<Option<Arc<LogFile>>, Error> {
        let Some(base) = &self.base_path else {
            return Ok(None);
        };
        let today = self.clock.today().format("%Y%m%d").to_string();
        if let Some(file) = self.read_current()
            && file.date() == today
        {
            return Ok(Some(file));
        }

        let _guard = self.rollover.lock().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have rolled over while we waited for the lock.
        // A writer that sampled the date just before midnight must not roll back.
        if let Some(file) = self.read_current()
            && file.date() >= today.as_str()
        {
            return Ok(Some(file));
        }
        if self.closed.load(Ordering::Acquire) {
            return Ok(None);
        }
        let fresh = Arc::new(LogFile::open(base, &today)?);
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Arc::clone(&fresh));
        // Writers still holding the previous file finish their line in it;
        // the handle closes when the last of them lets go.
        if let Some(previous) = previous {
            previous.flush();
        }
        Ok(Some(fresh))
    }
}

impl Drop for RotatingFileLogger {
    fn drop(&mut self) {
        self.close();
    }
}
