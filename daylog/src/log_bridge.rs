use std::sync::atomic::{AtomicBool, Ordering};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use daylog_core::{Location, Severity};

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Forwards `log` records to the process-wide logger.
struct DaylogBridge;

impl Log for DaylogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        crate::threshold()
            .is_some_and(|threshold| Severity::from(metadata.level()).passes(threshold))
    }

    fn log(&self, record: &Record) {
        let location = Location::new(
            record.file().unwrap_or(record.target()),
            record.line().unwrap_or(0),
        );
        crate::emit(record.level().into(), location, record.args());
    }

    fn flush(&self) {
        crate::flush();
    }
}

/// Routes the `log` crate macros (`log::info!`, `log::error!`, ...) through daylog.
///
/// `Warn` maps to WARNING, `Debug` and `Trace` to DEBUG. Filtering follows the
/// threshold of the process-wide logger; records are dropped while it is closed.
pub fn init_log_bridge() -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(DaylogBridge))?;
    INSTALLED.store(true, Ordering::Release);
    sync_max_level(crate::threshold());
    Ok(())
}

/// Lets the `log` macros skip formatting of records the threshold would drop.
pub(crate) fn sync_max_level(threshold: Option<Severity>) {
    if INSTALLED.load(Ordering::Acquire) {
        log::set_max_level(threshold.map_or(LevelFilter::Off, Severity::level_filter));
    }
}
