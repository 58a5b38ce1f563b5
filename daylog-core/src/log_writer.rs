use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{error::Error, utils::LogRecord};

/// A sink receiving every record written through a logger.
///
/// Called concurrently from any number of threads, without a lock held.
pub trait LogWriter: Send + Sync {
    fn regular(&self, record: &LogRecord<'_>);
    fn flush(&self) {}
}

/// Console mirror: INFO and WARN lines to stdout, ERROR and FATAL lines to stderr.
#[derive(Default, Debug, Clone, Copy)]
pub struct LogStdout;

impl LogWriter for LogStdout {
    fn regular(&self, record: &LogRecord<'_>) {
        let line = record.format(true);
        if record.tag.is_error() {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{line}");
        } else {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

/// One day's log file, `<base>_<date>.log`, opened in append mode.
#[derive(Debug)]
pub struct LogFile {
    date: String,
    path: PathBuf,
    file: File,
}

impl LogFile {
    /// Opens (or creates) the file for `date`, creating parent directories as needed.
    pub fn open(base: &Path, date: &str) -> Result<Self, Error> {
        let path = dated_path(base, date);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| Error::OpenFile {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            date: date.to_owned(),
            path,
            file,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogWriter for LogFile {
    fn regular(&self, record: &LogRecord<'_>) {
        // One write per line: appends from concurrent writers never interleave mid-line.
        let mut line = record.format(false);
        line.push('\n');
        let _ = (&self.file).write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = (&self.file).flush();
    }
}

/// `<base>_<date>.log`, keeping any directory part of `base`.
pub fn dated_path(base: &Path, date: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!("_{date}.log"));
    PathBuf::from(name)
}
