//! Output destinations
//!
//! A sink receives fully rendered lines. Writes are fire-and-forget: the
//! engine never learns whether a write succeeded, and failed writes are not
//! retried or buffered for replay. Ordering across concurrent callers is
//! whatever the underlying stream's locking provides.

use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::LoggerError;

/// Destination for rendered log lines.
pub trait LogSink: Send + Sync {
    /// Write one line (newline appended by the sink).
    fn write_line(&self, line: &str);
}

/// Standard output destination.
#[derive(Debug, Default)]
pub(crate) struct StdoutSink;

impl LogSink for StdoutSink {
    fn write_line(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

/// Append-mode file destination.
pub(crate) struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open the file in append mode, creating it and its parent directories
    /// if needed. Failures propagate; an engine is never constructed over a
    /// destination it could not open.
    pub(crate) fn open(path: &Path) -> Result<Self, LoggerError> {
        let open_error = |source: std::io::Error| LoggerError::OpenLogFile {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(open_error)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_error)?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock();
        let _ = writeln!(file, "{line}");
    }
}
