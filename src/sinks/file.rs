//! File sink implementation

use crate::core::{Level, LoggerError, Result, Sink, TimestampFormat};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends each line to a file through a buffered writer
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    timestamp_format: Option<TimestampFormat>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::sink("file", format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
            timestamp_format: None,
        })
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_logger_pipeline::sinks::FileSink;
    /// use rust_logger_pipeline::TimestampFormat;
    ///
    /// let sink = FileSink::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp(Some(TimestampFormat::Rfc3339));
    /// ```
    #[must_use]
    pub fn with_timestamp(mut self, format: Option<TimestampFormat>) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close the file; later writes fail
    pub fn close(&self) -> Result<()> {
        match self.writer.lock().take() {
            Some(mut writer) => Ok(writer.flush()?),
            None => Ok(()),
        }
    }
}

impl Sink for FileSink {
    fn write_line(&self, _level: Level, line: &str) -> Result<()> {
        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::sink("file", "File writer not initialized"))?;

        match &self.timestamp_format {
            Some(ts) => writeln!(writer, "{} {}", ts.format_now(), line)?,
            None => writeln!(writer, "{}", line)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush file sink '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}
