//! Size-rolling file sink
//!
//! Writes go to `{base}{year}{month}{day}{hour}{minute}{second}-{counter}.log`
//! (local time). Before each write the sink checks whether the current file
//! has reached `max_bytes`; if so it closes it and opens a fresh one, so a
//! file can exceed the limit by at most one write.

use super::file::open_append;
use crate::core::{LoggerError, Result, Sink};
use chrono::{Datelike, Local, Timelike};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// File sink that starts a new file once `max_bytes` have been written
///
/// # Examples
///
/// ```no_run
/// use bufferlog::sinks::RollingFileSink;
///
/// // ./logs/app-20251019142501-0.log, ./logs/app-20251019142503-1.log, ...
/// let sink = RollingFileSink::new("./logs/app-", 10 * 1024 * 1024)
///     .unwrap()
///     .with_compression(true);
/// ```
pub struct RollingFileSink {
    base: PathBuf,
    max_bytes: u64,
    current_size: u64,
    /// Counter for the next file name; only ever increases
    counter: u64,
    current_path: PathBuf,
    writer: BufWriter<File>,
    compress: bool,
}

impl RollingFileSink {
    /// Create the sink and open its first file
    ///
    /// # Errors
    ///
    /// Returns an error if `max_bytes` is zero or the first file (or its
    /// directory) cannot be created.
    pub fn new(base: impl Into<PathBuf>, max_bytes: u64) -> Result<Self> {
        if max_bytes == 0 {
            return Err(LoggerError::config(
                "RollingFileSink",
                "max_bytes must be greater than zero",
            ));
        }

        let base = base.into();
        let current_path = file_name(&base, 0);
        let file = open_append(&current_path)?;

        Ok(Self {
            base,
            max_bytes,
            current_size: 0,
            counter: 1,
            current_path,
            writer: BufWriter::new(file),
            compress: false,
        })
    }

    /// Gzip each file once it has been rolled over
    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Close the current file and continue in a newly named one
    fn roll(&mut self) -> Result<()> {
        let next_path = file_name(&self.base, self.counter);
        self.counter += 1;

        let file = open_append(&next_path).map_err(|e| {
            LoggerError::file_rotation(
                next_path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;

        self.writer.flush().map_err(|e| {
            LoggerError::file_rotation(
                self.current_path.display().to_string(),
                format!("Failed to flush before rotation: {}", e),
            )
        })?;

        let finished = std::mem::replace(&mut self.current_path, next_path);
        // Dropping the old writer closes the finished file
        self.writer = BufWriter::new(file);
        self.current_size = 0;

        if self.compress {
            compress_file(&finished)?;
        }
        Ok(())
    }
}

impl Sink for RollingFileSink {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let rolled = if self.current_size >= self.max_bytes {
            self.roll()
        } else {
            Ok(())
        };

        // A failed roll keeps the old file so the record is not lost
        self.writer.write_all(bytes).map_err(|e| {
            LoggerError::file_sink(
                self.current_path.display().to_string(),
                format!("Failed to write log data: {}", e),
            )
        })?;
        self.current_size += bytes.len() as u64;

        rolled
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| {
            LoggerError::file_sink(
                self.current_path.display().to_string(),
                format!("Failed to flush: {}", e),
            )
        })
    }

    fn name(&self) -> &str {
        "rolling_file"
    }
}

impl Drop for RollingFileSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// `{base}{Y}{M}{D}{h}{m}{s}-{counter}.log` in local time
fn file_name(base: &Path, counter: u64) -> PathBuf {
    let now = Local::now();
    let mut name: OsString = base.as_os_str().to_owned();
    name.push(format!(
        "{}{}{}{}{}{}-{}.log",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        counter
    ));
    PathBuf::from(name)
}

/// Gzip `path` into `path.gz`, removing the original only after success
///
/// Streams through a temporary file so a failure never leaves a truncated
/// archive in place of the log.
fn compress_file(path: &Path) -> Result<()> {
    let mut gz_name = path.as_os_str().to_owned();
    gz_name.push(".gz");
    let gz_path = PathBuf::from(gz_name);
    let mut tmp_name = gz_path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let temp_gz_path = PathBuf::from(tmp_name);

    let compress_err = |message: String, e: std::io::Error| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation("compress log file", message, e)
    };

    let input = File::open(path).map_err(|e| {
        compress_err(format!("Failed to open file for compression: {}", path.display()), e)
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        compress_err(
            format!("Failed to create temporary compressed file: {}", temp_gz_path.display()),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let mut chunk = vec![0u8; 64 * 1024];
    loop {
        let read = reader.read(&mut chunk).map_err(|e| {
            compress_err(format!("Failed to read from file: {}", path.display()), e)
        })?;
        if read == 0 {
            break;
        }
        encoder
            .write_all(&chunk[..read])
            .map_err(|e| compress_err("Failed to compress data chunk".to_string(), e))?;
    }

    let mut buffered = encoder
        .finish()
        .map_err(|e| compress_err("Failed to finish compression".to_string(), e))?;
    buffered
        .flush()
        .map_err(|e| compress_err("Failed to flush compressed file".to_string(), e))?;
    drop(buffered);

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        compress_err(
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }
    Ok(())
}
