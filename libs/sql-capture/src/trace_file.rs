use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Append-only diagnostic trace of captured SQL and log lines.
///
/// Write failures never interrupt the query that produced the entry; they are
/// counted and can be read back with [`TraceFile::failed_writes`].
#[derive(Debug)]
pub struct TraceFile {
    path: PathBuf,
    file: Mutex<File>,
    failed_writes: AtomicU64,
}

impl TraceFile {
    /// Open `path` for appending, creating it and its parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
            failed_writes: AtomicU64::new(0),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `entry` followed by a newline.
    pub fn append(&self, entry: &str) {
        let mut file = self.file.lock();
        if writeln!(file, "{entry}").is_err() {
            self.failed_writes.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[must_use]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }
}
