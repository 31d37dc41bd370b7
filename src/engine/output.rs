//! engine::output
//!
//! Locked output files for the generated headers.
//!
//! # Architecture
//!
//! Each header is opened once, before the first schema line is read, and
//! stays open until the run ends. While open it holds an exclusive OS-level
//! lock (via `fs2`), so two build steps regenerating the same header cannot
//! interleave their writes.
//!
//! # Invariants
//!
//! - The file is truncated only after the lock is held
//! - Lock acquisition is non-blocking (fails fast if locked)
//! - Lock is released on drop (RAII pattern)
//! - Writes are buffered; the compiler flushes before returning, including
//!   after a syntax error

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from opening an output header.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Another process is writing this header.
    #[error("'{0}' is locked by another makedmt process")]
    AlreadyLocked(PathBuf),

    /// Failed to create the file or its directory.
    #[error("failed to create '{path}': {source}")]
    CreateFailed { path: PathBuf, source: io::Error },

    /// Failed to acquire the OS lock.
    #[error("failed to lock '{path}': {source}")]
    LockFailed { path: PathBuf, source: io::Error },
}

/// A generated header open for writing under an exclusive lock.
#[derive(Debug)]
pub struct HeaderFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl HeaderFile {
    /// Create (or truncate) the header at `path` and lock it.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// - [`OutputError::AlreadyLocked`] if another process holds the lock
    /// - [`OutputError::CreateFailed`] if the file cannot be created
    /// - [`OutputError::LockFailed`] if the OS lock cannot be acquired
    pub fn create(path: &Path) -> Result<Self, OutputError> {
        let create_failed = |source| OutputError::CreateFailed {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(create_failed)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(create_failed)?;

        match file.try_lock_exclusive() {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                return Err(OutputError::AlreadyLocked(path.to_path_buf()));
            }
            Err(source) => {
                return Err(OutputError::LockFailed {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        file.set_len(0).map_err(create_failed)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Get the path of the header.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for HeaderFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for HeaderFile {
    fn drop(&mut self) {
        // Best-effort flush and release; errors were already surfaced by
        // the compiler's explicit flush.
        let _ = self.writer.flush();
        let _ = self.writer.get_ref().unlock();
    }
}
