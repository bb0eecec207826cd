//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so the marker store and toggle
//! actions can be unit-tested without touching the real filesystem.
//! Production code uses [`SystemFileSystemOps`]; tests use
//! `MockFileSystemOps`.

use std::io;
use std::path::Path;

/// Abstraction over the filesystem calls made by the marker store and
/// toggle actions.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `Ok(true)` if `path` exists.
    ///
    /// A missing parent directory is reported as `Ok(false)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if existence cannot be determined (e.g. permissions).
    fn try_exists(&self, path: &Path) -> io::Result<bool>;

    /// Create `path` and all missing parents. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create an empty file at `path`, leaving an existing file untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    fn touch(&self, path: &Path) -> io::Result<()>;

    /// Remove the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails, including when the file is absent.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Recursively remove the directory tree at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails, including when the tree is absent.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn try_exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn touch(&self, path: &Path) -> io::Result<()> {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(drop)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// Keeps an in-memory set of files and directories.  Use
/// [`failing_writes`](Self::failing_writes) to make every mutating call fail
/// with `PermissionDenied`.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    entries: std::sync::Mutex<std::collections::BTreeSet<std::path::PathBuf>>,
    removed_trees: std::sync::Mutex<Vec<std::path::PathBuf>>,
    fail_writes: bool,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as existing.
    #[must_use]
    pub fn with_existing(self, path: impl Into<std::path::PathBuf>) -> Self {
        self.lock_entries().insert(path.into());
        self
    }

    /// Make every mutating call fail.
    #[must_use]
    pub const fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Directory trees passed to [`FileSystemOps::remove_dir_all`], in order.
    pub fn removed_trees(&self) -> Vec<std::path::PathBuf> {
        self.removed_trees
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn lock_entries(
        &self,
    ) -> std::sync::MutexGuard<'_, std::collections::BTreeSet<std::path::PathBuf>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check_writable(&self) -> io::Result<()> {
        if self.fail_writes {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn try_exists(&self, path: &Path) -> io::Result<bool> {
        Ok(self.lock_entries().contains(path))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check_writable()?;
        let mut entries = self.lock_entries();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                entries.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn touch(&self, path: &Path) -> io::Result<()> {
        self.check_writable()?;
        self.lock_entries().insert(path.to_path_buf());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.check_writable()?;
        if self.lock_entries().remove(path) {
            Ok(())
        } else {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check_writable()?;
        let mut entries = self.lock_entries();
        if !entries.contains(path) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        entries.retain(|p| !p.starts_with(path));
        drop(entries);
        self.removed_trees
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(path.to_path_buf());
        Ok(())
    }
}
