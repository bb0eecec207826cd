//! Marker store: the persisted on/off state of every toggle.
//!
//! A toggle is enabled exactly when a marker with its identifier exists.
//! [`FsMarkerStore`] keeps one empty file per enabled toggle under the
//! configuration root; [`MemoryMarkerStore`] keeps the same facts in memory
//! for tests and previews.
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;
use crate::operations::FileSystemOps;

/// File created and removed by [`FsMarkerStore::init`] to prove the
/// configuration root accepts writes.
const WRITE_PROBE: &str = ".write-probe";

/// Durable record of which toggles are enabled.
pub trait MarkerStore: Send + Sync + std::fmt::Debug {
    /// Create the backing location if needed and check that it is writable.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be created or written to.
    fn init(&self) -> Result<(), StoreError>;

    /// Whether a marker for `id` is present.
    ///
    /// # Errors
    ///
    /// Returns an error if presence cannot be determined.
    fn exists(&self, id: &str) -> Result<bool, StoreError>;

    /// Create the marker for `id`. Succeeds when it is already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be written.
    fn set(&self, id: &str) -> Result<(), StoreError>;

    /// Remove the marker for `id`. Succeeds when it is already absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be removed.
    fn clear(&self, id: &str) -> Result<(), StoreError>;
}

/// One empty file per enabled toggle under a configuration root.
#[derive(Debug, Clone)]
pub struct FsMarkerStore {
    root: PathBuf,
    fs: Arc<dyn FileSystemOps>,
}

impl FsMarkerStore {
    /// Create a store rooted at `root`. Nothing is touched until [`init`](MarkerStore::init).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, fs: Arc<dyn FileSystemOps>) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    /// The configuration root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the marker file for `id`.
    #[must_use]
    pub fn marker_path(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }
}

impl MarkerStore for FsMarkerStore {
    fn init(&self) -> Result<(), StoreError> {
        self.fs
            .create_dir_all(&self.root)
            .map_err(|source| StoreError::CreateRoot {
                path: self.root.clone(),
                source,
            })?;

        let probe = self.root.join(WRITE_PROBE);
        self.fs
            .touch(&probe)
            .and_then(|()| self.fs.remove_file(&probe))
            .map_err(|source| StoreError::NotWritable {
                path: self.root.clone(),
                source,
            })
    }

    fn exists(&self, id: &str) -> Result<bool, StoreError> {
        self.fs
            .try_exists(&self.marker_path(id))
            .map_err(|source| StoreError::Read {
                id: id.to_string(),
                source,
            })
    }

    fn set(&self, id: &str) -> Result<(), StoreError> {
        self.fs
            .touch(&self.marker_path(id))
            .map_err(|source| StoreError::Write {
                id: id.to_string(),
                source,
            })
    }

    fn clear(&self, id: &str) -> Result<(), StoreError> {
        match self.fs.remove_file(&self.marker_path(id)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(StoreError::Remove {
                id: id.to_string(),
                source: e,
            }),
            _ => Ok(()),
        }
    }
}

/// In-memory [`MarkerStore`].
///
/// [`failing_writes`](Self::failing_writes) makes `set` and `clear` fail so
/// callers can exercise the storage-failure path.
#[derive(Debug, Default)]
pub struct MemoryMarkerStore {
    markers: Mutex<BTreeSet<String>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryMarkerStore {
    /// An empty store: every toggle disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with the given markers already present.
    #[must_use]
    pub fn with_markers<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let store = Self::new();
        store.lock().extend(ids.into_iter().map(String::from));
        store
    }

    /// Make `exists` fail.
    #[must_use]
    pub const fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make `set` and `clear` fail.
    #[must_use]
    pub const fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Identifiers of all present markers, sorted.
    #[must_use]
    pub fn markers(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.markers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn unavailable() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "marker store unavailable")
    }
}

impl MarkerStore for MemoryMarkerStore {
    fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn exists(&self, id: &str) -> Result<bool, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Read {
                id: id.to_string(),
                source: Self::unavailable(),
            });
        }
        Ok(self.lock().contains(id))
    }

    fn set(&self, id: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write {
                id: id.to_string(),
                source: Self::unavailable(),
            });
        }
        self.lock().insert(id.to_string());
        Ok(())
    }

    fn clear(&self, id: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Remove {
                id: id.to_string(),
                source: Self::unavailable(),
            });
        }
        self.lock().remove(id);
        Ok(())
    }
}
