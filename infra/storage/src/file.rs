use crate::error::{StorageError, StorageErrorExt};
use crate::{KeyValueStore, validate_key};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

const TMP_MARKER: &str = ".jctmp.";

/// A [`KeyValueStore`] persisted as one JSON object on disk.
///
/// The whole document is cached in memory and rewritten on every mutation. Writes go to a
/// unique sibling temp file that is synced and then renamed over the target, so readers
/// only ever observe a complete document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
    tmp_counter: AtomicU64,
}

impl FileStore {
    /// Opens (or lazily creates) the store document at `path`.
    ///
    /// The parent directory is created if missing and stale temp files left by an
    /// interrupted write are removed. The document itself is only written on the first
    /// mutation.
    ///
    /// # Errors
    /// * [`StorageError::Io`] if the directory or document cannot be accessed.
    /// * [`StorageError::Corrupt`] if the existing document is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .context(format!("Failed to create store directory {}", parent.display()))?;
        }

        purge_tmp(&path);

        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .context(format!("Failed to parse store document {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StorageError::Io {
                    source: e,
                    context: Some(format!("Failed to read {}", path.display()).into()),
                });
            },
        };

        info!(path = %path.display(), keys = entries.len(), "Key-value store opened");

        Ok(Self { path, entries: Mutex::new(entries), tmp_counter: AtomicU64::new(0) })
    }

    /// The document location on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();

        if !apply(&mut next) {
            return Ok(());
        }

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(entries).context("Failed to encode store document")?;
        let temp = self.unique_tmp_path();

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&data).context("Write failed")?;
            file.sync_all().context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &self.path) {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                fs::remove_file(&self.path).context(format!(
                    "Failed to replace existing document: {}",
                    self.path.display()
                ))?;
                fs::rename(&temp, &self.path).context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.display(),
                    self.path.display()
                ))?;
            } else {
                let _ = fs::remove_file(&temp);
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Atomic swap failed: {}", self.path.display()).into()),
                });
            }
        }

        debug!(path = %self.path.display(), bytes = data.len(), "Store document written");
        Ok(())
    }

    fn unique_tmp_path(&self) -> PathBuf {
        let counter = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let file_name = self.path.file_name().and_then(|s| s.to_str()).unwrap_or("store");
        self.path.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.mutate(|entries| {
            entries.insert(key.to_owned(), value.to_owned()).as_deref() != Some(value)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|entries| entries.remove(key).is_some())
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.lock().contains_key(key))
    }
}

/// Removes temp siblings of `target` left behind by an interrupted write.
fn purge_tmp(target: &Path) {
    let Some(file_name) = target.file_name().and_then(|s| s.to_str()) else { return };
    let prefix = format!("{file_name}{TMP_MARKER}");
    let dir = target.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut removed = 0usize;
    for entry in entries.flatten() {
        let is_orphan = entry.file_name().to_str().is_some_and(|name| name.starts_with(&prefix));
        if !is_orphan {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => warn!(path = %entry.path().display(), error = %e, "Failed to remove temp file"),
        }
    }

    if removed > 0 {
        info!(removed, "Cleaned up temporary store files");
    }
}
