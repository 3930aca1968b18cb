use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use super::files::atomic_write;
use crate::domain::AppState;

/// Errors from reading or writing the durable state document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document exists but could not be parsed.
    #[error("stored state is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable medium behind the store: one replaceable document.
///
/// The file implementation backs production; the in-memory one backs
/// tests. Absence of a prior document is a valid state, not an error.
pub trait Medium: Send + Sync {
    /// Read the whole document; `None` when nothing was ever written.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the whole document. Must be atomic from a reader's point
    /// of view.
    fn write(&self, content: &str) -> Result<(), StoreError>;
}

/// File-backed medium; writes go through temp-file-then-rename.
pub struct FileMedium {
    path: PathBuf,
}

impl FileMedium {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Medium for FileMedium {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn write(&self, content: &str) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        atomic_write(&self.path, content)?;
        Ok(())
    }
}

/// In-memory medium for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryMedium {
    content: Mutex<Option<String>>,
}

impl Medium for MemoryMedium {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.content.lock().unwrap_or_else(|p| p.into_inner()).clone())
    }

    fn write(&self, content: &str) -> Result<(), StoreError> {
        *self.content.lock().unwrap_or_else(|p| p.into_inner()) = Some(content.to_string());
        Ok(())
    }
}

/// Durable store owning the canonical [`AppState`].
///
/// Every mutation is one load-modify-save over the whole document. The
/// internal mutex is held across the full sequence so a later save cannot
/// silently overwrite an earlier one; there is no per-record locking and
/// no cached state between operations.
pub struct StateStore {
    medium: Box<dyn Medium>,
    write_lock: Mutex<()>,
}

impl StateStore {
    pub fn new(medium: Box<dyn Medium>) -> Self {
        Self {
            medium,
            write_lock: Mutex::new(()),
        }
    }

    /// Store backed by a file on disk.
    pub fn open(path: PathBuf) -> Self {
        Self::new(Box::new(FileMedium::new(path)))
    }

    /// Store backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryMedium::default()))
    }

    /// Load the current state. A missing document is the empty state.
    pub fn load(&self) -> Result<AppState, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        self.load_unlocked()
    }

    /// Persist the full state, replacing any prior content.
    pub fn save(&self, state: &AppState) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        self.save_unlocked(state)
    }

    /// Run one load-modify-save sequence under the process-wide lock.
    ///
    /// Nothing is saved when the operation fails, so a rejected mutation
    /// leaves the stored document untouched.
    pub fn update<T, E>(&self, op: impl FnOnce(&mut AppState) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut state = self.load_unlocked().map_err(E::from)?;
        let value = op(&mut state)?;
        self.save_unlocked(&state).map_err(E::from)?;
        Ok(value)
    }

    fn load_unlocked(&self) -> Result<AppState, StoreError> {
        match self.medium.read()? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(AppState::default()),
        }
    }

    fn save_unlocked(&self, state: &AppState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;
        self.medium.write(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_load_missing_document_is_empty_state() {
        let store = StateStore::in_memory();
        let state = store.load().unwrap();
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_load_missing_file_is_empty_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = StateStore::open(temp_dir.path().join("state.json"));
        assert_eq!(store.load().unwrap(), AppState::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        let store = StateStore::open(path.clone());

        let mut state = AppState::default();
        state.tasks_by_date.insert(
            "2025-01-15".into(),
            vec![Task::new("09:00".into(), "10:00".into(), "Write report".into())],
        );
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), state);

        // save(load()) reproduces the document byte for byte
        let first = fs::read_to_string(&path).unwrap();
        let reloaded = store.load().unwrap();
        store.save(&reloaded).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_corrupt_document_surfaces_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let store = StateStore::open(path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_failed_update_saves_nothing() {
        let store = StateStore::in_memory();
        let mut state = AppState::default();
        state.categories_by_date.insert("2025-01-15".into(), Default::default());
        store.save(&state).unwrap();

        let result: Result<(), StoreError> = store.update(|s| {
            s.tasks_by_date.clear();
            s.categories_by_date.clear();
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "rejected",
            )))
        });
        assert!(result.is_err());
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Arc::new(StateStore::open(temp_dir.path().join("state.json")));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .update(|state| {
                            let list = state.tasks_by_date.entry("2025-01-15".into()).or_default();
                            list.push(Task::new(
                                format!("{:02}:00", 8 + i),
                                format!("{:02}:30", 8 + i),
                                format!("task {}", i),
                            ));
                            Ok::<(), StoreError>(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let state = store.load().unwrap();
        assert_eq!(state.tasks_for("2025-01-15").len(), 8);
    }
}
