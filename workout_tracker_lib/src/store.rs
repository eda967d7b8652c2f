use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::{error::StoreError, workout::Workout, workout_log::WorkoutLog};

/// String key-value storage, such as the browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store. Cloning snapshots the contents, which is how tests
/// simulate a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Keeps the whole workout collection as one JSON array under a single key.
/// Every save overwrites the previous snapshot.
pub struct WorkoutStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn save(&mut self, workouts: &WorkoutLog) -> Result<(), StoreError> {
        let json = serde_json::to_string(workouts.as_slice())?;
        self.backend.set(&self.key, &json)?;
        debug!(count = workouts.len(), key = %self.key, "Saved workouts");
        Ok(())
    }

    /// `None` if nothing was ever saved. Records that do not decode are
    /// skipped so one bad entry does not cost the rest.
    pub fn load(&self) -> Result<Option<WorkoutLog>, StoreError> {
        let Some(json) = self.backend.get(&self.key)? else {
            return Ok(None);
        };

        let records: Vec<serde_json::Value> = serde_json::from_str(&json)?;
        let total = records.len();

        let workouts: Vec<Workout> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Workout>(record) {
                Ok(workout) => Some(workout),
                Err(e) => {
                    warn!(index, error = %e, "Skipping unreadable stored workout");
                    None
                }
            })
            .collect();

        info!(count = workouts.len(), skipped = total - workouts.len(), key = %self.key, "Loaded stored workouts");
        Ok(Some(WorkoutLog::from_workouts(workouts)))
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.remove(&self.key)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}
