use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use rdmo_api::{StorageError, Value, ValueQuery, ValueStorage, storage_order};

// ═══════════════════════════════════════════════════════════════
//  MemoryStorage
// ═══════════════════════════════════════════════════════════════

#[derive(Default)]
struct Rows {
    values: BTreeMap<i64, Value>,
    last_id: i64,
}

/// In-memory value storage. Used for rendering from exported
/// datasets and in tests.
#[derive(Default)]
pub struct MemoryStorage {
    rows: RwLock<Rows>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `values`, saved in iteration order.
    pub fn with_values(values: impl IntoIterator<Item = Value>) -> Result<Self, StorageError> {
        let storage = Self::new();
        for value in values {
            storage.save(value)?;
        }
        Ok(storage)
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.values.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read()?.values.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Rows>, StorageError> {
        self.rows
            .read()
            .map_err(|_| StorageError::new("value storage lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Rows>, StorageError> {
        self.rows
            .write()
            .map_err(|_| StorageError::new("value storage lock poisoned"))
    }

    fn update_where(
        &self,
        mut update: impl FnMut(&mut Value) -> bool,
    ) -> Result<usize, StorageError> {
        let mut rows = self.write()?;
        let now = Utc::now();
        let mut changed = 0;
        for value in rows.values.values_mut() {
            if update(value) {
                value.updated = Some(now);
                changed += 1;
            }
        }
        Ok(changed)
    }
}

impl ValueStorage for MemoryStorage {
    fn save(&self, mut value: Value) -> Result<Value, StorageError> {
        let mut rows = self.write()?;
        let now = Utc::now();

        let id = match value.id {
            Some(id) => id,
            None => rows.last_id + 1,
        };
        rows.last_id = rows.last_id.max(id);

        // last write wins, only `created` survives the replacement
        value.id = Some(id);
        value.created = rows
            .values
            .get(&id)
            .and_then(|existing| existing.created)
            .or(value.created)
            .or(Some(now));
        value.updated = Some(now);

        rows.values.insert(id, value.clone());
        Ok(value)
    }

    fn query(&self, query: &ValueQuery) -> Result<Vec<Value>, StorageError> {
        let rows = self.read()?;
        let mut result: Vec<Value> = rows
            .values
            .values()
            .filter(|v| query.matches(v))
            .cloned()
            .collect();
        result.sort_by(storage_order);
        Ok(result)
    }

    fn delete(&self, id: i64) -> Result<bool, StorageError> {
        Ok(self.write()?.values.remove(&id).is_some())
    }

    fn delete_project(&self, project: i64) -> Result<usize, StorageError> {
        let mut rows = self.write()?;
        let before = rows.values.len();
        rows.values.retain(|_, v| v.project != project);
        let removed = before - rows.values.len();
        tracing::debug!(project, removed, "deleted project values");
        Ok(removed)
    }

    fn delete_snapshot(&self, snapshot: i64) -> Result<usize, StorageError> {
        let mut rows = self.write()?;
        let before = rows.values.len();
        rows.values.retain(|_, v| v.snapshot != Some(snapshot));
        let removed = before - rows.values.len();
        tracing::debug!(snapshot, removed, "deleted snapshot values");
        Ok(removed)
    }

    fn detach_attribute(&self, uri: &str) -> Result<usize, StorageError> {
        let detached = self.update_where(|v| {
            if v.attribute_uri() == Some(uri) {
                v.attribute = None;
                true
            } else {
                false
            }
        })?;
        tracing::debug!(attribute = uri, detached, "detached attribute from values");
        Ok(detached)
    }

    fn detach_option(&self, uri: &str) -> Result<usize, StorageError> {
        let detached = self.update_where(|v| {
            if v.option_uri() == Some(uri) {
                v.option = None;
                true
            } else {
                false
            }
        })?;
        tracing::debug!(option = uri, detached, "detached option from values");
        Ok(detached)
    }
}
