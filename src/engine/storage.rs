// Storage abstraction for message records
// This defines the interface for keeping records keyed by MessageId

//! # Record Store
//!
//! The store maps `MessageId → Record` for the lifetime of the process. It
//! has no ordering, no eviction and no delete operation.
//!
//! ## Atomic operations
//!
//! `get`/`put`/`contains` are the plain keyed operations. Two conditional
//! writes exist so the message service never has to do a separate
//! check-then-write across an `.await`:
//! - `insert_new`: write only if the key is absent (used by create)
//! - `replace_existing`: write only if the key is present (used by update)
//!
//! Each of them runs under a single write-lock acquisition.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{MessageId, Record};
use crate::{Error, Result};

/// Keyed storage for message records
///
/// Implementations must be safe to share between concurrent requests
/// (`Send + Sync`). All methods are async so a networked backend can be
/// dropped in without changing callers.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up the record stored under `id`
    ///
    /// Returns `Ok(None)` when nothing is stored there. Has no side effects.
    async fn get(&self, id: &MessageId) -> Result<Option<Record>>;

    /// Insert or overwrite the record at `id`
    async fn put(&self, id: MessageId, record: Record) -> Result<()>;

    /// Whether a record is stored under `id`
    async fn contains(&self, id: &MessageId) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }

    /// Store `record` at `id` only if the key is free
    ///
    /// Returns `false`, leaving the existing record untouched, when the key
    /// is already taken.
    async fn insert_new(&self, id: MessageId, record: Record) -> Result<bool>;

    /// Overwrite the record at `id` only if one is already there
    ///
    /// Returns the record that was replaced, or `None` (and no write) when
    /// the key is absent.
    async fn replace_existing(&self, id: &MessageId, record: Record) -> Result<Option<Record>>;

    /// Number of stored records
    async fn len(&self) -> Result<usize>;
}

/// In-memory record store
///
/// Data lives only as long as the process. Uses a `RwLock` so concurrent
/// reads don't block each other while writes are exclusive.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<MessageId, Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<MessageId, Record>>> {
        self.records
            .read()
            .map_err(|_| Error::Storage("record store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<MessageId, Record>>> {
        self.records
            .write()
            .map_err(|_| Error::Storage("record store lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, id: &MessageId) -> Result<Option<Record>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn put(&self, id: MessageId, record: Record) -> Result<()> {
        self.write()?.insert(id, record);
        Ok(())
    }

    async fn contains(&self, id: &MessageId) -> Result<bool> {
        Ok(self.read()?.contains_key(id))
    }

    async fn insert_new(&self, id: MessageId, record: Record) -> Result<bool> {
        let mut records = self.write()?;
        if records.contains_key(&id) {
            return Ok(false);
        }
        records.insert(id, record);
        Ok(true)
    }

    async fn replace_existing(&self, id: &MessageId, record: Record) -> Result<Option<Record>> {
        let mut records = self.write()?;
        Ok(records
            .get_mut(id)
            .map(|slot| std::mem::replace(slot, record)))
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}
