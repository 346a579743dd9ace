// Message service - the create/read/update surface over a RecordStore

//! # Message Service
//!
//! Translates between caller-facing shapes and stored records, mints
//! identifiers, and reports unknown identifiers as
//! [`Error::MessageNotFound`].
//!
//! Per identifier the lifecycle is `nonexistent → existing` (create) and
//! `existing → existing` (update). There is no way back to `nonexistent`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::ids::{IdGenerator, RandomIdGenerator};
use crate::engine::storage::{InMemoryRecordStore, RecordStore};
use crate::models::{Message, MessageId, Record};
use crate::{Error, Result};

/// How many fresh identifiers `create` draws before giving up on collisions
const MAX_ID_ATTEMPTS: usize = 8;

/// Create/read/update operations over a shared record store
///
/// Cloning is cheap: clones share the same store and generator.
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn RecordStore>,
    ids: Arc<dyn IdGenerator>,
}

impl MessageService {
    /// Service over `store` with random 80-bit identifiers
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_id_generator(store, Arc::new(RandomIdGenerator))
    }

    pub fn with_id_generator(store: Arc<dyn RecordStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Service backed by a fresh, empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRecordStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Fetch the message stored under `id`
    ///
    /// ## Errors
    /// - `MessageNotFound` when nothing is stored under `id`
    pub async fn get(&self, id: &MessageId) -> Result<Message> {
        match self.store.get(id).await? {
            Some(record) => {
                debug!(%id, "message fetched");
                Ok(Message::new(id.clone(), record))
            }
            None => {
                warn!(%id, "get on unknown message id");
                Err(not_found(id))
            }
        }
    }

    /// Store `record` under a freshly minted identifier
    ///
    /// The identifier is inserted with `insert_new`, so even a generator
    /// collision can never overwrite an existing message.
    pub async fn create(&self, record: Record) -> Result<Message> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate_id();
            if self.store.insert_new(id.clone(), record.clone()).await? {
                debug!(%id, "message created");
                return Ok(Message::new(id, record));
            }
            warn!(%id, "generated message id already in use, drawing another");
        }

        Err(Error::Internal(format!(
            "could not allocate an unused message id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Replace the record stored under `id` with `record`
    ///
    /// This is a full replace: fields absent from `record` become absent in
    /// the store. The returned message reflects the newly written record.
    ///
    /// ## Errors
    /// - `MessageNotFound` when nothing is stored under `id`; the store is
    ///   left untouched
    pub async fn update(&self, id: &MessageId, record: Record) -> Result<Message> {
        match self.store.replace_existing(id, record.clone()).await? {
            Some(previous) => {
                debug!(%id, ?previous, "message updated");
                Ok(Message::new(id.clone(), record))
            }
            None => {
                warn!(%id, "update on unknown message id");
                Err(not_found(id))
            }
        }
    }
}

fn not_found(id: &MessageId) -> Error {
    Error::MessageNotFound { id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Hands out a scripted list of identifiers, then repeats the last one
    struct ScriptedIds(Mutex<Vec<&'static str>>);

    impl ScriptedIds {
        fn new(ids: &[&'static str]) -> Self {
            let mut ids = ids.to_vec();
            ids.reverse();
            Self(Mutex::new(ids))
        }
    }

    impl IdGenerator for ScriptedIds {
        fn generate_id(&self) -> MessageId {
            let mut ids = self.0.lock().unwrap();
            let next = if ids.len() > 1 { ids.pop().unwrap() } else { ids[0] };
            MessageId::from(next)
        }
    }

    fn record(content: &str, author: &str) -> Record {
        Record::new(Some(content.to_string()), Some(author.to_string()))
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let service = MessageService::in_memory();

        let created = service.create(record("hi", "ann")).await.unwrap();
        assert_eq!(created.content.as_deref(), Some("hi"));
        assert_eq!(created.author.as_deref(), Some("ann"));
        assert_eq!(created.id.as_str().len(), 20);

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_keeps_absent_fields_absent() {
        let service = MessageService::in_memory();

        let created = service
            .create(Record::new(None, Some(String::new())))
            .await
            .unwrap();
        let fetched = service.get(&created.id).await.unwrap();

        assert_eq!(fetched.content, None);
        assert_eq!(fetched.author.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_many_creates_yield_distinct_ids() {
        let service = MessageService::in_memory();
        let mut ids = HashSet::new();

        for i in 0..10_000 {
            let created = service
                .create(Record::new(Some(i.to_string()), None))
                .await
                .unwrap();
            ids.insert(created.id);
        }

        assert_eq!(ids.len(), 10_000);
        assert_eq!(service.store().len().await.unwrap(), 10_000);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let service = MessageService::in_memory();

        let err = service.get(&MessageId::from("nonexistent-id")).await.unwrap_err();
        assert_eq!(
            err,
            Error::MessageNotFound {
                id: "nonexistent-id".to_string()
            }
        );
        assert_eq!(err.to_string(), "no message exists with id nonexistent-id");
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_unchanged() {
        let service = MessageService::in_memory();
        let id = MessageId::from("nonexistent-id");

        let err = service.update(&id, record("b", "y")).await.unwrap_err();
        assert!(matches!(err, Error::MessageNotFound { .. }));

        assert!(service.get(&id).await.is_err());
        assert_eq!(service.store().len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_and_returns_new_value() {
        let service = MessageService::in_memory();
        let created = service.create(record("a", "x")).await.unwrap();

        let updated = service
            .update(&created.id, record("b", "y"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.content.as_deref(), Some("b"));
        assert_eq!(updated.author.as_deref(), Some("y"));

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let service = MessageService::in_memory();
        let created = service.create(record("a", "x")).await.unwrap();

        service
            .update(&created.id, Record::new(Some("b".to_string()), None))
            .await
            .unwrap();

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched.content.as_deref(), Some("b"));
        assert_eq!(fetched.author, None);
    }

    #[tokio::test]
    async fn test_repeated_get_is_stable() {
        let service = MessageService::in_memory();
        let created = service.create(record("hi", "ann")).await.unwrap();

        let first = service.get(&created.id).await.unwrap();
        let second = service.get(&created.id).await.unwrap();
        let third = service.get(&created.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[tokio::test]
    async fn test_create_skips_colliding_id() {
        let store = Arc::new(InMemoryRecordStore::new());
        let service = MessageService::with_id_generator(
            store.clone(),
            Arc::new(ScriptedIds::new(&["dup", "dup", "fresh"])),
        );

        let first = service.create(record("one", "x")).await.unwrap();
        let second = service.create(record("two", "y")).await.unwrap();

        assert_eq!(first.id.as_str(), "dup");
        assert_eq!(second.id.as_str(), "fresh");
        // The first record was not clobbered by the collision
        assert_eq!(
            service.get(&MessageId::from("dup")).await.unwrap().content.as_deref(),
            Some("one")
        );
    }

    #[tokio::test]
    async fn test_create_gives_up_when_every_id_collides() {
        let service = MessageService::with_id_generator(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(ScriptedIds::new(&["same"])),
        );

        service.create(record("one", "x")).await.unwrap();
        let err = service.create(record("two", "y")).await.unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert_eq!(service.store().len().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_end_in_one_written_value() {
        let service = MessageService::in_memory();
        let created = service.create(record("start", "x")).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..32 {
            let service = service.clone();
            let id = created.id.clone();
            handles.push(tokio::spawn(async move {
                service.update(&id, record(&format!("v{}", i), "y")).await
            }));
        }

        let mut written = HashSet::new();
        for handle in handles {
            let message = handle.await.unwrap().unwrap();
            written.insert(message.content.unwrap());
        }

        let last = service.get(&created.id).await.unwrap();
        assert!(written.contains(last.content.as_deref().unwrap()));
        assert_eq!(service.store().len().await.unwrap(), 1);
    }
}
