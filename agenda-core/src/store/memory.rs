//! In-memory event store.

use std::collections::BTreeMap;

use tokio::sync::Mutex;

use super::EventStore;
use crate::error::StoreError;
use crate::event::{Event, EventId};

/// Volatile store, used for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    events: Mutex<BTreeMap<EventId, Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        MemoryStore {
            events: Mutex::new(events.into_iter().map(|e| (e.id.clone(), e)).collect()),
        }
    }
}

impl EventStore for MemoryStore {
    async fn put(&self, event: &Event) -> Result<(), StoreError> {
        self.events.lock().await.insert(event.id.clone(), event.clone());
        Ok(())
    }

    async fn delete(&self, id: &EventId) -> Result<(), StoreError> {
        self.events.lock().await.remove(id);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.events.lock().await.values().cloned().collect())
    }

    async fn contains(&self, id: &EventId) -> Result<bool, StoreError> {
        Ok(self.events.lock().await.contains_key(id))
    }
}
