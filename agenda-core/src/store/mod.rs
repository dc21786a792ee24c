//! Persistent event storage.
//!
//! A single key-value table keyed by [`EventId`]. Every mutation touches
//! exactly one record and is persisted before the call returns.

mod dir;
mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::event::{Event, EventId};

/// Key-value store of events.
#[allow(async_fn_in_trait)]
pub trait EventStore {
    /// Insert or replace the record with `event.id`.
    async fn put(&self, event: &Event) -> Result<(), StoreError>;

    /// Remove the record if present. Removing an absent id is not an error.
    async fn delete(&self, id: &EventId) -> Result<(), StoreError>;

    /// Every record, ordered by id.
    async fn get_all(&self) -> Result<Vec<Event>, StoreError>;

    async fn contains(&self, id: &EventId) -> Result<bool, StoreError> {
        Ok(self.get_all().await?.iter().any(|e| &e.id == id))
    }
}
