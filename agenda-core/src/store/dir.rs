//! Directory-backed event store: one JSON file per record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use super::EventStore;
use crate::error::StoreError;
use crate::event::{Event, EventId};

/// Subdirectory of the data dir that holds the records.
const EVENTS_DIR: &str = "events";

/// Stores each event as `<data_dir>/events/<id>.json`.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Open (and create if needed) the store under `data_dir`.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let dir = data_dir.join(EVENTS_DIR);

        fs::create_dir_all(&dir)
            .await
            .map_err(|source| StoreError::Open {
                path: dir.clone(),
                source,
            })?;

        debug!(path = %dir.display(), "opened event store");
        Ok(DirStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &EventId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Parse one record file. Unreadable or foreign files yield `None`.
    async fn read_record(path: &Path) -> Result<Option<Event>, StoreError> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            // Deleted between listing and reading
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let event: Event = match serde_json::from_str(&content) {
            Ok(event) => event,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable event record");
                return Ok(None);
            }
        };

        let stem = path.file_stem().and_then(|s| s.to_str());
        if stem != Some(event.id.as_str()) {
            warn!(
                path = %path.display(),
                id = %event.id,
                "skipping event record whose file name does not match its id"
            );
            return Ok(None);
        }

        Ok(Some(event))
    }
}

impl EventStore for DirStore {
    async fn put(&self, event: &Event) -> Result<(), StoreError> {
        let path = self.path_for(&event.id);
        let tmp = path.with_extension("json.tmp");

        let content = serde_json::to_string_pretty(event).map_err(|source| StoreError::Encode {
            id: event.id.to_string(),
            source,
        })?;

        // Write next to the target and rename so a record is never half-written.
        fs::write(&tmp, content)
            .await
            .map_err(|source| StoreError::Write {
                path: tmp.clone(),
                source,
            })?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(id = %event.id, "stored event");
        Ok(())
    }

    async fn delete(&self, id: &EventId) -> Result<(), StoreError> {
        let path = self.path_for(id);

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(%id, "deleted event");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Delete { path, source }),
        }
    }

    async fn get_all(&self) -> Result<Vec<Event>, StoreError> {
        let read_err = |source| StoreError::Read {
            path: self.dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.dir).await.map_err(read_err)?;
        let mut events = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json")
                && let Some(event) = Self::read_record(&path).await?
            {
                events.push(event);
            }
        }

        events.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(events)
    }

    async fn contains(&self, id: &EventId) -> Result<bool, StoreError> {
        let path = self.path_for(id);
        fs::try_exists(&path)
            .await
            .map_err(|source| StoreError::Read { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn make_event(id: &str, title: &str) -> Event {
        Event {
            id: EventId::parse(id).unwrap(),
            title: title.to_string(),
            description: Some("Sala 2".to_string()),
            hour: Some("14:00".to_string()),
            participants: BTreeSet::from(["Ana".to_string()]),
        }
    }

    async fn open_temp() -> (TempDir, DirStore) {
        let tmp = TempDir::new().unwrap();
        let store = DirStore::open(tmp.path()).await.unwrap();
        (tmp, store)
    }

    #[tokio::test]
    async fn test_put_then_get_all() {
        let (_tmp, store) = open_temp().await;
        let event = make_event("2026-02-14-1771027200000", "Jantar");

        store.put(&event).await.unwrap();

        assert!(store.dir().join("2026-02-14-1771027200000.json").exists());
        assert_eq!(store.get_all().await.unwrap(), vec![event]);
    }

    #[tokio::test]
    async fn test_put_overwrites_in_place() {
        let (_tmp, store) = open_temp().await;
        let mut event = make_event("2026-02-14-1", "Jantar");
        store.put(&event).await.unwrap();

        event.title = "Jantar de aniversário".to_string();
        store.put(&event).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Jantar de aniversário");
    }

    #[tokio::test]
    async fn test_delete_and_delete_missing() {
        let (_tmp, store) = open_temp().await;
        let event = make_event("2026-02-14-1", "Jantar");
        store.put(&event).await.unwrap();

        store.delete(&event.id).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
        assert!(!store.contains(&event.id).await.unwrap());

        // Second delete is a silent no-op
        store.delete(&event.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_all_skips_foreign_and_corrupt_files() {
        let (_tmp, store) = open_temp().await;
        store.put(&make_event("2026-02-14-1", "ok")).await.unwrap();

        std::fs::write(store.dir().join("notes.txt"), "hello").unwrap();
        std::fs::write(store.dir().join("2026-02-15-1.json"), "{ not json").unwrap();
        // Valid JSON stored under the wrong file name
        let stray = serde_json::to_string(&make_event("2026-02-16-1", "stray")).unwrap();
        std::fs::write(store.dir().join("2026-02-17-1.json"), stray).unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "ok");
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let event = make_event("2026-02-14-1", "Jantar");

        DirStore::open(tmp.path()).await.unwrap().put(&event).await.unwrap();
        let reopened = DirStore::open(tmp.path()).await.unwrap();

        assert!(reopened.contains(&event.id).await.unwrap());
        assert_eq!(reopened.get_all().await.unwrap(), vec![event]);
    }

    #[tokio::test]
    async fn test_open_fails_when_path_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, "").unwrap();

        let err = DirStore::open(&file).await.unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }));
    }
}
