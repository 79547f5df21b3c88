pub mod disk;
pub mod memory;

use crate::core::cache::KeyValueCollection;
use disk::DiskCollection;
use fjall::{Keyspace, PartitionCreateOptions};
use memory::MemoryCollection;
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::{debug, warn};

/// A key-value store that can hold multiple collections.
///
/// Persistent collections are partitions of a single fjall keyspace. When the
/// keyspace cannot be opened, collections live in memory for the process.
pub struct KeyValueStore {
    collections: Mutex<HashMap<String, Arc<dyn KeyValueCollection>>>,
    keyspace: Option<Arc<Keyspace>>,
}

impl KeyValueStore {
    /// Opens (or creates) the keyspace under `data_path/store`.
    pub fn open(data_path: &Path) -> Self {
        let store_dir = data_path.join("store");
        let keyspace = match fjall::Config::new(&store_dir).open() {
            Ok(ks) => {
                debug!("Opened store at {}", store_dir.display());
                Some(Arc::new(ks))
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Could not open store at {}; history will not be persisted",
                    store_dir.display()
                );
                None
            }
        };

        Self {
            collections: Mutex::new(HashMap::new()),
            keyspace,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            keyspace: None,
        }
    }

    /// Returns the collection called `name`, creating it on first use.
    ///
    /// It is backed by a fjall partition when the keyspace is open, otherwise
    /// by memory. Repeated calls return the same collection.
    pub fn collection_or_memory(&self, name: &str) -> Arc<dyn KeyValueCollection> {
        let Ok(mut collections) = self.collections.lock() else {
            warn!("Store collections lock poisoned");
            return Arc::new(MemoryCollection::new());
        };

        if let Some(existing) = collections.get(name) {
            return Arc::clone(existing);
        }

        let created = self
            .disk_collection(name)
            .unwrap_or_else(|| Arc::new(MemoryCollection::new()));
        collections.insert(name.to_string(), Arc::clone(&created));
        created
    }

    fn disk_collection(&self, name: &str) -> Option<Arc<dyn KeyValueCollection>> {
        let keyspace = self.keyspace.as_ref()?;
        let partition = keyspace
            .open_partition(name, PartitionCreateOptions::default())
            .inspect_err(|e| warn!(error = %e, "Failed to open partition {name}"))
            .ok()?;
        Some(Arc::new(DiskCollection::new(Arc::clone(keyspace), partition)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_persistent_collection_is_shared() {
        let dir = tempdir().unwrap();
        let store = KeyValueStore::open(dir.path());

        let first = store.collection_or_memory("history");
        first.put(b"k", b"v").await;

        let second = store.collection_or_memory("history");
        assert_eq!(second.get(b"k").await, Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_fallback_without_keyspace() {
        let store = KeyValueStore::in_memory();

        let collection = store.collection_or_memory("history");
        collection.put(b"k", b"v").await;
        assert_eq!(
            store.collection_or_memory("history").get(b"k").await,
            Some(b"v".to_vec())
        );
        assert!(store.collection_or_memory("other").get(b"k").await.is_none());
    }

    #[tokio::test]
    async fn test_history_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = KeyValueStore::open(dir.path());
            store.collection_or_memory("history").put(b"k", b"v").await;
        }

        let reopened = KeyValueStore::open(dir.path());
        assert_eq!(
            reopened.collection_or_memory("history").get(b"k").await,
            Some(b"v".to_vec())
        );
    }
}
