use crate::core::cache::KeyValueCollection;
use anyhow::Result;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionHandle, PersistMode};
use std::sync::Arc;
use tracing::debug;

/// A collection backed by a fjall partition. Every write is synced before returning.
pub struct DiskCollection {
    keyspace: Arc<Keyspace>,
    partition: PartitionHandle,
}

impl DiskCollection {
    pub fn new(keyspace: Arc<Keyspace>, partition: PartitionHandle) -> Self {
        Self {
            keyspace,
            partition,
        }
    }

    fn sync(&self) -> Result<()> {
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueCollection for DiskCollection {
    async fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.partition.get(key) {
            Ok(value) => {
                debug!(
                    key = %String::from_utf8_lossy(key),
                    hit = value.is_some(),
                    "Disk GET"
                );
                value.map(|v| v.to_vec())
            }
            Err(e) => {
                debug!("DiskCollection get error: {}", e);
                None
            }
        }
    }

    async fn put(&self, key: &[u8], value: &[u8]) {
        let res: Result<()> = (|| {
            self.partition.insert(key, value)?;
            self.sync()
        })();
        match res {
            Ok(()) => debug!(key = %String::from_utf8_lossy(key), "Disk PUT"),
            Err(e) => debug!("DiskCollection put error: {}", e),
        }
    }

    async fn remove(&self, key: &[u8]) {
        let res: Result<()> = (|| {
            self.partition.remove(key)?;
            self.sync()
        })();
        if let Err(e) = res {
            debug!("DiskCollection remove error: {}", e);
        }
    }
}
