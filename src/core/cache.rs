//! Key-value storage abstractions

use async_trait::async_trait;

/// A named set of byte keys and values. Failures are logged by implementations
/// and surface as missing values.
#[async_trait]
pub trait KeyValueCollection: Send + Sync {
    async fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    async fn put(&self, key: &[u8], value: &[u8]);
    async fn remove(&self, key: &[u8]);
}
