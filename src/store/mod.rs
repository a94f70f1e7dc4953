pub mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Any record persisted through an [`EntityStore`] gains an identifier and a
/// pair of timestamps, both owned by the store. Callers never set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity<T> {
    pub id: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot find entity with ID {0}")]
    NotFound(String),
}

/// Narrow CRUD contract shared by all stores. The orchestrator depends only
/// on this trait, so the in-memory backing can be swapped for a durable one
/// without touching saga logic. Implementations must be safe for concurrent
/// use by independent in-flight requests.
#[async_trait]
pub trait EntityStore<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// Persists `data` under a fresh prefixed identifier. `created` and
    /// `updated` are both set to the moment of the call.
    async fn create(&self, data: T) -> Entity<T>;

    /// Lookup by identifier; an unknown id is not an error.
    async fn read(&self, id: &str) -> Option<Entity<T>>;

    /// Replaces the payload of an existing record, keeping `id` and
    /// `created` and moving `updated` strictly forward.
    async fn update(&self, id: &str, new_data: T) -> Result<Entity<T>, StoreError>;

    /// Idempotent removal.
    async fn delete(&self, id: &str);

    /// Full enumeration in insertion order.
    async fn scan(&self) -> Vec<Entity<T>>;
}
