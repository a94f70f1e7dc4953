use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Entity, EntityStore, StoreError};

struct Inner<T> {
    entries: HashMap<String, Entity<T>>,
    order: Vec<String>,
}

/// Volatile reference backing for [`EntityStore`]. A single `RwLock` guards
/// the map and the insertion-order log together so `scan` always sees a
/// consistent view. Identifiers are uuid-v4 behind a per-store prefix, so
/// concurrent creates cannot collide.
pub struct InMemoryStore<T> {
    id_prefix: &'static str,
    inner: RwLock<Inner<T>>,
}

impl<T> InMemoryStore<T> {
    pub fn new(id_prefix: &'static str) -> Self {
        Self {
            id_prefix,
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl<T> EntityStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn create(&self, data: T) -> Entity<T> {
        let id = format!("{}{}", self.id_prefix, Uuid::new_v4());
        let now = Utc::now();
        let entity = Entity {
            id: id.clone(),
            created: now,
            updated: now,
            data,
        };
        let mut inner = self.inner.write().await;
        inner.entries.insert(id.clone(), entity.clone());
        inner.order.push(id);
        entity
    }

    async fn read(&self, id: &str) -> Option<Entity<T>> {
        self.inner.read().await.entries.get(id).cloned()
    }

    async fn update(&self, id: &str, new_data: T) -> Result<Entity<T>, StoreError> {
        let mut inner = self.inner.write().await;
        let entity = inner
            .entries
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let mut now = Utc::now();
        if now <= entity.updated {
            // `updated` must move strictly forward even when two writes land
            // within the clock's resolution
            now = entity.updated + Duration::nanoseconds(1);
        }
        entity.data = new_data;
        entity.updated = now;
        Ok(entity.clone())
    }

    async fn delete(&self, id: &str) {
        let mut inner = self.inner.write().await;
        if inner.entries.remove(id).is_some() {
            inner.order.retain(|existing| existing != id);
        }
    }

    async fn scan(&self) -> Vec<Entity<T>> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.entries.get(id).cloned())
            .collect()
    }
}
