use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::common::{PersistedResource, ResourceKind};
use std::sync::{Arc, RwLock};

use crate::shared::api::{ApiError, ResourceClient};
use crate::system::session::Session;

/// Обновление списка после успешного сохранения
#[async_trait]
pub trait RefreshHook: Send + Sync {
    async fn refresh(&self) -> Result<(), ApiError>;
}

/// Список записей одного вида в памяти
///
/// Пишется только при обновлении после успешного сохранения.
#[derive(Clone)]
pub struct ResourceList<K: ResourceKind> {
    client: ResourceClient<K>,
    session: Session,
    items: Arc<RwLock<Vec<K::Persisted>>>,
    refreshed_at: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl<K: ResourceKind> ResourceList<K> {
    pub fn new(client: ResourceClient<K>, session: Session) -> Self {
        Self {
            client,
            session,
            items: Arc::new(RwLock::new(Vec::new())),
            refreshed_at: Arc::new(RwLock::new(None)),
        }
    }

    /// Записи без мягко удалённых
    pub fn visible(&self) -> Vec<K::Persisted> {
        let items = self.items.read().unwrap();
        items.iter().filter(|i| !i.is_deleted()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        *self.refreshed_at.read().unwrap()
    }
}

#[async_trait]
impl<K: ResourceKind> RefreshHook for ResourceList<K> {
    async fn refresh(&self) -> Result<(), ApiError> {
        let fetched = self.client.get_all_with(self.session.bearer()).await?;
        tracing::debug!(
            resource = K::collection_name(),
            count = fetched.len(),
            "list refreshed"
        );
        *self.items.write().unwrap() = fetched;
        *self.refreshed_at.write().unwrap() = Some(Utc::now());
        Ok(())
    }
}
