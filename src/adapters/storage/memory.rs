use async_trait::async_trait;
use tokio::sync::RwLock;

use super::FavoriteCollection;
use crate::domain::model::FavoriteRecord;
use crate::domain::ports::FavoriteStore;
use crate::utils::error::StoreResult;

/// In-process store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryFavoriteStore {
    collection: RwLock<FavoriteCollection>,
}

impl MemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.collection.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.collection.read().await.is_empty()
    }
}

#[async_trait]
impl FavoriteStore for MemoryFavoriteStore {
    async fn find_by_owner(&self, owner_id: &str) -> StoreResult<Vec<FavoriteRecord>> {
        Ok(self.collection.read().await.find_by_owner(owner_id))
    }

    async fn find_one(
        &self,
        owner_id: &str,
        country_code: &str,
    ) -> StoreResult<Option<FavoriteRecord>> {
        Ok(self
            .collection
            .read()
            .await
            .find_one(owner_id, country_code)
            .cloned())
    }

    async fn insert(&self, record: FavoriteRecord) -> StoreResult<FavoriteRecord> {
        self.collection.write().await.insert(record)
    }

    async fn delete_one(&self, owner_id: &str, country_code: &str) -> StoreResult<bool> {
        Ok(self
            .collection
            .write()
            .await
            .delete_one(owner_id, country_code)
            .is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
