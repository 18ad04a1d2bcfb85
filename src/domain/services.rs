use std::sync::Arc;

use chrono::Utc;

use crate::domain::model::{AddFavoriteRequest, FavoriteRecord, NewFavorite};
use crate::domain::ports::FavoriteStore;
use crate::utils::error::{FavoritesError, Result};

/// Request-level operations over a [`FavoriteStore`].
#[derive(Clone)]
pub struct FavoritesService {
    store: Arc<dyn FavoriteStore>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn FavoriteStore> {
        &self.store
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<FavoriteRecord>> {
        let favorites = self.store.find_by_owner(owner_id).await?;
        tracing::debug!(owner_id, count = favorites.len(), "Listed favorites");
        Ok(favorites)
    }

    pub async fn add(&self, owner_id: &str, request: AddFavoriteRequest) -> Result<FavoriteRecord> {
        let favorite = NewFavorite::try_from(request)?;

        // 先查一次只是為了回傳友善訊息，真正的保證在儲存層的唯一性約束
        if self
            .store
            .find_one(owner_id, favorite.country_code())
            .await?
            .is_some()
        {
            tracing::debug!(owner_id, country_code = favorite.country_code(), "Favorite already exists");
            return Err(FavoritesError::AlreadyExists);
        }

        let record = FavoriteRecord::new(owner_id, favorite, Utc::now());
        let created = self
            .store
            .insert(record)
            .await
            .map_err(FavoritesError::from_store)?;

        tracing::info!(
            owner_id,
            country_code = %created.country_code,
            "⭐ Favorite added"
        );
        Ok(created)
    }

    pub async fn remove(&self, owner_id: &str, country_code: &str) -> Result<()> {
        if !self.store.delete_one(owner_id, country_code).await? {
            return Err(FavoritesError::NotFound);
        }

        tracing::info!(owner_id, country_code, "🗑️ Favorite removed");
        Ok(())
    }

    pub async fn check(&self, owner_id: &str, country_code: &str) -> Result<bool> {
        Ok(self.store.find_one(owner_id, country_code).await?.is_some())
    }
}
