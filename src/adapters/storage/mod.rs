//! Storage backends for the [`FavoriteStore`](crate::domain::ports::FavoriteStore) port.

pub mod memory;
pub mod sqlite;

use std::collections::HashMap;

use crate::domain::model::FavoriteRecord;
use crate::utils::error::{StoreError, StoreResult};

pub use memory::MemoryFavoriteStore;
pub use sqlite::SqliteFavoriteStore;

/// Favorites grouped by owner, each group in insertion order.
///
/// Not synchronized; [`MemoryFavoriteStore`] wraps it in a lock so that the
/// existence check and the write in [`FavoriteCollection::insert`] happen atomically.
#[derive(Debug, Default, Clone)]
pub struct FavoriteCollection {
    by_owner: HashMap<String, Vec<FavoriteRecord>>,
}

impl FavoriteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_owner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_owner.values().all(Vec::is_empty)
    }

    pub fn find_by_owner(&self, owner_id: &str) -> Vec<FavoriteRecord> {
        self.by_owner.get(owner_id).cloned().unwrap_or_default()
    }

    pub fn find_one(&self, owner_id: &str, country_code: &str) -> Option<&FavoriteRecord> {
        self.by_owner
            .get(owner_id)?
            .iter()
            .find(|r| r.country_code == country_code)
    }

    pub fn insert(&mut self, record: FavoriteRecord) -> StoreResult<FavoriteRecord> {
        let favorites = self.by_owner.entry(record.owner_id.clone()).or_default();

        if favorites
            .iter()
            .any(|r| r.country_code == record.country_code)
        {
            return Err(StoreError::ConstraintViolation {
                owner_id: record.owner_id,
                country_code: record.country_code,
            });
        }

        favorites.push(record.clone());
        Ok(record)
    }

    pub fn delete_one(&mut self, owner_id: &str, country_code: &str) -> Option<FavoriteRecord> {
        let favorites = self.by_owner.get_mut(owner_id)?;
        let index = favorites
            .iter()
            .position(|r| r.country_code == country_code)?;
        let removed = favorites.remove(index);

        if favorites.is_empty() {
            self.by_owner.remove(owner_id);
        }
        Some(removed)
    }
}
