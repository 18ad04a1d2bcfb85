use crate::domain::model::FavoriteRecord;
use crate::utils::error::StoreResult;
use async_trait::async_trait;

/// Persistence port for favorites.
///
/// Implementations must enforce uniqueness of `(owner_id, country_code)` themselves:
/// `insert` is an insert-if-absent and returns `StoreError::ConstraintViolation`
/// when the pair already exists, even under concurrent callers.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All favorites of one owner, oldest first.
    async fn find_by_owner(&self, owner_id: &str) -> StoreResult<Vec<FavoriteRecord>>;

    async fn find_one(
        &self,
        owner_id: &str,
        country_code: &str,
    ) -> StoreResult<Option<FavoriteRecord>>;

    async fn insert(&self, record: FavoriteRecord) -> StoreResult<FavoriteRecord>;

    /// Returns `true` when a record was removed.
    async fn delete_one(&self, owner_id: &str, country_code: &str) -> StoreResult<bool>;

    /// Reachability check backing the readiness endpoint.
    async fn ping(&self) -> StoreResult<()>;
}
