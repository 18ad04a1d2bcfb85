use std::sync::Arc;

use axum::http::HeaderName;

use crate::domain::ports::FavoriteStore;
use crate::domain::services::FavoritesService;
use crate::utils::error::{FavoritesError, Result};

pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-id";

/// Shared handler state. Cloned per request; the store itself sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub service: FavoritesService,
    pub identity_header: HeaderName,
}

impl AppState {
    pub fn new(store: Arc<dyn FavoriteStore>) -> Self {
        Self {
            service: FavoritesService::new(store),
            identity_header: HeaderName::from_static(DEFAULT_IDENTITY_HEADER),
        }
    }

    pub fn with_identity_header(mut self, header: &str) -> Result<Self> {
        self.identity_header = HeaderName::from_bytes(header.as_bytes()).map_err(|e| {
            FavoritesError::InvalidConfigValueError {
                field: "auth.identity_header".to_string(),
                value: header.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(self)
    }
}
