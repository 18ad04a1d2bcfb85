pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::http::{create_router, AppState};
pub use crate::adapters::storage::{MemoryFavoriteStore, SqliteFavoriteStore};
pub use crate::config::{ServerConfig, Settings, StoreBackend};
pub use crate::core::server::{build_app, open_store, FavoritesServer};
pub use crate::domain::model::{AddFavoriteRequest, FavoriteRecord};
pub use crate::domain::ports::FavoriteStore;
pub use crate::domain::services::FavoritesService;
pub use crate::utils::error::{FavoritesError, Result, StoreError};
