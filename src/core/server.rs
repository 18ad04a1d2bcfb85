use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::http::{create_router, AppState};
use crate::adapters::storage::{MemoryFavoriteStore, SqliteFavoriteStore};
use crate::config::{Settings, StoreBackend};
use crate::domain::ports::FavoriteStore;
use crate::utils::error::{FavoritesError, Result};

/// Opens the store backend selected in the settings.
pub async fn open_store(settings: &Settings) -> Result<Arc<dyn FavoriteStore>> {
    match settings.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, favorites are lost on shutdown");
            Ok(Arc::new(MemoryFavoriteStore::new()))
        }
        StoreBackend::Sqlite => {
            let store = SqliteFavoriteStore::open(&settings.database_path).await?;
            Ok(Arc::new(store))
        }
    }
}

fn cors_layer(settings: &Settings) -> Result<CorsLayer> {
    let allow_origin = if settings.cors_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = settings
            .cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| {
                    FavoritesError::InvalidConfigValueError {
                        field: "server.cors_origins".to_string(),
                        value: origin.clone(),
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            axum::http::HeaderName::from_bytes(settings.identity_header.as_bytes()).map_err(
                |e| FavoritesError::InvalidConfigValueError {
                    field: "auth.identity_header".to_string(),
                    value: settings.identity_header.clone(),
                    reason: e.to_string(),
                },
            )?,
        ])
        .max_age(Duration::from_secs(60 * 60)))
}

/// Wires the store into the router and applies the CORS and tracing layers.
pub fn build_app(store: Arc<dyn FavoriteStore>, settings: &Settings) -> Result<Router> {
    let state = AppState::new(store).with_identity_header(&settings.identity_header)?;

    Ok(create_router(state, &settings.api_prefix)
        .layer(cors_layer(settings)?)
        .layer(TraceLayer::new_for_http()))
}

pub struct FavoritesServer {
    settings: Settings,
}

impl FavoritesServer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Binds the configured address and serves until Ctrl+C / SIGTERM.
    pub async fn run(&self) -> Result<()> {
        let store = open_store(&self.settings).await?;
        let app = build_app(store, &self.settings)?;

        let address = self.settings.bind_address();
        tracing::info!("Binding to {address}");
        let listener = TcpListener::bind(&address).await?;

        Self::serve(listener, app, shutdown_signal()).await
    }

    pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = listener.local_addr()?;
        tracing::info!("🚀 Server running on {address}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
