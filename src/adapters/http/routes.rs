//! HTTP route definitions and handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;

use super::error::JsonBody;
use super::identity::Owner;
use super::state::AppState;
use crate::domain::model::{AddFavoriteRequest, CheckResponse, FavoriteRecord, MessageResponse};
use crate::utils::error::Result;

pub const MSG_REMOVED: &str = "Favorite removed";

fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route("/favorites/:country_code", delete(remove_favorite))
        .route("/favorites/check/:country_code", get(check_favorite))
}

/// Builds the application router.
///
/// Favorites routes are nested under `api_prefix` (empty string mounts them at
/// the root); health checks always live at `/health`.
pub fn create_router(state: AppState, api_prefix: &str) -> Router {
    let api = if api_prefix.is_empty() {
        favorites_routes()
    } else {
        Router::new().nest(api_prefix, favorites_routes())
    };

    api.route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(state)
}

async fn list_favorites(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
) -> Result<Json<Vec<FavoriteRecord>>> {
    Ok(Json(state.service.list(&owner_id).await?))
}

async fn add_favorite(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    JsonBody(body): JsonBody<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteRecord>)> {
    let created = state.service.add(&owner_id, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    Path(country_code): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.service.remove(&owner_id, &country_code).await?;
    Ok(Json(MessageResponse::new(MSG_REMOVED)))
}

async fn check_favorite(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    Path(country_code): Path<String>,
) -> Result<Json<CheckResponse>> {
    let is_favorite = state.service.check(&owner_id, &country_code).await?;
    Ok(Json(CheckResponse { is_favorite }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.store().ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::error!("Readiness check failed: storage unavailable: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
