use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::state::AppState;
use crate::utils::error::FavoritesError;
use crate::utils::validation::present_text;

/// The authenticated caller.
///
/// Authentication happens upstream; the gateway forwards the user id in the
/// configured identity header. A missing or blank header is rejected with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

#[async_trait]
impl FromRequestParts<AppState> for Owner {
    type Rejection = FavoritesError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(&state.identity_header)
            .and_then(|v| v.to_str().ok());

        match present_text(value) {
            Some(owner_id) => Ok(Owner(owner_id.trim().to_string())),
            None => {
                tracing::debug!(
                    "Rejected {} {}: missing {} header",
                    parts.method,
                    parts.uri.path(),
                    state.identity_header
                );
                Err(FavoritesError::Unauthorized)
            }
        }
    }
}
