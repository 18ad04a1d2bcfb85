use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::domain::model::MessageResponse;
use crate::utils::error::{FavoritesError, MSG_REQUIRED_FIELDS};

impl FavoritesError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FavoritesError::InvalidInput { .. } | FavoritesError::AlreadyExists => {
                StatusCode::BAD_REQUEST
            }
            FavoritesError::NotFound => StatusCode::NOT_FOUND,
            FavoritesError::Unauthorized => StatusCode::UNAUTHORIZED,
            FavoritesError::StorageFault(_)
            | FavoritesError::ConfigError { .. }
            | FavoritesError::InvalidConfigValueError { .. }
            | FavoritesError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FavoritesError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ Request failed: {}", self);
        }

        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

/// JSON body extractor that answers malformed bodies with 400 and a `{message}` body
/// instead of axum's default plain-text 415/422.
///
/// A body sent without a JSON content type is never parsed, so it reads as a
/// request with no fields at all.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FavoritesError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                Err(FavoritesError::invalid_input(MSG_REQUIRED_FIELDS))
            }
            Err(rejection) => Err(FavoritesError::invalid_input(rejection.body_text())),
        }
    }
}
