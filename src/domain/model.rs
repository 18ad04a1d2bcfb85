use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::{FavoritesError, Result, MSG_REQUIRED_FIELDS};
use crate::utils::validation::present_text;

/// One user's saved country. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub owner_id: String,
    pub country_code: String,
    pub name: String,
    pub flag: String,
    pub created_at: DateTime<Utc>,
}

impl FavoriteRecord {
    pub fn new(owner_id: &str, favorite: NewFavorite, created_at: DateTime<Utc>) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            country_code: favorite.country_code,
            name: favorite.name,
            flag: favorite.flag,
            created_at,
        }
    }
}

/// Add-favorite request body as it arrives on the wire. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub country_code: Option<String>,
    pub name: Option<String>,
    pub flag: Option<String>,
}

/// A validated add request. Only obtainable through [`NewFavorite::try_from`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
    country_code: String,
    name: String,
    flag: String,
}

impl NewFavorite {
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }
}

impl TryFrom<AddFavoriteRequest> for NewFavorite {
    type Error = FavoritesError;

    fn try_from(req: AddFavoriteRequest) -> Result<Self> {
        match (
            present_text(req.country_code.as_deref()),
            present_text(req.name.as_deref()),
            present_text(req.flag.as_deref()),
        ) {
            (Some(country_code), Some(name), Some(flag)) => Ok(Self {
                country_code: country_code.to_string(),
                name: name.to_string(),
                flag: flag.to_string(),
            }),
            _ => Err(FavoritesError::invalid_input(MSG_REQUIRED_FIELDS)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
