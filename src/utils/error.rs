use thiserror::Error;

pub const MSG_REQUIRED_FIELDS: &str = "Country code, name, and flag are required";
pub const MSG_ALREADY_EXISTS: &str = "Country already in favorites";
pub const MSG_NOT_FOUND: &str = "Favorite not found";
pub const MSG_UNAUTHORIZED: &str = "Not authorized, no token";

/// Errors raised by a `FavoriteStore` backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate favorite: {owner_id}/{country_code}")]
    ConstraintViolation {
        owner_id: String,
        country_code: String,
    },

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{}", MSG_ALREADY_EXISTS)]
    AlreadyExists,

    #[error("{}", MSG_NOT_FOUND)]
    NotFound,

    #[error("{}", MSG_UNAUTHORIZED)]
    Unauthorized,

    #[error("{0}")]
    StorageFault(#[from] StoreError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FavoritesError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 儲存層的唯一性衝突在服務層視為重複收藏，不是伺服器錯誤
    pub fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::ConstraintViolation { .. } => Self::AlreadyExists,
            other => Self::StorageFault(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, FavoritesError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
