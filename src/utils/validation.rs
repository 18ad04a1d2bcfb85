use crate::utils::error::{FavoritesError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Returns the value when it is present and not blank.
pub fn present_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FavoritesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FavoritesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FavoritesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FavoritesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 路由前綴必須以 `/` 開頭且不可以 `/` 結尾（根路徑用空字串表示）
pub fn validate_route_prefix(field_name: &str, prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Ok(());
    }

    if !prefix.starts_with('/') || prefix.ends_with('/') {
        return Err(FavoritesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Prefix must start with '/' and must not end with '/'".to_string(),
        });
    }

    if prefix.contains(char::is_whitespace) {
        return Err(FavoritesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Prefix cannot contain whitespace".to_string(),
        });
    }

    Ok(())
}

pub fn validate_header_name(field_name: &str, header: &str) -> Result<()> {
    validate_non_empty_string(field_name, header)?;

    if axum::http::HeaderName::from_bytes(header.as_bytes()).is_err() {
        return Err(FavoritesError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: header.to_string(),
            reason: "Not a valid HTTP header name".to_string(),
        });
    }

    Ok(())
}
