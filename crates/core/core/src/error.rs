//! Error types for Modrelay.
//!
//! This module defines the `RelayError` enum covering settings parsing and
//! content-lookup failures. Delivery errors have their own taxonomy in the
//! webhooks crate.

use thiserror::Error;

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// The main error type for settings and content-lookup operations.
#[derive(Debug, Error)]
pub enum RelayError {
    // ==================== Settings Errors ====================
    /// A required setting is missing.
    #[error("Missing required setting: {key}")]
    MissingSetting { key: String },

    /// A setting value could not be parsed.
    #[error("Invalid value for setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    // ==================== Content Lookup Errors ====================
    /// A content lookup against the platform failed.
    ///
    /// Covers permission and transport errors alike; callers that gate on
    /// lookups treat this as "assume visible".
    #[error("Content lookup failed: {message}")]
    Lookup { message: String },

    /// The requested content does not exist (or is not accessible).
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
}

impl RelayError {
    /// Creates a `MissingSetting` error.
    pub fn missing_setting(key: impl Into<String>) -> Self {
        RelayError::MissingSetting { key: key.into() }
    }

    /// Creates an `InvalidSetting` error.
    pub fn invalid_setting(key: impl Into<String>, reason: impl Into<String>) -> Self {
        RelayError::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `Lookup` error.
    pub fn lookup(message: impl Into<String>) -> Self {
        RelayError::Lookup {
            message: message.into(),
        }
    }

    /// Creates a `NotFound` error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        RelayError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}
