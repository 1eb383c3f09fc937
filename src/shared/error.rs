//! Shared Error Types
//!
//! Every fallible client operation (API calls, session mutations, persisted
//! store access) reports a [`ClientError`]. Screens catch these at their
//! boundary and show [`ClientError::notice`]; nothing here is fatal to the
//! process.
//!
//! # Error Categories
//!
//! - `Authentication` - login rejected by the backend
//! - `Registration` - register rejected (validation, duplicate user)
//! - `Transport` - network, timeout or TLS failure
//! - `NotFound` - the requested order/product/user does not exist
//! - `Http` - any other non-success status
//! - `NotAuthenticated` - no persisted credentials for an authenticated call
//! - `Storage` - the persisted session store failed
//! - `Serialization` - a payload could not be encoded or decoded
//!
//! # Usage
//!
//! ```rust
//! use marketsquare::shared::error::ClientError;
//!
//! let error = ClientError::not_found("order 42");
//! assert_eq!(error.notice(), "Not found: order 42");
//! ```
use thiserror::Error;

/// Errors surfaced by the API client, the session context and the store
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// Bad credentials or a rejected login
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Human-readable error message
        message: String,
    },

    /// Backend refused the registration
    #[error("Registration failed: {message}")]
    Registration {
        /// Backend-supplied message when available
        message: String,
    },

    /// Network, timeout or TLS failure
    #[error("Network error: {message}")]
    Transport {
        /// Human-readable error message
        message: String,
    },

    /// Missing order, product or user
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Non-success status that has no more specific category
    #[error("Request failed: {status} - {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// An authenticated call was attempted without persisted credentials
    #[error("Not signed in")]
    NotAuthenticated,

    /// Durable session store failure
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable error message
        message: String,
    },

    /// JSON encoding or decoding failure
    #[error("Serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },
}

impl ClientError {
    /// Create a new authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a new registration error
    pub fn registration(message: impl Into<String>) -> Self {
        Self::Registration {
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a new HTTP status error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Short message suitable for a user-facing notice
    pub fn notice(&self) -> String {
        match self {
            Self::Authentication { .. } => "Login failed.".to_string(),
            Self::Registration { message } if message.is_empty() => "Signup failed.".to_string(),
            Self::Registration { message } => format!("Signup failed: {}", message),
            Self::Transport { .. } => "Could not reach the server. Check your connection.".to_string(),
            Self::NotFound { resource } => format!("Not found: {}", resource),
            Self::Http { status, .. } => format!("The server returned an error ({}).", status),
            Self::NotAuthenticated => "Please sign in again.".to_string(),
            Self::Storage { .. } => "Could not save your session on this device.".to_string(),
            Self::Serialization { .. } => "The server sent an unexpected response.".to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        Self::storage(err.to_string())
    }
}
