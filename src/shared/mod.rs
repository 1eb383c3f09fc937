//! Shared Module
//!
//! Platform-agnostic types used by the client: backend payloads, the error
//! taxonomy, roles and configuration. Nothing here performs I/O except
//! reading the optional config file.

/// Client error taxonomy
pub mod error;

/// Application configuration
pub mod config;

/// Typed backend payloads
pub mod models;

/// User roles and the admin capability check
pub mod role;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::ClientError;
pub use models::{
    Address, AuthResponse, EndpointListing, NewProduct, Order, OrderUpdate, Product,
    ProductFilters, ProductUpdate, RegisterRequest, UserProfile, UserSummary,
};
pub use role::Role;
