//! MarketSquare - Storefront Client Library
//!
//! A desktop client for the MarketSquare storefront backend with customer
//! and admin roles.
//!
//! # Overview
//!
//! - Session context with a persisted session record that survives restarts
//! - Role-gated navigation: admin tabs or customer tabs, each with its own stack
//! - Typed API client attaching `Authorization: Bearer` and `role` headers
//! - Native desktop UI via egui
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic types
//!   - Backend payloads, roles, configuration
//!   - Error types
//!
//! - **`egui_app`** - Native desktop client (egui/eframe)
//!   - Persisted store, API client, session context
//!   - Navigation composer and screens
//!   - Views and theme
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use marketsquare::egui_app::{Config, MemoryStore, SessionContext};
//!
//! # async fn example() -> Result<(), marketsquare::shared::ClientError> {
//! let context = SessionContext::new(Config::new(), Arc::new(MemoryStore::new()));
//! context.restore().await;
//! let session = context.sign_in("alice", "secret").await?;
//! assert!(session.is_authenticated());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, ClientError>` for every fallible client operation
//! - `ConfigError` for configuration loading
//! - Errors are shown as notices; none are fatal to the process

/// Shared types and data structures
pub mod shared;

/// egui native desktop client
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
