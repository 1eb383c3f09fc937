//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Mock backend helpers (wiremock)
//! - Session store fixtures, including a store that always fails
//! - Payload fixtures for users, orders and products
//! - Custom assertion macros

#[macro_use]
pub mod assertions;
pub mod fixtures;
pub mod stores;

pub use fixtures::*;
pub use stores::*;
