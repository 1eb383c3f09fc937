//! Integration tests
//!
//! Client, session and screens against a mock backend

mod api_test;
mod config_test;
mod screens_test;
mod session_test;
