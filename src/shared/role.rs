//! User roles
//!
//! The backend hands out free-form role strings. Only `"admin"` unlocks the
//! admin screens; every other value is treated as a customer for navigation
//! purposes but is kept verbatim so it round-trips through the store and the
//! `role` request header.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role string granting the admin screen set
pub const ADMIN_ROLE: &str = "admin";

/// Role assumed when the backend does not report one
pub const CUSTOMER_ROLE: &str = "customer";

/// Role attached to a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Customer,
    /// Any other backend role; navigates as a customer
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => ADMIN_ROLE,
            Role::Customer => CUSTOMER_ROLE,
            Role::Other(role) => role,
        }
    }

    /// The one capability check for admin-only screens and calls
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            ADMIN_ROLE => Role::Admin,
            CUSTOMER_ROLE => Role::Customer,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
