//! egui Native Desktop Client
//!
//! The storefront client: session handling, role-gated navigation, the API
//! client and the egui views on top of them.
//!
//! # Architecture
//!
//! - **`config`** - Runtime configuration (server URL, store location)
//! - **`storage`** - Persisted key-value store holding the session record
//! - **`api`** - Typed async client for the storefront backend
//! - **`session`** - Session context: sign in, sign up, sign out, restore
//! - **`navigation`** - Restoring / unauthenticated / role-specific tabs
//! - **`screens`** - Per-screen state with lifecycle-bound requests
//! - **`state`** - `AppState`, owned by the egui app
//! - **`views`** - egui rendering
//! - **`theme`** - Colors and frames
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs         - Module exports and documentation
//! ├── main.rs        - Binary entry point
//! ├── config.rs      - Configuration
//! ├── storage.rs     - Persisted session store
//! ├── api.rs         - API client
//! ├── session.rs     - Session context
//! ├── navigation.rs  - Navigation composer
//! ├── screens/       - Screen models
//! ├── state/         - AppState
//! ├── views/         - egui views
//! └── theme/         - Colors and styles
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the desktop client:
//! // cargo run --bin marketsquare
//! ```

pub mod api;
pub mod config;
pub mod navigation;
pub mod screens;
pub mod session;
pub mod state;
pub mod storage;
pub mod theme;
pub mod views;

// Re-export commonly used types
pub use api::{ApiClient, ROLE_HEADER};
pub use config::Config;
pub use navigation::{NavState, Navigator, Route, Tab, TabSet};
pub use session::{is_admin, AuthToken, Session, SessionContext};
pub use state::{Action, AppState};
pub use storage::{KeyValueStore, MemoryStore, SessionRecord, SqliteStore};
