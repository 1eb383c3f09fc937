//! Session Context
//!
//! Holds the authenticated identity for the running client and is the only
//! writer of the persisted session record. It is an ordinary value passed by
//! reference (usually behind an `Arc`) to navigation and screens; there is
//! no process-wide singleton.
//!
//! ## Lifecycle
//!
//! ```text
//! start ──restore()──▶ Anonymous ──sign_in/sign_up──▶ Authenticated
//!                          ▲                               │
//!                          └───────────sign_out────────────┘
//! ```
//!
//! Until `restore()` resolves, observers see `None` from `subscribe()` so the
//! navigation layer can hold a loading state instead of flashing the login
//! screen.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use crate::egui_app::api::ApiClient;
use crate::egui_app::config::Config;
use crate::egui_app::storage::{KeyValueStore, SessionRecord};
use crate::shared::error::ClientError;
use crate::shared::models::{AuthResponse, RegisterRequest, UserProfile};
use crate::shared::role::{Role, CUSTOMER_ROLE};

/// Bearer token; never printed by `Debug` or `Display`
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Use only when attaching to a request or persisting
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(••••••••)")
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "••••••••")
    }
}

/// Authenticated identity. Token and role exist together or not at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        user: UserProfile,
        role: Role,
        token: AuthToken,
    },
}

impl Session {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<&Role> {
        match self {
            Session::Authenticated { role, .. } => Some(role),
            Session::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn is_admin(&self) -> bool {
        is_admin(self)
    }

    fn from_record(record: &SessionRecord) -> Option<Self> {
        let user: UserProfile = match serde_json::from_str(&record.user_json) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "persisted user profile is malformed");
                return None;
            }
        };
        Some(Session::Authenticated {
            user,
            role: Role::from(record.role.as_str()),
            token: AuthToken::new(record.token.clone()),
        })
    }

    fn to_record(&self) -> Result<Option<SessionRecord>, ClientError> {
        match self {
            Session::Anonymous => Ok(None),
            Session::Authenticated { user, role, token } => Ok(Some(SessionRecord {
                token: token.expose().to_string(),
                role: role.as_str().to_string(),
                user_json: serde_json::to_string(user)?,
            })),
        }
    }
}

/// Whether the session may reach admin screens and admin calls
pub fn is_admin(session: &Session) -> bool {
    session.role().is_some_and(Role::is_admin)
}

/// Process-wide session state, injected where needed
pub struct SessionContext {
    api: ApiClient,
    store: Arc<dyn KeyValueStore>,
    state: watch::Sender<Option<Session>>,
    writer: Mutex<()>,
}

impl SessionContext {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            api: ApiClient::new(config, Arc::clone(&store)),
            store,
            state,
            writer: Mutex::new(()),
        }
    }

    /// API client sharing this context's store
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Current session; `Anonymous` while the startup restore is pending
    pub fn current(&self) -> Session {
        self.state.borrow().clone().unwrap_or_default()
    }

    pub fn is_restored(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Observe changes; `None` means the startup restore has not resolved
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    /// Startup hook: repopulate from the persisted record without
    /// contacting the backend. Never fails; a missing or malformed record
    /// leaves the session empty.
    pub async fn restore(&self) -> Session {
        let _guard = self.writer.lock().await;
        let existing = self.state.borrow().clone();
        if let Some(session) = existing {
            return session;
        }

        let session = match SessionRecord::load(self.store.as_ref()).await {
            Ok(Some(record)) => Session::from_record(&record).unwrap_or_default(),
            Ok(None) => Session::Anonymous,
            Err(e) => {
                warn!(error = %e, "could not read persisted session");
                Session::Anonymous
            }
        };

        info!(
            authenticated = session.is_authenticated(),
            role = session.role().map(Role::as_str).unwrap_or("-"),
            "session restored"
        );
        self.state.send_replace(Some(session.clone()));
        session
    }

    /// Log in; on failure the previous session is left untouched
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let _guard = self.writer.lock().await;
        let response = self.api.login(username, password).await.map_err(|e| {
            warn!(username, error = %e, "sign in failed");
            e
        })?;
        self.establish(response, None).await
    }

    /// Register and log in with the returned credentials
    pub async fn sign_up(&self, request: RegisterRequest) -> Result<Session, ClientError> {
        let _guard = self.writer.lock().await;
        let response = self.api.register(&request).await.map_err(|e| {
            warn!(username = %request.username, error = %e, "sign up failed");
            e
        })?;
        self.establish(response, request.role.as_deref()).await
    }

    /// Clear the in-memory session and the persisted record. Idempotent.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let _guard = self.writer.lock().await;
        self.state.send_replace(Some(Session::Anonymous));
        SessionRecord::clear(self.store.as_ref()).await.map_err(|e| {
            warn!(error = %e, "could not clear persisted session");
            e
        })?;
        info!("signed out");
        Ok(())
    }

    /// Persist first, then publish, so memory never runs ahead of the store
    async fn establish(
        &self,
        response: AuthResponse,
        requested_role: Option<&str>,
    ) -> Result<Session, ClientError> {
        if response.token.trim().is_empty() {
            return Err(ClientError::authentication("backend returned an empty token"));
        }

        let role = Role::from(
            response
                .user
                .role()
                .as_deref()
                .filter(|r| !r.is_empty())
                .or(requested_role.filter(|r| !r.is_empty()))
                .unwrap_or(CUSTOMER_ROLE),
        );

        let session = Session::Authenticated {
            user: response.user,
            role,
            token: AuthToken::new(response.token),
        };

        if let Some(record) = session.to_record()? {
            record.save(self.store.as_ref()).await.map_err(|e| {
                warn!(error = %e, "could not persist session");
                e
            })?;
        }

        info!(
            username = %session.user().map(|u| u.username()).unwrap_or_default(),
            role = session.role().map(Role::as_str).unwrap_or_default(),
            "signed in"
        );
        self.state.send_replace(Some(session.clone()));
        Ok(session)
    }
}
