//! Manage-users screen (admin)

use tracing::warn;

use super::lifecycle::RequestSlot;
use super::ScreenContext;
use crate::shared::models::UserSummary;

pub struct UsersScreen {
    users: Vec<UserSummary>,
    loaded: bool,
    /// Local search over username, names and email
    pub search: String,
    load: RequestSlot<Vec<UserSummary>>,
    pub notice: Option<String>,
}

impl UsersScreen {
    pub fn open(ctx: &ScreenContext) -> Self {
        let mut screen = Self {
            users: Vec::new(),
            loaded: false,
            search: String::new(),
            load: RequestSlot::default(),
            notice: None,
        };
        screen.refresh(ctx);
        screen
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_busy()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn users(&self) -> &[UserSummary] {
        &self.users
    }

    /// Users matching `search`, case-insensitively
    pub fn visible_users(&self) -> Vec<&UserSummary> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.users.iter().collect();
        }
        self.users
            .iter()
            .filter(|user| {
                [
                    Some(user.username.as_str()),
                    user.first_name.as_deref(),
                    user.last_name.as_deref(),
                    user.email.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn refresh(&mut self, ctx: &ScreenContext) {
        let api = ctx.api.clone();
        self.load
            .start(&ctx.runtime, async move { api.fetch_admin_users().await });
    }

    pub fn poll(&mut self, _ctx: &ScreenContext) -> bool {
        match self.load.poll() {
            Some(Ok(users)) => {
                self.users = users;
                self.loaded = true;
                self.notice = None;
                true
            }
            Some(Err(e)) => {
                warn!(error = %e, "failed to fetch users");
                self.notice = Some(e.notice());
                true
            }
            None => false,
        }
    }
}
