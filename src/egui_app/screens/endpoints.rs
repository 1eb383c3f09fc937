//! Endpoint inspector (admin)
//!
//! Shows the backend's self-description from `GET /`, grouped by category.
//! At most one category is expanded at a time.

use tracing::warn;

use super::lifecycle::RequestSlot;
use super::ScreenContext;
use crate::shared::models::ApiDescription;

pub struct EndpointsScreen {
    api: Option<ApiDescription>,
    expanded: Option<String>,
    load: RequestSlot<ApiDescription>,
    pub notice: Option<String>,
}

impl EndpointsScreen {
    pub fn open(ctx: &ScreenContext) -> Self {
        let mut screen = Self {
            api: None,
            expanded: None,
            load: RequestSlot::default(),
            notice: None,
        };
        screen.refresh(ctx);
        screen
    }

    pub fn description(&self) -> Option<&ApiDescription> {
        self.api.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_busy()
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, category: &str) -> bool {
        self.expanded.as_deref() == Some(category)
    }

    /// Expand `category`, collapsing any other; collapse it if already open
    pub fn toggle(&mut self, category: &str) {
        if self.is_expanded(category) {
            self.expanded = None;
        } else {
            self.expanded = Some(category.to_string());
        }
    }

    /// Full URL for a path listed under the backend's base URL
    pub fn full_url(&self, path: &str) -> String {
        match &self.api {
            Some(api) => format!("{}{}", api.base_url, path),
            None => path.to_string(),
        }
    }

    pub fn refresh(&mut self, ctx: &ScreenContext) {
        let api = ctx.api.clone();
        self.load.start(&ctx.runtime, async move {
            api.fetch_endpoints().await.map(|listing| listing.api)
        });
    }

    pub fn poll(&mut self, _ctx: &ScreenContext) -> bool {
        match self.load.poll() {
            Some(Ok(api)) => {
                if let Some(open) = &self.expanded {
                    if !api.endpoints.contains_key(open) {
                        self.expanded = None;
                    }
                }
                self.api = Some(api);
                self.notice = None;
                true
            }
            Some(Err(e)) => {
                warn!(error = %e, "failed to fetch endpoint listing");
                self.notice = Some(e.notice());
                true
            }
            None => false,
        }
    }
}
