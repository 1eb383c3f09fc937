//! Navigation Composer
//!
//! Chooses what the user can see from the session alone:
//!
//! - `Restoring` until the startup restore resolves
//! - `Unauthenticated` (login / signup) when there is no session
//! - `Authenticated` with the admin or customer tab set, picked by
//!   [`is_admin`](crate::egui_app::session::is_admin)
//!
//! Each tab owns an independent stack of routes for drill-down screens.
//! Routes outside the active tab set are rejected, so the set of reachable
//! screens is decided here and nowhere else.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::egui_app::session::{is_admin, Session};

/// A navigable full-page view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    // admin
    Dashboard,
    AdminOrders,
    OrderDetails { order_id: i64 },
    AdminProducts,
    ManageUsers,
    Endpoints,
    // customer
    Home,
    Products,
    Cart,
    CustomerOrders,
    Profile,
    // shared drill-down
    ProductDetails { item_id: i64 },
}

impl Route {
    pub fn title(&self) -> String {
        match self {
            Route::Login => "Login".into(),
            Route::Signup => "Sign Up".into(),
            Route::Dashboard => "Dashboard".into(),
            Route::AdminOrders | Route::CustomerOrders => "Orders".into(),
            Route::OrderDetails { order_id } => format!("Order #{}", order_id),
            Route::AdminProducts | Route::Products => "Products".into(),
            Route::ManageUsers => "Manage Users".into(),
            Route::Endpoints => "API Endpoints".into(),
            Route::Home => "Home".into(),
            Route::Cart => "Cart".into(),
            Route::Profile => "Profile".into(),
            Route::ProductDetails { item_id } => format!("Product #{}", item_id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// Bottom-bar tab; each hosts its own route stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tab {
    Dashboard,
    AdminOrders,
    AdminProducts,
    ManageUsers,
    Endpoints,
    Home,
    Products,
    Cart,
    Orders,
    Profile,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::AdminOrders | Tab::Orders => "Orders",
            Tab::AdminProducts | Tab::Products => "Products",
            Tab::ManageUsers => "Users",
            Tab::Endpoints => "Endpoints",
            Tab::Home => "Home",
            Tab::Cart => "Cart",
            Tab::Profile => "Profile",
        }
    }

    /// Bottom of this tab's stack
    pub fn root(self) -> Route {
        match self {
            Tab::Dashboard => Route::Dashboard,
            Tab::AdminOrders => Route::AdminOrders,
            Tab::AdminProducts => Route::AdminProducts,
            Tab::ManageUsers => Route::ManageUsers,
            Tab::Endpoints => Route::Endpoints,
            Tab::Home => Route::Home,
            Tab::Products => Route::Products,
            Tab::Cart => Route::Cart,
            Tab::Orders => Route::CustomerOrders,
            Tab::Profile => Route::Profile,
        }
    }
}

const ADMIN_TABS: [Tab; 5] = [
    Tab::Dashboard,
    Tab::AdminOrders,
    Tab::AdminProducts,
    Tab::ManageUsers,
    Tab::Endpoints,
];

const CUSTOMER_TABS: [Tab; 5] = [Tab::Home, Tab::Products, Tab::Cart, Tab::Orders, Tab::Profile];

/// Which branch of the authenticated flow is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSet {
    Admin,
    Customer,
}

impl TabSet {
    /// `None` for an anonymous session
    pub fn for_session(session: &Session) -> Option<Self> {
        if !session.is_authenticated() {
            None
        } else if is_admin(session) {
            Some(TabSet::Admin)
        } else {
            Some(TabSet::Customer)
        }
    }

    pub fn tabs(self) -> &'static [Tab] {
        match self {
            TabSet::Admin => &ADMIN_TABS,
            TabSet::Customer => &CUSTOMER_TABS,
        }
    }

    pub fn allows(self, route: &Route) -> bool {
        match self {
            TabSet::Admin => matches!(
                route,
                Route::Dashboard
                    | Route::AdminOrders
                    | Route::OrderDetails { .. }
                    | Route::AdminProducts
                    | Route::ProductDetails { .. }
                    | Route::ManageUsers
                    | Route::Endpoints
            ),
            TabSet::Customer => matches!(
                route,
                Route::Home
                    | Route::Products
                    | Route::ProductDetails { .. }
                    | Route::Cart
                    | Route::CustomerOrders
                    | Route::Profile
            ),
        }
    }
}

/// Screen inside the unauthenticated flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRoute {
    Login,
    Signup,
}

impl From<AuthRoute> for Route {
    fn from(route: AuthRoute) -> Self {
        match route {
            AuthRoute::Login => Route::Login,
            AuthRoute::Signup => Route::Signup,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavState {
    /// Startup restore still pending
    Restoring,
    Unauthenticated {
        route: AuthRoute,
    },
    Authenticated {
        set: TabSet,
        active: Tab,
        stacks: BTreeMap<Tab, Vec<Route>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("not signed in")]
    NotAuthenticated,
    #[error("{route} is not available for this account")]
    Forbidden { route: Route },
    #[error("tab {tab:?} is not available for this account")]
    UnknownTab { tab: Tab },
}

/// Top-level navigation state machine
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    state: NavState,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            state: NavState::Restoring,
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Follow the session. `None` means the restore has not resolved yet.
    /// Returns whether the state changed.
    pub fn sync(&mut self, session: Option<&Session>) -> bool {
        let Some(session) = session else {
            return false;
        };

        match (TabSet::for_session(session), &self.state) {
            (None, NavState::Unauthenticated { .. }) => false,
            (None, _) => {
                debug!("navigation: unauthenticated");
                self.state = NavState::Unauthenticated {
                    route: AuthRoute::Login,
                };
                true
            }
            (Some(set), NavState::Authenticated { set: current, .. }) if set == *current => false,
            (Some(set), _) => {
                debug!(?set, "navigation: authenticated");
                let stacks = set
                    .tabs()
                    .iter()
                    .map(|tab| (*tab, vec![tab.root()]))
                    .collect();
                self.state = NavState::Authenticated {
                    set,
                    active: set.tabs()[0],
                    stacks,
                };
                true
            }
        }
    }

    pub fn is_restoring(&self) -> bool {
        matches!(self.state, NavState::Restoring)
    }

    pub fn tab_set(&self) -> Option<TabSet> {
        match &self.state {
            NavState::Authenticated { set, .. } => Some(*set),
            _ => None,
        }
    }

    /// Tabs shown in the bar; empty outside the authenticated flow
    pub fn visible_tabs(&self) -> &'static [Tab] {
        self.tab_set().map(TabSet::tabs).unwrap_or(&[])
    }

    pub fn active_tab(&self) -> Option<Tab> {
        match &self.state {
            NavState::Authenticated { active, .. } => Some(*active),
            _ => None,
        }
    }

    /// Route on top of the visible stack
    pub fn current_route(&self) -> Option<Route> {
        match &self.state {
            NavState::Restoring => None,
            NavState::Unauthenticated { route } => Some((*route).into()),
            NavState::Authenticated { active, stacks, .. } => {
                stacks.get(active).and_then(|stack| stack.last().copied())
            }
        }
    }

    pub fn stack(&self, tab: Tab) -> Option<&[Route]> {
        match &self.state {
            NavState::Authenticated { stacks, .. } => stacks.get(&tab).map(Vec::as_slice),
            _ => None,
        }
    }

    /// Every route on any tab stack, in tab order
    pub fn stacked_routes(&self) -> Vec<Route> {
        match &self.state {
            NavState::Authenticated { stacks, .. } => {
                stacks.values().flatten().copied().collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn is_reachable(&self, route: &Route) -> bool {
        match &self.state {
            NavState::Restoring => false,
            NavState::Unauthenticated { .. } => matches!(route, Route::Login | Route::Signup),
            NavState::Authenticated { set, .. } => set.allows(route),
        }
    }

    pub fn select_tab(&mut self, tab: Tab) -> Result<(), NavigationError> {
        match &mut self.state {
            NavState::Authenticated { set, active, .. } => {
                if !set.tabs().contains(&tab) {
                    return Err(NavigationError::UnknownTab { tab });
                }
                *active = tab;
                Ok(())
            }
            _ => Err(NavigationError::NotAuthenticated),
        }
    }

    /// Open `route` on top of the active stack
    pub fn push(&mut self, route: Route) -> Result<(), NavigationError> {
        match &mut self.state {
            NavState::Restoring => Err(NavigationError::NotAuthenticated),
            NavState::Unauthenticated { route: current } => {
                *current = match route {
                    Route::Login => AuthRoute::Login,
                    Route::Signup => AuthRoute::Signup,
                    _ => return Err(NavigationError::NotAuthenticated),
                };
                Ok(())
            }
            NavState::Authenticated {
                set,
                active,
                stacks,
            } => {
                if !set.allows(&route) {
                    return Err(NavigationError::Forbidden { route });
                }
                let stack = stacks.entry(*active).or_default();
                if stack.last() != Some(&route) {
                    stack.push(route);
                }
                Ok(())
            }
        }
    }

    /// Go back one screen; never pops a tab's root. Returns whether it moved.
    pub fn pop(&mut self) -> bool {
        match &mut self.state {
            NavState::Unauthenticated { route } if *route == AuthRoute::Signup => {
                *route = AuthRoute::Login;
                true
            }
            NavState::Authenticated { active, stacks, .. } => match stacks.get_mut(active) {
                Some(stack) if stack.len() > 1 => {
                    stack.pop();
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Drop back to the root of the active tab
    pub fn pop_to_root(&mut self) {
        if let NavState::Authenticated { active, stacks, .. } = &mut self.state {
            if let Some(stack) = stacks.get_mut(active) {
                stack.truncate(1);
            }
        }
    }
}
