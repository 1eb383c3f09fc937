//! Screens
//!
//! Per-screen state for every route in the authenticated flow. A screen is
//! mounted when its route enters a navigation stack and dropped when the
//! route leaves it; dropping a screen cancels its outstanding requests.
//!
//! - `orders` - order list (admin / customer) and order details
//! - `products` - product list with filters and product details
//! - `users` - admin user list
//! - `endpoints` - backend endpoint inspector
//! - `cart` - local cart, owned by `AppState` rather than a screen
//! - `lifecycle` - `CancelToken`, `Pending` and `RequestSlot`

use std::collections::HashMap;

use tokio::runtime::Handle;
use tracing::debug;

use crate::egui_app::api::ApiClient;
use crate::egui_app::navigation::Route;
use crate::egui_app::session::{is_admin, Session};

pub mod cart;
pub mod endpoints;
pub mod lifecycle;
pub mod orders;
pub mod products;
pub mod users;

pub use cart::{Cart, CartLine};
pub use endpoints::EndpointsScreen;
pub use lifecycle::{CancelToken, Pending, RequestSlot};
pub use orders::{OrderDetailsScreen, OrderForm, OrderScope, OrdersScreen};
pub use products::{FilterForm, ProductDetailsScreen, ProductForm, ProductScope, ProductsScreen};
pub use users::UsersScreen;

/// What a screen needs to issue requests
#[derive(Clone)]
pub struct ScreenContext {
    pub api: ApiClient,
    pub runtime: Handle,
}

pub enum Screen {
    Orders(OrdersScreen),
    OrderDetails(OrderDetailsScreen),
    Products(ProductsScreen),
    ProductDetails(ProductDetailsScreen),
    Users(UsersScreen),
    Endpoints(EndpointsScreen),
    /// Rendered from the session (and cart) alone
    Static,
}

impl Screen {
    /// Build the screen for `route` and start its initial fetch. `None` for
    /// routes of the unauthenticated flow.
    pub fn mount(route: Route, session: &Session, ctx: &ScreenContext) -> Option<Self> {
        let screen = match route {
            Route::Login | Route::Signup => return None,
            Route::Dashboard | Route::Home | Route::Cart | Route::Profile => Screen::Static,
            Route::AdminOrders => Screen::Orders(OrdersScreen::open(OrderScope::Admin, ctx)),
            Route::CustomerOrders => Screen::Orders(OrdersScreen::open(OrderScope::Customer, ctx)),
            Route::OrderDetails { order_id } => {
                Screen::OrderDetails(OrderDetailsScreen::open(order_id, ctx))
            }
            Route::AdminProducts => {
                Screen::Products(ProductsScreen::open(ProductScope::Admin, ctx))
            }
            Route::Products => Screen::Products(ProductsScreen::open(ProductScope::Catalogue, ctx)),
            Route::ProductDetails { item_id } => Screen::ProductDetails(
                ProductDetailsScreen::open(item_id, is_admin(session), ctx),
            ),
            Route::ManageUsers => Screen::Users(UsersScreen::open(ctx)),
            Route::Endpoints => Screen::Endpoints(EndpointsScreen::open(ctx)),
        };
        Some(screen)
    }

    /// Apply finished requests; returns whether anything changed
    pub fn poll(&mut self, ctx: &ScreenContext) -> bool {
        match self {
            Screen::Orders(screen) => screen.poll(ctx),
            Screen::OrderDetails(screen) => screen.poll(ctx),
            Screen::Products(screen) => screen.poll(ctx),
            Screen::ProductDetails(screen) => screen.poll(ctx),
            Screen::Users(screen) => screen.poll(ctx),
            Screen::Endpoints(screen) => screen.poll(ctx),
            Screen::Static => false,
        }
    }
}

/// Screens for every route currently on a navigation stack
#[derive(Default)]
pub struct ScreenHost {
    screens: HashMap<Route, Screen>,
}

impl ScreenHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount screens for new routes and drop those no longer stacked
    pub fn sync(&mut self, routes: &[Route], session: &Session, ctx: &ScreenContext) {
        let before = self.screens.len();
        self.screens.retain(|route, _| routes.contains(route));
        if self.screens.len() != before {
            debug!(dropped = before - self.screens.len(), "unmounted screens");
        }

        for route in routes {
            if !self.screens.contains_key(route) {
                if let Some(screen) = Screen::mount(*route, session, ctx) {
                    debug!(%route, "mounted screen");
                    self.screens.insert(*route, screen);
                }
            }
        }
    }

    pub fn get_mut(&mut self, route: &Route) -> Option<&mut Screen> {
        self.screens.get_mut(route)
    }

    pub fn is_mounted(&self, route: &Route) -> bool {
        self.screens.contains_key(route)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn poll_all(&mut self, ctx: &ScreenContext) -> bool {
        self.screens
            .values_mut()
            .fold(false, |changed, screen| screen.poll(ctx) | changed)
    }

    /// Remove a deleted product from every mounted product list
    pub fn forget_product(&mut self, item_id: i64) {
        for screen in self.screens.values_mut() {
            if let Screen::Products(list) = screen {
                list.remove_product(item_id);
            }
        }
    }

    /// Drop everything, cancelling outstanding requests
    pub fn clear(&mut self) {
        self.screens.clear();
    }
}
