use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::egui_app::navigation::{NavState, Navigator, Route, Tab};
use crate::egui_app::screens::{Cart, Pending, Screen, ScreenContext, ScreenHost};
use crate::egui_app::session::{Session, SessionContext};
use crate::egui_app::storage::KeyValueStore;
use crate::egui_app::Config;
use crate::shared::models::{Address, Product, RegisterRequest};
use crate::shared::role::CUSTOMER_ROLE;

/// Something a view asks the app to do once it has released its borrows
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Open(Route),
    Back,
    SelectTab(Tab),
    AddToCart(Product),
    SignOut,
}

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    runtime: Runtime,
    session: Arc<SessionContext>,
    session_rx: watch::Receiver<Option<Session>>,
    /// Last authenticated session the navigation was built for
    signed_in: Option<Session>,
    screen_ctx: ScreenContext,
    pub navigator: Navigator,
    pub screens: ScreenHost,
    pub cart: Cart,

    pub username_input: String,
    pub email_input: String,
    pub password_input: String,
    pub confirm_password_input: String,
    pub first_name_input: String,
    pub last_name_input: String,
    pub number_input: String,
    pub street_input: String,
    pub city_input: String,
    pub postcode_input: String,
    pub country_input: String,
    pub auth_error: Option<String>,
    pub auth_result: Option<Pending<Session>>,

    sign_out_result: Option<Pending<()>>,
    /// App-level notice shown in the top bar
    pub notice: Option<String>,
}

impl AppState {
    /// Wire everything together and start the session restore
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, runtime: Runtime) -> Self {
        let session = Arc::new(SessionContext::new(config.clone(), store));
        let session_rx = session.subscribe();
        let screen_ctx = ScreenContext {
            api: session.api().clone(),
            runtime: runtime.handle().clone(),
        };

        let restoring = Arc::clone(&session);
        runtime.spawn(async move {
            restoring.restore().await;
        });

        info!(server = config.server_url(), "AppState initialized");

        Self {
            config,
            runtime,
            session,
            session_rx,
            signed_in: None,
            screen_ctx,
            navigator: Navigator::new(),
            screens: ScreenHost::new(),
            cart: Cart::new(),
            username_input: String::new(),
            email_input: String::new(),
            password_input: String::new(),
            confirm_password_input: String::new(),
            first_name_input: String::new(),
            last_name_input: String::new(),
            number_input: String::new(),
            street_input: String::new(),
            city_input: String::new(),
            postcode_input: String::new(),
            country_input: String::new(),
            auth_error: None,
            auth_result: None,
            sign_out_result: None,
            notice: None,
        }
    }

    pub fn session(&self) -> Session {
        self.session.current()
    }

    pub fn screen_context(&self) -> &ScreenContext {
        &self.screen_ctx
    }

    pub fn is_signup_mode(&self) -> bool {
        matches!(self.navigator.current_route(), Some(Route::Signup))
    }

    pub fn is_auth_busy(&self) -> bool {
        self.auth_result.is_some()
    }

    /// Once per frame: apply finished requests and follow the session.
    /// Returns whether anything visible changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = self.check_auth_result();
        // Before the sign-out poll, so its notice outlives the session reset
        changed |= self.sync_session();

        if let Some(pending) = &self.sign_out_result {
            if let Some(result) = pending.poll() {
                self.sign_out_result = None;
                if let Err(e) = result {
                    self.notice = Some(e.notice());
                }
                changed = true;
            }
        }

        let session = self.session.current();
        self.screens
            .sync(&self.navigator.stacked_routes(), &session, &self.screen_ctx);
        changed |= self.screens.poll_all(&self.screen_ctx);
        changed |= self.finish_deleted_product();

        changed
    }

    pub fn check_auth_result(&mut self) -> bool {
        let Some(result) = self.auth_result.as_ref().and_then(Pending::poll) else {
            return false;
        };
        self.auth_result = None;

        match result {
            Ok(session) => {
                debug!(authenticated = session.is_authenticated(), "auth request finished");
                self.auth_error = None;
                self.clear_auth_inputs();
            }
            Err(e) => {
                warn!(error = %e, "authentication request failed");
                self.auth_error = Some(e.notice());
                self.password_input.clear();
                self.confirm_password_input.clear();
            }
        }
        true
    }

    pub fn handle_login(&mut self) {
        if self.is_auth_busy() {
            return;
        }
        if self.username_input.trim().is_empty() || self.password_input.is_empty() {
            self.auth_error = Some("Username and password are required".to_string());
            return;
        }

        self.auth_error = None;
        let session = Arc::clone(&self.session);
        let username = self.username_input.trim().to_string();
        let password = self.password_input.clone();

        self.auth_result = Some(Pending::spawn(self.runtime.handle(), async move {
            session.sign_in(&username, &password).await
        }));
    }

    pub fn handle_signup(&mut self) {
        if self.is_auth_busy() {
            return;
        }
        match self.signup_request() {
            Ok(request) => {
                self.auth_error = None;
                let session = Arc::clone(&self.session);
                self.auth_result = Some(Pending::spawn(self.runtime.handle(), async move {
                    session.sign_up(request).await
                }));
            }
            Err(message) => self.auth_error = Some(message),
        }
    }

    /// Validate the signup form into a registration payload
    pub fn signup_request(&self) -> Result<RegisterRequest, String> {
        let username = self.username_input.trim();
        let email = self.email_input.trim();

        if username.is_empty() {
            return Err("Username is required".to_string());
        }
        if email.is_empty() || self.password_input.is_empty() {
            return Err("Email and password are required".to_string());
        }
        if !email.contains('@') || !email.contains('.') {
            return Err("Please enter a valid email address".to_string());
        }
        if self.password_input != self.confirm_password_input {
            return Err("Passwords do not match".to_string());
        }

        let mut request = RegisterRequest::new(username, self.password_input.clone(), email)
            .with_role(CUSTOMER_ROLE);
        request.first_name = optional(&self.first_name_input);
        request.last_name = optional(&self.last_name_input);
        request.number = optional(&self.number_input);

        let address = Address {
            street: optional(&self.street_input),
            city: optional(&self.city_input),
            postcode: optional(&self.postcode_input),
            country: optional(&self.country_input),
        };
        if address != Address::default() {
            request = request.with_address(address);
        }
        Ok(request)
    }

    pub fn logout(&mut self) {
        if self.sign_out_result.is_some() {
            return;
        }
        // Cancel any sign-in still in flight
        self.auth_result = None;
        let session = Arc::clone(&self.session);
        self.sign_out_result = Some(Pending::spawn(self.runtime.handle(), async move {
            session.sign_out().await
        }));
    }

    pub fn toggle_auth_mode(&mut self) {
        let target = if self.is_signup_mode() {
            Route::Login
        } else {
            Route::Signup
        };
        if self.navigator.push(target).is_ok() {
            self.auth_error = None;
            self.password_input.clear();
            self.confirm_password_input.clear();
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if let Err(e) = self.navigator.select_tab(tab) {
            warn!(error = %e, "tab not available");
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Open(route) => {
                if let Err(e) = self.navigator.push(route) {
                    warn!(error = %e, "navigation refused");
                    self.notice = Some(e.to_string());
                }
            }
            Action::Back => {
                self.navigator.pop();
            }
            Action::SelectTab(tab) => self.select_tab(tab),
            Action::AddToCart(product) => {
                self.notice = Some(format!("Added {} to cart", product.item_name));
                self.cart.add(&product);
            }
            Action::SignOut => self.logout(),
        }
    }

    fn sync_session(&mut self) -> bool {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return false;
        }
        let snapshot = self.session_rx.borrow_and_update().clone();
        let was_authenticated = matches!(self.navigator.state(), NavState::Authenticated { .. });

        let authenticated = snapshot.clone().filter(Session::is_authenticated);
        let switched =
            was_authenticated && authenticated.is_some() && authenticated != self.signed_in;
        self.signed_in = authenticated;
        if switched {
            debug!("session switched accounts, rebuilding navigation");
            self.navigator = Navigator::new();
        }

        if !self.navigator.sync(snapshot.as_ref()) {
            return false;
        }
        if was_authenticated {
            self.screens.clear();
        }
        if switched || !snapshot.as_ref().is_some_and(Session::is_authenticated) {
            self.cart.clear();
            self.notice = None;
        }
        true
    }

    fn finish_deleted_product(&mut self) -> bool {
        let Some(route @ Route::ProductDetails { item_id }) = self.navigator.current_route() else {
            return false;
        };
        let deleted = matches!(
            self.screens.get_mut(&route),
            Some(Screen::ProductDetails(screen)) if screen.is_deleted()
        );
        if !deleted {
            return false;
        }

        self.navigator.pop();
        self.screens.forget_product(item_id);
        self.cart.remove(item_id);
        self.notice = Some("Product deleted successfully.".to_string());
        true
    }

    fn clear_auth_inputs(&mut self) {
        for input in [
            &mut self.username_input,
            &mut self.email_input,
            &mut self.password_input,
            &mut self.confirm_password_input,
            &mut self.first_name_input,
            &mut self.last_name_input,
            &mut self.number_input,
            &mut self.street_input,
            &mut self.city_input,
            &mut self.postcode_input,
            &mut self.country_input,
        ] {
            input.clear();
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
