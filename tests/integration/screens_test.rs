//! Screen integration tests
//!
//! Screens run their requests on a tokio runtime and are polled from the
//! test thread, the same way the egui frame loop drives them.

use marketsquare::egui_app::navigation::{Navigator, Route, Tab};
use marketsquare::egui_app::screens::{
    OrderDetailsScreen, OrderScope, OrdersScreen, ProductDetailsScreen, ProductScope,
    ProductsScreen, Screen, ScreenContext, ScreenHost,
};
use marketsquare::egui_app::{ApiClient, SessionContext};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

struct Harness {
    ctx: ScreenContext,
    server: MockServer,
    runtime: Runtime,
}

impl Harness {
    fn new(role: &str) -> Self {
        let runtime = Runtime::new().expect("runtime");
        let server = runtime.block_on(MockServer::start());
        let store = runtime.block_on(seeded_store("tester", role, "tok123"));
        let ctx = ScreenContext {
            api: ApiClient::new(config_for(&server), store),
            runtime: runtime.handle().clone(),
        };
        Self {
            ctx,
            server,
            runtime,
        }
    }

    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }
}

#[test]
fn test_orders_refresh_failure_keeps_list() {
    let harness = Harness::new("admin");
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/admin/orders"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([order_json(1, "Processing")])),
            )
            .up_to_n_times(1),
    );
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/admin/orders"))
            .respond_with(ResponseTemplate::new(500)),
    );

    let mut screen = OrdersScreen::open(OrderScope::Admin, &harness.ctx);
    assert!(screen.is_loading());
    poll_until(|| {
        screen.poll(&harness.ctx);
        screen.is_loaded()
    });
    assert_eq!(screen.orders().len(), 1);
    assert_eq!(screen.notice, None);

    screen.refresh(&harness.ctx);
    poll_until(|| {
        screen.poll(&harness.ctx);
        !screen.is_loading()
    });
    assert_eq!(screen.orders().len(), 1);
    assert_eq!(
        screen.notice.as_deref(),
        Some("The server returned an error (500).")
    );
}

#[test]
fn test_order_details_update_refetches() {
    let harness = Harness::new("admin");
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/admin/orders/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json(42, "Processing")))
            .up_to_n_times(1),
    );
    harness.mount(
        Mock::given(method("PATCH"))
            .and(path("/api/admin/orders/42"))
            .and(body_partial_json(json!({
                "status": "Shipped",
                "payment_status": "Paid",
                "shipping_cost": 4.5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .expect(1),
    );
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/admin/orders/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json(42, "Shipped"))),
    );

    let mut screen = OrderDetailsScreen::open(42, &harness.ctx);
    poll_until(|| {
        screen.poll(&harness.ctx);
        screen.order().is_some()
    });
    assert_eq!(screen.form.status, "Processing");
    assert_eq!(screen.form.shipping_cost, "4.50");

    screen.form.status = "Shipped".to_string();
    assert!(screen.submit(&harness.ctx));
    assert!(!screen.submit(&harness.ctx), "second submit while saving");

    poll_until(|| {
        screen.poll(&harness.ctx);
        screen.order().map(|o| o.status.as_str()) == Some("Shipped")
    });
    assert_eq!(screen.success.as_deref(), Some("Order updated successfully."));
    assert_eq!(screen.form.status, "Shipped");
}

#[test]
fn test_order_form_rejects_blank_fields() {
    let harness = Harness::new("admin");
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/admin/orders/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json(42, "Processing"))),
    );

    let mut screen = OrderDetailsScreen::open(42, &harness.ctx);
    poll_until(|| {
        screen.poll(&harness.ctx);
        screen.order().is_some()
    });

    screen.form.shipping_cost.clear();
    assert!(!screen.submit(&harness.ctx));
    assert_eq!(
        screen.notice.as_deref(),
        Some("All fields are required to update.")
    );
    assert!(!screen.is_saving());
}

#[test]
fn test_catalogue_filters() {
    let harness = Harness::new("customer");
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/product"))
            .and(query_param("category", "Books"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([product_json(5, "rust book", "Books", 30.0)])),
            ),
    );
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/product"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                product_json(5, "rust book", "Books", 30.0),
                product_json(9, "lamp", "Home", 19.99)
            ]))),
    );

    let mut screen = ProductsScreen::open(ProductScope::Catalogue, &harness.ctx);
    poll_until(|| {
        screen.poll(&harness.ctx);
        screen.is_loaded()
    });
    assert_eq!(screen.products().len(), 2);

    screen.filters.category = "Books".to_string();
    screen.apply_filters(&harness.ctx);
    poll_until(|| {
        screen.poll(&harness.ctx);
        !screen.is_loading()
    });
    assert_eq!(screen.products().len(), 1);
    assert_eq!(screen.applied_filters().category.as_deref(), Some("Books"));

    screen.filters.price_min = "50".to_string();
    screen.filters.price_max = "10".to_string();
    screen.apply_filters(&harness.ctx);
    assert_eq!(
        screen.notice.as_deref(),
        Some("Minimum price is above maximum price.")
    );
    assert_eq!(screen.applied_filters().category.as_deref(), Some("Books"));
}

#[test]
fn test_admin_product_delete() {
    let harness = Harness::new("admin");
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/product/9"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(product_json(9, "lamp", "Home", 19.99)),
            ),
    );
    harness.mount(
        Mock::given(method("DELETE"))
            .and(path("/api/product/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
            .expect(1),
    );

    let mut screen = ProductDetailsScreen::open(9, true, &harness.ctx);
    poll_until(|| {
        screen.poll(&harness.ctx);
        screen.product().is_some()
    });
    assert!(screen.can_manage());

    screen.request_delete();
    assert!(screen.confirm_delete);
    assert!(screen.delete(&harness.ctx));
    poll_until(|| {
        screen.poll(&harness.ctx);
        screen.is_deleted()
    });
}

#[test]
fn test_customer_cannot_manage_products() {
    let harness = Harness::new("customer");
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/product/9"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(product_json(9, "lamp", "Home", 19.99)),
            ),
    );
    harness.mount(
        Mock::given(method("DELETE"))
            .and(path("/api/product/9"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0),
    );

    let mut screen = ProductDetailsScreen::open(9, false, &harness.ctx);
    poll_until(|| {
        screen.poll(&harness.ctx);
        screen.product().is_some()
    });

    screen.request_delete();
    assert!(!screen.delete(&harness.ctx));
    screen.start_edit();
    assert!(!screen.editing);
}

#[test]
fn test_screen_host_follows_navigation() {
    let harness = Harness::new("admin");
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/admin/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/admin/orders/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json(42, "Processing"))),
    );
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/admin/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/admin/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );
    harness.mount(
        Mock::given(method("GET"))
            .and(path("/api/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "api": {} }))),
    );

    let session = harness.runtime.block_on(async {
        let store = seeded_store("root", "admin", "tok123").await;
        let context = SessionContext::new(config_for(&harness.server), store);
        context.restore().await
    });

    let mut navigator = Navigator::new();
    navigator.sync(Some(&session));
    let mut host = ScreenHost::new();
    host.sync(&navigator.stacked_routes(), &session, &harness.ctx);
    assert_eq!(host.len(), 5);
    assert!(host.is_mounted(&Route::Endpoints));

    assert_ok!(navigator.select_tab(Tab::AdminOrders));
    assert_ok!(navigator.push(Route::OrderDetails { order_id: 42 }));
    host.sync(&navigator.stacked_routes(), &session, &harness.ctx);
    assert!(matches!(
        host.get_mut(&Route::OrderDetails { order_id: 42 }),
        Some(Screen::OrderDetails(_))
    ));

    poll_until(|| {
        host.poll_all(&harness.ctx);
        match host.get_mut(&Route::OrderDetails { order_id: 42 }) {
            Some(Screen::OrderDetails(screen)) => screen.order().is_some(),
            _ => false,
        }
    });

    assert!(navigator.pop());
    host.sync(&navigator.stacked_routes(), &session, &harness.ctx);
    assert!(!host.is_mounted(&Route::OrderDetails { order_id: 42 }));
    assert_eq!(host.len(), 5);
}
