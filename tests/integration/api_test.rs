//! API client integration tests
//!
//! Header attachment, request shapes and error mapping against a mock
//! backend.

use std::sync::Arc;

use assert_matches::assert_matches;
use marketsquare::egui_app::storage::MemoryStore;
use marketsquare::egui_app::ApiClient;
use marketsquare::shared::{ClientError, NewProduct, OrderUpdate, ProductFilters, ProductUpdate};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

async fn admin_client(server: &MockServer) -> ApiClient {
    let store = seeded_store("root", "admin", "tok123").await;
    ApiClient::new(config_for(server), store)
}

#[tokio::test]
async fn test_bearer_and_role_headers_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders"))
        .and(header("authorization", "Bearer tok123"))
        .and(header("role", "admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            order_json(1, "Processing"),
            order_json(2, "Shipped")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server).await;
    let orders = assert_ok!(client.fetch_admin_orders().await);

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].order_id, 1);
    assert_approx_eq!(orders[0].total_amount, 59.9, 1e-9);
    assert_eq!(orders[1].status, "Shipped");
    assert_eq!(
        orders[0].shipping_address().map(|a| a.one_line()),
        Some("1 High St, Leeds, LS1 1AA, UK".to_string())
    );
}

#[tokio::test]
async fn test_missing_credentials_never_send() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(config_for(&server), Arc::new(MemoryStore::new()));
    assert_err!(client.fetch_admin_orders().await, ClientError::NotAuthenticated);
    assert_err!(client.delete_product(5).await, ClientError::NotAuthenticated);
}

#[tokio::test]
async fn test_order_update_then_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/orders/42"))
        .and(body_json(json!({ "status": "Shipped" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Order updated" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(42, "Shipped")))
        .mount(&server)
        .await;

    let client = admin_client(&server).await;
    let body = assert_ok!(client.update_order(42, &OrderUpdate::status("Shipped")).await);
    assert_eq!(body["message"], "Order updated");

    let order = assert_ok!(client.fetch_order(42).await);
    assert_eq!(order.order_id, 42);
    assert_eq!(order.status, "Shipped");
    assert_eq!(order.payment_status.as_deref(), Some("Paid"));
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Order not found" })))
        .mount(&server)
        .await;

    let client = admin_client(&server).await;
    let error = client.fetch_order(7).await.unwrap_err();
    assert_eq!(error, ClientError::not_found("/admin/orders/7"));
    assert_eq!(error.notice(), "Not found: /admin/orders/7");
}

#[tokio::test]
async fn test_server_error_is_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "Admins only" })))
        .mount(&server)
        .await;

    let client = admin_client(&server).await;
    assert_eq!(
        client.login("alice", "secret").await,
        Err(ClientError::http(503, "maintenance"))
    );
    assert_eq!(
        client.fetch_admin_users().await,
        Err(ClientError::http(403, "Admins only"))
    );
}

#[tokio::test]
async fn test_product_filters_become_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product"))
        .and(query_param("category", "Books"))
        .and(query_param("item_name", "rust"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(5, "rust book", "Books", 30.0)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/product"))
        .and(query_param("item_name", "lamp"))
        .and(query_param("price_min", "10"))
        .and(query_param("price_max", "25.5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(9, "lamp", "Home", 19.99)])),
        )
        .mount(&server)
        .await;

    let client = admin_client(&server).await;

    let books = assert_ok!(
        client
            .fetch_products(&ProductFilters::by_category_and_name("Books", "rust"))
            .await
    );
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].item_id, 5);

    let lamps = assert_ok!(
        client
            .fetch_products(&ProductFilters::by_name_and_price("lamp", 10.0, 25.5))
            .await
    );
    assert_eq!(lamps[0].item_name, "lamp");
    assert_eq!(lamps[0].category.as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_product_mutations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/product"))
        .and(body_json(json!({
            "item_name": "Desk",
            "item_description": "Oak",
            "category": "Furniture",
            "price": 120.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "item_id": 11 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/product/11"))
        .and(body_json(json!({ "price": 99.5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "updated" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/product/11"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server).await;

    let created = assert_ok!(
        client
            .create_product(&NewProduct {
                item_name: "Desk".into(),
                item_description: "Oak".into(),
                category: "Furniture".into(),
                price: 120.0,
                img_url: None,
            })
            .await
    );
    assert_eq!(created["item_id"], 11);

    let update = ProductUpdate {
        price: Some(99.5),
        ..ProductUpdate::default()
    };
    assert_ok!(client.update_product(11, &update).await);

    let deleted = assert_ok!(client.delete_product(11).await);
    assert_eq!(deleted, Value::Null);
}

#[tokio::test]
async fn test_endpoint_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "api": {
                "base_url": "https://shop.example.com/api",
                "endpoints": {
                    "Auth": {
                        "/auth/login": { "POST": { "Description": "Log in" } }
                    },
                    "Products": {
                        "/product": {
                            "GET": { "Description": "List products", "Query": "category" },
                            "POST": {}
                        }
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let client = admin_client(&server).await;
    let listing = assert_ok!(client.fetch_endpoints().await);

    assert_eq!(listing.api.base_url, "https://shop.example.com/api");
    let categories: Vec<_> = listing.api.endpoints.keys().cloned().collect();
    assert_eq!(categories, vec!["Auth".to_string(), "Products".to_string()]);

    let product = &listing.api.endpoints["Products"]["/product"];
    assert_eq!(product["GET"].description.as_deref(), Some("List products"));
    assert_eq!(product["GET"].details["Query"], "category");
    assert_eq!(product["POST"].description, None);
}

#[tokio::test]
async fn test_malformed_payload_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customer/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let store = seeded_store("alice", "customer", "tok123").await;
    let client = ApiClient::new(config_for(&server), store);
    assert_matches!(
        client.fetch_customer_orders().await,
        Err(ClientError::Serialization { .. })
    );
}
