//! Payload fixtures and mock backend helpers
//!
//! Every mock backend serves under `/api`, matching the deployed layout, so
//! the configured server URL is `<mock uri>/api`.

use std::time::{Duration, Instant};

use marketsquare::egui_app::Config;
use marketsquare::shared::config::AppConfig;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Client config pointing at a mock backend
pub fn config_for(server: &MockServer) -> Config {
    config_at(&format!("{}/api", server.uri()))
}

pub fn config_at(server_url: &str) -> Config {
    Config::with_builder(AppConfig::builder().server_url(server_url))
        .expect("test server URL is valid")
}

/// A backend that is never reached; requests to it fail to connect
pub fn unreachable_config() -> Config {
    config_at("http://127.0.0.1:9/api")
}

/// Successful login/register body
pub fn auth_body(username: &str, role: Option<&str>, token: &str) -> Value {
    let mut user = json!({
        "username": username,
        "first_name": "Alice",
        "last_name": "Liddell",
        "email": format!("{}@example.com", username),
    });
    if let Some(role) = role {
        user["role"] = json!(role);
    }
    json!({ "user": user, "token": token })
}

pub fn order_json(order_id: i64, status: &str) -> Value {
    json!({
        "order_id": order_id,
        "user_id": 3,
        "total_amount": "59.90",
        "status": status,
        "payment_status": "Paid",
        "shipping_cost": 4.5,
        "shipping_address": "{\"street\":\"1 High St\",\"city\":\"Leeds\",\"postcode\":\"LS1 1AA\",\"country\":\"UK\"}",
        "created_at": "2024-03-01T10:00:00Z"
    })
}

pub fn product_json(item_id: i64, name: &str, category: &str, price: f64) -> Value {
    json!({
        "item_id": item_id,
        "user_id": 1,
        "item_name": name,
        "item_description": format!("A fine {}", name),
        "category": category,
        "price": price,
        "img_url": null
    })
}

/// Poll `done` until it holds, or panic after five seconds
pub fn poll_until(mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        assert!(Instant::now() < deadline, "condition not met within 5s");
        std::thread::sleep(Duration::from_millis(10));
    }
}
