//! Storefront API Client
//!
//! One async method per backend operation. Every authenticated call reads
//! the bearer token and role from the persisted store at send time, so the
//! client itself holds no credentials. Responses are decoded into the typed
//! payloads in `shared::models`; there are no retries and no timeout beyond
//! the transport default.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::egui_app::config::Config;
use crate::egui_app::storage::{KeyValueStore, SessionRecord};
use crate::shared::error::ClientError;
use crate::shared::models::{
    AuthResponse, EndpointListing, LoginRequest, NewProduct, Order, OrderUpdate, Product,
    ProductFilters, ProductUpdate, RegisterRequest, UserSummary,
};

/// Header carrying the session role.
///
/// Older builds sent both `Role` and `role`; HTTP field names are
/// case-insensitive and the transport lowercases them anyway, so this is the
/// only spelling sent.
pub const ROLE_HEADER: &str = "role";

/// Which failure category a rejected request maps to
#[derive(Debug, Clone, Copy)]
enum Rejection {
    Login,
    Register,
    Resource,
}

#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    http: Client,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            config,
            http: Client::new(),
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `POST /auth/login`
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let builder = self.http.post(self.config.api_url("/auth/login")).json(&request);
        let response = self.send("POST", "/auth/login", builder, Rejection::Login).await?;
        decode(response).await
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let builder = self.http.post(self.config.api_url("/auth/register")).json(request);
        let response = self
            .send("POST", "/auth/register", builder, Rejection::Register)
            .await?;
        decode(response).await
    }

    /// `GET /admin/orders`
    pub async fn fetch_admin_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.get_json("/admin/orders", &[]).await
    }

    /// `GET /admin/orders/:id`
    pub async fn fetch_order(&self, order_id: i64) -> Result<Order, ClientError> {
        self.get_json(&format!("/admin/orders/{}", order_id), &[]).await
    }

    /// `PATCH /admin/orders/:id`; returns the raw response body
    pub async fn update_order(
        &self,
        order_id: i64,
        update: &OrderUpdate,
    ) -> Result<Value, ClientError> {
        let path = format!("/admin/orders/{}", order_id);
        let builder = self.http.patch(self.config.api_url(&path)).json(update);
        self.authenticated("PATCH", &path, builder).await
    }

    /// `GET /customer/orders`
    pub async fn fetch_customer_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.get_json("/customer/orders", &[]).await
    }

    /// `GET /admin/products`
    pub async fn fetch_admin_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get_json("/admin/products", &[]).await
    }

    /// `GET /admin/users`
    pub async fn fetch_admin_users(&self) -> Result<Vec<UserSummary>, ClientError> {
        self.get_json("/admin/users", &[]).await
    }

    /// `GET /product?filters`
    pub async fn fetch_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<Vec<Product>, ClientError> {
        self.get_json("/product", &filters.to_query()).await
    }

    /// `GET /product/:id`
    pub async fn fetch_product(&self, item_id: i64) -> Result<Product, ClientError> {
        self.get_json(&format!("/product/{}", item_id), &[]).await
    }

    /// `POST /product`
    pub async fn create_product(&self, product: &NewProduct) -> Result<Value, ClientError> {
        let builder = self.http.post(self.config.api_url("/product")).json(product);
        self.authenticated("POST", "/product", builder).await
    }

    /// `PATCH /product/:id`
    pub async fn update_product(
        &self,
        item_id: i64,
        update: &ProductUpdate,
    ) -> Result<Value, ClientError> {
        let path = format!("/product/{}", item_id);
        let builder = self.http.patch(self.config.api_url(&path)).json(update);
        self.authenticated("PATCH", &path, builder).await
    }

    /// `DELETE /product/:id`
    pub async fn delete_product(&self, item_id: i64) -> Result<Value, ClientError> {
        let path = format!("/product/{}", item_id);
        let builder = self.http.delete(self.config.api_url(&path));
        self.authenticated("DELETE", &path, builder).await
    }

    /// `GET /`, the backend's endpoint listing
    pub async fn fetch_endpoints(&self) -> Result<EndpointListing, ClientError> {
        self.get_json("/", &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ClientError> {
        let mut builder = self.http.get(self.config.api_url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let builder = builder.headers(self.auth_headers().await?);
        let response = self.send("GET", path, builder, Rejection::Resource).await?;
        decode(response).await
    }

    async fn authenticated(
        &self,
        method: &str,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Value, ClientError> {
        let builder = builder.headers(self.auth_headers().await?);
        let response = self.send(method, path, builder, Rejection::Resource).await?;
        decode_raw(response).await
    }

    /// `Authorization: Bearer <token>` plus the role header, from the store
    async fn auth_headers(&self) -> Result<HeaderMap, ClientError> {
        let (token, role) = SessionRecord::credentials(self.store.as_ref())
            .await?
            .ok_or(ClientError::NotAuthenticated)?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ClientError::NotAuthenticated)?;
        headers.insert(AUTHORIZATION, bearer);
        let role = HeaderValue::from_str(&role).map_err(|_| ClientError::NotAuthenticated)?;
        headers.insert(ROLE_HEADER, role);
        Ok(headers)
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        builder: RequestBuilder,
        rejection: Rejection,
    ) -> Result<Response, ClientError> {
        let response = builder.send().await.map_err(|e| {
            warn!(method, path, error = %e, "request failed");
            ClientError::transport(e.to_string())
        })?;

        let status = response.status();
        debug!(method, path, status = status.as_u16(), "response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        let message = backend_message(&body, status);

        Err(match (rejection, status) {
            (_, s) if s.is_server_error() => ClientError::http(s.as_u16(), message),
            (Rejection::Login, _) => ClientError::authentication(message),
            (Rejection::Register, _) => ClientError::registration(message),
            (Rejection::Resource, StatusCode::NOT_FOUND) => ClientError::not_found(path),
            (Rejection::Resource, s) => ClientError::http(s.as_u16(), message),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::transport(e.to_string()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Like `decode`, but an empty body is `Null` rather than an error
async fn decode_raw(response: Response) -> Result<Value, ClientError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::transport(e.to_string()))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Pull `message`/`error` out of a JSON error body, else use the text
fn backend_message(body: &str, status: StatusCode) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or_default()
            .to_string()
    } else {
        trimmed.to_string()
    }
}
