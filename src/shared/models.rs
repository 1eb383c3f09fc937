//! Backend payload types
//!
//! One explicit type per endpoint payload, validated when the API client
//! decodes a response. The backend is loose about number encoding (prices
//! and ids arrive both as JSON numbers and as strings) so those fields go
//! through the `lenient` helpers below. Unknown fields are kept in `extra`
//! so payloads the client does not interpret pass through unmodified.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status values an admin can assign to an order
pub const ORDER_STATUS_OPTIONS: [&str; 4] = ["Processing", "Shipped", "Cancelled", "Completed"];

/// Payment status values an admin can assign to an order
pub const PAYMENT_STATUS_OPTIONS: [&str; 2] = ["Paid", "Unpaid"];

mod lenient {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Int(i64),
        Float(f64),
        Text(String),
    }

    fn to_f64<E: Error>(value: NumberOrString) -> Result<f64, E> {
        match value {
            NumberOrString::Int(i) => Ok(i as f64),
            NumberOrString::Float(f) => Ok(f),
            NumberOrString::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid amount: {:?}", s))),
        }
    }

    fn to_i64<E: Error>(value: NumberOrString) -> Result<i64, E> {
        match value {
            NumberOrString::Int(i) => Ok(i),
            NumberOrString::Float(f) if f.fract() == 0.0 => Ok(f as i64),
            NumberOrString::Float(f) => Err(E::custom(format!("invalid id: {}", f))),
            NumberOrString::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid id: {:?}", s))),
        }
    }

    pub fn amount<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        to_f64(NumberOrString::deserialize(d)?)
    }

    pub fn opt_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Option::<NumberOrString>::deserialize(d)?
            .map(to_f64)
            .transpose()
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        to_i64(NumberOrString::deserialize(d)?)
    }

    pub fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Option::<NumberOrString>::deserialize(d)?
            .map(to_i64)
            .transpose()
    }
}

/// Postal address as the backend stores it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// Decode an address that may be an object or a JSON-encoded string
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(encoded) => serde_json::from_str(encoded).ok(),
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    /// Single-line rendering, skipping empty parts
    pub fn one_line(&self) -> String {
        [&self.street, &self.city, &self.postcode, &self.country]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// User profile returned by login/register
///
/// Opaque to the session: the raw object is what gets stored and restored,
/// so null members and non-string values survive untouched. Screens read
/// the fields they display through the lenient accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Map<String, Value>);

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self::default().with_field("username", username.into())
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Scalar member rendered as text; null, missing and nested values give `None`
    fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn username(&self) -> String {
        self.text("username").unwrap_or_default()
    }

    pub fn first_name(&self) -> Option<String> {
        self.text("first_name")
    }

    pub fn last_name(&self) -> Option<String> {
        self.text("last_name")
    }

    pub fn email(&self) -> Option<String> {
        self.text("email")
    }

    pub fn number(&self) -> Option<String> {
        self.text("number")
    }

    pub fn role(&self) -> Option<String> {
        self.text("role")
    }

    pub fn preferences(&self) -> Option<&Value> {
        self.0.get("preferences").filter(|v| !v.is_null())
    }

    /// "First Last", falling back to the username
    pub fn display_name(&self) -> String {
        let full = [self.first_name(), self.last_name()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if full.trim().is_empty() {
            self.username()
        } else {
            full
        }
    }

    pub fn address(&self) -> Option<Address> {
        self.0.get("address").and_then(Address::from_value)
    }
}

impl From<Map<String, Value>> for UserProfile {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Successful login/register body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration payload
///
/// Username, password and email are always sent; the remaining profile
/// fields are optional and omitted when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,
}

impl RegisterRequest {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_names(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_preferences(mut self, preferences: Value) -> Self {
        self.preferences = Some(preferences);
        self
    }
}

/// Order as returned by `/admin/orders` and `/customer/orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(alias = "id", deserialize_with = "lenient::id")]
    pub order_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_amount: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_amount")]
    pub shipping_cost: Option<f64>,
    /// JSON-encoded address string, or an object on newer backends
    #[serde(default)]
    pub shipping_address: Option<Value>,
    #[serde(default)]
    pub billing_address: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    pub fn shipping_address(&self) -> Option<Address> {
        self.shipping_address.as_ref().and_then(Address::from_value)
    }

    pub fn billing_address(&self) -> Option<Address> {
        self.billing_address.as_ref().and_then(Address::from_value)
    }
}

/// PATCH body for `/admin/orders/:id`; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl OrderUpdate {
    /// Status-only update
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }
}

/// Catalogue item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "lenient::id")]
    pub item_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub item_description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: f64,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query filters for `GET /product`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub item_name: Option<String>,
    pub category: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl ProductFilters {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            item_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn by_category_and_name(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            item_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn by_name_and_price(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            item_name: Some(name.into()),
            price_min: Some(min),
            price_max: Some(max),
            ..Self::default()
        }
    }

    /// Query pairs in the order the backend documents them; blanks skipped
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            query.push(("category", category.trim().to_string()));
        }
        if let Some(name) = self.item_name.as_deref().filter(|n| !n.trim().is_empty()) {
            query.push(("item_name", name.trim().to_string()));
        }
        if let Some(min) = self.price_min {
            query.push(("price_min", min.to_string()));
        }
        if let Some(max) = self.price_max {
            query.push(("price_max", max.to_string()));
        }
        query
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

/// PATCH body for `/product/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl From<&Product> for ProductUpdate {
    fn from(product: &Product) -> Self {
        Self {
            item_name: Some(product.item_name.clone()),
            item_description: product.item_description.clone(),
            category: product.category.clone(),
            price: Some(product.price),
        }
    }
}

/// POST body for `/product`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewProduct {
    pub item_name: String,
    pub item_description: String,
    pub category: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

/// Row of the admin user list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Body of `GET /`, the backend's self-description
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndpointListing {
    pub api: ApiDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiDescription {
    #[serde(default)]
    pub base_url: String,
    /// category -> path -> HTTP method -> details
    #[serde(default)]
    pub endpoints: BTreeMap<String, BTreeMap<String, BTreeMap<String, EndpointMethod>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndpointMethod {
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
