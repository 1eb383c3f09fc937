//! Order list and order details screens

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use super::lifecycle::RequestSlot;
use super::ScreenContext;
use crate::shared::models::{Order, OrderUpdate, ORDER_STATUS_OPTIONS, PAYMENT_STATUS_OPTIONS};

/// Which order listing a screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    /// Every order, `GET /admin/orders`
    Admin,
    /// The signed-in customer's orders, `GET /customer/orders`
    Customer,
}

pub struct OrdersScreen {
    scope: OrderScope,
    orders: Vec<Order>,
    loaded: bool,
    load: RequestSlot<Vec<Order>>,
    pub notice: Option<String>,
}

impl OrdersScreen {
    pub fn open(scope: OrderScope, ctx: &ScreenContext) -> Self {
        let mut screen = Self {
            scope,
            orders: Vec::new(),
            loaded: false,
            load: RequestSlot::default(),
            notice: None,
        };
        screen.refresh(ctx);
        screen
    }

    pub fn scope(&self) -> OrderScope {
        self.scope
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_busy()
    }

    /// `true` once at least one fetch has succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn refresh(&mut self, ctx: &ScreenContext) {
        let api = ctx.api.clone();
        match self.scope {
            OrderScope::Admin => {
                self.load
                    .start(&ctx.runtime, async move { api.fetch_admin_orders().await });
            }
            OrderScope::Customer => {
                self.load
                    .start(&ctx.runtime, async move { api.fetch_customer_orders().await });
            }
        }
    }

    /// Apply a finished fetch; on failure the previous list stays on screen
    pub fn poll(&mut self, _ctx: &ScreenContext) -> bool {
        match self.load.poll() {
            Some(Ok(orders)) => {
                self.orders = orders;
                self.loaded = true;
                self.notice = None;
                true
            }
            Some(Err(e)) => {
                warn!(scope = ?self.scope, error = %e, "failed to fetch orders");
                self.notice = Some(e.notice());
                true
            }
            None => false,
        }
    }
}

/// Editable order fields, as typed by the admin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderForm {
    pub status: String,
    pub payment_status: String,
    pub shipping_cost: String,
}

impl OrderForm {
    pub fn from_order(order: &Order) -> Self {
        Self {
            status: order.status.clone(),
            payment_status: order.payment_status.clone().unwrap_or_default(),
            shipping_cost: order
                .shipping_cost
                .map(|cost| format!("{:.2}", cost))
                .unwrap_or_default(),
        }
    }

    /// Every field is required; the update is stamped with the current time
    pub fn validate(&self) -> Result<OrderUpdate, String> {
        let status = self.status.trim();
        let payment_status = self.payment_status.trim();
        let shipping_cost = self.shipping_cost.trim();

        if status.is_empty() || payment_status.is_empty() || shipping_cost.is_empty() {
            return Err("All fields are required to update.".to_string());
        }
        if !ORDER_STATUS_OPTIONS.contains(&status) {
            return Err(format!("Unknown order status: {}", status));
        }
        if !PAYMENT_STATUS_OPTIONS.contains(&payment_status) {
            return Err(format!("Unknown payment status: {}", payment_status));
        }
        let cost: f64 = shipping_cost
            .parse()
            .ok()
            .filter(|c: &f64| c.is_finite() && *c >= 0.0)
            .ok_or_else(|| "Shipping cost must be a non-negative number.".to_string())?;

        Ok(OrderUpdate {
            status: Some(status.to_string()),
            payment_status: Some(payment_status.to_string()),
            shipping_cost: Some(cost),
            updated_at: Some(Utc::now()),
        })
    }
}

pub struct OrderDetailsScreen {
    order_id: i64,
    order: Option<Order>,
    pub form: OrderForm,
    load: RequestSlot<Order>,
    save: RequestSlot<Value>,
    pub notice: Option<String>,
    pub success: Option<String>,
}

impl OrderDetailsScreen {
    pub fn open(order_id: i64, ctx: &ScreenContext) -> Self {
        let mut screen = Self {
            order_id,
            order: None,
            form: OrderForm::default(),
            load: RequestSlot::default(),
            save: RequestSlot::default(),
            notice: None,
            success: None,
        };
        screen.refresh(ctx);
        screen
    }

    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_busy()
    }

    pub fn is_saving(&self) -> bool {
        self.save.is_busy()
    }

    pub fn refresh(&mut self, ctx: &ScreenContext) {
        let api = ctx.api.clone();
        let order_id = self.order_id;
        self.load
            .start(&ctx.runtime, async move { api.fetch_order(order_id).await });
    }

    /// Validate the form and send the update. Returns whether it was sent.
    pub fn submit(&mut self, ctx: &ScreenContext) -> bool {
        if self.save.is_busy() {
            return false;
        }
        let update = match self.form.validate() {
            Ok(update) => update,
            Err(message) => {
                self.notice = Some(message);
                return false;
            }
        };

        self.notice = None;
        self.success = None;
        let api = ctx.api.clone();
        let order_id = self.order_id;
        self.save.start(&ctx.runtime, async move {
            api.update_order(order_id, &update).await
        })
    }

    pub fn poll(&mut self, ctx: &ScreenContext) -> bool {
        let mut changed = false;

        match self.load.poll() {
            Some(Ok(order)) => {
                self.form = OrderForm::from_order(&order);
                self.order = Some(order);
                changed = true;
            }
            Some(Err(e)) => {
                warn!(order_id = self.order_id, error = %e, "failed to fetch order");
                self.notice = Some(e.notice());
                changed = true;
            }
            None => {}
        }

        match self.save.poll() {
            Some(Ok(_)) => {
                info!(order_id = self.order_id, "order updated");
                self.success = Some("Order updated successfully.".to_string());
                self.refresh(ctx);
                changed = true;
            }
            Some(Err(e)) => {
                warn!(order_id = self.order_id, error = %e, "failed to update order");
                self.notice = Some(format!("Failed to update order. {}", e.notice()));
                changed = true;
            }
            None => {}
        }

        changed
    }
}
