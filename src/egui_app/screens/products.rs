//! Product list and product details screens
//!
//! Customers browse the catalogue with optional filters. Admins see the
//! admin listing and can create, edit and delete products.

use serde_json::Value;
use tracing::{info, warn};

use super::lifecycle::RequestSlot;
use super::ScreenContext;
use crate::shared::models::{NewProduct, Product, ProductFilters, ProductUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductScope {
    Admin,
    Catalogue,
}

/// Filter inputs as typed; blank fields are ignored
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterForm {
    pub name: String,
    pub category: String,
    pub price_min: String,
    pub price_max: String,
}

impl FilterForm {
    pub fn to_filters(&self) -> Result<ProductFilters, String> {
        let price_min = parse_price(&self.price_min, "Minimum price")?;
        let price_max = parse_price(&self.price_max, "Maximum price")?;
        if let (Some(min), Some(max)) = (price_min, price_max) {
            if min > max {
                return Err("Minimum price is above maximum price.".to_string());
            }
        }

        Ok(ProductFilters {
            item_name: non_blank(&self.name),
            category: non_blank(&self.category),
            price_min,
            price_max,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Product fields as typed in the create/edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.item_name.clone(),
            description: product.item_description.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
            price: format!("{:.2}", product.price),
        }
    }

    pub fn to_update(&self) -> Result<ProductUpdate, String> {
        let (name, price) = self.required()?;
        Ok(ProductUpdate {
            item_name: Some(name),
            item_description: Some(self.description.trim().to_string()),
            category: Some(self.category.trim().to_string()),
            price: Some(price),
        })
    }

    pub fn to_new(&self) -> Result<NewProduct, String> {
        let (name, price) = self.required()?;
        if self.category.trim().is_empty() {
            return Err("Category is required.".to_string());
        }
        Ok(NewProduct {
            item_name: name,
            item_description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            price,
            img_url: None,
        })
    }

    fn required(&self) -> Result<(String, f64), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Product name is required.".to_string());
        }
        let price = parse_price(&self.price, "Price")?
            .ok_or_else(|| "Price is required.".to_string())?;
        Ok((name.to_string(), price))
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_price(value: &str, label: &str) -> Result<Option<f64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
        _ => Err(format!("{} must be a non-negative number.", label)),
    }
}

pub struct ProductsScreen {
    scope: ProductScope,
    products: Vec<Product>,
    loaded: bool,
    applied: ProductFilters,
    pub filters: FilterForm,
    /// Open "new product" form, admin only
    pub draft: Option<ProductForm>,
    load: RequestSlot<Vec<Product>>,
    create: RequestSlot<Value>,
    pub notice: Option<String>,
    pub success: Option<String>,
}

impl ProductsScreen {
    pub fn open(scope: ProductScope, ctx: &ScreenContext) -> Self {
        let mut screen = Self {
            scope,
            products: Vec::new(),
            loaded: false,
            applied: ProductFilters::default(),
            filters: FilterForm::default(),
            draft: None,
            load: RequestSlot::default(),
            create: RequestSlot::default(),
            notice: None,
            success: None,
        };
        screen.refresh(ctx);
        screen
    }

    pub fn scope(&self) -> ProductScope {
        self.scope
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_busy()
    }

    pub fn is_creating(&self) -> bool {
        self.create.is_busy()
    }

    pub fn applied_filters(&self) -> &ProductFilters {
        &self.applied
    }

    /// Admins without filters get the admin listing; everything else goes
    /// through the filtered catalogue query
    pub fn refresh(&mut self, ctx: &ScreenContext) {
        let api = ctx.api.clone();
        if self.scope == ProductScope::Admin && self.applied.is_empty() {
            self.load
                .start(&ctx.runtime, async move { api.fetch_admin_products().await });
        } else {
            let filters = self.applied.clone();
            self.load
                .start(&ctx.runtime, async move { api.fetch_products(&filters).await });
        }
    }

    pub fn apply_filters(&mut self, ctx: &ScreenContext) {
        match self.filters.to_filters() {
            Ok(filters) => {
                self.notice = None;
                self.applied = filters;
                // A newer query supersedes whatever is in flight
                self.load.cancel();
                self.refresh(ctx);
            }
            Err(message) => self.notice = Some(message),
        }
    }

    pub fn clear_filters(&mut self, ctx: &ScreenContext) {
        self.filters.clear();
        self.apply_filters(ctx);
    }

    pub fn start_create(&mut self) {
        if self.scope == ProductScope::Admin {
            self.draft = Some(ProductForm::default());
            self.success = None;
        }
    }

    pub fn cancel_create(&mut self) {
        self.draft = None;
    }

    pub fn submit_create(&mut self, ctx: &ScreenContext) -> bool {
        if self.create.is_busy() {
            return false;
        }
        let Some(draft) = &self.draft else {
            return false;
        };
        let product = match draft.to_new() {
            Ok(product) => product,
            Err(message) => {
                self.notice = Some(message);
                return false;
            }
        };

        self.notice = None;
        let api = ctx.api.clone();
        self.create
            .start(&ctx.runtime, async move { api.create_product(&product).await })
    }

    /// Drop a product that was deleted from its details screen
    pub fn remove_product(&mut self, item_id: i64) {
        self.products.retain(|p| p.item_id != item_id);
    }

    pub fn poll(&mut self, ctx: &ScreenContext) -> bool {
        let mut changed = false;

        match self.load.poll() {
            Some(Ok(products)) => {
                self.products = products;
                self.loaded = true;
                changed = true;
            }
            Some(Err(e)) => {
                warn!(scope = ?self.scope, error = %e, "failed to fetch products");
                self.notice = Some(e.notice());
                changed = true;
            }
            None => {}
        }

        match self.create.poll() {
            Some(Ok(_)) => {
                info!("product created");
                self.draft = None;
                self.success = Some("Product created successfully.".to_string());
                self.refresh(ctx);
                changed = true;
            }
            Some(Err(e)) => {
                warn!(error = %e, "failed to create product");
                self.notice = Some(format!("Failed to create product. {}", e.notice()));
                changed = true;
            }
            None => {}
        }

        changed
    }
}

pub struct ProductDetailsScreen {
    item_id: i64,
    can_manage: bool,
    product: Option<Product>,
    pub form: ProductForm,
    pub editing: bool,
    pub confirm_delete: bool,
    deleted: bool,
    load: RequestSlot<Product>,
    save: RequestSlot<Value>,
    delete: RequestSlot<Value>,
    pub notice: Option<String>,
    pub success: Option<String>,
}

impl ProductDetailsScreen {
    /// `can_manage` enables edit and delete; pass the admin capability
    pub fn open(item_id: i64, can_manage: bool, ctx: &ScreenContext) -> Self {
        let mut screen = Self {
            item_id,
            can_manage,
            product: None,
            form: ProductForm::default(),
            editing: false,
            confirm_delete: false,
            deleted: false,
            load: RequestSlot::default(),
            save: RequestSlot::default(),
            delete: RequestSlot::default(),
            notice: None,
            success: None,
        };
        screen.refresh(ctx);
        screen
    }

    pub fn item_id(&self) -> i64 {
        self.item_id
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn can_manage(&self) -> bool {
        self.can_manage
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_busy()
    }

    pub fn is_busy(&self) -> bool {
        self.save.is_busy() || self.delete.is_busy()
    }

    /// Set once the backend confirmed the delete
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn refresh(&mut self, ctx: &ScreenContext) {
        let api = ctx.api.clone();
        let item_id = self.item_id;
        self.load
            .start(&ctx.runtime, async move { api.fetch_product(item_id).await });
    }

    pub fn start_edit(&mut self) {
        if let (true, Some(product)) = (self.can_manage, &self.product) {
            self.form = ProductForm::from_product(product);
            self.editing = true;
            self.success = None;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.notice = None;
    }

    pub fn submit(&mut self, ctx: &ScreenContext) -> bool {
        if !self.can_manage || !self.editing || self.is_busy() {
            return false;
        }
        let update = match self.form.to_update() {
            Ok(update) => update,
            Err(message) => {
                self.notice = Some(message);
                return false;
            }
        };

        self.notice = None;
        let api = ctx.api.clone();
        let item_id = self.item_id;
        self.save.start(&ctx.runtime, async move {
            api.update_product(item_id, &update).await
        })
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&mut self) {
        if self.can_manage {
            self.confirm_delete = true;
        }
    }

    pub fn delete(&mut self, ctx: &ScreenContext) -> bool {
        if !self.can_manage || !self.confirm_delete || self.is_busy() {
            return false;
        }
        self.confirm_delete = false;
        let api = ctx.api.clone();
        let item_id = self.item_id;
        self.delete
            .start(&ctx.runtime, async move { api.delete_product(item_id).await })
    }

    pub fn poll(&mut self, ctx: &ScreenContext) -> bool {
        let mut changed = false;

        match self.load.poll() {
            Some(Ok(product)) => {
                if !self.editing {
                    self.form = ProductForm::from_product(&product);
                }
                self.product = Some(product);
                changed = true;
            }
            Some(Err(e)) => {
                warn!(item_id = self.item_id, error = %e, "failed to fetch product");
                self.notice = Some(e.notice());
                changed = true;
            }
            None => {}
        }

        match self.save.poll() {
            Some(Ok(_)) => {
                info!(item_id = self.item_id, "product updated");
                self.editing = false;
                self.success = Some("Product updated successfully.".to_string());
                self.refresh(ctx);
                changed = true;
            }
            Some(Err(e)) => {
                warn!(item_id = self.item_id, error = %e, "failed to update product");
                self.notice = Some(format!("Failed to update product. {}", e.notice()));
                changed = true;
            }
            None => {}
        }

        match self.delete.poll() {
            Some(Ok(_)) => {
                info!(item_id = self.item_id, "product deleted");
                self.deleted = true;
                changed = true;
            }
            Some(Err(e)) => {
                warn!(item_id = self.item_id, error = %e, "failed to delete product");
                self.notice = Some(format!("Failed to delete product. {}", e.notice()));
                changed = true;
            }
            None => {}
        }

        changed
    }
}
