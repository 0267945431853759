//! Cart Service - per-buyer cart items and supplier grouped totals
//!
//! Cart items are snapshots: the unit price and shipping resolved from the
//! product's tiers are stored on the item when it is added or its quantity
//! changes.

use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::models::cart_item::{self, Entity as CartItem};
use crate::models::product::{Entity as Product, ProductDto};
use crate::pricing::{self, CostBreakdown, ShippingCost, coupon_discount, group_by_supplier};
use crate::validation::validate_location_name;

/// Request to put a configured product in the cart
#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItem {
    pub product_id: String,
    pub quantity: u64,
    pub color: Option<String>,
    pub size: Option<String>,
    /// Defaults to the product's main location
    pub delivery_location: Option<String>,
}

/// Cart items of one supplier with their totals
#[derive(Debug, Clone, Serialize)]
pub struct SupplierCart {
    pub supplier_id: String,
    pub items: Vec<cart_item::Model>,
    pub totals: CostBreakdown,
    /// Every item is priced and the total is positive
    pub payable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub buyer_id: String,
    pub coupon_code: Option<String>,
    pub item_count: usize,
    pub suppliers: Vec<SupplierCart>,
    /// Sum of the supplier groups
    pub grand_total: CostBreakdown,
}

/// Resolved prices for a quantity and location
struct Resolution {
    price: Option<f64>,
    shipping_cost: Option<f64>,
    shipping_negotiable: bool,
}

fn resolve(product: &ProductDto, quantity: u64, location: &str) -> Resolution {
    let quote = pricing::quote(&product.price_ranges, quantity, location);
    Resolution {
        price: quote.unit_price.amount(),
        shipping_cost: quote.shipping.amount(),
        shipping_negotiable: matches!(quote.shipping, ShippingCost::ContactSupplier),
    }
}

fn pick_option(
    field: &str,
    offered: &[String],
    chosen: Option<String>,
) -> Result<Option<String>, DomainError> {
    let chosen = chosen.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
    match chosen {
        None if offered.is_empty() => Ok(None),
        None => Err(DomainError::Validation(format!(
            "{}: Please select a {}",
            field, field
        ))),
        Some(value) if offered.iter().any(|o| o == &value) => Ok(Some(value)),
        Some(value) => Err(DomainError::Validation(format!(
            "{}: '{}' is not offered for this product",
            field, value
        ))),
    }
}

fn require_quantity(quantity: u64) -> Result<i64, DomainError> {
    if quantity == 0 {
        return Err(DomainError::Validation(
            "quantity: Quantity must be at least 1".to_string(),
        ));
    }
    i64::try_from(quantity)
        .map_err(|_| DomainError::Validation("quantity: Quantity is too large".to_string()))
}

async fn load_product(db: &DatabaseConnection, id: &str) -> Result<Option<ProductDto>, DomainError> {
    let product = Product::find_by_id(id.to_owned()).one(db).await?;
    Ok(product.map(ProductDto::from))
}

async fn find_item(
    db: &DatabaseConnection,
    buyer_id: &str,
    item_id: i32,
) -> Result<cart_item::Model, DomainError> {
    CartItem::find_by_id(item_id)
        .filter(cart_item::Column::BuyerId.eq(buyer_id))
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)
}

pub async fn list_items(
    db: &DatabaseConnection,
    buyer_id: &str,
) -> Result<Vec<cart_item::Model>, DomainError> {
    let items = CartItem::find()
        .filter(cart_item::Column::BuyerId.eq(buyer_id))
        .order_by_asc(cart_item::Column::Id)
        .all(db)
        .await?;
    Ok(items)
}

/// Add a product configuration, merging into an identical existing item.
pub async fn add_item(
    db: &DatabaseConnection,
    buyer_id: &str,
    request: AddCartItem,
) -> Result<cart_item::Model, DomainError> {
    require_quantity(request.quantity)?;

    let product = load_product(db, &request.product_id)
        .await?
        .ok_or(DomainError::NotFound)?;

    let color = pick_option("color", &product.colors, request.color)?;
    let size = pick_option("size", &product.sizes, request.size)?;
    let location = match request.delivery_location {
        Some(location) => validate_location_name(&location)?,
        None => product.main_location.clone(),
    };

    let existing = CartItem::find()
        .filter(cart_item::Column::BuyerId.eq(buyer_id))
        .filter(cart_item::Column::ProductId.eq(product.id.as_str()))
        .all(db)
        .await?
        .into_iter()
        .find(|item| item.color == color && item.size == size && item.delivery_location == location);

    let now = chrono::Utc::now().to_rfc3339();

    if let Some(item) = existing {
        let current = u64::try_from(item.quantity).unwrap_or(0);
        let quantity = current.saturating_add(request.quantity);
        let stored_quantity = require_quantity(quantity)?;
        let resolved = resolve(&product, quantity, &location);

        let mut active: cart_item::ActiveModel = item.into();
        active.quantity = Set(stored_quantity);
        active.price = Set(resolved.price);
        active.shipping_cost = Set(resolved.shipping_cost);
        active.shipping_negotiable = Set(resolved.shipping_negotiable);
        active.updated_at = Set(now);
        let updated = active.update(db).await?;

        tracing::info!(
            "Cart {}: merged product {} (quantity now {})",
            buyer_id,
            product.id,
            updated.quantity
        );
        return Ok(updated);
    }

    let resolved = resolve(&product, request.quantity, &location);
    let new_item = cart_item::ActiveModel {
        buyer_id: Set(buyer_id.to_string()),
        product_id: Set(product.id.clone()),
        supplier_id: Set(product.supplier_id.clone()),
        price: Set(resolved.price),
        quantity: Set(require_quantity(request.quantity)?),
        color: Set(color),
        size: Set(size),
        shipping_cost: Set(resolved.shipping_cost),
        shipping_negotiable: Set(resolved.shipping_negotiable),
        delivery_location: Set(location),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_item.insert(db).await?;
    tracing::info!("Cart {}: added product {}", buyer_id, saved.product_id);
    Ok(saved)
}

/// Change an item's quantity and re-resolve its tier price.
pub async fn update_quantity(
    db: &DatabaseConnection,
    buyer_id: &str,
    item_id: i32,
    quantity: u64,
) -> Result<cart_item::Model, DomainError> {
    let stored_quantity = require_quantity(quantity)?;
    let item = find_item(db, buyer_id, item_id).await?;

    let product = load_product(db, &item.product_id).await?.ok_or_else(|| {
        DomainError::InvalidState("This product is no longer available".to_string())
    })?;
    let resolved = resolve(&product, quantity, &item.delivery_location);

    let mut active: cart_item::ActiveModel = item.into();
    active.quantity = Set(stored_quantity);
    active.price = Set(resolved.price);
    active.shipping_cost = Set(resolved.shipping_cost);
    active.shipping_negotiable = Set(resolved.shipping_negotiable);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    Ok(active.update(db).await?)
}

pub async fn remove_item(
    db: &DatabaseConnection,
    buyer_id: &str,
    item_id: i32,
) -> Result<(), DomainError> {
    let result = CartItem::delete_many()
        .filter(cart_item::Column::Id.eq(item_id))
        .filter(cart_item::Column::BuyerId.eq(buyer_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DomainError::NotFound);
    }
    Ok(())
}

/// Remove every item of a buyer; returns how many were removed.
pub async fn clear_cart(db: &DatabaseConnection, buyer_id: &str) -> Result<u64, DomainError> {
    let result = CartItem::delete_many()
        .filter(cart_item::Column::BuyerId.eq(buyer_id))
        .exec(db)
        .await?;
    tracing::info!("Cart {}: cleared {} item(s)", buyer_id, result.rows_affected);
    Ok(result.rows_affected)
}

/// Flat discount for an optional coupon; unknown codes are rejected.
pub fn discount_for(coupon: Option<&str>) -> Result<(f64, Option<String>), DomainError> {
    match coupon.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok((0.0, None)),
        Some(code) => coupon_discount(code)
            .map(|discount| (discount, Some(code.to_ascii_uppercase())))
            .ok_or_else(|| DomainError::Validation(format!("coupon: '{}' is not a valid coupon", code))),
    }
}

/// Totals of one supplier's items with an optional flat discount
pub fn supplier_totals(items: &[cart_item::Model], discount: f64) -> (CostBreakdown, bool) {
    let lines: Vec<_> = items.iter().map(cart_item::Model::amounts).collect();
    let totals = pricing::aggregate(&lines, discount);
    let payable = totals.is_payable() && !items.iter().any(cart_item::Model::is_negotiable);
    (totals, payable)
}

/// Cart grouped by supplier. The coupon preview is applied to each supplier
/// group, since each group is checked out separately.
pub async fn summarize(
    db: &DatabaseConnection,
    buyer_id: &str,
    coupon: Option<&str>,
) -> Result<CartSummary, DomainError> {
    let (discount, coupon_code) = discount_for(coupon)?;
    let items = list_items(db, buyer_id).await?;
    let item_count = items.len();

    let suppliers: Vec<SupplierCart> = group_by_supplier(items, |item| item.supplier_id.as_str())
        .into_iter()
        .map(|(supplier_id, items)| {
            let (totals, payable) = supplier_totals(&items, discount);
            SupplierCart {
                supplier_id,
                items,
                totals,
                payable,
            }
        })
        .collect();

    let grand_total = suppliers
        .iter()
        .fold(CostBreakdown::default(), |mut acc, group| {
            acc.subtotal += group.totals.subtotal;
            acc.shipping += group.totals.shipping;
            acc.vat += group.totals.vat;
            acc.discount += group.totals.discount;
            acc.total += group.totals.total;
            acc.negotiable_lines += group.totals.negotiable_lines;
            acc.negotiable_shipping += group.totals.negotiable_shipping;
            acc
        });

    Ok(CartSummary {
        buyer_id: buyer_id.to_string(),
        coupon_code,
        item_count,
        suppliers,
        grand_total,
    })
}
