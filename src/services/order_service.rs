//! Order Service - checkout of one supplier's cart and payment tracking
//!
//! An order freezes the cart lines and totals at checkout time. Orders are
//! never deleted; only their payment status moves.

use sea_orm::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;
use crate::models::cart_item::{self, Entity as CartItem};
use crate::models::order::{self, Entity as Order, OrderDto, OrderLine};
use crate::services::cart_service;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Expired,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Expired => "expired",
        }
    }

    /// Whether an order in this status may move to `next`
    pub fn can_become(&self, next: PaymentStatus) -> bool {
        match (self, next) {
            (current, next) if *current == next => true,
            (PaymentStatus::Paid, _) => false,
            (_, PaymentStatus::Pending) => false,
            _ => true,
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            "expired" => Ok(PaymentStatus::Expired),
            other => Err(DomainError::Validation(format!(
                "status: Unknown payment status '{}'",
                other
            ))),
        }
    }
}

/// Notification from the payment gateway
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentUpdate {
    pub status: PaymentStatus,
    pub sadad_number: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub buyer_id: Option<String>,
    pub supplier_id: Option<String>,
}

/// Bill numbers are timestamp based with a random suffix, e.g. `261014153007123456`.
pub fn generate_bill_number() -> String {
    let stamp = chrono::Utc::now().format("%y%m%d%H%M%S");
    let suffix = uuid::Uuid::new_v4().as_u128() % 1_000_000;
    format!("{}{:06}", stamp, suffix)
}

/// Attempts at finding an unused bill number before giving up
const BILL_NUMBER_ATTEMPTS: usize = 3;

/// Insert `order` under a fresh bill number, drawing another one when the
/// unique index rejects it.
async fn insert_with_bill_number<C, F>(
    db: &C,
    order: order::ActiveModel,
    mut next_bill_number: F,
) -> Result<order::Model, DomainError>
where
    C: ConnectionTrait,
    F: FnMut() -> String,
{
    for attempt in 1..=BILL_NUMBER_ATTEMPTS {
        let mut candidate = order.clone();
        let bill_number = next_bill_number();
        candidate.bill_number = Set(bill_number.clone());

        match candidate.insert(db).await {
            Ok(saved) => return Ok(saved),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::warn!(
                    "Bill number {} already taken (attempt {})",
                    bill_number,
                    attempt
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(DomainError::Internal(
        "Could not allocate a unique bill number".to_string(),
    ))
}

fn freeze_line(item: &cart_item::Model) -> OrderLine {
    OrderLine {
        product_id: item.product_id.clone(),
        price: item.price.unwrap_or(0.0),
        quantity: u64::try_from(item.quantity).unwrap_or(0),
        color: item.color.clone(),
        size: item.size.clone(),
        shipping_cost: item.shipping_cost.unwrap_or(0.0),
        delivery_location: item.delivery_location.clone(),
    }
}

fn refuse(buyer_id: &str, supplier_id: &str, reason: &str) -> DomainError {
    tracing::warn!(
        "Checkout refused for buyer {} / supplier {}: {}",
        buyer_id,
        supplier_id,
        reason
    );
    DomainError::InvalidState(reason.to_string())
}

/// Turn the buyer's cart items of one supplier into a pending order.
pub async fn checkout(
    db: &DatabaseConnection,
    buyer_id: &str,
    supplier_id: &str,
    coupon: Option<&str>,
) -> Result<OrderDto, DomainError> {
    let (discount, coupon_code) = cart_service::discount_for(coupon)?;

    let items = CartItem::find()
        .filter(cart_item::Column::BuyerId.eq(buyer_id))
        .filter(cart_item::Column::SupplierId.eq(supplier_id))
        .order_by_asc(cart_item::Column::Id)
        .all(db)
        .await?;

    if items.is_empty() {
        return Err(refuse(buyer_id, supplier_id, "No cart items for this supplier"));
    }
    if items.iter().any(cart_item::Model::is_negotiable) {
        return Err(refuse(
            buyer_id,
            supplier_id,
            "Pricing Negotiable - Contact Supplier",
        ));
    }

    let (totals, payable) = cart_service::supplier_totals(&items, discount);
    if !payable {
        return Err(refuse(buyer_id, supplier_id, "Contact Supplier"));
    }

    let lines: Vec<OrderLine> = items.iter().map(freeze_line).collect();
    let item_ids: Vec<i32> = items.iter().map(|i| i.id).collect();
    let now = chrono::Utc::now().to_rfc3339();

    let txn = db.begin().await?;
    let pending = order::ActiveModel {
        buyer_id: Set(buyer_id.to_string()),
        supplier_id: Set(supplier_id.to_string()),
        items: Set(serde_json::to_string(&lines)?),
        subtotal: Set(totals.subtotal),
        shipping_cost: Set(totals.shipping),
        vat: Set(totals.vat),
        discount: Set(totals.discount),
        coupon_code: Set(coupon_code),
        total: Set(totals.total),
        payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
        sadad_number: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let saved = insert_with_bill_number(&txn, pending, generate_bill_number).await?;

    CartItem::delete_many()
        .filter(cart_item::Column::Id.is_in(item_ids))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    tracing::info!(
        "Order {} placed by {} with supplier {} (total {:.2})",
        saved.bill_number,
        buyer_id,
        supplier_id,
        saved.total
    );
    Ok(OrderDto::from(saved))
}

async fn find_order(db: &DatabaseConnection, bill_number: &str) -> Result<order::Model, DomainError> {
    Order::find()
        .filter(order::Column::BillNumber.eq(bill_number))
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)
}

pub async fn get_order(db: &DatabaseConnection, bill_number: &str) -> Result<OrderDto, DomainError> {
    Ok(OrderDto::from(find_order(db, bill_number).await?))
}

pub async fn list_orders(
    db: &DatabaseConnection,
    filter: OrderFilter,
) -> Result<Vec<OrderDto>, DomainError> {
    let mut condition = Condition::all();

    if let Some(buyer_id) = filter.buyer_id {
        condition = condition.add(order::Column::BuyerId.eq(buyer_id));
    }

    if let Some(supplier_id) = filter.supplier_id {
        condition = condition.add(order::Column::SupplierId.eq(supplier_id));
    }

    let orders = Order::find()
        .filter(condition)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?;

    Ok(orders.into_iter().map(OrderDto::from).collect())
}

/// Apply a gateway notification. Repeating the current status is accepted.
pub async fn apply_payment_update(
    db: &DatabaseConnection,
    bill_number: &str,
    update: PaymentUpdate,
) -> Result<OrderDto, DomainError> {
    let order = find_order(db, bill_number).await?;
    let current = PaymentStatus::from_str(&order.payment_status)
        .map_err(|_| DomainError::Internal(format!("Corrupt payment status on {}", bill_number)))?;

    if !current.can_become(update.status) {
        tracing::warn!(
            "Ignored payment update {} -> {} for order {}",
            current.as_str(),
            update.status.as_str(),
            bill_number
        );
        return Err(DomainError::InvalidState(format!(
            "Order is already {}",
            current.as_str()
        )));
    }

    let sadad_number = update
        .sadad_number
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| order.sadad_number.clone());

    let mut active: order::ActiveModel = order.into();
    active.payment_status = Set(update.status.as_str().to_string());
    active.sadad_number = Set(sadad_number);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());
    let updated = active.update(db).await?;

    tracing::info!(
        "Order {} payment status is now {}",
        updated.bill_number,
        updated.payment_status
    );
    Ok(OrderDto::from(updated))
}
