use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub bill_number: String,
    pub buyer_id: String,
    pub supplier_id: String,
    pub items: String, // JSON array of OrderLine
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub vat: f64,
    pub discount: f64,
    pub coupon_code: Option<String>,
    pub total: f64,
    pub payment_status: String, // 'pending', 'paid', 'failed', 'expired'
    pub sadad_number: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Cart item as frozen into an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub price: f64,
    pub quantity: u64,
    pub color: Option<String>,
    pub size: Option<String>,
    pub shipping_cost: f64,
    pub delivery_location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: i32,
    pub bill_number: String,
    pub buyer_id: String,
    pub supplier_id: String,
    pub items: Vec<OrderLine>,
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub vat: f64,
    pub discount: f64,
    pub coupon_code: Option<String>,
    pub total: f64,
    pub payment_status: String,
    pub sadad_number: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for OrderDto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            bill_number: model.bill_number,
            buyer_id: model.buyer_id,
            supplier_id: model.supplier_id,
            items: serde_json::from_str(&model.items).unwrap_or_default(),
            subtotal: model.subtotal,
            shipping_cost: model.shipping_cost,
            vat: model.vat,
            discount: model.discount,
            coupon_code: model.coupon_code,
            total: model.total,
            payment_status: model.payment_status,
            sadad_number: model.sadad_number,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
