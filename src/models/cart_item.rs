use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pricing::LineAmounts;

/// Snapshot of one configured product in a buyer's cart
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub buyer_id: String,
    pub product_id: String,
    pub supplier_id: String,
    /// Unit price resolved from the matching tier, NULL when negotiable
    pub price: Option<f64>,
    pub quantity: i64,
    pub color: Option<String>,
    pub size: Option<String>,
    /// Shipping resolved from the delivery location, NULL when not numeric
    pub shipping_cost: Option<f64>,
    /// Location price was the "Unlimited" sentinel
    pub shipping_negotiable: bool,
    pub delivery_location: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn amounts(&self) -> LineAmounts {
        LineAmounts {
            unit_price: self.price,
            quantity: u64::try_from(self.quantity).ok(),
            shipping_cost: self.shipping_cost,
            shipping_negotiable: self.shipping_negotiable,
        }
    }

    /// Price or shipping must be agreed with the supplier before paying.
    pub fn is_negotiable(&self) -> bool {
        self.amounts().line_total().is_none() || self.shipping_negotiable
    }
}
