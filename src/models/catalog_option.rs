use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_options")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kind: String, // 'size', 'color', 'location', 'quantity', 'category', 'sub_category'
    pub value: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
