use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pricing::{Locale, PriceTier};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_name: String, // JSON LocalizedText
    pub description: String,  // JSON LocalizedText
    pub category: String,
    pub sub_category: String,
    pub sizes: String,  // JSON array
    pub colors: String, // JSON array
    pub main_image_url: String,
    pub additional_image_urls: String, // JSON array
    pub main_location: String,
    pub price_ranges: String, // JSON array of PriceTier
    pub supplier_id: String,
    pub supplier_name: String,
    pub supplier_number: Option<String>,
    /// Bumped on every overwrite; updates must present the version they read.
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Supplier,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Text stored per language code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Ar => &self.ar,
        }
    }
}

/// Product form payload, used for both create and overwrite
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub product_name: LocalizedText,
    pub description: LocalizedText,
    pub category: String,
    pub sub_category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub main_image_url: String,
    #[serde(default)]
    pub additional_image_urls: Vec<String>,
    pub main_location: String,
    #[serde(default)]
    pub price_ranges: Vec<PriceTier>,
}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub product_name: LocalizedText,
    pub description: LocalizedText,
    pub category: String,
    pub sub_category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub main_image_url: String,
    pub additional_image_urls: Vec<String>,
    pub main_location: String,
    pub price_ranges: Vec<PriceTier>,
    pub supplier_id: String,
    pub supplier_name: String,
    pub supplier_number: Option<String>,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for ProductDto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_name: serde_json::from_str(&model.product_name).unwrap_or_default(),
            description: serde_json::from_str(&model.description).unwrap_or_default(),
            category: model.category,
            sub_category: model.sub_category,
            sizes: serde_json::from_str(&model.sizes).unwrap_or_default(),
            colors: serde_json::from_str(&model.colors).unwrap_or_default(),
            main_image_url: model.main_image_url,
            additional_image_urls: serde_json::from_str(&model.additional_image_urls)
                .unwrap_or_default(),
            main_location: model.main_location,
            price_ranges: serde_json::from_str(&model.price_ranges).unwrap_or_default(),
            supplier_id: model.supplier_id,
            supplier_name: model.supplier_name,
            supplier_number: model.supplier_number,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
