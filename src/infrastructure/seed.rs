use sea_orm::*;
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::SeaOrmProductRepository;
use crate::models::product::ProductInput;
use crate::models::supplier::{Entity as Supplier, SupplierDto};
use crate::services::{product_service, supplier_service};

fn demo_products() -> Result<Vec<ProductInput>, DomainError> {
    let products = json!([
        {
            "productName": { "en": "Cotton T-Shirt", "ar": "قميص قطني" },
            "description": { "en": "Plain crew neck shirt", "ar": "قميص بياقة دائرية" },
            "category": "Apparel",
            "subCategory": "Shirts",
            "sizes": ["Small", "Medium", "Large"],
            "colors": ["Black", "White"],
            "mainImageUrl": "https://example.com/images/tshirt.jpg",
            "additionalImageUrls": [],
            "mainLocation": "Riyadh",
            "priceRanges": [
                {
                    "minQty": "1", "maxQty": "10", "price": 25,
                    "locations": [
                        { "location": "Riyadh", "locationPrice": 15 },
                        { "location": "Jeddah", "locationPrice": 30 }
                    ]
                },
                { "minQty": "11", "maxQty": "100", "price": 20 },
                { "minQty": "101", "maxQty": "Unlimited", "price": "" }
            ]
        },
        {
            "productName": { "en": "Office Chair", "ar": "كرسي مكتب" },
            "description": { "en": "Ergonomic mesh chair", "ar": "كرسي شبكي مريح" },
            "category": "Furniture",
            "subCategory": "Chairs",
            "mainImageUrl": "https://example.com/images/chair.jpg",
            "mainLocation": "Dammam",
            "priceRanges": [
                {
                    "minQty": "1", "maxQty": "Unlimited", "price": 450,
                    "locations": [
                        { "location": "Dammam", "locationPrice": 0 },
                        { "location": "Riyadh", "locationPrice": "Unlimited" }
                    ]
                }
            ]
        }
    ]);

    Ok(serde_json::from_value(products)?)
}

/// Insert a demo supplier with a couple of products. Does nothing when a
/// supplier already exists.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DomainError> {
    if Supplier::find().count(db).await? > 0 {
        tracing::info!("Suppliers already present, skipping demo data");
        return Ok(());
    }

    let supplier = supplier_service::create_supplier(
        db,
        SupplierDto {
            id: None,
            name: "Al Noor Trading".to_string(),
            number: Some("0551234567".to_string()),
        },
    )
    .await?;
    let supplier_id = supplier.id.ok_or_else(|| {
        DomainError::Internal("Supplier was stored without an id".to_string())
    })?;

    let repo = SeaOrmProductRepository::new(db.clone());
    for input in demo_products()? {
        product_service::create_product(&repo, db, &supplier_id, input).await?;
    }
    Ok(())
}
