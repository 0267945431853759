//! Supplier Service - the owning side of products

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{DomainError, SupplierSnapshot};
use crate::models::supplier::{self, Entity as Supplier, SupplierDto};

pub async fn create_supplier(
    db: &DatabaseConnection,
    dto: SupplierDto,
) -> Result<SupplierDto, DomainError> {
    let name = dto.name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation(
            "name: Supplier name is required".to_string(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_supplier = supplier::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        number: Set(dto
            .number
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };

    let saved = new_supplier.insert(db).await?;
    tracing::info!("Supplier '{}' registered as {}", saved.name, saved.id);
    Ok(SupplierDto::from(saved))
}

pub async fn get_supplier(db: &DatabaseConnection, id: &str) -> Result<SupplierDto, DomainError> {
    let supplier = Supplier::find_by_id(id.to_owned())
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(SupplierDto::from(supplier))
}

/// Name and number as they are right now, for copying onto a new product
pub async fn snapshot(db: &DatabaseConnection, id: &str) -> Result<SupplierSnapshot, DomainError> {
    let supplier = Supplier::find_by_id(id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| DomainError::Validation(format!("supplierId: Unknown supplier '{}'", id)))?;

    Ok(SupplierSnapshot {
        supplier_id: supplier.id,
        supplier_name: supplier.name,
        supplier_number: supplier.number,
    })
}
