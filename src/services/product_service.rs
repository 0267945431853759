//! Product Service - Pure business logic without HTTP layer
//!
//! Every write goes through the shared validation module before it reaches
//! the repository.

use sea_orm::DatabaseConnection;

use crate::domain::{DomainError, ProductFilter, ProductRepository};
use crate::models::product::{ProductDto, ProductInput};
use crate::pricing::{self, Quote, delivery_locations};
use crate::services::catalog_service::{self, CatalogKind};
use crate::services::supplier_service;
use crate::validation::validate_product;

/// Make the values used by a product available in the shared option lists
async fn register_options(db: &DatabaseConnection, input: &ProductInput) -> Result<(), DomainError> {
    let mut locations = vec![input.main_location.clone()];
    locations.extend(delivery_locations(&input.price_ranges));

    catalog_service::register_values(db, CatalogKind::Category, &[input.category.clone()]).await?;
    catalog_service::register_values(db, CatalogKind::SubCategory, &[input.sub_category.clone()])
        .await?;
    catalog_service::register_values(db, CatalogKind::Size, &input.sizes).await?;
    catalog_service::register_values(db, CatalogKind::Color, &input.colors).await?;
    catalog_service::register_values(db, CatalogKind::Location, &locations).await?;
    Ok(())
}

/// The product is already stored; a failed registration only leaves the
/// option lists behind, so it is logged instead of failing the write.
async fn sync_options(db: &DatabaseConnection, product_id: &str, input: &ProductInput) {
    if let Err(e) = register_options(db, input).await {
        tracing::error!(
            "Failed to register catalog options for product {}: {}",
            product_id,
            e
        );
    }
}

pub async fn list_products(
    repo: &dyn ProductRepository,
    filter: ProductFilter,
) -> Result<Vec<ProductDto>, DomainError> {
    tracing::debug!(
        "List products - supplier={:?}, category={:?}",
        filter.supplier_id,
        filter.category
    );
    repo.find_all(filter).await
}

pub async fn get_product(repo: &dyn ProductRepository, id: &str) -> Result<ProductDto, DomainError> {
    repo.find_by_id(id).await?.ok_or(DomainError::NotFound)
}

/// Create a product for `supplier_id`, copying the supplier's current name
/// and number onto it.
pub async fn create_product(
    repo: &dyn ProductRepository,
    db: &DatabaseConnection,
    supplier_id: &str,
    input: ProductInput,
) -> Result<ProductDto, DomainError> {
    validate_product(&input)?;
    let supplier = supplier_service::snapshot(db, supplier_id).await?;

    let product = repo.create(input.clone(), supplier).await?;
    sync_options(db, &product.id, &input).await;

    tracing::info!(
        "Product {} created for supplier {}",
        product.id,
        product.supplier_id
    );
    Ok(product)
}

/// Overwrite a product. `expected_version` must be the version the editor read.
pub async fn update_product(
    repo: &dyn ProductRepository,
    db: &DatabaseConnection,
    id: &str,
    expected_version: i32,
    input: ProductInput,
) -> Result<ProductDto, DomainError> {
    validate_product(&input)?;

    let product = match repo.update(id, expected_version, input.clone()).await {
        Ok(product) => product,
        Err(DomainError::Conflict(msg)) => {
            tracing::warn!("Rejected stale product write: {}", msg);
            return Err(DomainError::Conflict(msg));
        }
        Err(e) => return Err(e),
    };
    sync_options(db, &product.id, &input).await;

    tracing::info!("Product {} updated to version {}", product.id, product.version);
    Ok(product)
}

pub async fn delete_product(repo: &dyn ProductRepository, id: &str) -> Result<(), DomainError> {
    repo.delete(id).await?;
    tracing::info!("Product {} deleted", id);
    Ok(())
}

/// Price `quantity` units of a product delivered to `location`
/// (the product's main location when none is given).
pub fn quote_product(
    product: &ProductDto,
    quantity: u64,
    location: Option<&str>,
) -> Result<Quote, DomainError> {
    if quantity == 0 {
        return Err(DomainError::Validation(
            "quantity: Quantity must be at least 1".to_string(),
        ));
    }
    let location = location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(product.main_location.as_str());

    Ok(pricing::quote(&product.price_ranges, quantity, location))
}
