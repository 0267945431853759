//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::product::{ProductDto, ProductInput};

/// Filter criteria for product queries
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub supplier_id: Option<String>,
    pub category: Option<String>,
}

/// Supplier details copied onto a product when it is created
#[derive(Debug, Clone)]
pub struct SupplierSnapshot {
    pub supplier_id: String,
    pub supplier_name: String,
    pub supplier_number: Option<String>,
}

/// Repository trait for Product documents
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find all products matching the filter, newest first
    async fn find_all(&self, filter: ProductFilter) -> Result<Vec<ProductDto>, DomainError>;

    /// Find a product by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<ProductDto>, DomainError>;

    /// Insert a new product owned by the given supplier
    async fn create(
        &self,
        input: ProductInput,
        supplier: SupplierSnapshot,
    ) -> Result<ProductDto, DomainError>;

    /// Overwrite a product if it is still at `expected_version`
    async fn update(
        &self,
        id: &str,
        expected_version: i32,
        input: ProductInput,
    ) -> Result<ProductDto, DomainError>;

    /// Hard delete
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
