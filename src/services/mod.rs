//! Services Layer
//!
//! Business logic behind the HTTP handlers. Services take a database
//! connection (and a repository for products) and return `DomainError`s.

pub mod cart_service;
pub mod catalog_service;
pub mod order_service;
pub mod product_service;
pub mod supplier_service;

pub use catalog_service::CatalogKind;
pub use order_service::{OrderFilter, PaymentStatus, PaymentUpdate};
