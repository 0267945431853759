//! Domain layer - Pure business abstractions
//!
//! Only trait definitions and domain error types live here.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
