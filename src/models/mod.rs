pub mod cart_item;
pub mod catalog_option;
pub mod catalog_version;
pub mod order;
pub mod product;
pub mod supplier;

pub use order::{OrderDto, OrderLine};
pub use product::{LocalizedText, ProductDto, ProductInput};
pub use supplier::SupplierDto;
