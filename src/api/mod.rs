pub mod cart;
pub mod catalog;
pub mod health;
pub mod orders;
pub mod products;
pub mod suppliers;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::pricing::currency::{format_total, negotiable_label};
use crate::pricing::{CostBreakdown, Locale, format_amount};

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Suppliers
        .route("/suppliers", post(suppliers::create_supplier))
        .route("/suppliers/:id", get(suppliers::get_supplier))
        // Products
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/:id/quote", post(products::quote_product))
        // Shared option lists
        .route(
            "/catalog/:kind",
            get(catalog::list_options).post(catalog::add_option),
        )
        // Cart
        .route(
            "/cart/:buyer_id",
            get(cart::get_cart).delete(cart::clear_cart),
        )
        .route("/cart/:buyer_id/items", post(cart::add_item))
        .route(
            "/cart/:buyer_id/items/:id",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/cart/:buyer_id/checkout", post(cart::checkout))
        // Orders
        .route("/orders", get(orders::list_orders))
        .route("/orders/:bill_number", get(orders::get_order))
        .route(
            "/orders/:bill_number/payment",
            post(orders::payment_webhook),
        )
        .with_state(state)
}

/// JSON error body for a failed service call
pub fn error_response(error: DomainError) -> Response {
    let (status, message) = match error {
        DomainError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        DomainError::InvalidState(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        DomainError::Database(msg) | DomainError::Internal(msg) => {
            tracing::error!("Request failed: {}", msg);
            (StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    };

    (
        status,
        Json(json!({
            "success": false,
            "error": message
        })),
    )
        .into_response()
}

/// Breakdown amounts rendered for display next to the raw numbers
pub(crate) fn formatted_breakdown(totals: &CostBreakdown, locale: Locale) -> Value {
    let shipping = if totals.shipping_is_negotiable() {
        negotiable_label(locale).to_string()
    } else {
        format_amount(totals.shipping, locale)
    };

    json!({
        "subtotal": format_amount(totals.subtotal, locale),
        "shipping": shipping,
        "vat": format_amount(totals.vat, locale),
        "discount": format_amount(totals.discount, locale),
        "total": format_total(totals.total_display(), locale),
    })
}
