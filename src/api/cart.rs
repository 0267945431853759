use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::{error_response, formatted_breakdown};
use crate::infrastructure::AppState;
use crate::models::cart_item;
use crate::pricing::Locale;
use crate::pricing::currency::{format_amount, negotiable_label};
use crate::services::cart_service::{self, AddCartItem, SupplierCart};
use crate::services::order_service;

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub coupon: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u64,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub supplier_id: String,
    pub coupon: Option<String>,
}

fn present_item(item: &cart_item::Model, locale: Locale) -> Value {
    let line_total = item.amounts().line_total();
    let label = if item.is_negotiable() {
        negotiable_label(locale).to_string()
    } else {
        format_amount(line_total.unwrap_or(0.0), locale)
    };

    json!({
        "item": item,
        "lineTotal": line_total,
        "lineTotalLabel": label,
    })
}

fn present_group(group: &SupplierCart, locale: Locale) -> Value {
    let items: Vec<Value> = group.items.iter().map(|i| present_item(i, locale)).collect();
    json!({
        "supplierId": group.supplier_id,
        "items": items,
        "totals": group.totals,
        "formatted": formatted_breakdown(&group.totals, locale),
        "payable": group.payable,
    })
}

/// GET /api/cart/:buyer_id - Cart grouped by supplier with totals
#[utoipa::path(
    get,
    path = "/api/cart/{buyer_id}",
    params(
        ("buyer_id" = String, Path, description = "Buyer"),
        ("coupon" = Option<String>, Query, description = "Coupon to preview"),
        ("locale" = Option<String>, Query, description = "en or ar")
    ),
    responses(
        (status = 200, description = "Cart summary"),
        (status = 400, description = "Unknown coupon")
    )
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(buyer_id): Path<String>,
    Query(params): Query<CartQuery>,
) -> impl IntoResponse {
    let locale = state.locale(params.locale.as_deref());

    match cart_service::summarize(state.db(), &buyer_id, params.coupon.as_deref()).await {
        Ok(summary) => {
            let suppliers: Vec<Value> = summary
                .suppliers
                .iter()
                .map(|g| present_group(g, locale))
                .collect();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "buyerId": summary.buyer_id,
                    "couponCode": summary.coupon_code,
                    "itemCount": summary.item_count,
                    "suppliers": suppliers,
                    "grandTotal": summary.grand_total,
                    "grandTotalFormatted": formatted_breakdown(&summary.grand_total, locale),
                })),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// DELETE /api/cart/:buyer_id - Empty the cart
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(buyer_id): Path<String>,
) -> impl IntoResponse {
    match cart_service::clear_cart(state.db(), &buyer_id).await {
        Ok(removed) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "removed": removed
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/cart/:buyer_id/items - Add a product configuration
#[utoipa::path(
    post,
    path = "/api/cart/{buyer_id}/items",
    params(("buyer_id" = String, Path, description = "Buyer")),
    responses(
        (status = 201, description = "Item added or merged"),
        (status = 400, description = "Invalid quantity, color, size or location"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path(buyer_id): Path<String>,
    Json(payload): Json<AddCartItem>,
) -> impl IntoResponse {
    match cart_service::add_item(state.db(), &buyer_id, payload).await {
        Ok(item) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "data": present_item(&item, state.default_locale)
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/cart/:buyer_id/items/:id - Change quantity
pub async fn update_item(
    State(state): State<AppState>,
    Path((buyer_id, id)): Path<(String, i32)>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> impl IntoResponse {
    match cart_service::update_quantity(state.db(), &buyer_id, id, payload.quantity).await {
        Ok(item) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": present_item(&item, state.default_locale)
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/cart/:buyer_id/items/:id
pub async fn remove_item(
    State(state): State<AppState>,
    Path((buyer_id, id)): Path<(String, i32)>,
) -> impl IntoResponse {
    match cart_service::remove_item(state.db(), &buyer_id, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/cart/:buyer_id/checkout - Place an order for one supplier's items
#[utoipa::path(
    post,
    path = "/api/cart/{buyer_id}/checkout",
    params(("buyer_id" = String, Path, description = "Buyer")),
    responses(
        (status = 201, description = "Order created, payment pending"),
        (status = 422, description = "Nothing payable for this supplier")
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(buyer_id): Path<String>,
    Json(payload): Json<CheckoutRequest>,
) -> impl IntoResponse {
    match order_service::checkout(
        state.db(),
        &buyer_id,
        &payload.supplier_id,
        payload.coupon.as_deref(),
    )
    .await
    {
        Ok(order) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "order": order
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
