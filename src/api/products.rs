use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::{error_response, formatted_breakdown};
use crate::domain::ProductFilter;
use crate::infrastructure::AppState;
use crate::models::product::{ProductDto, ProductInput};
use crate::pricing::currency::{
    format_scalar, format_shipping, format_unit_price, negotiable_label,
};
use crate::pricing::{Locale, format_amount, tier_ranges};
use crate::services::product_service;

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub supplier_id: Option<String>,
    pub category: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub supplier_id: String,
    #[serde(flatten)]
    pub product: ProductInput,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// Version the editor loaded
    pub version: i32,
    #[serde(flatten)]
    pub product: ProductInput,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub quantity: u64,
    pub location: Option<String>,
    pub locale: Option<String>,
}

/// Product document plus its quantity ranges labelled for `locale`
fn present(product: &ProductDto, locale: Locale) -> Value {
    let tiers: Vec<Value> = tier_ranges(&product.price_ranges)
        .into_iter()
        .map(|range| {
            let price_label = match range.unit_price {
                Some(price) => format_amount(price, locale),
                None => negotiable_label(locale).to_string(),
            };
            let shipping: Vec<Value> = product.price_ranges[range.index]
                .locations
                .iter()
                .map(|entry| {
                    json!({
                        "location": entry.location,
                        "label": format_scalar(&entry.location_price, locale),
                    })
                })
                .collect();
            json!({
                "index": range.index,
                "min": range.min,
                "max": range.max,
                "label": range.label,
                "unitPrice": range.unit_price,
                "priceLabel": price_label,
                "shipping": shipping,
            })
        })
        .collect();

    json!({
        "locale": locale.code(),
        "product": product,
        "name": product.product_name.get(locale),
        "tiers": tiers,
    })
}

/// GET /api/products - List products, optionally by supplier or category
#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("supplier_id" = Option<String>, Query, description = "Only products of this supplier"),
        ("category" = Option<String>, Query, description = "Only products in this category")
    ),
    responses(
        (status = 200, description = "List of products")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsQuery>,
) -> impl IntoResponse {
    let locale = state.locale(params.locale.as_deref());
    let filter = ProductFilter {
        supplier_id: params.supplier_id,
        category: params.category,
    };

    match product_service::list_products(state.product_repo.as_ref(), filter).await {
        Ok(products) => {
            let items: Vec<Value> = products.iter().map(|p| present(p, locale)).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "products": items,
                    "count": items.len()
                })),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// POST /api/products - Create a product for a supplier
#[utoipa::path(
    post,
    path = "/api/products",
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Invalid product form")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Query(params): Query<LocaleQuery>,
    Json(payload): Json<CreateProductRequest>,
) -> impl IntoResponse {
    let locale = state.locale(params.locale.as_deref());

    match product_service::create_product(
        state.product_repo.as_ref(),
        state.db(),
        &payload.supplier_id,
        payload.product,
    )
    .await
    {
        Ok(product) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "data": present(&product, locale)
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/products/:id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with its price ranges"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LocaleQuery>,
) -> impl IntoResponse {
    let locale = state.locale(params.locale.as_deref());

    match product_service::get_product(state.product_repo.as_ref(), &id).await {
        Ok(product) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": present(&product, locale)
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/products/:id - Overwrite the whole product document
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product updated"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product changed since it was loaded")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LocaleQuery>,
    Json(payload): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    let locale = state.locale(params.locale.as_deref());

    match product_service::update_product(
        state.product_repo.as_ref(),
        state.db(),
        &id,
        payload.version,
        payload.product,
    )
    .await
    {
        Ok(product) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": present(&product, locale)
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/products/:id
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match product_service::delete_product(state.product_repo.as_ref(), &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/products/:id/quote - Price a quantity for a delivery location
#[utoipa::path(
    post,
    path = "/api/products/{id}/quote",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Unit price, shipping and totals"),
        (status = 400, description = "Quantity below 1"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn quote_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<QuoteRequest>,
) -> impl IntoResponse {
    let locale = state.locale(payload.locale.as_deref());

    let product = match product_service::get_product(state.product_repo.as_ref(), &id).await {
        Ok(product) => product,
        Err(e) => return error_response(e),
    };

    match product_service::quote_product(&product, payload.quantity, payload.location.as_deref()) {
        Ok(quote) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "quote": {
                    "quantity": quote.quantity,
                    "tierIndex": quote.tier_index,
                    "unitPrice": quote.unit_price.amount(),
                    "unitPriceLabel": format_unit_price(quote.unit_price, locale),
                    "shippingCost": quote.shipping.amount(),
                    "shippingLabel": format_shipping(quote.shipping, locale),
                    "breakdown": quote.breakdown,
                    "formatted": formatted_breakdown(&quote.breakdown, locale),
                }
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
