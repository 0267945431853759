use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::services::order_service::{self, OrderFilter, PaymentUpdate};

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub buyer_id: Option<String>,
    pub supplier_id: Option<String>,
}

/// GET /api/orders - List orders for a buyer or supplier
#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("buyer_id" = Option<String>, Query, description = "Orders placed by this buyer"),
        ("supplier_id" = Option<String>, Query, description = "Orders received by this supplier")
    ),
    responses(
        (status = 200, description = "List of orders")
    )
)]
pub async fn list_orders(
    State(db): State<DatabaseConnection>,
    Query(params): Query<ListOrdersQuery>,
) -> impl IntoResponse {
    let filter = OrderFilter {
        buyer_id: params.buyer_id,
        supplier_id: params.supplier_id,
    };

    match order_service::list_orders(&db, filter).await {
        Ok(orders) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "orders": orders,
                "count": orders.len()
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/orders/:bill_number
pub async fn get_order(
    State(db): State<DatabaseConnection>,
    Path(bill_number): Path<String>,
) -> impl IntoResponse {
    match order_service::get_order(&db, &bill_number).await {
        Ok(order) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "order": order
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/orders/:bill_number/payment - Payment gateway notification
#[utoipa::path(
    post,
    path = "/api/orders/{bill_number}/payment",
    params(("bill_number" = String, Path, description = "Bill number")),
    responses(
        (status = 200, description = "Payment status recorded"),
        (status = 404, description = "Unknown bill number"),
        (status = 422, description = "Order is already paid")
    )
)]
pub async fn payment_webhook(
    State(db): State<DatabaseConnection>,
    Path(bill_number): Path<String>,
    Json(payload): Json<PaymentUpdate>,
) -> impl IntoResponse {
    match order_service::apply_payment_update(&db, &bill_number, payload).await {
        Ok(order) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "order": order
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
