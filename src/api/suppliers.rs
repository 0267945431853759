use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::models::supplier::SupplierDto;
use crate::services::supplier_service;

#[derive(Debug, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    pub number: Option<String>,
}

/// POST /api/suppliers - Register a supplier
#[utoipa::path(
    post,
    path = "/api/suppliers",
    responses(
        (status = 201, description = "Supplier created"),
        (status = 400, description = "Missing name")
    )
)]
pub async fn create_supplier(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateSupplierRequest>,
) -> impl IntoResponse {
    let dto = SupplierDto {
        id: None,
        name: payload.name,
        number: payload.number,
    };

    match supplier_service::create_supplier(&db, dto).await {
        Ok(supplier) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "supplier": supplier
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/suppliers/:id
pub async fn get_supplier(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match supplier_service::get_supplier(&db, &id).await {
        Ok(supplier) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "supplier": supplier
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
