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
use crate::services::catalog_service::{self, CatalogKind};

#[derive(Debug, Deserialize)]
pub struct AddOptionRequest {
    pub value: String,
}

/// GET /api/catalog/:kind - Values of one option list and its version
#[utoipa::path(
    get,
    path = "/api/catalog/{kind}",
    params(("kind" = String, Path, description = "size, color, location, quantity, category or sub_category")),
    responses(
        (status = 200, description = "Option list"),
        (status = 400, description = "Unknown list")
    )
)]
pub async fn list_options(
    State(db): State<DatabaseConnection>,
    Path(kind): Path<String>,
) -> impl IntoResponse {
    let kind = match kind.parse::<CatalogKind>() {
        Ok(kind) => kind,
        Err(e) => return error_response(e),
    };

    match catalog_service::list_options(&db, kind).await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "catalog": snapshot
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/catalog/:kind - Add a user-created option
#[utoipa::path(
    post,
    path = "/api/catalog/{kind}",
    params(("kind" = String, Path, description = "Option list")),
    responses(
        (status = 201, description = "Option added"),
        (status = 400, description = "Invalid or duplicate value")
    )
)]
pub async fn add_option(
    State(db): State<DatabaseConnection>,
    Path(kind): Path<String>,
    Json(payload): Json<AddOptionRequest>,
) -> impl IntoResponse {
    let kind = match kind.parse::<CatalogKind>() {
        Ok(kind) => kind,
        Err(e) => return error_response(e),
    };

    match catalog_service::add_option(&db, kind, &payload.value).await {
        Ok(snapshot) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "catalog": snapshot
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
