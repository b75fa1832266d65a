use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Product,
    response::ApiResponse,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Full catalog snapshot", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let items = state.store.all_products();
    let data = ProductList { items };
    Ok(Json(ApiResponse::success("Products", data)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Numeric product ID, or the literal `promoted`")
    ),
    responses(
        (status = 200, description = "Single product, or the promoted list for `promoted`", body = ApiResponse<Product>),
        (status = 400, description = "Non-numeric product ID"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    // The literal segment wins over numeric parsing; `/products/promoted`
    // and `/products/42` share this route.
    if id == "promoted" {
        let items = state.store.promoted_products();
        return Ok(Json(ApiResponse::success(
            "Promoted products",
            serde_json::json!(items),
        )));
    }

    let id: i32 = id
        .parse()
        .map_err(|_| AppError::BadRequest("invalid product id".to_string()))?;
    let product = state.store.get_product(id)?;
    Ok(Json(ApiResponse::success(
        "Product",
        serde_json::json!(product),
    )))
}
