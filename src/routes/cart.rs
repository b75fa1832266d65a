use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartItem, CartLine},
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CartList {
    #[schema(value_type = Vec<CartLine>)]
    pub items: Vec<CartLine>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(cart_list).post(add_to_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart rows joined with their products", body = ApiResponse<CartList>),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "A cart row references a product missing from the catalog"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartList>>> {
    // A dangling product reference surfaces as a server error on purpose;
    // silently dropping the row would corrupt the perceived cart total.
    let items = state.store.cart_items(user.user_id)?;
    let data = CartList { items };
    Ok(Json(ApiResponse::success("Cart", data)))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Row added, or quantity merged into the existing row", body = ApiResponse<CartItem>),
        (status = 400, description = "Invalid quantity"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Unknown product"),
    ),
    security(("session_cookie" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CartItem>>)> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }
    let item = state
        .store
        .add_to_cart(user.user_id, payload.product_id, payload.quantity)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Added to cart", item)),
    ))
}
