use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult, middleware::auth::AuthUser, models::Affiliate, response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/affiliate", get(affiliate_status))
}

#[utoipa::path(
    get,
    path = "/api/affiliate",
    responses(
        (status = 200, description = "Affiliate record, provisioned on first access", body = ApiResponse<Affiliate>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_cookie" = [])),
    tag = "Affiliate"
)]
pub async fn affiliate_status(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Affiliate>>> {
    // First access provisions a default record; no separate signup step.
    let affiliate = state.store.get_or_create_affiliate(user.user_id)?;
    Ok(Json(ApiResponse::success("Affiliate status", affiliate)))
}
