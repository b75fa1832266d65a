use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult, middleware::auth::AuthUser, models::User, response::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/user", get(current_user))
}

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current user profile", body = ApiResponse<User>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("session_cookie" = [])),
    tag = "Users"
)]
pub async fn current_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let profile = state.store.get_user(user.user_id)?;
    Ok(Json(ApiResponse::success("Current user", profile)))
}
