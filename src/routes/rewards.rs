use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Reward, User},
    response::ApiResponse,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct RewardList {
    pub items: Vec<Reward>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rewards))
        .route("/{id}/redeem", post(redeem_reward))
}

#[utoipa::path(
    get,
    path = "/api/rewards",
    responses(
        (status = 200, description = "All redeemable rewards", body = ApiResponse<RewardList>)
    ),
    tag = "Rewards"
)]
pub async fn list_rewards(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RewardList>>> {
    let items = state.store.all_rewards();
    let data = RewardList { items };
    Ok(Json(ApiResponse::success("Rewards", data)))
}

#[utoipa::path(
    post,
    path = "/api/rewards/{id}/redeem",
    params(
        ("id" = i32, Path, description = "Reward ID")
    ),
    responses(
        (status = 200, description = "Points deducted; returns the updated user", body = ApiResponse<User>),
        (status = 400, description = "Insufficient points"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Reward or user not found"),
    ),
    security(("session_cookie" = [])),
    tag = "Rewards"
)]
pub async fn redeem_reward(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<User>>> {
    let updated = state.store.redeem_reward(user.user_id, id)?;
    tracing::info!(
        user_id = updated.id,
        reward_id = id,
        points_left = updated.points,
        "reward redeemed"
    );
    Ok(Json(ApiResponse::success("Reward redeemed", updated)))
}
