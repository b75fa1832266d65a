use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    services::auth_service::{login_user, register_user},
    session::{expired_session_cookie, session_cookie},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user and open a session", body = ApiResponse<User>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Username already taken"),
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let (user, token) = register_user(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(token))],
        Json(ApiResponse::success("User created", user)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user and open a session", body = ApiResponse<User>),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (user, token) = login_user(&state, payload).await?;
    Ok((
        [(header::SET_COOKIE, session_cookie(token))],
        Json(ApiResponse::success("Logged in", user)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Drop the session", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Not authenticated"),
    ),
    tag = "Auth"
)]
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    state.sessions.remove(user.token);
    tracing::info!(user_id = user.user_id, "user logged out");
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Json(ApiResponse::success("Logged out", serde_json::json!({}))),
    )
}
