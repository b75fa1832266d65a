use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{error::AppError, session::SESSION_COOKIE, state::AppState};

/// Session gate: resolving this extractor is the `Unauthenticated ->
/// Authenticated` transition; any failure short-circuits the handler with 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub token: Uuid,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_header = parts
            .headers
            .get(header::COOKIE)
            .ok_or(AppError::Unauthenticated)?;

        let cookie_str = cookie_header
            .to_str()
            .map_err(|_| AppError::Unauthenticated)?;

        let raw_token =
            session_cookie_value(cookie_str).ok_or(AppError::Unauthenticated)?;

        let token = Uuid::parse_str(raw_token).map_err(|_| AppError::Unauthenticated)?;

        let session = state.sessions.get(token).ok_or_else(|| {
            tracing::info!(%token, "rejected request with unknown session token");
            AppError::Unauthenticated
        })?;

        Ok(AuthUser {
            user_id: session.user_id,
            token,
        })
    }
}

fn session_cookie_value(cookie_str: &str) -> Option<&str> {
    cookie_str.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}
