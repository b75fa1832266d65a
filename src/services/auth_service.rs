use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::User,
    routes::auth::{LoginRequest, RegisterRequest},
    state::AppState,
    store::NewUser,
};

/// Registers the user and opens a session; returns the session token alongside
/// the stored record. Username uniqueness is enforced by the store itself.
pub async fn register_user(state: &AppState, payload: RegisterRequest) -> AppResult<(User, Uuid)> {
    let RegisterRequest {
        username,
        password,
        email,
        full_name,
    } = payload;

    if username.trim().is_empty() {
        return Err(AppError::BadRequest("username must not be empty".into()));
    }
    if password.len() < 6 {
        return Err(AppError::BadRequest(
            "password must be at least 6 characters".into(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let user = state.store.create_user(NewUser {
        username,
        password_hash,
        email,
        full_name,
        affiliate_code: generate_affiliate_code(),
    })?;

    let token = state.sessions.create(user.id);
    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok((user, token))
}

/// Verifies credentials and opens a session. Unknown usernames and wrong
/// passwords are indistinguishable to the caller.
pub async fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<(User, Uuid)> {
    let LoginRequest { username, password } = payload;

    let user = state
        .store
        .get_user_by_username(&username)
        .ok_or(AppError::InvalidCredentials)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::info!(username = %username, "failed login attempt");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.sessions.create(user.id);
    tracing::info!(user_id = user.id, username = %user.username, "user logged in");

    Ok((user, token))
}

// Immutable once assigned, so a short random handle is enough.
fn generate_affiliate_code() -> String {
    let mut code = Uuid::new_v4().simple().to_string();
    code.truncate(8);
    code
}
