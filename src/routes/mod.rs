use axum::Router;

use crate::state::AppState;

pub mod affiliate;
pub mod auth;
pub mod cart;
pub mod doc;
pub mod health;
pub mod products;
pub mod rewards;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/rewards", rewards::router())
        .nest("/cart", cart::router())
        .merge(users::router())
        .merge(affiliate::router())
}
