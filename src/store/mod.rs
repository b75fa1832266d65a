//! Repository layer.
//!
//! Handlers only ever see `Arc<dyn Storage>`, so the in-memory adapter can be
//! swapped for a database-backed one without touching the HTTP facade. Compound
//! operations (`create_user`, `redeem_reward`, `get_or_create_affiliate`) are
//! atomic from the caller's point of view; an adapter backed by a network
//! database must keep them so (transaction or optimistic guard), otherwise the
//! check-then-deduct in `redeem_reward` is open to lost updates.

mod memory;

pub use memory::MemStore;

use thiserror::Error;

use crate::models::{Affiliate, CartItem, CartLine, Product, Reward, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("user {0} not found")]
    UserNotFound(i32),

    #[error("product {0} not found")]
    ProductNotFound(i32),

    #[error("reward {0} not found")]
    RewardNotFound(i32),

    #[error("affiliate {0} not found")]
    AffiliateNotFound(i32),

    #[error("username `{0}` is already taken")]
    UsernameTaken(String),

    #[error("insufficient points: have {have}, need {need}")]
    InsufficientPoints { have: i32, need: i32 },

    #[error("cart row references missing product {0}")]
    DanglingProduct(i32),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub affiliate_code: String,
}

pub trait Storage: Send + Sync {
    // Users
    fn get_user(&self, id: i32) -> StoreResult<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    /// Check-and-insert under one lock; rejects duplicates itself rather than
    /// trusting the caller to probe first.
    fn create_user(&self, new: NewUser) -> StoreResult<User>;
    fn update_user_points(&self, id: i32, points: i32) -> StoreResult<User>;
    /// Verifies the balance and deducts in one atomic step. Deliberately
    /// non-idempotent: every successful call deducts again.
    fn redeem_reward(&self, user_id: i32, reward_id: i32) -> StoreResult<User>;

    // Catalog
    fn all_products(&self) -> Vec<Product>;
    /// Products with `commission_rate >= 8`, sorted descending by rate.
    /// Ties keep ascending-id order (stable sort over the id-ordered snapshot).
    fn promoted_products(&self) -> Vec<Product>;
    fn get_product(&self, id: i32) -> StoreResult<Product>;

    // Rewards
    fn all_rewards(&self) -> Vec<Reward>;
    fn get_reward(&self, id: i32) -> StoreResult<Reward>;

    // Affiliates
    fn get_affiliate_by_user_id(&self, user_id: i32) -> Option<Affiliate>;
    fn create_affiliate(&self, user_id: i32) -> StoreResult<Affiliate>;
    /// Lazy provisioning: first lookup for a user creates a default record
    /// (tier "basic", zero counters) so no separate provisioning step exists.
    fn get_or_create_affiliate(&self, user_id: i32) -> StoreResult<Affiliate>;
    /// `earnings += amount`, `conversions += 1`, tier re-derived. No HTTP route
    /// calls this yet; it is library surface for a future checkout flow.
    fn update_affiliate_earnings(&self, id: i32, amount: i64) -> StoreResult<Affiliate>;

    // Cart
    /// Joins each row against the catalog and fails hard on a dangling product
    /// reference; a stale row is an inconsistency, not something to hide.
    fn cart_items(&self, user_id: i32) -> StoreResult<Vec<CartLine>>;
    /// Merges quantity into an existing (user, product) row instead of
    /// duplicating it.
    fn add_to_cart(&self, user_id: i32, product_id: i32, quantity: i32) -> StoreResult<CartItem>;
    /// No route reaches this yet; see DESIGN.md.
    fn clear_cart(&self, user_id: i32);
}
