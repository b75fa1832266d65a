use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    /// Loyalty balance; only ever decremented by reward redemption.
    pub points: i32,
    /// Assigned at registration, immutable afterwards.
    pub affiliate_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Price in minor currency units.
    pub price: i64,
    pub category: String,
    pub in_stock: bool,
    /// Affiliate commission, integer percent.
    pub commission_rate: i32,
    pub vr_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reward {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub points_required: i32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Affiliate {
    pub id: i32,
    pub user_id: i32,
    /// Accumulated commission in minor currency units; append-only.
    pub earnings: i64,
    /// Append-only counter, bumped once per earnings update.
    pub conversions: i32,
    pub tier: String,
    pub custom_commission: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// A cart row joined against the catalog at read time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Product,
}
