use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::Utc;

use crate::models::{Affiliate, CartItem, CartLine, Product, Reward, User};
use crate::store::{NewUser, Storage, StoreError, StoreResult};
use crate::tiers;

/// In-memory adapter. One mutex over the whole state keeps the compound
/// operations atomic without per-map lock ordering.
pub struct MemStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<i32, User>,
    // BTreeMap so snapshots come out in id order (the documented tie-break
    // for promoted products depends on it).
    products: BTreeMap<i32, Product>,
    rewards: BTreeMap<i32, Reward>,
    affiliates: HashMap<i32, Affiliate>,
    carts: HashMap<i32, Vec<CartItem>>,
    next_user_id: i32,
    next_affiliate_id: i32,
    next_cart_item_id: i32,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_user_id: 1,
                next_affiliate_id: 1,
                next_cart_item_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Replaces the catalog wholesale. Nothing on the `Storage` trait mutates
    /// products, so this is the only way a cart row can come to reference a
    /// product that no longer resolves; `cart_items` reports that as an error.
    pub fn seed_products(&self, products: Vec<Product>) {
        let mut inner = self.lock();
        inner.products.clear();
        for p in products {
            inner.products.insert(p.id, p);
        }
    }

    pub fn seed_rewards(&self, rewards: Vec<Reward>) {
        let mut inner = self.lock();
        inner.rewards.clear();
        for r in rewards {
            inner.rewards.insert(r.id, r);
        }
    }

    /// The fixed storefront catalog the service boots with.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.seed_products(default_catalog());
        store.seed_rewards(default_rewards());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Poisoning only happens if a holder panicked; propagate the panic.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemStore {
    fn get_user(&self, id: i32) -> StoreResult<User> {
        self.lock()
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let mut inner = self.lock();
        if inner.users.values().any(|u| u.username == new.username) {
            return Err(StoreError::UsernameTaken(new.username));
        }
        let id = inner.next_user_id;
        inner.next_user_id += 1;
        let user = User {
            id,
            username: new.username,
            password_hash: new.password_hash,
            email: new.email,
            full_name: new.full_name,
            points: 0,
            affiliate_code: new.affiliate_code,
            created_at: Utc::now(),
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    fn update_user_points(&self, id: i32, points: i32) -> StoreResult<User> {
        let mut inner = self.lock();
        let user = inner
            .users
            .get_mut(&id)
            .ok_or(StoreError::UserNotFound(id))?;
        user.points = points;
        Ok(user.clone())
    }

    fn redeem_reward(&self, user_id: i32, reward_id: i32) -> StoreResult<User> {
        let mut inner = self.lock();
        let required = inner
            .rewards
            .get(&reward_id)
            .map(|r| r.points_required)
            .ok_or(StoreError::RewardNotFound(reward_id))?;
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound(user_id))?;
        if user.points < required {
            return Err(StoreError::InsufficientPoints {
                have: user.points,
                need: required,
            });
        }
        user.points -= required;
        Ok(user.clone())
    }

    fn all_products(&self) -> Vec<Product> {
        self.lock().products.values().cloned().collect()
    }

    fn promoted_products(&self) -> Vec<Product> {
        let mut promoted: Vec<Product> = self
            .lock()
            .products
            .values()
            .filter(|p| p.commission_rate >= 8)
            .cloned()
            .collect();
        // Stable sort over the id-ordered snapshot: equal rates stay in
        // ascending id order.
        promoted.sort_by(|a, b| b.commission_rate.cmp(&a.commission_rate));
        promoted
    }

    fn get_product(&self, id: i32) -> StoreResult<Product> {
        self.lock()
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::ProductNotFound(id))
    }

    fn all_rewards(&self) -> Vec<Reward> {
        self.lock().rewards.values().cloned().collect()
    }

    fn get_reward(&self, id: i32) -> StoreResult<Reward> {
        self.lock()
            .rewards
            .get(&id)
            .cloned()
            .ok_or(StoreError::RewardNotFound(id))
    }

    fn get_affiliate_by_user_id(&self, user_id: i32) -> Option<Affiliate> {
        self.lock()
            .affiliates
            .values()
            .find(|a| a.user_id == user_id)
            .cloned()
    }

    fn create_affiliate(&self, user_id: i32) -> StoreResult<Affiliate> {
        let mut inner = self.lock();
        if !inner.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }
        Ok(insert_affiliate(&mut inner, user_id))
    }

    fn get_or_create_affiliate(&self, user_id: i32) -> StoreResult<Affiliate> {
        let mut inner = self.lock();
        if !inner.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }
        if let Some(existing) = inner.affiliates.values().find(|a| a.user_id == user_id) {
            return Ok(existing.clone());
        }
        Ok(insert_affiliate(&mut inner, user_id))
    }

    fn update_affiliate_earnings(&self, id: i32, amount: i64) -> StoreResult<Affiliate> {
        let mut inner = self.lock();
        let affiliate = inner
            .affiliates
            .get_mut(&id)
            .ok_or(StoreError::AffiliateNotFound(id))?;
        affiliate.earnings += amount;
        affiliate.conversions += 1;
        affiliate.tier = tiers::tier_name(affiliate.conversions).to_string();
        Ok(affiliate.clone())
    }

    fn cart_items(&self, user_id: i32) -> StoreResult<Vec<CartLine>> {
        let inner = self.lock();
        let rows = match inner.carts.get(&user_id) {
            Some(rows) => rows,
            None => return Ok(Vec::new()),
        };
        rows.iter()
            .map(|item| {
                let product = inner
                    .products
                    .get(&item.product_id)
                    .cloned()
                    .ok_or(StoreError::DanglingProduct(item.product_id))?;
                Ok(CartLine {
                    item: item.clone(),
                    product,
                })
            })
            .collect()
    }

    fn add_to_cart(&self, user_id: i32, product_id: i32, quantity: i32) -> StoreResult<CartItem> {
        let mut inner = self.lock();
        if !inner.products.contains_key(&product_id) {
            return Err(StoreError::ProductNotFound(product_id));
        }
        let id = inner.next_cart_item_id;
        let rows = inner.carts.entry(user_id).or_default();
        if let Some(existing) = rows.iter_mut().find(|r| r.product_id == product_id) {
            existing.quantity += quantity;
            return Ok(existing.clone());
        }
        inner.next_cart_item_id += 1;
        let item = CartItem {
            id,
            user_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        };
        inner.carts.entry(user_id).or_default().push(item.clone());
        Ok(item)
    }

    fn clear_cart(&self, user_id: i32) {
        self.lock().carts.remove(&user_id);
    }
}

fn insert_affiliate(inner: &mut Inner, user_id: i32) -> Affiliate {
    let id = inner.next_affiliate_id;
    inner.next_affiliate_id += 1;
    let affiliate = Affiliate {
        id,
        user_id,
        earnings: 0,
        conversions: 0,
        tier: tiers::tier_name(0).to_string(),
        custom_commission: None,
    };
    inner.affiliates.insert(id, affiliate.clone());
    affiliate
}

fn default_catalog() -> Vec<Product> {
    let mut next = 1;
    let mut product = |name: &str, description: &str, price, category: &str, commission_rate, vr_enabled| {
        let id = next;
        next += 1;
        Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            in_stock: true,
            commission_rate,
            vr_enabled,
        }
    };
    vec![
        product("VR Headset Pro", "Standalone headset for the virtual mall", 129_900, "electronics", 12, true),
        product("Smart Watch X2", "Fitness tracking and notifications", 49_900, "electronics", 10, false),
        product("Wireless Earbuds", "Noise-cancelling, 24h battery", 19_900, "electronics", 8, false),
        product("Oud Perfume Set", "Three-piece gift collection", 34_900, "beauty", 9, true),
        product("Leather Wallet", "Hand-stitched full-grain leather", 12_900, "fashion", 6, false),
        product("Espresso Machine", "15-bar pump, compact frame", 89_900, "home", 7, false),
        product("Gaming Laptop", "RTX graphics, 16GB RAM", 459_900, "electronics", 5, true),
        product("Silk Scarf", "Printed limited edition", 8_900, "fashion", 8, false),
    ]
}

fn default_rewards() -> Vec<Reward> {
    let mut next = 1;
    let mut reward = |name: &str, description: &str, points_required| {
        let id = next;
        next += 1;
        Reward {
            id,
            name: name.to_string(),
            description: description.to_string(),
            points_required,
            active: true,
        }
    };
    vec![
        reward("Free Shipping Voucher", "Free delivery on the next order", 250),
        reward("10% Discount Code", "One-time checkout discount", 500),
        reward("VIP Mall Pass", "A week of VIP storefront access", 750),
        reward("Premium Avatar Pack", "Exclusive avatars for the virtual city", 1000),
    ]
}
