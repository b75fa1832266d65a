use souq_city_api::{
    models::{Product, Reward},
    store::{MemStore, NewUser, Storage, StoreError},
    tiers,
};

fn product(id: i32, commission_rate: i32) -> Product {
    Product {
        id,
        name: format!("Product {id}"),
        description: String::new(),
        price: 10_000,
        category: "electronics".into(),
        in_stock: true,
        commission_rate,
        vr_enabled: false,
    }
}

fn reward(id: i32, points_required: i32) -> Reward {
    Reward {
        id,
        name: format!("Reward {id}"),
        description: String::new(),
        points_required,
        active: true,
    }
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.into(),
        password_hash: "hash".into(),
        email: format!("{username}@example.com"),
        full_name: username.into(),
        affiliate_code: format!("code-{username}"),
    }
}

#[test]
fn create_user_rejects_duplicate_username() {
    let store = MemStore::new();
    let first = store.create_user(new_user("amina")).unwrap();
    assert_eq!(first.points, 0);

    let err = store.create_user(new_user("amina")).unwrap_err();
    assert_eq!(err, StoreError::UsernameTaken("amina".into()));

    // The failed attempt must not burn an id.
    let second = store.create_user(new_user("omar")).unwrap();
    assert_eq!(second.id, first.id + 1);
}

#[test]
fn redeem_with_insufficient_points_rejects_without_mutation() {
    let store = MemStore::new();
    store.seed_rewards(vec![reward(1, 750)]);
    let user = store.create_user(new_user("amina")).unwrap();
    store.update_user_points(user.id, 500).unwrap();

    let err = store.redeem_reward(user.id, 1).unwrap_err();
    assert_eq!(err, StoreError::InsufficientPoints { have: 500, need: 750 });

    // Balance untouched; rejection, not clamping.
    assert_eq!(store.get_user(user.id).unwrap().points, 500);
}

#[test]
fn redeem_with_sufficient_points_deducts() {
    let store = MemStore::new();
    store.seed_rewards(vec![reward(1, 750)]);
    let user = store.create_user(new_user("amina")).unwrap();
    store.update_user_points(user.id, 1000).unwrap();

    let updated = store.redeem_reward(user.id, 1).unwrap();
    assert_eq!(updated.points, 250);
}

#[test]
fn redeem_is_not_idempotent() {
    let store = MemStore::new();
    store.seed_rewards(vec![reward(1, 250)]);
    let user = store.create_user(new_user("amina")).unwrap();
    store.update_user_points(user.id, 600).unwrap();

    store.redeem_reward(user.id, 1).unwrap();
    let after_second = store.redeem_reward(user.id, 1).unwrap();
    assert_eq!(after_second.points, 100);

    // Third call fails; points stay non-negative.
    let err = store.redeem_reward(user.id, 1).unwrap_err();
    assert_eq!(err, StoreError::InsufficientPoints { have: 100, need: 250 });
    assert_eq!(store.get_user(user.id).unwrap().points, 100);
}

#[test]
fn redeem_missing_reward_or_user_is_not_found() {
    let store = MemStore::new();
    store.seed_rewards(vec![reward(1, 100)]);
    let user = store.create_user(new_user("amina")).unwrap();

    assert_eq!(
        store.redeem_reward(user.id, 99).unwrap_err(),
        StoreError::RewardNotFound(99)
    );
    assert_eq!(
        store.redeem_reward(99, 1).unwrap_err(),
        StoreError::UserNotFound(99)
    );
}

#[test]
fn promoted_products_filters_and_sorts_descending() {
    let store = MemStore::new();
    store.seed_products(vec![
        product(1, 10),
        product(2, 8),
        product(3, 7),
        product(4, 6),
        product(5, 9),
    ]);

    let promoted = store.promoted_products();
    let rates: Vec<i32> = promoted.iter().map(|p| p.commission_rate).collect();
    assert_eq!(rates, vec![10, 9, 8]);
}

#[test]
fn promoted_products_ties_keep_ascending_id_order() {
    let store = MemStore::new();
    store.seed_products(vec![product(3, 8), product(1, 8), product(2, 12)]);

    let ids: Vec<i32> = store.promoted_products().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[test]
fn add_to_cart_merges_rows_for_same_product() {
    let store = MemStore::new();
    store.seed_products(vec![product(1, 5)]);
    let user = store.create_user(new_user("amina")).unwrap();

    store.add_to_cart(user.id, 1, 2).unwrap();
    let merged = store.add_to_cart(user.id, 1, 3).unwrap();
    assert_eq!(merged.quantity, 5);

    let lines = store.cart_items(user.id).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].item.quantity, 5);
}

#[test]
fn add_to_cart_unknown_product_fails() {
    let store = MemStore::new();
    let user = store.create_user(new_user("amina")).unwrap();

    assert_eq!(
        store.add_to_cart(user.id, 42, 1).unwrap_err(),
        StoreError::ProductNotFound(42)
    );
}

#[test]
fn cart_items_fails_hard_on_dangling_product() {
    let store = MemStore::new();
    store.seed_products(vec![product(1, 5), product(2, 5)]);
    let user = store.create_user(new_user("amina")).unwrap();
    store.add_to_cart(user.id, 1, 1).unwrap();
    store.add_to_cart(user.id, 2, 1).unwrap();

    // Reseeding replaces the catalog, leaving the row for product 2 stale.
    store.seed_products(vec![product(1, 5)]);

    // The stale row is a hard error, never silently dropped.
    assert_eq!(
        store.cart_items(user.id).unwrap_err(),
        StoreError::DanglingProduct(2)
    );
}

#[test]
fn clear_cart_removes_all_rows() {
    let store = MemStore::new();
    store.seed_products(vec![product(1, 5), product(2, 5)]);
    let user = store.create_user(new_user("amina")).unwrap();
    store.add_to_cart(user.id, 1, 1).unwrap();
    store.add_to_cart(user.id, 2, 4).unwrap();

    store.clear_cart(user.id);
    assert!(store.cart_items(user.id).unwrap().is_empty());
}

#[test]
fn affiliate_is_lazily_provisioned_once() {
    let store = MemStore::new();
    let user = store.create_user(new_user("amina")).unwrap();

    let first = store.get_or_create_affiliate(user.id).unwrap();
    assert_eq!(first.tier, "basic");
    assert_eq!(first.earnings, 0);
    assert_eq!(first.conversions, 0);

    let second = store.get_or_create_affiliate(user.id).unwrap();
    assert_eq!(second.id, first.id);
}

#[test]
fn explicit_affiliate_creation_is_visible_by_user_id() {
    let store = MemStore::new();
    let user = store.create_user(new_user("amina")).unwrap();

    assert!(store.get_affiliate_by_user_id(user.id).is_none());

    let created = store.create_affiliate(user.id).unwrap();
    let looked_up = store.get_affiliate_by_user_id(user.id).unwrap();
    assert_eq!(looked_up.id, created.id);

    // Lazy provisioning reuses the explicit record instead of duplicating it.
    let provisioned = store.get_or_create_affiliate(user.id).unwrap();
    assert_eq!(provisioned.id, created.id);

    assert_eq!(
        store.create_affiliate(99).unwrap_err(),
        StoreError::UserNotFound(99)
    );
}

#[test]
fn affiliate_for_unknown_user_is_not_found() {
    let store = MemStore::new();
    assert_eq!(
        store.get_or_create_affiliate(7).unwrap_err(),
        StoreError::UserNotFound(7)
    );
}

#[test]
fn affiliate_earnings_are_append_only_counters() {
    let store = MemStore::new();
    let user = store.create_user(new_user("amina")).unwrap();
    let affiliate = store.get_or_create_affiliate(user.id).unwrap();

    let updated = store.update_affiliate_earnings(affiliate.id, 1_500).unwrap();
    assert_eq!(updated.earnings, 1_500);
    assert_eq!(updated.conversions, 1);

    let updated = store.update_affiliate_earnings(affiliate.id, 500).unwrap();
    assert_eq!(updated.earnings, 2_000);
    assert_eq!(updated.conversions, 2);

    assert_eq!(
        store.update_affiliate_earnings(99, 100).unwrap_err(),
        StoreError::AffiliateNotFound(99)
    );
}

#[test]
fn tier_lookup_is_floor_over_thresholds() {
    assert_eq!(tiers::tier_name(0), "basic");
    assert_eq!(tiers::tier_name(4), "basic");
    assert_eq!(tiers::tier_name(5), "silver");
    assert_eq!(tiers::tier_name(19), "silver");
    assert_eq!(tiers::tier_name(20), "gold");
    assert_eq!(tiers::tier_name(50), "platinum");
    assert_eq!(tiers::tier_name(99), "platinum");
    assert_eq!(tiers::tier_name(100), "diamond");
    assert_eq!(tiers::tier_name(1_000), "diamond");
}

#[test]
fn conversions_move_affiliate_up_the_ladder() {
    let store = MemStore::new();
    let user = store.create_user(new_user("amina")).unwrap();
    let affiliate = store.get_or_create_affiliate(user.id).unwrap();

    let mut latest = affiliate.clone();
    for _ in 0..5 {
        latest = store.update_affiliate_earnings(affiliate.id, 100).unwrap();
    }
    assert_eq!(latest.conversions, 5);
    assert_eq!(latest.tier, "silver");
}
