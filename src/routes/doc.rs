use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    models::{Affiliate, CartItem, CartLine, Product, Reward, User},
    response::ApiResponse,
    routes::{affiliate, auth, cart, health, products, rewards, users},
    session::SESSION_COOKIE,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        users::current_user,
        products::list_products,
        products::get_product,
        rewards::list_rewards,
        rewards::redeem_reward,
        affiliate::affiliate_status,
        cart::cart_list,
        cart::add_to_cart,
    ),
    components(
        schemas(
            User,
            Product,
            Reward,
            Affiliate,
            CartItem,
            CartLine,
            auth::RegisterRequest,
            auth::LoginRequest,
            cart::AddToCartRequest,
            cart::CartList,
            products::ProductList,
            rewards::RewardList,
            ApiResponse<User>,
            ApiResponse<Product>,
            ApiResponse<Affiliate>,
            ApiResponse<products::ProductList>,
            ApiResponse<rewards::RewardList>,
            ApiResponse<cart::CartList>,
        )
    ),
    security(
        ("session_cookie" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Session endpoints"),
        (name = "Users", description = "Current-user endpoints"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Rewards", description = "Loyalty reward endpoints"),
        (name = "Affiliate", description = "Affiliate dashboard endpoints"),
        (name = "Cart", description = "Cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
