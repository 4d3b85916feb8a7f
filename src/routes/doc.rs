use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        cart::{AddToCartRequest, CartItemDto, CartList, UpdateQuantityRequest},
        orders::WhatsAppOrder,
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        settings::UpdateSettingsRequest,
    },
    models::{Product, StoreColors, StoreFooter, StoreSettings, User},
    response::{ApiResponse, Meta},
    routes::{auth, cart, health, orders, params, products, settings},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        orders::checkout,
        settings::get_settings,
        settings::update_settings,
    ),
    components(
        schemas(
            User,
            Product,
            StoreSettings,
            StoreColors,
            StoreFooter,
            LoginRequest,
            LoginResponse,
            AddToCartRequest,
            UpdateQuantityRequest,
            CartItemDto,
            CartList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            UpdateSettingsRequest,
            WhatsAppOrder,
            params::ProductQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartList>,
            ApiResponse<WhatsAppOrder>,
            ApiResponse<StoreSettings>,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Login against the fixed user list"),
        (name = "Products", description = "Catalog browsing and admin CRUD"),
        (name = "Cart", description = "Per-user cart entries and totals"),
        (name = "Orders", description = "WhatsApp checkout composition"),
        (name = "Settings", description = "Store identity settings"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
