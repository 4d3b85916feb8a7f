use cartiva_api::{
    dto::{
        auth::LoginRequest,
        cart::{AddToCartRequest, UpdateQuantityRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        settings::UpdateSettingsRequest,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{Product, StoreColors},
    routes::params::ProductQuery,
    services::{auth_service, cart_service, order_service, product_service, settings_service},
    state::AppState,
    store::{MockStore, seed},
};
use uuid::Uuid;

fn test_state() -> AppState {
    AppState::new(MockStore::seeded(false))
}

fn admin() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "admin".into(),
    }
}

fn customer() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "customer".into(),
    }
}

async fn create_product(
    state: &AppState,
    name: &str,
    price_cents: i64,
    promotional_price_cents: Option<i64>,
    stock: i32,
) -> Product {
    let resp = product_service::create_product(
        state,
        &admin(),
        CreateProductRequest {
            name: name.into(),
            description: "A product for testing".into(),
            price_cents,
            promotional_price_cents,
            is_on_sale: promotional_price_cents.is_some(),
            image_url: "https://example.com/p.jpg".into(),
            category: "Testes".into(),
            stock,
        },
    )
    .await
    .expect("create product");
    resp.data.expect("product payload")
}

// User flow: browse, fill the cart, check totals, compose the WhatsApp order.
#[tokio::test]
async fn cart_totals_and_checkout_flow() -> anyhow::Result<()> {
    let state = test_state();
    let user = customer();

    // Product A: on sale at 80, base 100. Product B: plain 50.
    let product_a = create_product(&state, "Produto A", 10000, Some(8000), 10).await;
    let product_b = create_product(&state, "Produto B", 5000, None, 5).await;

    cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: product_a.id,
            quantity: 2,
        },
    )
    .await?;
    cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: product_b.id,
            quantity: 1,
        },
    )
    .await?;

    // 2 x 80 + 1 x 50 = 210
    let cart = cart_service::list_cart(&state, &user).await?.data.unwrap();
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_items, 3);
    assert_eq!(cart.total_cents, 21000);

    let order = order_service::checkout(&state, &user).await?.data.unwrap();
    assert_eq!(order.total_cents, 21000);
    assert!(order.message.contains("Produto A"));
    assert!(order.message.contains("*Total:* R$ 210,00"));
    assert!(
        order
            .whatsapp_url
            .starts_with("https://wa.me/5511999999999?text="),
        "unexpected link: {}",
        order.whatsapp_url
    );
    // encodeURIComponent semantics: spaces become %20, not '+'.
    assert!(order.whatsapp_url.contains("%20"));
    assert!(!order.whatsapp_url.contains('+'));

    // Checkout composes only; the cart stays until the client clears it.
    let cart = cart_service::list_cart(&state, &user).await?.data.unwrap();
    assert_eq!(cart.items.len(), 2);

    cart_service::clear_cart(&state, &user).await?;
    let cart = cart_service::list_cart(&state, &user).await?.data.unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_cents, 0);

    Ok(())
}

#[tokio::test]
async fn adding_same_product_increments_quantity() -> anyhow::Result<()> {
    let state = test_state();
    let user = customer();
    let product = create_product(&state, "Produto", 1000, None, 10).await;

    for _ in 0..2 {
        cart_service::add_to_cart(
            &state,
            &user,
            AddToCartRequest {
                product_id: product.id,
                quantity: 3,
            },
        )
        .await?;
    }

    let cart = cart_service::list_cart(&state, &user).await?.data.unwrap();
    assert_eq!(cart.items.len(), 1, "no duplicate entries");
    assert_eq!(cart.items[0].quantity, 6);

    Ok(())
}

#[tokio::test]
async fn quantity_is_clamped_to_stock() -> anyhow::Result<()> {
    let state = test_state();
    let user = customer();
    let product = create_product(&state, "Produto", 1000, None, 5).await;

    let item = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: product.id,
            quantity: 99,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(item.quantity, 5);

    // Direct set beyond stock clamps too.
    let cart = cart_service::update_quantity(
        &state,
        &user,
        product.id,
        UpdateQuantityRequest { quantity: 42 },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(cart.items[0].quantity, 5);

    Ok(())
}

// Repeated adds must not overflow the running quantity before the stock clamp.
#[tokio::test]
async fn huge_repeated_add_clamps_instead_of_overflowing() -> anyhow::Result<()> {
    let state = test_state();
    let user = customer();
    let product = create_product(&state, "Produto", 1000, None, 5).await;

    cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: product.id,
            quantity: 3,
        },
    )
    .await?;

    let item = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: product.id,
            quantity: i32::MAX,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(item.quantity, 5);

    Ok(())
}

#[tokio::test]
async fn quantity_below_one_removes_entry() -> anyhow::Result<()> {
    let state = test_state();
    let user = customer();
    let product = create_product(&state, "Produto", 1000, None, 10).await;

    cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: product.id,
            quantity: 2,
        },
    )
    .await?;

    let cart = cart_service::update_quantity(
        &state,
        &user,
        product.id,
        UpdateQuantityRequest { quantity: 0 },
    )
    .await?
    .data
    .unwrap();
    assert!(cart.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn out_of_stock_product_cannot_be_added() {
    let state = test_state();
    let user = customer();

    let product = create_product(&state, "Esgotado", 1000, None, 0).await;
    let result = cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: product.id,
            quantity: 1,
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn deleted_product_disappears_from_cart() -> anyhow::Result<()> {
    let state = test_state();
    let user = customer();
    let product = create_product(&state, "Produto", 1000, None, 10).await;

    cart_service::add_to_cart(
        &state,
        &user,
        AddToCartRequest {
            product_id: product.id,
            quantity: 1,
        },
    )
    .await?;
    product_service::delete_product(&state, &admin(), product.id).await?;

    let cart = cart_service::list_cart(&state, &user).await?.data.unwrap();
    assert!(cart.items.is_empty(), "stale entries are discarded");

    Ok(())
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let state = test_state();
    let result = order_service::checkout(&state, &customer()).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn sale_invariant_is_enforced_on_create_and_update() -> anyhow::Result<()> {
    let state = test_state();

    // On sale without a promotional price.
    let result = product_service::create_product(
        &state,
        &admin(),
        CreateProductRequest {
            name: "Inválido".into(),
            description: "desc".into(),
            price_cents: 1000,
            promotional_price_cents: None,
            is_on_sale: true,
            image_url: "https://example.com/p.jpg".into(),
            category: "Testes".into(),
            stock: 1,
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    // Promotional price above the base price.
    let product = create_product(&state, "Produto", 1000, Some(800), 1).await;
    let result = product_service::update_product(
        &state,
        &admin(),
        product.id,
        UpdateProductRequest {
            promotional_price_cents: Some(Some(2000)),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn explicit_null_clears_promotional_price() -> anyhow::Result<()> {
    let state = test_state();
    let product = create_product(&state, "Promoção", 1000, Some(800), 1).await;

    // An absent field leaves the promotion alone.
    let untouched: UpdateProductRequest = serde_json::from_value(serde_json::json!({
        "stock": 2,
    }))?;
    let updated = product_service::update_product(&state, &admin(), product.id, untouched)
        .await?
        .data
        .unwrap();
    assert_eq!(updated.promotional_price_cents, Some(800));

    // An explicit null clears it.
    let cleared: UpdateProductRequest = serde_json::from_value(serde_json::json!({
        "promotional_price_cents": null,
        "is_on_sale": false,
    }))?;
    let updated = product_service::update_product(&state, &admin(), product.id, cleared)
        .await?
        .data
        .unwrap();
    assert_eq!(updated.promotional_price_cents, None);
    assert!(!updated.is_on_sale);

    Ok(())
}

#[tokio::test]
async fn product_crud_is_admin_only() {
    let state = test_state();

    let result = product_service::create_product(
        &state,
        &customer(),
        CreateProductRequest {
            name: "Produto".into(),
            description: "desc".into(),
            price_cents: 1000,
            promotional_price_cents: None,
            is_on_sale: false,
            image_url: "https://example.com/p.jpg".into(),
            category: "Testes".into(),
            stock: 1,
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

// Numeric pagination params arrive as strings on the wire and must still
// deserialize through the query extractor.
#[tokio::test]
async fn numeric_query_params_parse_from_the_wire() -> anyhow::Result<()> {
    let uri: axum::http::Uri = "/api/products?page=2&per_page=10&min_price_cents=500".parse()?;
    let axum::extract::Query(query) = axum::extract::Query::<ProductQuery>::try_from_uri(&uri)?;
    assert_eq!(query.page, Some(2));
    assert_eq!(query.per_page, Some(10));
    assert_eq!(query.min_price_cents, Some(500));

    let state = test_state();
    let list = product_service::list_products(&state, query).await?;
    let meta = list.meta.unwrap();
    assert_eq!(meta.page, Some(2));
    assert_eq!(meta.per_page, Some(10));

    Ok(())
}

#[tokio::test]
async fn new_products_lead_the_default_listing() -> anyhow::Result<()> {
    let state = test_state();
    let product = create_product(&state, "Novidade", 1000, None, 3).await;

    let list = product_service::list_products(&state, Default::default())
        .await?
        .data
        .unwrap();
    assert_eq!(list.items.first().map(|p| p.id), Some(product.id));

    Ok(())
}

#[tokio::test]
async fn settings_update_is_admin_gated_and_validated() -> anyhow::Result<()> {
    let state = test_state();

    let settings = settings_service::get_settings(&state).await?.data.unwrap();
    assert_eq!(settings.store_name, "Cartiva");

    let update = |name: &str, whatsapp: &str| UpdateSettingsRequest {
        store_name: name.into(),
        store_whatsapp: whatsapp.into(),
        store_colors: StoreColors {
            primary: "#111111".into(),
            secondary: "#222222".into(),
            accent: "#333333".into(),
        },
        store_logo: None,
        store_footer: None,
    };

    let result =
        settings_service::update_settings(&state, &customer(), update("Loja", "5511888887777"))
            .await;
    assert!(matches!(result, Err(AppError::Forbidden)));

    let result =
        settings_service::update_settings(&state, &admin(), update("Loja", "not-a-number")).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let saved =
        settings_service::update_settings(&state, &admin(), update("Loja Nova", "5511888887777"))
            .await?
            .data
            .unwrap();
    assert_eq!(saved.store_name, "Loja Nova");
    assert_eq!(saved.store_whatsapp, "5511888887777");

    Ok(())
}

#[tokio::test]
async fn login_checks_the_fixed_user_list() -> anyhow::Result<()> {
    // SAFETY: tests run single-process; required by the JWT issuer.
    unsafe { std::env::set_var("JWT_SECRET", "test-secret") };

    let state = test_state();

    let resp = auth_service::login_user(
        &state,
        LoginRequest {
            email: seed::ADMIN_EMAIL.into(),
            password: "admin123".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(resp.token.starts_with("Bearer "));
    assert_eq!(resp.user.role, "admin");
    // The password hash must never serialize.
    let json = serde_json::to_value(&resp.user)?;
    assert!(json.get("password_hash").is_none());

    let result = auth_service::login_user(
        &state,
        LoginRequest {
            email: seed::ADMIN_EMAIL.into(),
            password: "wrong".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = auth_service::login_user(
        &state,
        LoginRequest {
            email: "nobody@cartiva.com".into(),
            password: "admin123".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
