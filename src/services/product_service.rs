use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.normalize_pagination();

    let mut products = state.store.list_products().await;

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        products.retain(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        });
    }
    if let Some(category) = query.category.as_ref().filter(|c| !c.is_empty()) {
        products.retain(|p| p.category.eq_ignore_ascii_case(category));
    }
    if let Some(min_price) = query.min_price_cents {
        products.retain(|p| p.price_cents >= min_price);
    }
    if let Some(max_price) = query.max_price_cents {
        products.retain(|p| p.price_cents <= max_price);
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    sort_by.sort(&mut products, sort_order);

    let total = products.len() as i64;
    let items = products
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    let meta = Meta::new(page, limit, total);
    let data = ProductList { items };
    Ok(ApiResponse::success("Products", data, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let result = match state.store.get_product(id).await {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    validate_fields(
        &payload.name,
        &payload.description,
        &payload.image_url,
        &payload.category,
        payload.price_cents,
        payload.stock,
    )?;
    validate_sale_price(
        payload.is_on_sale,
        payload.promotional_price_cents,
        payload.price_cents,
    )?;

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4(),
        name: payload.name,
        description: payload.description,
        price_cents: payload.price_cents,
        promotional_price_cents: payload.promotional_price_cents,
        is_on_sale: payload.is_on_sale,
        image_url: payload.image_url,
        category: payload.category,
        stock: payload.stock,
        created_at: now,
        updated_at: now,
    };
    state.store.insert_product(product.clone()).await;

    tracing::info!(product_id = %product.id, "product created");

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = match state.store.get_product(id).await {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let merged = Product {
        id: existing.id,
        name: payload.name.unwrap_or(existing.name),
        description: payload.description.unwrap_or(existing.description),
        price_cents: payload.price_cents.unwrap_or(existing.price_cents),
        promotional_price_cents: payload
            .promotional_price_cents
            .unwrap_or(existing.promotional_price_cents),
        is_on_sale: payload.is_on_sale.unwrap_or(existing.is_on_sale),
        image_url: payload.image_url.unwrap_or(existing.image_url),
        category: payload.category.unwrap_or(existing.category),
        stock: payload.stock.unwrap_or(existing.stock),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    validate_fields(
        &merged.name,
        &merged.description,
        &merged.image_url,
        &merged.category,
        merged.price_cents,
        merged.stock,
    )?;
    validate_sale_price(
        merged.is_on_sale,
        merged.promotional_price_cents,
        merged.price_cents,
    )?;

    if !state.store.replace_product(merged.clone()).await {
        return Err(AppError::NotFound);
    }

    tracing::info!(product_id = %merged.id, "product updated");

    Ok(ApiResponse::success("Updated", merged, Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    if !state.store.remove_product(id).await {
        return Err(AppError::NotFound);
    }

    tracing::info!(product_id = %id, "product deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn validate_fields(
    name: &str,
    description: &str,
    image_url: &str,
    category: &str,
    price_cents: i64,
    stock: i32,
) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if description.trim().is_empty() {
        return Err(AppError::BadRequest("description is required".to_string()));
    }
    if image_url.trim().is_empty() {
        return Err(AppError::BadRequest("image_url is required".to_string()));
    }
    if category.trim().is_empty() {
        return Err(AppError::BadRequest("category is required".to_string()));
    }
    if price_cents <= 0 {
        return Err(AppError::BadRequest(
            "price must be greater than 0".to_string(),
        ));
    }
    if stock < 0 {
        return Err(AppError::BadRequest(
            "stock cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// A product on sale must carry a promotional price below the base price.
/// This is input validation only; stored records are not revisited.
fn validate_sale_price(
    is_on_sale: bool,
    promotional_price_cents: Option<i64>,
    price_cents: i64,
) -> AppResult<()> {
    if !is_on_sale {
        return Ok(());
    }
    match promotional_price_cents {
        Some(promo) if promo > 0 && promo < price_cents => Ok(()),
        _ => Err(AppError::BadRequest(
            "promotional price must be lower than the base price".to_string(),
        )),
    }
}
