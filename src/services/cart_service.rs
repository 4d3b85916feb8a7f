use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartItemDto, CartList, UpdateQuantityRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::CartRecord,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartList>> {
    let rows = state.store.cart_with_products(user.user_id).await;
    let items = rows
        .into_iter()
        .map(|(product, quantity)| CartItemDto::new(product, quantity))
        .collect();

    Ok(ApiResponse::success(
        "OK",
        CartList::new(items),
        Some(Meta::empty()),
    ))
}

/// Adds `quantity` on top of any existing entry for the product. The
/// resulting quantity is clamped to the product's stock without signaling;
/// only a product with no stock at all is rejected.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItemDto>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let product = match state.store.get_product(payload.product_id).await {
        Some(p) => p,
        None => return Err(AppError::BadRequest("product not found".to_string())),
    };

    let existing = state
        .store
        .cart_record(user.user_id, payload.product_id)
        .await;

    let requested = existing
        .as_ref()
        .map_or(payload.quantity, |r| r.quantity.saturating_add(payload.quantity));
    let quantity = requested.min(product.stock);
    if quantity < 1 {
        return Err(AppError::BadRequest("product is out of stock".to_string()));
    }

    let record = CartRecord {
        product_id: product.id,
        quantity,
        created_at: existing.map_or_else(Utc::now, |r| r.created_at),
    };
    state.store.put_cart_record(user.user_id, record).await;

    tracing::debug!(
        user_id = %user.user_id,
        product_id = %product.id,
        quantity,
        "cart entry upserted"
    );

    Ok(ApiResponse::success(
        "OK",
        CartItemDto::new(product, quantity),
        None,
    ))
}

/// Sets the quantity directly. Anything below 1 removes the entry instead;
/// anything above stock is clamped down. Returns the recomputed cart.
pub async fn update_quantity(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartList>> {
    let existing = state.store.cart_record(user.user_id, product_id).await;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    if payload.quantity < 1 {
        state.store.remove_cart_record(user.user_id, product_id).await;
        return list_cart(state, user).await;
    }

    match state.store.get_product(product_id).await {
        Some(product) => {
            let quantity = payload.quantity.min(product.stock);
            if quantity < 1 {
                // Stock ran out entirely; the entry can no longer hold a
                // positive quantity.
                state.store.remove_cart_record(user.user_id, product_id).await;
            } else {
                let record = CartRecord {
                    product_id,
                    quantity,
                    created_at: existing.created_at,
                };
                state.store.put_cart_record(user.user_id, record).await;
            }
        }
        None => {
            // The product was deleted out from under the cart; drop the
            // stale entry rather than erroring.
            state.store.remove_cart_record(user.user_id, product_id).await;
        }
    }

    list_cart(state, user).await
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !state.store.remove_cart_record(user.user_id, product_id).await {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Removed from cart",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    state.store.clear_cart(user.user_id).await;

    Ok(ApiResponse::success(
        "Cart cleared",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
