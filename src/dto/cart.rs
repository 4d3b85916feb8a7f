use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    /// Quantity to add on top of what is already in the cart.
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    /// New absolute quantity; anything below 1 removes the entry.
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemDto {
    pub product: Product,
    pub quantity: i32,
    /// Promotional price while on sale, base price otherwise.
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

impl CartItemDto {
    pub fn new(product: Product, quantity: i32) -> Self {
        let unit_price_cents = product.effective_price_cents();
        Self {
            subtotal_cents: unit_price_cents * i64::from(quantity),
            unit_price_cents,
            product,
            quantity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartList {
    pub items: Vec<CartItemDto>,
    pub total_items: i32,
    pub total_cents: i64,
}

impl CartList {
    pub fn new(items: Vec<CartItemDto>) -> Self {
        let total_items = items.iter().map(|i| i.quantity).sum();
        let total_cents = items.iter().map(|i| i.subtotal_cents).sum();
        Self {
            items,
            total_items,
            total_cents,
        }
    }
}
