use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Base price in cents.
    pub price_cents: i64,
    /// Promotional price in cents, only meaningful while `is_on_sale` is set.
    pub promotional_price_cents: Option<i64>,
    pub is_on_sale: bool,
    pub image_url: String,
    pub category: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Promotional price when the sale flag is set and a promotional price
    /// exists, otherwise the base price.
    pub fn effective_price_cents(&self) -> i64 {
        if self.is_on_sale {
            self.promotional_price_cents.unwrap_or(self.price_cents)
        } else {
            self.price_cents
        }
    }
}

/// Per-user cart record as held by the store; the read model joins the
/// current product through `CartItemDto`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartRecord {
    pub product_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreFooter {
    pub description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub copyright_year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreSettings {
    pub store_name: String,
    /// Digits-only phone number the checkout link is addressed to.
    pub store_whatsapp: String,
    pub store_colors: StoreColors,
    pub store_logo: Option<String>,
    pub store_footer: Option<StoreFooter>,
}
