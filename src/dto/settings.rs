use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{StoreColors, StoreFooter};

/// Whole-document replacement; the admin form always submits every field.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub store_name: String,
    pub store_whatsapp: String,
    pub store_colors: StoreColors,
    pub store_logo: Option<String>,
    pub store_footer: Option<StoreFooter>,
}
