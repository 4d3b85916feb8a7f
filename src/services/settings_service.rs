use crate::{
    dto::settings::UpdateSettingsRequest,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::StoreSettings,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn get_settings(state: &AppState) -> AppResult<ApiResponse<StoreSettings>> {
    let settings = state.store.settings().await;
    Ok(ApiResponse::success("Settings", settings, Some(Meta::empty())))
}

/// Whole-document replace, admin only.
pub async fn update_settings(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateSettingsRequest,
) -> AppResult<ApiResponse<StoreSettings>> {
    ensure_admin(user)?;

    if payload.store_name.trim().is_empty() {
        return Err(AppError::BadRequest("store_name is required".to_string()));
    }
    if payload.store_whatsapp.trim().is_empty()
        || !payload.store_whatsapp.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AppError::BadRequest(
            "store_whatsapp must be a digits-only phone number".to_string(),
        ));
    }

    let settings = StoreSettings {
        store_name: payload.store_name,
        store_whatsapp: payload.store_whatsapp,
        store_colors: payload.store_colors,
        store_logo: payload.store_logo,
        store_footer: payload.store_footer,
    };
    let saved = state.store.update_settings(settings).await;

    tracing::info!(store_name = %saved.store_name, "store settings updated");

    Ok(ApiResponse::success("Settings updated", saved, Some(Meta::empty())))
}
