use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::orders::WhatsAppOrder,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/checkout", post(checkout))
}

#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    responses(
        (status = 200, description = "Compose the cart into a WhatsApp order link", body = ApiResponse<WhatsAppOrder>),
        (status = 400, description = "Cart is empty"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<WhatsAppOrder>>> {
    let resp = order_service::checkout(&state, &user).await?;
    Ok(Json(resp))
}
