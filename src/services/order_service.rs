use std::fmt::Write;

use crate::{
    dto::{cart::CartItemDto, orders::WhatsAppOrder},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    money::format_brl,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Turns the caller's cart into a WhatsApp deep link. Nothing is persisted:
/// the order is considered placed once the client opens the link, and the
/// cart is left for the client to clear.
pub async fn checkout(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<WhatsAppOrder>> {
    let rows = state.store.cart_with_products(user.user_id).await;
    if rows.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let entries: Vec<CartItemDto> = rows
        .into_iter()
        .map(|(product, quantity)| CartItemDto::new(product, quantity))
        .collect();
    let total_cents = entries.iter().map(|e| e.subtotal_cents).sum();

    let message = compose_message(&entries, total_cents);
    let settings = state.store.settings().await;
    let whatsapp_url = format!(
        "https://wa.me/{}?text={}",
        settings.store_whatsapp,
        urlencoding::encode(&message)
    );

    tracing::info!(
        user_id = %user.user_id,
        entries = entries.len(),
        total_cents,
        "order composed"
    );

    let data = WhatsAppOrder {
        message,
        whatsapp_url,
        total_cents,
    };
    Ok(ApiResponse::success("Order composed", data, Some(Meta::empty())))
}

fn compose_message(entries: &[CartItemDto], total_cents: i64) -> String {
    let mut message = String::from("Olá! Gostaria de fazer um pedido:\n\n");
    for (index, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            message,
            "{}. {}\n   Qtd: {} x {} = {}",
            index + 1,
            entry.product.name,
            entry.quantity,
            format_brl(entry.unit_price_cents),
            format_brl(entry.subtotal_cents),
        );
    }
    let _ = write!(message, "\n*Total:* {}", format_brl(total_cents));
    message
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::compose_message;
    use crate::{dto::cart::CartItemDto, models::Product};

    fn product(name: &str, price_cents: i64, promo: Option<i64>) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: "desc".to_string(),
            price_cents,
            promotional_price_cents: promo,
            is_on_sale: promo.is_some(),
            image_url: "https://example.com/p.jpg".to_string(),
            category: "Casa".to_string(),
            stock: 10,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn message_lists_entries_and_total() {
        let entries = vec![
            CartItemDto::new(product("Produto A", 10000, Some(8000)), 2),
            CartItemDto::new(product("Produto B", 5000, None), 1),
        ];
        let total = entries.iter().map(|e| e.subtotal_cents).sum();

        let message = compose_message(&entries, total);

        assert!(message.starts_with("Olá! Gostaria de fazer um pedido:"));
        assert!(message.contains("1. Produto A\n   Qtd: 2 x R$ 80,00 = R$ 160,00"));
        assert!(message.contains("2. Produto B\n   Qtd: 1 x R$ 50,00 = R$ 50,00"));
        assert!(message.ends_with("*Total:* R$ 210,00"));
    }
}
