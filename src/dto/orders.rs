use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of checkout: the order exists only as a composed message; it is
/// considered placed once the link is opened on the client.
#[derive(Debug, Serialize, ToSchema)]
pub struct WhatsAppOrder {
    /// Plain-text order summary, one numbered line per cart entry.
    pub message: String,
    /// `https://wa.me/<number>?text=<url-encoded message>`
    pub whatsapp_url: String,
    pub total_cents: i64,
}
