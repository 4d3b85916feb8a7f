use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    CreatedAt,
    Price,
    Name,
}

impl ProductSortBy {
    /// Sorts in place; sale pricing does not affect ordering, products sort
    /// by their base price.
    pub fn sort(self, products: &mut [Product], order: SortOrder) {
        match self {
            ProductSortBy::CreatedAt => products.sort_by_key(|p| p.created_at),
            ProductSortBy::Price => products.sort_by_key(|p| p.price_cents),
            ProductSortBy::Name => {
                products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
        }
        if matches!(order, SortOrder::Desc) {
            products.reverse();
        }
    }
}

// Pagination fields live directly on the query struct: flattening a nested
// struct breaks numeric fields under serde_urlencoded.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Substring match against name and description.
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub sort_by: Option<ProductSortBy>,
    pub sort_order: Option<SortOrder>,
}

impl ProductQuery {
    pub fn normalize_pagination(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}
