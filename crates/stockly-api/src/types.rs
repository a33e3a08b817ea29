// Wire types for the inventory API.
//
// Field names mirror the JSON contract (camelCase); the canonical domain
// model lives in `stockly-core` and is converted at that boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/update payload: a product without the server-assigned fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Pagination metadata attached to a product listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_pages: u32,
    pub total_items: u64,
}

/// One page of products plus its pagination envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub products: Vec<ProductResponse>,
    pub pagination: Pagination,
}

/// Query parameters for `GET /products`.
///
/// `search` and `category` are omitted from the query string when empty —
/// the server treats an absent parameter and an empty one the same, and
/// omission keeps request logs readable.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub sort: String,
    pub order: String,
    pub search: String,
    pub category: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort: "name".into(),
            order: "asc".into(),
            search: String::new(),
            category: None,
        }
    }
}

impl ListParams {
    /// Render as query pairs for `reqwest::RequestBuilder::query`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sort", self.sort.clone()),
            ("order", self.order.clone()),
        ];
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if let Some(ref category) = self.category {
            if !category.is_empty() {
                params.push(("category", category.clone()));
            }
        }
        params
    }
}
