// ── Product domain types ──
//
// Canonical model used by consumers. Wire representations live in
// `stockly-api`; conversions happen here at the core boundary.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockly_api::types::{ProductRequest, ProductResponse};

/// Opaque server-assigned product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ProductId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

/// A product record owned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub category: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ProductResponse> for Product {
    fn from(wire: ProductResponse) -> Self {
        Self {
            id: ProductId(wire.id),
            name: wire.name,
            quantity: wire.quantity,
            price: wire.price,
            category: wire.category,
            created_at: wire.created_at,
        }
    }
}

/// A product payload without the server-assigned fields, used for
/// create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub category: Option<String>,
}

impl ProductDraft {
    pub(crate) fn to_request(&self) -> ProductRequest {
        ProductRequest {
            name: self.name.clone(),
            quantity: self.quantity,
            price: self.price,
            category: self.category.clone(),
        }
    }
}
