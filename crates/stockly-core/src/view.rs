// ── View model ──

use serde::Serialize;

use crate::model::Product;

/// The fully-resolved, render-ready snapshot derived from a QueryState:
/// the current page of items plus pagination metadata and sync status.
///
/// Recomputed on every sync and replaced wholesale; consumers never see
/// a partially updated snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// Current page of products, in server sort order.
    pub items: Vec<Product>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    /// A fetch for this view is in flight; `items` are the stale
    /// previous page until it resolves.
    pub loading: bool,
    /// User-facing message from the last failed fetch, cleared by the
    /// next successful one.
    pub error: Option<String>,
}

impl Default for ViewModel {
    /// Session-start snapshot: nothing loaded yet, a single empty page.
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 1,
            total_items: 0,
            loading: false,
            error: None,
        }
    }
}
