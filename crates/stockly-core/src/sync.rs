// ── Product synchronization engine ──
//
// Maps a QueryState to a network request and a network response to a
// ViewModel, and owns the mutation operations. The published ViewModel
// is only ever replaced wholesale; overlapping fetches resolve
// last-issued-wins through a monotonic sequence token.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use stockly_api::InventoryClient;
use stockly_api::types::ListParams;

use crate::error::CoreError;
use crate::model::{Product, ProductDraft, ProductId};
use crate::query::QueryState;
use crate::view::ViewModel;

/// Fetches product pages and reconciles them into the published
/// [`ViewModel`]; exposes the create/update/delete mutations.
///
/// Mutations do not touch the ViewModel themselves: on success the
/// caller re-invokes [`fetch_page`](Self::fetch_page) with the current
/// QueryState -- full resync is the consistency mechanism.
pub struct ProductSync {
    client: InventoryClient,
    page_size: u32,
    /// Sequence number of the most recently issued fetch. A fetch whose
    /// number no longer matches on resolution has been superseded.
    issued: AtomicU64,
    view_tx: watch::Sender<ViewModel>,
    categories_tx: watch::Sender<Vec<String>>,
}

impl ProductSync {
    pub fn new(client: InventoryClient, page_size: u32) -> Self {
        let (view_tx, _) = watch::channel(ViewModel::default());
        let (categories_tx, _) = watch::channel(Vec::new());

        Self {
            client,
            page_size,
            issued: AtomicU64::new(0),
            view_tx,
            categories_tx,
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to ViewModel updates.
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.view_tx.subscribe()
    }

    /// The latest published ViewModel.
    pub fn current(&self) -> ViewModel {
        self.view_tx.borrow().clone()
    }

    /// Subscribe to category-list updates.
    pub fn subscribe_categories(&self) -> watch::Receiver<Vec<String>> {
        self.categories_tx.subscribe()
    }

    /// The latest known distinct category names.
    pub fn categories(&self) -> Vec<String> {
        self.categories_tx.borrow().clone()
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Fetch the page described by `state` and reconcile the result into
    /// the published ViewModel.
    ///
    /// While the request is in flight the ViewModel carries
    /// `loading: true` with the previous items left visible. Failures
    /// are logged and folded into the `error` field; they never
    /// propagate past this boundary. A fetch superseded by a newer one
    /// has its result discarded on resolution.
    pub async fn fetch_page(&self, state: &QueryState) -> ViewModel {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        self.view_tx.send_modify(|vm| vm.loading = true);

        let result = self.client.list_products(&self.list_params(state)).await;

        if self.issued.load(Ordering::SeqCst) != seq {
            // A newer fetch was issued while this one was in flight; its
            // result is authoritative and ours is dropped unapplied.
            debug!(seq, "discarding superseded fetch result");
            return self.current();
        }

        match result {
            Ok(page) => {
                let vm = ViewModel {
                    items: page.products.into_iter().map(Product::from).collect(),
                    page: state.page(),
                    total_pages: page.pagination.total_pages,
                    total_items: page.pagination.total_items,
                    loading: false,
                    error: None,
                };
                self.view_tx.send_replace(vm.clone());
                vm
            }
            Err(err) => {
                warn!(error = %err, "product fetch failed");
                let message = CoreError::from(err).to_string();
                self.view_tx.send_modify(|vm| {
                    vm.loading = false;
                    vm.error = Some(message);
                });
                self.current()
            }
        }
    }

    /// Fetch the distinct category list (one request, no pagination).
    ///
    /// Non-critical: on failure the previous list is kept, the failure
    /// is logged, and the product `error` is left untouched.
    pub async fn refresh_categories(&self) -> Vec<String> {
        match self.client.list_categories().await {
            Ok(categories) => {
                self.categories_tx.send_replace(categories.clone());
                categories
            }
            Err(err) => {
                debug!(error = %err, "category fetch failed (non-fatal)");
                self.categories()
            }
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub async fn create(&self, draft: &ProductDraft) -> Result<(), CoreError> {
        let created = self.client.create_product(&draft.to_request()).await?;
        debug!(id = %created.id, "product created");
        Ok(())
    }

    pub async fn update(&self, id: &ProductId, draft: &ProductDraft) -> Result<(), CoreError> {
        self.client
            .update_product(id.as_str(), &draft.to_request())
            .await?;
        debug!(%id, "product updated");
        Ok(())
    }

    pub async fn remove(&self, id: &ProductId) -> Result<(), CoreError> {
        self.client.delete_product(id.as_str()).await?;
        debug!(%id, "product deleted");
        Ok(())
    }

    // ── Request construction ─────────────────────────────────────────

    fn list_params(&self, state: &QueryState) -> ListParams {
        ListParams {
            page: state.page(),
            limit: self.page_size,
            sort: state.sort_field().to_string(),
            order: state.sort_order().to_string(),
            search: state.search_term().to_owned(),
            category: state.category().map(ToOwned::to_owned),
        }
    }
}
