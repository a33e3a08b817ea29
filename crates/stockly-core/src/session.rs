// ── Session facade ──
//
// Owns the current QueryState and routes presentation intents to state
// transitions plus the explicit resync that follows every one of them.
// Replaces implicit effect-on-dependency-change wiring with an explicit
// "state changed → resync" call.

use std::sync::Mutex;

use stockly_api::InventoryClient;

use crate::error::CoreError;
use crate::model::{ProductDraft, ProductId};
use crate::query::{QueryState, SortField, SortOrder};
use crate::sync::ProductSync;
use crate::view::ViewModel;

/// The main entry point for consumers: accepts user intents, holds the
/// single current QueryState, and drives the [`ProductSync`] engine.
pub struct Session {
    sync: ProductSync,
    state: Mutex<QueryState>,
}

impl Session {
    /// Create a session starting from the default query.
    pub fn new(client: InventoryClient, page_size: u32) -> Self {
        Self::with_query(client, page_size, QueryState::new())
    }

    /// Create a session seeded with an already-built query (a frontend
    /// may apply startup filters before the first fetch).
    pub fn with_query(client: InventoryClient, page_size: u32, query: QueryState) -> Self {
        Self {
            sync: ProductSync::new(client, page_size),
            state: Mutex::new(query),
        }
    }

    /// The sync engine underneath, for ViewModel/category subscription.
    pub fn sync(&self) -> &ProductSync {
        &self.sync
    }

    /// Snapshot of the current query.
    pub fn query(&self) -> QueryState {
        self.lock_state().clone()
    }

    /// Initial sync: the category list plus the first product page.
    pub async fn start(&self) -> ViewModel {
        self.sync.refresh_categories().await;
        self.refresh().await
    }

    /// Re-run the fetch for the current QueryState (resync).
    pub async fn refresh(&self) -> ViewModel {
        let state = self.query();
        self.sync.fetch_page(&state).await
    }

    // ── Intents ──────────────────────────────────────────────────────

    pub async fn search(&self, term: impl Into<String>) -> ViewModel {
        let term = term.into();
        let next = self.update_state(|s| s.with_search_term(term));
        self.sync.fetch_page(&next).await
    }

    pub async fn filter_by_category(&self, category: Option<String>) -> ViewModel {
        let next = self.update_state(|s| s.with_category(category));
        self.sync.fetch_page(&next).await
    }

    pub async fn change_sort(&self, field: SortField) -> ViewModel {
        let next = self.update_state(|s| s.with_sort_field(field));
        self.sync.fetch_page(&next).await
    }

    pub async fn change_order(&self, order: SortOrder) -> ViewModel {
        let next = self.update_state(|s| s.with_sort_order(order));
        self.sync.fetch_page(&next).await
    }

    pub async fn toggle_order(&self) -> ViewModel {
        let next = self.update_state(QueryState::toggled_sort_order);
        self.sync.fetch_page(&next).await
    }

    /// Navigate to `page`. Out-of-range pages (per the latest
    /// ViewModel's `total_pages`) are a no-op: no state change, no
    /// fetch.
    pub async fn go_to_page(&self, page: u32) -> ViewModel {
        let total_pages = self.sync.current().total_pages;
        let (changed, next) = {
            let mut guard = self.lock_state();
            let next = guard.with_page(page, total_pages);
            let changed = *guard != next;
            *guard = next.clone();
            (changed, next)
        };

        if changed {
            self.sync.fetch_page(&next).await
        } else {
            self.sync.current()
        }
    }

    /// Create (no editing id) or update (editing id) a product from the
    /// form draft, then resync the page and the category list.
    pub async fn submit_form(
        &self,
        draft: &ProductDraft,
        editing: Option<&ProductId>,
    ) -> Result<ViewModel, CoreError> {
        match editing {
            Some(id) => self.sync.update(id, draft).await?,
            None => self.sync.create(draft).await?,
        }
        self.sync.refresh_categories().await;
        Ok(self.refresh().await)
    }

    /// Delete a product, then resync. Confirmation is the caller's
    /// concern.
    pub async fn delete_product(&self, id: &ProductId) -> Result<ViewModel, CoreError> {
        self.sync.remove(id).await?;
        self.sync.refresh_categories().await;
        Ok(self.refresh().await)
    }

    // ── State plumbing ───────────────────────────────────────────────

    fn update_state(&self, transition: impl FnOnce(&QueryState) -> QueryState) -> QueryState {
        let mut guard = self.lock_state();
        let next = transition(&guard);
        *guard = next.clone();
        next
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, QueryState> {
        self.state.lock().expect("query state lock poisoned")
    }
}
