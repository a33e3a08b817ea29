//! Query/state synchronization layer between `stockly-api` and UI
//! consumers.
//!
//! This crate owns the domain model and the client-side sync loop for
//! the inventory workspace:
//!
//! - **[`QueryState`]** — the canonical description of what subset and
//!   order of products to display (search term, category filter, sort
//!   key/direction, page). Pure transition functions; any filter/sort
//!   change resets pagination.
//!
//! - **[`ProductSync`]** — maps a QueryState to a fetch and the response
//!   to a [`ViewModel`] published through a `tokio::sync::watch` channel.
//!   Overlapping fetches resolve last-issued-wins via a sequence token.
//!   Owns the create/update/delete mutations; consistency after a
//!   mutation comes from a full resync, never a local merge.
//!
//! - **[`Session`]** — intent facade for frontends: `search`,
//!   `filter_by_category`, `change_sort`, `toggle_order`, `go_to_page`,
//!   `submit_form`, `delete_product`. Every state-affecting intent
//!   replaces the QueryState and triggers exactly one fetch.
//!
//! - **Domain model** ([`model`]) — canonical [`Product`] /
//!   [`ProductDraft`] types with the opaque server-assigned
//!   [`ProductId`].

pub mod error;
pub mod model;
pub mod query;
pub mod session;
pub mod sync;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use model::{Product, ProductDraft, ProductId};
pub use query::{QueryState, SortField, SortOrder};
pub use session::Session;
pub use sync::ProductSync;
pub use view::ViewModel;
