// ── Query state ──
//
// The canonical description of what subset/order of products to display.
// Immutable between updates: every transition returns a new instance, so
// an issued fetch always observes a consistent query.

use strum::{Display, EnumString};

/// Server-side sort key. The strum serializations are the wire values
/// the API expects in the `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum SortField {
    #[default]
    #[strum(serialize = "name")]
    Name,
    #[strum(serialize = "price")]
    Price,
    #[strum(serialize = "quantity")]
    Quantity,
    #[strum(serialize = "createdAt")]
    CreatedAt,
}

/// Sort direction, `asc`/`desc` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum SortOrder {
    #[default]
    #[strum(serialize = "asc")]
    Ascending,
    #[strum(serialize = "desc")]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Search term, category filter, sort key/direction, and page number.
///
/// Equality is structural: identical field values mean an identical
/// query, regardless of how the state was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_term: String,
    category: Option<String>,
    sort_field: SortField,
    sort_order: SortOrder,
    page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    /// The session-start query: no filters, name ascending, page 1.
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            category: None,
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    // ── Transitions ──────────────────────────────────────────────────
    //
    // Changing any filter/sort criterion invalidates prior pagination,
    // so every transition except `with_page` resets the page to 1.

    #[must_use]
    pub fn with_search_term(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            page: 1,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_category(&self, category: Option<String>) -> Self {
        Self {
            category,
            page: 1,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_sort_field(&self, field: SortField) -> Self {
        Self {
            sort_field: field,
            page: 1,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_sort_order(&self, order: SortOrder) -> Self {
        Self {
            sort_order: order,
            page: 1,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggled_sort_order(&self) -> Self {
        self.with_sort_order(self.sort_order.toggled())
    }

    /// Move to `page`, which must exist within `total_pages` (known from
    /// the last ViewModel). Out-of-range requests are clamped: the state
    /// is returned unchanged rather than applied.
    #[must_use]
    pub fn with_page(&self, page: u32, total_pages: u32) -> Self {
        if page == 0 || page > total_pages {
            return self.clone();
        }
        Self {
            page,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> QueryState {
        QueryState::new().with_page(3, 5)
    }

    #[test]
    fn defaults() {
        let state = QueryState::new();
        assert_eq!(state.search_term(), "");
        assert_eq!(state.category(), None);
        assert_eq!(state.sort_field(), SortField::Name);
        assert_eq!(state.sort_order(), SortOrder::Ascending);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn filter_and_sort_transitions_reset_page() {
        let state = on_page_three();
        assert_eq!(state.page(), 3);

        assert_eq!(state.with_search_term("widget").page(), 1);
        assert_eq!(state.with_category(Some("hardware".into())).page(), 1);
        assert_eq!(state.with_sort_field(SortField::Price).page(), 1);
        assert_eq!(state.with_sort_order(SortOrder::Descending).page(), 1);
        assert_eq!(state.toggled_sort_order().page(), 1);
    }

    #[test]
    fn transitions_preserve_other_fields() {
        let state = QueryState::new()
            .with_search_term("widget")
            .with_category(Some("hardware".into()));

        let sorted = state.with_sort_field(SortField::Quantity);
        assert_eq!(sorted.search_term(), "widget");
        assert_eq!(sorted.category(), Some("hardware"));
    }

    #[test]
    fn with_page_applies_in_range() {
        let state = QueryState::new().with_page(4, 5);
        assert_eq!(state.page(), 4);
    }

    #[test]
    fn with_page_clamps_out_of_range() {
        let state = on_page_three();
        assert_eq!(state.with_page(0, 5), state);
        assert_eq!(state.with_page(6, 5), state);
    }

    #[test]
    fn with_page_leaves_other_fields_untouched() {
        let state = QueryState::new().with_search_term("widget");
        let paged = state.with_page(2, 3);
        assert_eq!(paged.search_term(), "widget");
        assert_eq!(paged.page(), 2);
    }

    #[test]
    fn toggled_sort_order_flips() {
        let state = QueryState::new();
        assert_eq!(state.toggled_sort_order().sort_order(), SortOrder::Descending);
        assert_eq!(
            state.toggled_sort_order().toggled_sort_order().sort_order(),
            SortOrder::Ascending
        );
    }

    #[test]
    fn equality_is_structural() {
        let a = QueryState::new().with_search_term("widget").with_page(2, 9);
        let b = QueryState::new().with_page(7, 9).with_search_term("widget").with_page(2, 9);
        assert_eq!(a, b);
    }

    #[test]
    fn sort_wire_values() {
        assert_eq!(SortField::CreatedAt.to_string(), "createdAt");
        assert_eq!(SortOrder::Descending.to_string(), "desc");
        assert_eq!("price".parse::<SortField>().ok(), Some(SortField::Price));
    }
}
