#![allow(clippy::unwrap_used)]
// Integration tests for the sync engine and session facade using wiremock.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockly_api::InventoryClient;
use stockly_core::{ProductDraft, ProductId, Session};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<Session>) {
    let server = MockServer::start().await;
    let client = InventoryClient::with_client(reqwest::Client::new(), &server.uri()).unwrap();
    (server, Arc::new(Session::new(client, 10)))
}

fn page(products: serde_json::Value, total_pages: u32, total_items: u64) -> serde_json::Value {
    json!({
        "products": products,
        "pagination": { "totalPages": total_pages, "totalItems": total_items }
    })
}

fn product(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "quantity": 5, "price": 2.5 })
}

// ── Fetch scenarios ─────────────────────────────────────────────────

#[tokio::test]
async fn test_search_returns_matching_page() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "widget"))
        .and(query_param("page", "1"))
        .and(query_param("sort", "name"))
        .and(query_param("order", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget"), product("p-2", "Widget Pro")]),
            1,
            2,
        )))
        .mount(&server)
        .await;

    let vm = session.search("widget").await;

    assert_eq!(vm.items.len(), 2);
    assert_eq!(vm.items[0].name, "Widget");
    assert_eq!(vm.page, 1);
    assert_eq!(vm.total_pages, 1);
    assert_eq!(vm.total_items, 2);
    assert!(!vm.loading);
    assert_eq!(vm.error, None);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_items_and_sets_error() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget"), product("p-2", "Widget Pro")]),
            1,
            2,
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db down" })))
        .mount(&server)
        .await;

    let first = session.refresh().await;
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.error, None);

    let second = session.refresh().await;
    assert_eq!(second.items.len(), 2, "stale items must remain visible");
    assert_eq!(second.items, first.items);
    assert!(!second.loading);
    assert_eq!(second.error.as_deref(), Some("db down"));
}

#[tokio::test]
async fn test_successful_fetch_clears_previous_error() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget")]),
            1,
            1,
        )))
        .mount(&server)
        .await;

    let failed = session.refresh().await;
    assert!(failed.error.is_some());

    let recovered = session.refresh().await;
    assert_eq!(recovered.error, None);
    assert_eq!(recovered.items.len(), 1);
}

#[tokio::test]
async fn test_loading_flag_during_in_flight_fetch() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "widget"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget")]),
            1,
            1,
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "gadget"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(json!([product("p-9", "Gadget")]), 1, 1))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    session.search("widget").await;

    let slow = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.search("gadget").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    // In flight: stale items stay visible, loading is raised.
    let in_flight = session.sync().current();
    assert!(in_flight.loading);
    assert_eq!(in_flight.items[0].name, "Widget");

    let done = slow.await.unwrap();
    assert!(!done.loading);
    assert_eq!(done.items[0].name, "Gadget");
}

// ── Ordering guarantee ──────────────────────────────────────────────

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let (server, session) = setup().await;

    // Query A: slow to resolve.
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "aa"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(json!([product("p-1", "Stale")]), 1, 1))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    // Query B: resolves immediately.
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "bb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-2", "Fresh")]),
            1,
            1,
        )))
        .mount(&server)
        .await;

    let slow = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.search("aa").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fast = session.search("bb").await;
    assert_eq!(fast.items[0].name, "Fresh");

    // A resolves after B: its result must not overwrite B's.
    let superseded = slow.await.unwrap();
    assert_eq!(superseded.items[0].name, "Fresh");

    let applied = session.sync().current();
    assert_eq!(applied.items[0].name, "Fresh");
    assert_eq!(applied.error, None);
    assert!(!applied.loading);
}

// ── Pagination ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_go_to_page_fetches_existing_page() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget")]),
            3,
            21,
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-11", "Widget Mk2")]),
            3,
            21,
        )))
        .mount(&server)
        .await;

    session.refresh().await;

    let vm = session.go_to_page(2).await;
    assert_eq!(vm.page, 2);
    assert_eq!(vm.items[0].name, "Widget Mk2");
    assert_eq!(session.query().page(), 2);
}

#[tokio::test]
async fn test_go_to_page_out_of_range_is_a_no_op() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]), 3, 21)))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget")]),
            3,
            21,
        )))
        .mount(&server)
        .await;

    let loaded = session.refresh().await;

    let unchanged = session.go_to_page(99).await;
    assert_eq!(unchanged, loaded);
    assert_eq!(session.query().page(), 1);

    let zero = session.go_to_page(0).await;
    assert_eq!(zero, loaded);
    assert_eq!(session.query().page(), 1);
}

#[tokio::test]
async fn test_filter_change_resets_pagination() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget")]),
            5,
            42,
        )))
        .mount(&server)
        .await;

    session.refresh().await;
    session.go_to_page(3).await;
    assert_eq!(session.query().page(), 3);

    session.filter_by_category(Some("hardware".into())).await;
    assert_eq!(session.query().page(), 1);
    assert_eq!(session.query().category(), Some("hardware"));
}

// ── Mutations & resync ──────────────────────────────────────────────

#[tokio::test]
async fn test_create_then_resync_includes_product_once() {
    let (server, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(product("p-10", "Gadget")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["gadgets"])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget"), product("p-10", "Gadget")]),
            1,
            2,
        )))
        .mount(&server)
        .await;

    let draft = ProductDraft {
        name: "Gadget".into(),
        quantity: 5,
        price: 2.5,
        category: Some("gadgets".into()),
    };
    let vm = session.submit_form(&draft, None).await.unwrap();

    let occurrences = vm.items.iter().filter(|p| p.name == "Gadget").count();
    assert_eq!(occurrences, 1);
    assert_eq!(session.sync().categories(), vec!["gadgets"]);
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let (server, session) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/products/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product("p-1", "Widget")))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget")]),
            1,
            1,
        )))
        .mount(&server)
        .await;

    let draft = ProductDraft {
        name: "Widget".into(),
        quantity: 5,
        price: 2.5,
        category: None,
    };
    let id = ProductId::from("p-1");

    let first = session.submit_form(&draft, Some(&id)).await.unwrap();
    let second = session.submit_form(&draft, Some(&id)).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_failed_delete_surfaces_error_and_leaves_items() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget"), product("p-2", "Widget Pro")]),
            1,
            2,
        )))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/p-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;

    let before = session.refresh().await;

    let result = session.delete_product(&ProductId::from("p-1")).await;
    let err = result.unwrap_err();
    assert!(!err.to_string().is_empty());
    assert!(err.to_string().contains("boom"));

    // No resync happened: the pre-delete list is still what's published.
    assert_eq!(session.sync().current().items, before.items);
}

// ── Category list ───────────────────────────────────────────────────

#[tokio::test]
async fn test_category_fetch_failure_is_silent() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([product("p-1", "Widget")]),
            1,
            1,
        )))
        .mount(&server)
        .await;

    let vm = session.start().await;

    assert_eq!(vm.error, None, "category failure must not surface");
    assert_eq!(vm.items.len(), 1);
    assert!(session.sync().categories().is_empty());
}

#[tokio::test]
async fn test_category_failure_keeps_previous_list() {
    let (server, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["hardware"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let first = session.sync().refresh_categories().await;
    assert_eq!(first, vec!["hardware"]);

    let second = session.sync().refresh_categories().await;
    assert_eq!(second, vec!["hardware"]);
}
