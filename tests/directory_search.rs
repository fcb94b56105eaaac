//! Directory pagination and filter variables against a mock GraphQL endpoint.

mod common;

use alloy::primitives::Address;
use std::sync::{Arc, Mutex};

use common::{hero_json, start_programmable_backend};
use hero_bridge::config::DirectoryConfig;
use hero_bridge::directory::{ClassFilter, DirectoryClient, SearchFilters};

type Seen = Arc<Mutex<Vec<serde_json::Value>>>;

fn page(ids: std::ops::Range<u64>) -> String {
    let heroes: Vec<_> = ids.rev().map(|id| hero_json(id, "kla")).collect();
    serde_json::json!({"data": {"heroes": heroes}}).to_string()
}

fn client(addr: std::net::SocketAddr, page_size: usize) -> DirectoryClient {
    DirectoryClient::new(&DirectoryConfig {
        endpoint: format!("http://{}/graphql", addr),
        page_size,
        request_timeout_secs: 5,
    })
    .unwrap()
}

/// Mock index serving `pages` in order, then an HTTP 500.
async fn serve_pages(pages: Vec<String>) -> (std::net::SocketAddr, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();
    let pages = Arc::new(pages);

    let addr = start_programmable_backend(move |request| {
        let recorded = recorded.clone();
        let pages = pages.clone();
        async move {
            let index = {
                let mut seen = recorded.lock().unwrap();
                seen.push(request);
                seen.len() - 1
            };
            match pages.get(index) {
                Some(body) => (200, body.clone()),
                None => (500, "index unavailable".to_string()),
            }
        }
    })
    .await;

    (addr, seen)
}

#[tokio::test]
async fn test_full_page_requests_next_page() {
    let (addr, seen) = serve_pages(vec![page(0..250), page(250..260)]).await;

    let heroes = client(addr, 250)
        .search(Address::ZERO, &SearchFilters::default())
        .await;

    assert_eq!(heroes.len(), 260);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0]["variables"]["skip_number"], 0);
    assert_eq!(seen[1]["variables"]["skip_number"], 250);
    // pages are appended in the order returned
    assert_eq!(heroes[0].id, 249);
    assert_eq!(heroes[250].id, 259);
}

#[tokio::test]
async fn test_short_page_stops() {
    let (addr, seen) = serve_pages(vec![page(0..3)]).await;

    let heroes = client(addr, 250)
        .search(Address::ZERO, &SearchFilters::default())
        .await;

    assert_eq!(heroes.len(), 3);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_page_keeps_earlier_pages() {
    // Second request gets a 500.
    let (addr, seen) = serve_pages(vec![page(0..5)]).await;

    let heroes = client(addr, 5)
        .search(Address::ZERO, &SearchFilters::default())
        .await;

    assert_eq!(heroes.len(), 5);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_missing_data_keeps_earlier_pages() {
    let errors = serde_json::json!({"errors": [{"message": "bad query"}]}).to_string();
    let (addr, _seen) = serve_pages(vec![page(10..12), errors]).await;

    let heroes = client(addr, 2)
        .search(Address::ZERO, &SearchFilters::default())
        .await;

    assert_eq!(heroes.iter().map(|h| h.id).collect::<Vec<_>>(), vec![11, 10]);
}

#[tokio::test]
async fn test_unreachable_endpoint_returns_empty() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let heroes = client(addr, 250)
        .search(Address::ZERO, &SearchFilters::default())
        .await;
    assert!(heroes.is_empty());
}

#[tokio::test]
async fn test_filter_variables_sent() {
    let (addr, seen) = serve_pages(vec![page(0..1)]).await;
    let owner: Address = common::TEST_ADDRESS.parse().unwrap();

    let filters = SearchFilters {
        main_class: "2,3".parse::<ClassFilter>().unwrap(),
        ..SearchFilters::default()
    };
    client(addr, 250).search(owner, &filters).await;

    let seen = seen.lock().unwrap();
    let request = &seen[0];
    let vars = &request["variables"];
    assert_eq!(vars["main_classes"], serde_json::json!([2, 3]));
    assert_eq!(vars["sub_classes"], serde_json::json!([]));
    assert_eq!(vars["account_address"], common::TEST_ADDRESS);
    assert_eq!(vars["min_summons"], 0);
    assert_eq!(vars["max_summons"], 999);
    assert_eq!(vars["page_size"], 250);
    assert!(request["query"].as_str().unwrap().contains("heroes("));
}
