//! Integration tests: a real listener driven through the items client.

use std::net::SocketAddr;

use items_api::api::{router_for_config, AppState};
use items_api::client::ItemsClient;
use items_api::config::Config;
use items_api::error::ClientError;
use items_api::server::serve_with_shutdown;
use items_api::store::{Item, ItemStore};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use url::Url;

/// Start a server on an ephemeral port and return its address.
async fn spawn_server(store: ItemStore) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = router_for_config(&Config::default(), AppState::new(store));

    tokio::spawn(async move {
        serve_with_shutdown(listener, router, std::future::pending())
            .await
            .unwrap();
    });

    addr
}

async fn client_for_reference_server() -> ItemsClient {
    let addr = spawn_server(ItemStore::reference().unwrap()).await;
    ItemsClient::new(Url::parse(&format!("http://{}", addr)).unwrap()).unwrap()
}

#[tokio::test]
async fn root_reports_running() {
    let client = client_for_reference_server().await;
    let root = client.root().await.unwrap();
    assert_eq!(root.message, "Backend API is running!");
}

#[tokio::test]
async fn health_reports_ok() {
    let client = client_for_reference_server().await;
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn list_returns_reference_items() {
    let client = client_for_reference_server().await;
    let items = client.list_items().await.unwrap();
    assert_eq!(items, ItemStore::reference().unwrap().all().to_vec());
    assert_eq!(items.len(), 3);
}

#[tokio::test]
async fn get_item_by_id() {
    let client = client_for_reference_server().await;
    let item = client.get_item("1").await.unwrap().unwrap();
    assert_eq!(item.id, 1);
}

#[tokio::test]
async fn missing_and_malformed_ids_are_none() {
    let client = client_for_reference_server().await;
    assert!(client.get_item("999").await.unwrap().is_none());
    assert!(client.get_item("abc").await.unwrap().is_none());
}

#[tokio::test]
async fn ids_with_url_syntax_are_not_found() {
    let client = client_for_reference_server().await;
    assert!(client.get_item("1?x=1").await.unwrap().is_none());
    assert!(client.get_item("1#frag").await.unwrap().is_none());
    assert!(client.get_item("../../health").await.unwrap().is_none());
    assert!(client.get_item("1/2").await.unwrap().is_none());
}

#[tokio::test]
async fn repeated_lists_are_identical() {
    let client = client_for_reference_server().await;
    let first = client.list_items().await.unwrap();
    for _ in 0..5 {
        assert_eq!(client.list_items().await.unwrap(), first);
    }
}

#[tokio::test]
async fn concurrent_reads_agree() {
    let client = client_for_reference_server().await;
    let handles: Vec<_> = (1..=3u64)
        .cycle()
        .take(30)
        .map(|id| {
            let client = client.clone();
            tokio::spawn(async move { (id, client.get_item(&id.to_string()).await) })
        })
        .collect();

    for handle in handles {
        let (id, result) = handle.await.unwrap();
        assert_eq!(result.unwrap().map(|item| item.id), Some(id));
    }
}

#[tokio::test]
async fn custom_store_is_served_over_http() {
    let store = ItemStore::new(vec![Item::new(10, "ten", "")]).unwrap();
    let addr = spawn_server(store).await;
    let client = ItemsClient::new(Url::parse(&format!("http://{}", addr)).unwrap()).unwrap();

    let items = client.list_items().await.unwrap();
    assert_eq!(items, vec![Item::new(10, "ten", "")]);
    assert!(client.get_item("1").await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_route_is_status_error() {
    let addr = spawn_server(ItemStore::reference().unwrap()).await;
    let client =
        ItemsClient::new(Url::parse(&format!("http://{}/nowhere", addr)).unwrap()).unwrap();

    match client.list_items().await {
        Err(ClientError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected 404 status error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ItemsClient::new(Url::parse(&format!("http://{}", addr)).unwrap()).unwrap();
    assert!(matches!(
        client.list_items().await,
        Err(ClientError::Http(_))
    ));
}
