//! Pilote `GceDriver` via le client SDK pointé sur un faux serveur Compute en mémoire.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use google_cloud_auth::credentials::anonymous;
use nimbus_core::{ComputeDriver, DriverError, NodeState};
use nimbus_gce::GceDriver;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Fake {
    actions: Arc<Mutex<Vec<String>>>,
    operation_polls: Arc<Mutex<usize>>,
}

async fn aggregated(Query(params): Query<HashMap<String, String>>) -> Result<Json<Value>, StatusCode> {
    // la première page arrive avec un pageToken vide
    let token = params.get("pageToken").map(String::as_str).filter(|t| !t.is_empty());
    let page = match token {
        None => json!({
            "items": {
                "zones/europe-west1-b": {"instances": [
                    {"id": "123", "name": "web-1", "status": "RUNNING",
                     "zone": "https://compute/projects/demo/zones/europe-west1-b"}
                ]},
                "zones/us-east1-c": {"warning": {"code": "NO_RESULTS_ON_PAGE", "message": "no results"}}
            },
            "nextPageToken": "page-2"
        }),
        Some("page-2") => json!({
            "items": {
                "zones/us-central1-a": {"instances": [
                    {"id": "8761234567890", "name": "batch", "status": "TERMINATED",
                     "zone": "https://compute/projects/demo/zones/us-central1-a"}
                ]}
            }
        }),
        Some(_) => return Err(StatusCode::BAD_REQUEST),
    };
    Ok(Json(page))
}

async fn instance_action(
    State(fake): State<Fake>,
    Path((zone, name, action)): Path<(String, String, String)>,
) -> Json<Value> {
    fake.actions.lock().unwrap().push(format!("{action}:{zone}/{name}"));
    match name.as_str() {
        "broken" => Json(json!({
            "name": "op-broken",
            "status": "DONE",
            "error": {"errors": [{"code": "ZONE_RESOURCE_POOL_EXHAUSTED", "message": "no capacity"}]}
        })),
        "slow" => Json(json!({"name": "op-slow", "status": "RUNNING"})),
        _ => Json(json!({"name": format!("op-{name}"), "status": "DONE"})),
    }
}

async fn get_operation(State(fake): State<Fake>, Path((_zone, op)): Path<(String, String)>) -> Json<Value> {
    *fake.operation_polls.lock().unwrap() += 1;
    Json(json!({"name": op, "status": "DONE"}))
}

async fn spawn_fake() -> (SocketAddr, Fake) {
    let fake = Fake::default();
    let app = Router::new()
        .route("/compute/v1/projects/demo/aggregated/instances", get(aggregated))
        .route(
            "/compute/v1/projects/demo/zones/{zone}/instances/{name}/{action}",
            post(instance_action),
        )
        .route(
            "/compute/v1/projects/demo/zones/{zone}/operations/{op}",
            get(get_operation),
        )
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, fake)
}

async fn driver(addr: SocketAddr, project: &str) -> GceDriver {
    let creds = anonymous::Builder::new().build();
    let endpoint = format!("http://{addr}");
    GceDriver::with_credentials(creds, project, Some(&endpoint)).await.unwrap()
}

#[tokio::test]
async fn test_list_follows_pages() {
    let (addr, _fake) = spawn_fake().await;
    let driver = driver(addr, "demo").await;

    let nodes = driver.list_nodes().await.unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].name, "web-1");
    assert_eq!(nodes[0].id, "0cf3c449d003edcd355fb7b24f5ca69c1d105cb8");
    assert_eq!(nodes[0].zone.as_deref(), Some("europe-west1-b"));
    assert_eq!(nodes[1].state, NodeState::Stopped);
}

#[tokio::test]
async fn test_start_and_stop_hit_zone_endpoints() {
    let (addr, fake) = spawn_fake().await;
    let driver = driver(addr, "demo").await;

    let nodes = driver.list_nodes().await.unwrap();
    driver.start_node(&nodes[1]).await.unwrap();
    driver.stop_node(&nodes[0]).await.unwrap();

    let actions = fake.actions.lock().unwrap().clone();
    assert_eq!(actions, vec!["start:us-central1-a/batch", "stop:europe-west1-b/web-1"]);
    assert_eq!(*fake.operation_polls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_pending_operation_is_polled_until_done() {
    let (addr, fake) = spawn_fake().await;
    let driver = driver(addr, "demo").await;

    let mut node = driver.list_nodes().await.unwrap().remove(0);
    node.name = "slow".to_string();

    driver.start_node(&node).await.unwrap();
    assert!(*fake.operation_polls.lock().unwrap() >= 1);
}

#[tokio::test]
async fn test_failed_operation_is_reported() {
    let (addr, _fake) = spawn_fake().await;
    let driver = driver(addr, "demo").await;

    let mut node = driver.list_nodes().await.unwrap().remove(0);
    node.name = "broken".to_string();

    match driver.start_node(&node).await {
        Err(DriverError::Operation { name, message }) => {
            assert_eq!(name, "op-broken");
            assert!(message.contains("no capacity"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_node_without_zone_is_rejected() {
    let (addr, fake) = spawn_fake().await;
    let driver = driver(addr, "demo").await;

    let mut node = driver.list_nodes().await.unwrap().remove(0);
    node.zone = None;

    assert!(matches!(driver.stop_node(&node).await, Err(DriverError::InvalidNode(_))));
    assert!(fake.actions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_errors_surface_status() {
    let (addr, _fake) = spawn_fake().await;
    let driver = driver(addr, "other-project").await;

    match driver.list_nodes().await {
        Err(DriverError::Api { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected API error, got {other:?}"),
    }
}
