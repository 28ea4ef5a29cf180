//! Common test utilities for API testing with mocks.
//!
//! This module provides:
//! - `TestFixture`: an in-process router backed by `MockSetCatalog`
//! - `spawn_stub_rebrickable`: a local HTTP server speaking enough of the
//!   Rebrickable set API for the real client to talk to

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use brickfind_core::{
    testing::MockSetCatalog, Config, LegoSet, RebrickableConfig, ResolverConfig, ServerConfig,
    SetResolver,
};
use brickfind_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use brickfind_core::testing::fixtures;

/// API key accepted by the stub Rebrickable server.
pub const STUB_API_KEY: &str = "test-key";

/// Test fixture with a mock catalog behind the resolver.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure which sets exist
    pub catalog: Arc<MockSetCatalog>,
    /// The resolver shared with the router
    pub resolver: Arc<SetResolver>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture whose resolver has been primed with the default set.
    pub async fn new() -> Self {
        let fixture = Self::unprimed().await;
        fixture
            .catalog
            .add_set(8014, fixtures::default_set())
            .await;
        fixture
            .resolver
            .init()
            .await
            .expect("Failed to prime default set");
        fixture.catalog.clear_recorded().await;
        fixture
    }

    /// Create a fixture without priming the default set.
    pub async fn unprimed() -> Self {
        let catalog = Arc::new(MockSetCatalog::new());
        let config = test_config();
        let resolver = Arc::new(SetResolver::from_config(
            catalog.clone(),
            &config.resolver,
        ));

        let state = Arc::new(AppState::new(config, Arc::clone(&resolver)));

        Self {
            router: create_router(state),
            catalog,
            resolver,
        }
    }

    /// Make a GET request, parsing the body as JSON when possible.
    pub async fn get(&self, path: &str) -> TestResponse {
        let (status, text) = self.get_text(path).await;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        TestResponse { status, body }
    }

    /// Make a GET request and return the raw body.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).to_string())
    }
}

/// Config used by in-process fixtures.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 0, // Not used for in-process testing
        },
        rebrickable: RebrickableConfig {
            api_key: "secret-test-key".to_string(),
            base_url: None,
            timeout_secs: 5,
        },
        resolver: ResolverConfig::default(),
    }
}

// ============================================================================
// Stub Rebrickable server
// ============================================================================

struct StubCatalog {
    sets: HashMap<String, LegoSet>,
}

async fn stub_get_set(
    State(stub): State<Arc<StubCatalog>>,
    Path(set_num): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if params.get("key").map(String::as_str) != Some(STUB_API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid token." })),
        );
    }

    match stub.sets.get(&set_num) {
        Some(set) => (StatusCode::OK, Json(json!(set))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Not found." })),
        ),
    }
}

/// Start a local server that answers `/api/v3/lego/sets/{set_num}/` from
/// `sets`. Returns its address; the base URL is `http://{addr}/api/v3`.
pub async fn spawn_stub_rebrickable(sets: Vec<LegoSet>) -> SocketAddr {
    let stub = Arc::new(StubCatalog {
        sets: sets
            .into_iter()
            .map(|set| (set.set_num.clone(), set))
            .collect(),
    });

    let app = Router::new()
        .route("/api/v3/lego/sets/{set_num}/", get(stub_get_set))
        .route(
            "/api/v3/broken/lego/sets/{set_num}/",
            get(|| async { (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>") }),
        )
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub catalog");
    let addr = listener.local_addr().expect("Stub catalog has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    addr
}

/// Base URL for a stub started with [`spawn_stub_rebrickable`].
pub fn stub_base_url(addr: SocketAddr) -> String {
    format!("http://{}/api/v3", addr)
}
