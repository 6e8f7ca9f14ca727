//! Integration tests for the wizard HTTP surface.
//!
//! These drive the full router in-process against a scripted mock
//! platform, verifying:
//! - the login gate (401 before login, cookie-backed session after)
//! - wizard step round-trips
//! - provisioning failure ordering and error relay
//! - query dispatch against the real template files in `queries/`

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use quickstart::config::Config;
use quickstart::qds::mock::MockPlatform;
use quickstart::qds::DataStore;
use quickstart::rest::{build_router, ApiState};

// ─── Test Context ─────────────────────────────────────────────────────────────

/// Router plus a handle on the mock platform behind it
struct WizardTestContext {
    router: Router,
    platform: Arc<MockPlatform>,
}

impl WizardTestContext {
    fn new() -> Self {
        Self::with_parts(Config::default(), MockPlatform::new())
    }

    fn with_platform(platform: MockPlatform) -> Self {
        Self::with_parts(Config::default(), platform)
    }

    fn with_parts(config: Config, platform: MockPlatform) -> Self {
        let platform = Arc::new(platform);
        let state = ApiState::new(config, platform.clone());
        Self {
            router: build_router(state),
            platform,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Log in with the default demo credentials and return the session
    /// cookie pair.
    async fn login(&self) -> String {
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=admin&password=quickstart"))
            .unwrap();

        let response = self.send(request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login should set a session cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn get(&self, uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(&self, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ─── Authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn unauthenticated_import_tables_is_rejected_without_platform_calls() {
    let ctx = WizardTestContext::new();

    let response = ctx
        .send(ctx.post_json("/import_tables", &json!({}), None))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(ctx.platform.calls().is_empty());
}

#[tokio::test]
async fn bad_credentials_get_no_session_cookie() {
    let ctx = WizardTestContext::new();

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=admin&password=nope"))
        .unwrap();
    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn expired_session_is_unauthorized() {
    let mut config = Config::default();
    config.server.session_ttl_minutes = 0;
    let ctx = WizardTestContext::with_parts(config, MockPlatform::new());

    let cookie = ctx.login().await;
    let response = ctx.send(ctx.get("/step", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_open_without_a_session() {
    let ctx = WizardTestContext::new();

    let response = ctx.send(ctx.get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

// ─── Wizard steps ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn step_set_then_get_roundtrips() {
    let ctx = WizardTestContext::new();
    let cookie = ctx.login().await;

    let response = ctx
        .send(ctx.post_json("/step", &json!({"step": 3}), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx.send(ctx.get("/step", Some(&cookie))).await;
    let body = body_json(response).await;
    assert_eq!(body, json!({"current_step": 3}));
}

#[tokio::test]
async fn fresh_login_starts_at_step_one() {
    let ctx = WizardTestContext::new();
    let cookie = ctx.login().await;

    let response = ctx.send(ctx.get("/step", Some(&cookie))).await;
    let body = body_json(response).await;
    assert_eq!(body["current_step"], 1);
}

// ─── Provisioning ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn provisioning_success_returns_all_ids() {
    let ctx = WizardTestContext::new();
    let cookie = ctx.login().await;

    let response = ctx
        .send(ctx.post_json("/create_clusters_and_notebooks", &json!({}), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["hadoop_cluster_id"], 100);
    assert_eq!(body["spark_cluster_id"], 101);
    assert_eq!(body["spark_notebook_id"], 102);
    assert_eq!(body["dashboard_notebook_id"], 103);
}

#[tokio::test]
async fn provisioning_failure_relays_platform_payload_and_stops() {
    let ctx = WizardTestContext::with_platform(MockPlatform::failing_create("spark"));
    let cookie = ctx.login().await;

    let response = ctx
        .send(ctx.post_json("/create_clusters_and_notebooks", &json!({}), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["error_message"], "label already taken");

    // The Spark cluster was never started and no notebook import ran
    let calls = ctx.platform.calls();
    assert!(!calls.contains(&"start:spark".to_string()));
    assert!(!calls.iter().any(|call| call.starts_with("notebook:")));
}

// ─── Tables ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn import_tables_resolves_store_once_and_imports_in_order() {
    let platform = MockPlatform::with_data_stores(vec![DataStore {
        id: 12,
        name: "quickstart".to_string(),
    }]);
    let ctx = WizardTestContext::with_platform(platform);
    let cookie = ctx.login().await;

    let response = ctx
        .send(ctx.post_json("/import_tables", &json!({}), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data_store_id"], 12);
    assert_eq!(body["command_ids"].as_array().unwrap().len(), 5);

    let calls = ctx.platform.calls();
    assert_eq!(
        calls,
        vec![
            "list_data_stores",
            "db_import:customers",
            "db_import:departments",
            "db_import:order_items",
            "db_import:orders",
            "db_import:products",
        ]
    );
}

#[tokio::test]
async fn import_tables_with_ambiguous_store_is_a_server_error() {
    let platform = MockPlatform::with_data_stores(vec![
        DataStore {
            id: 1,
            name: "quickstart".to_string(),
        },
        DataStore {
            id: 2,
            name: "quickstart".to_string(),
        },
    ]);
    let ctx = WizardTestContext::with_platform(platform);
    let cookie = ctx.login().await;

    let response = ctx
        .send(ctx.post_json("/import_tables", &json!({}), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Resolution failed before any import was submitted
    assert_eq!(ctx.platform.calls(), vec!["list_data_stores"]);
}

// ─── Queries ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn run_query_top_revenue_uses_revenue_template_and_cluster_label() {
    let ctx = WizardTestContext::new();
    let cookie = ctx.login().await;

    let response = ctx
        .send(ctx.post_json("/run_query", &json!({"query_name": "top_revenue"}), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let commands = ctx.platform.hive_commands.lock().unwrap().clone();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].label, "hadoop2");
    assert!(commands[0].query.contains("order_items"));
    assert!(commands[0].query.contains("LIMIT 10"));
}

#[tokio::test]
async fn run_query_substitutes_database_name() {
    let mut config = Config::default();
    config.warehouse.database_name = "retail".to_string();
    let ctx = WizardTestContext::with_parts(config, MockPlatform::new());
    let cookie = ctx.login().await;

    let response = ctx
        .send(ctx.post_json("/run_query", &json!({"query_name": "top_products"}), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let commands = ctx.platform.hive_commands.lock().unwrap().clone();
    assert!(commands[0].query.contains("retail.web_logs"));
    assert!(!commands[0].query.contains("{{"));
}

#[tokio::test]
async fn run_query_unknown_name_fails_before_any_platform_call() {
    let ctx = WizardTestContext::new();
    let cookie = ctx.login().await;

    let response = ctx
        .send(ctx.post_json("/run_query", &json!({"query_name": "drop_everything"}), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.platform.calls().is_empty());
}

#[tokio::test]
async fn run_scaling_submits_ten_revenue_queries() {
    let ctx = WizardTestContext::new();
    let cookie = ctx.login().await;

    let response = ctx
        .send(ctx.post_json("/run_scaling", &json!({}), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["command_ids"].as_array().unwrap().len(), 10);

    let commands = ctx.platform.hive_commands.lock().unwrap().clone();
    assert_eq!(commands.len(), 10);
    assert!(commands.iter().all(|command| command.label == "hadoop2"));
    assert!(commands.iter().all(|command| command.query.contains("revenue")));
}
