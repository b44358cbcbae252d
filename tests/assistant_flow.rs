//! End-to-end assistant turns against mock HTTP backends.
//!
//! Each test spins up an Axum server on a random port serving the catalog
//! endpoints and a Gemini-shaped completion endpoint, then drives the real
//! reqwest clients through full pipeline turns.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use truyen_assist::catalog::{CatalogGateway, CatalogProvider};
use truyen_assist::error::{CompletionError, GatewayError};
use truyen_assist::llm::{CompletionRequest, GeminiClient, LlmProvider};
use truyen_assist::{Assistant, AssistantConfig, Session};

/// What the mock backend serves, plus what it saw.
#[derive(Default)]
struct Backend {
    /// Stories returned by /stories/search and /stories/hot.
    stories: Value,
    /// When set, every catalog endpoint answers with this status.
    catalog_status: Option<u16>,
    /// Completion reply text; `None` makes the endpoint return no candidates.
    reply: Option<String>,
    /// Last prompt text the completion endpoint received.
    last_prompt: Mutex<Option<String>>,
    /// How many requests the completion endpoint has served.
    completion_hits: AtomicUsize,
}

impl Backend {
    fn with_stories(stories: Value, reply: &str) -> Arc<Self> {
        Arc::new(Self {
            stories,
            reply: Some(reply.to_string()),
            ..Default::default()
        })
    }

    fn last_prompt(&self) -> String {
        self.last_prompt.lock().unwrap().clone().unwrap()
    }
}

async fn catalog_stories(State(backend): State<Arc<Backend>>) -> (StatusCode, Json<Value>) {
    match backend.catalog_status {
        Some(code) => (
            StatusCode::from_u16(code).unwrap(),
            Json(json!({"error": "boom"})),
        ),
        None => (StatusCode::OK, Json(backend.stories.clone())),
    }
}

async fn catalog_categories(State(backend): State<Arc<Backend>>) -> (StatusCode, Json<Value>) {
    match backend.catalog_status {
        Some(code) => (
            StatusCode::from_u16(code).unwrap(),
            Json(json!({"error": "boom"})),
        ),
        None => (
            StatusCode::OK,
            Json(json!([
                {"name": "Tiên Hiệp", "slug": "tien-hiep"},
                {"name": "Ngôn Tình", "slug": "ngon-tinh"}
            ])),
        ),
    }
}

async fn completion(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    backend.completion_hits.fetch_add(1, Ordering::SeqCst);
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    *backend.last_prompt.lock().unwrap() = Some(prompt);

    match &backend.reply {
        Some(text) => Json(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })),
        None => Json(json!({"candidates": []})),
    }
}

/// Start the mock backend on a random port; returns its base URL.
async fn start_backend(backend: Arc<Backend>) -> String {
    let app = Router::new()
        .route("/stories/search", get(catalog_stories))
        .route("/stories/hot", get(catalog_stories))
        .route("/categories", get(catalog_categories))
        .route("/v1beta/models/{call}", post(completion))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

fn config_for(base: &str) -> AssistantConfig {
    AssistantConfig {
        api_key: Some(secrecy::SecretString::from("test-key")),
        model: "gemini-test".to_string(),
        completion_base_url: format!("{base}/v1beta/models"),
        catalog_base_url: base.to_string(),
        http_timeout: Duration::from_secs(2),
        ..AssistantConfig::default()
    }
}

fn assistant_for(config: &AssistantConfig) -> Assistant {
    let catalog = Arc::new(
        CatalogGateway::new(config.catalog_base_url.clone(), config.http_timeout).unwrap(),
    );
    let llm = Arc::new(GeminiClient::new(config).unwrap());
    Assistant::new(catalog, llm)
}

fn two_stories() -> Value {
    json!([
        {
            "title": "Đấu Phá Thương Khung",
            "author": {"name": "Thiên Tằm Thổ Đậu"},
            "categories": [{"name": "Tiên Hiệp"}],
            "status": "COMPLETED",
            "viewCount": 1200000,
            "chapterCount": 1648
        },
        {
            "title": "Phàm Nhân Tu Tiên",
            "author": {"name": "Vong Ngữ"},
            "categories": [{"name": "Tiên Hiệp"}],
            "status": "ONGOING",
            "viewCount": 900000,
            "chapterCount": 2446
        }
    ])
}

#[tokio::test]
async fn grounded_search_turn_round_trips() {
    let backend = Backend::with_stories(two_stories(), "Mình gợi ý Đấu Phá Thương Khung nhé.");
    let base = start_backend(Arc::clone(&backend)).await;
    let config = config_for(&base);
    let assistant = assistant_for(&config);
    let mut session = Session::new();

    let outcome = assistant.run_turn(&mut session, "tìm kiếm tiên hiệp").await;

    assert!(outcome.error.is_none());
    assert_eq!(outcome.reply, "Mình gợi ý Đấu Phá Thương Khung nhé.");
    assert_eq!(session.store.len(), 2);

    // The completion endpoint saw real grounding data, not hallucination bait.
    let prompt = backend.last_prompt();
    assert!(prompt.contains("Đấu Phá Thương Khung"));
    assert!(prompt.contains("Thiên Tằm Thổ Đậu"));
    assert!(prompt.contains("tìm kiếm tiên hiệp") || prompt.contains("tiên hiệp"));
    assert!(!prompt.contains("NO RESULTS"));
}

#[tokio::test]
async fn empty_catalog_result_grounds_with_sentinel() {
    let backend = Backend::with_stories(json!([]), "Không tìm thấy truyện nào.");
    let base = start_backend(Arc::clone(&backend)).await;
    let assistant = assistant_for(&config_for(&base));
    let mut session = Session::new();

    let outcome = assistant.run_turn(&mut session, "tìm kiếm abcxyz").await;

    // Completion still ran, against the sentinel.
    assert!(outcome.error.is_none());
    assert_eq!(outcome.reply, "Không tìm thấy truyện nào.");
    assert!(backend.last_prompt().contains("NO RESULTS"));
}

#[tokio::test]
async fn catalog_server_error_still_delivers_turn() {
    let backend = Arc::new(Backend {
        catalog_status: Some(500),
        reply: Some("Xin lỗi, chưa có dữ liệu bảng xếp hạng.".to_string()),
        ..Default::default()
    });
    let base = start_backend(Arc::clone(&backend)).await;
    let assistant = assistant_for(&config_for(&base));
    let mut session = Session::new();

    let outcome = assistant.run_turn(&mut session, "truyện nào đang hot").await;

    assert!(outcome.error.is_none());
    assert!(outcome.grounded);
    assert!(backend.last_prompt().contains("NO RESULTS"));
    assert_eq!(session.store.len(), 2);
}

#[tokio::test]
async fn empty_completion_reply_surfaces_as_apology_turn() {
    let backend = Arc::new(Backend {
        stories: two_stories(),
        reply: None,
        ..Default::default()
    });
    let base = start_backend(Arc::clone(&backend)).await;
    let assistant = assistant_for(&config_for(&base));
    let mut session = Session::new();

    let outcome = assistant.run_turn(&mut session, "xin chào").await;

    assert!(matches!(outcome.error, Some(CompletionError::EmptyReply)));
    // The synthetic assistant turn landed alongside the user turn.
    assert_eq!(session.store.len(), 2);
    let turns = session.store.recent(2);
    assert_eq!(turns[1].text, outcome.reply);
}

#[tokio::test]
async fn missing_credential_makes_no_completion_request() {
    let backend = Backend::with_stories(json!([]), "should never be seen");
    let base = start_backend(Arc::clone(&backend)).await;
    let config = AssistantConfig {
        api_key: None,
        ..config_for(&base)
    };
    let client = GeminiClient::new(&config).unwrap();

    let err = client
        .complete(CompletionRequest::new("xin chào"))
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::MissingCredential { .. }));
    // The live mock server saw no traffic at all.
    assert_eq!(backend.completion_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn gateway_decodes_categories() {
    let backend = Backend::with_stories(json!([]), "ok");
    let base = start_backend(backend).await;
    let gateway = CatalogGateway::new(base, Duration::from_secs(2)).unwrap();

    let categories = gateway.list_categories().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Tiên Hiệp");
    assert_eq!(categories[0].slug.as_deref(), Some("tien-hiep"));
}

#[tokio::test]
async fn gateway_fails_closed_on_unexpected_shape() {
    // An object where an array of stories is expected.
    let backend = Backend::with_stories(json!({"unexpected": "shape"}), "ok");
    let base = start_backend(backend).await;
    let gateway = CatalogGateway::new(base, Duration::from_secs(2)).unwrap();

    let err = gateway.search_stories("abc").await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode { .. }));
}

#[tokio::test]
async fn gateway_maps_connection_refusal_to_network_error() {
    // Nothing listens on this port.
    let gateway =
        CatalogGateway::new("http://127.0.0.1:1", Duration::from_millis(300)).unwrap();
    let err = gateway.trending_stories().await.unwrap_err();
    assert!(matches!(err, GatewayError::Network { .. }));
}
