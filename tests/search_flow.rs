//! Integration tests for the search path: orchestrator → HTTP client →
//! completion event, against a mock backend.

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lore::api::{ApiClient, ApiError, ArticleHit, Video};
use lore::app::{App, AppEvent, ContentView};
use lore::config::Config;
use lore::search::{start_search, SearchOrigin};
use lore::storage::Database;

async fn test_app(base_url: &str) -> App {
    let db = Database::open(":memory:").await.unwrap();
    let api = ApiClient::new(base_url).unwrap();
    App::new(db, api, &Config::default()).unwrap()
}

fn full_result_body() -> serde_json::Value {
    json!({
        "message": "Success",
        "aiExplanationShort": "A short summary.",
        "aiExplanationLong": "First paragraph.\n\nSecond paragraph.",
        "youtubeVideos": [
            {"id": "vid1", "title": "Intro video", "thumbnail": "https://img/1.jpg"}
        ],
        "articles": [
            {"title": "Deep dive", "link": "https://example.com/a", "snippet": "..."}
        ],
        "keyConcepts": [
            {"term": "Qubit", "definition": "A quantum bit."}
        ]
    })
}

// ============================================================================
// ApiClient
// ============================================================================

#[tokio::test]
async fn test_search_posts_topic_and_language() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"topic": "Quantum", "language": "de"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_result_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let result = client.search("Quantum", "de").await.unwrap();

    assert_eq!(result.ai_explanation_short, "A short summary.");
    assert_eq!(result.youtube_videos.len(), 1);
    assert_eq!(result.articles.len(), 1);
    assert_eq!(result.key_concepts[0].term, "Qubit");
}

#[tokio::test]
async fn test_search_error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to fetch data from APIs"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client.search("x", "en").await.unwrap_err();

    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to fetch data from APIs");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_unstructured_error_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client.search("x", "en").await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error: status 502");
}

#[tokio::test]
async fn test_search_connection_refused_is_network_error() {
    // Nothing listens on port 1
    let client = ApiClient::new("http://127.0.0.1:1").unwrap();
    let err = client.search("x", "en").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_save_video_returns_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/save/video"))
        .and(body_json(
            json!({"id": "vid1", "title": "Intro video", "thumbnail": "https://img/1.jpg"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Video saved"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let video = Video {
        id: "vid1".into(),
        title: "Intro video".into(),
        thumbnail: "https://img/1.jpg".into(),
    };
    assert_eq!(client.save_video(&video).await.unwrap(), "Video saved");
}

#[tokio::test]
async fn test_save_article_failure_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/save/article"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "disk full"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let article = ArticleHit {
        title: "t".into(),
        link: "https://example.com".into(),
        snippet: "s".into(),
    };
    let err = client.save_article(&article).await.unwrap_err();
    assert_eq!(err.to_string(), "disk full");
}

// ============================================================================
// Orchestrator → completion event
// ============================================================================

#[tokio::test]
async fn test_start_search_produces_completion_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_result_body()))
        .mount(&server)
        .await;

    let mut app = test_app(&server.uri()).await;
    let (tx, mut rx) = mpsc::channel(8);

    assert!(start_search(&mut app, "Quantum Computing", SearchOrigin::User, &tx));
    assert_eq!(app.view, ContentView::Loading);
    assert_eq!(app.history, vec!["Quantum Computing".to_string()]);

    let event = rx.recv().await.expect("search task sends a completion");
    match event {
        AppEvent::SearchCompleted {
            topic,
            generation,
            result,
        } => {
            assert_eq!(topic, "Quantum Computing");
            assert_eq!(generation, app.search_generation);
            assert_eq!(result.unwrap().ai_explanation_short, "A short summary.");
        }
        _ => panic!("expected SearchCompleted"),
    }
}

#[tokio::test]
async fn test_start_search_failure_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Topic is required"})))
        .mount(&server)
        .await;

    let mut app = test_app(&server.uri()).await;
    let (tx, mut rx) = mpsc::channel(8);

    start_search(&mut app, "anything", SearchOrigin::User, &tx);

    let event = rx.recv().await.unwrap();
    match event {
        AppEvent::SearchCompleted { result, .. } => {
            assert_eq!(result.unwrap_err(), "Topic is required");
        }
        _ => panic!("expected SearchCompleted"),
    }
}

#[tokio::test]
async fn test_two_searches_only_latest_generation_matches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_result_body()))
        .mount(&server)
        .await;

    let mut app = test_app(&server.uri()).await;
    let (tx, mut rx) = mpsc::channel(8);

    start_search(&mut app, "A", SearchOrigin::User, &tx);
    let first_generation = app.search_generation;
    start_search(&mut app, "B", SearchOrigin::User, &tx);

    // Both responses arrive; exactly one carries the latest generation.
    let mut latest = 0;
    for _ in 0..2 {
        if let Some(AppEvent::SearchCompleted { generation, .. }) = rx.recv().await {
            if generation == app.search_generation {
                latest += 1;
            } else {
                assert_eq!(generation, first_generation);
            }
        }
    }
    assert_eq!(latest, 1);
}
