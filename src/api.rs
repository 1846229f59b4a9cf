//! HTTP client for the learning-content backend.
//!
//! One POST per search, one POST per save. The client never retries: a
//! failed search is surfaced inline and the user resubmits. Non-2xx
//! responses may carry a structured `{"error": "..."}` body whose message
//! is preferred over a generic status line.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Question count baked into every quiz link.
const QUIZ_QUESTION_COUNT: u32 = 15;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-2xx response. `message` is the server-supplied error when the
    /// body parsed, else a generic status line.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Insecure base URL: HTTPS required (except localhost)")]
    InsecureBaseUrl,
}

// ============================================================================
// Wire Types
// ============================================================================

/// A search result from `/api/search`.
///
/// Every field defaults so a sparse backend response still renders; absent
/// sections are simply skipped by the render engine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LearningResult {
    pub ai_explanation_short: String,
    pub ai_explanation_long: String,
    pub youtube_videos: Vec<Video>,
    pub articles: Vec<ArticleHit>,
    pub key_concepts: Vec<KeyConcept>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
}

impl Video {
    /// External watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeyConcept {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    topic: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ============================================================================
// Client
// ============================================================================

/// Thin client over the backend endpoints, cheap to clone into tasks.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Allow plain HTTP only against loopback; anything else must be HTTPS so
/// topics and saved items don't transit in the clear.
fn check_base_url(base: &str) -> Result<(), ApiError> {
    if base.starts_with("https://") {
        return Ok(());
    }
    let is_localhost = base.starts_with("http://127.0.0.1")
        || base.starts_with("http://localhost")
        || base.starts_with("http://[::1]");
    if is_localhost {
        Ok(())
    } else {
        tracing::error!(base_url = %base, "Rejecting non-HTTPS base URL");
        Err(ApiError::InsecureBaseUrl)
    }
}

impl ApiClient {
    /// Build a client with connection pooling and a hard request timeout.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        check_base_url(base_url)?;

        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One search attempt: `POST /api/search {topic, language}`.
    pub async fn search(&self, topic: &str, language: &str) -> Result<LearningResult, ApiError> {
        let url = format!("{}/api/search", self.base_url);
        tracing::debug!(topic, language, "Issuing search request");

        let response = self
            .http
            .post(&url)
            .json(&SearchRequest { topic, language })
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json::<LearningResult>().await?)
    }

    /// `POST /api/save/article`; returns the server's confirmation message.
    pub async fn save_article(&self, article: &ArticleHit) -> Result<String, ApiError> {
        let url = format!("{}/api/save/article", self.base_url);
        let response = self.http.post(&url).json(article).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<SaveResponse>().await?.message)
    }

    /// `POST /api/save/video`; returns the server's confirmation message.
    pub async fn save_video(&self, video: &Video) -> Result<String, ApiError> {
        let url = format!("{}/api/save/video", self.base_url);
        let response = self.http.post(&url).json(video).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<SaveResponse>().await?.message)
    }

    /// External quiz link for a topic.
    pub fn quiz_url(&self, topic: &str) -> String {
        let encoded: String =
            url::form_urlencoded::byte_serialize(topic.as_bytes()).collect();
        format!(
            "{}/quiz?topic={}&num_questions={}",
            self.base_url, encoded, QUIZ_QUESTION_COUNT
        )
    }

    /// Map a non-2xx response to `ApiError::Http`, preferring the server's
    /// structured `{"error": ...}` message when the body yields one.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP error: status {}", status.as_u16()),
        };
        tracing::warn!(status = status.as_u16(), message = %message, "Request failed");
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }
}
