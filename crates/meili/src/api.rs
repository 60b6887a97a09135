//! HTTP client for a single Meilisearch instance.
//!
//! Wraps the engine endpoints the gateway needs using [`reqwest`]. Every
//! call is a single request: no retries and no task polling.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::settings::SettingCategory;
use crate::types::{SearchRequest, SearchResult, TaskInfo};

/// HTTP client for the remote search engine.
pub struct MeiliApi {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// Errors from the engine REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum MeiliApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The engine returned a non-2xx status code.
    #[error("Meilisearch API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body, usually the engine's JSON error object.
        body: String,
    },
}

impl MeiliApi {
    /// Create a client for the engine at `base_url`, e.g. `http://host:7700`.
    ///
    /// A blank `api_key` is treated as no key. `timeout` bounds every call.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, MeiliApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    /// Engine base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`. Any 2xx counts as healthy.
    pub async fn health(&self) -> Result<(), MeiliApiError> {
        let response = self.request(Method::GET, "/health").send().await?;
        Self::check_status(response).await
    }

    /// `GET /indexes/{uid}/stats`, passed through as raw JSON.
    pub async fn index_stats(&self, index_uid: &str) -> Result<Value, MeiliApiError> {
        let response = self
            .request(Method::GET, &format!("/indexes/{index_uid}/stats"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /indexes/{uid}/settings`, passed through as raw JSON.
    pub async fn index_settings(&self, index_uid: &str) -> Result<Value, MeiliApiError> {
        let response = self
            .request(Method::GET, &format!("/indexes/{index_uid}/settings"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /indexes/{uid}/search`.
    pub async fn search(
        &self,
        index_uid: &str,
        request: &SearchRequest,
    ) -> Result<SearchResult, MeiliApiError> {
        tracing::debug!(index_uid, q = %request.q, offset = request.offset, limit = request.limit, "Searching");

        let response = self
            .request(Method::POST, &format!("/indexes/{index_uid}/search"))
            .json(request)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /indexes/{uid}/settings/{category}`.
    ///
    /// A JSON `null` from the engine comes back as `None`.
    pub async fn get_setting<T: DeserializeOwned>(
        &self,
        index_uid: &str,
        category: SettingCategory,
    ) -> Result<Option<T>, MeiliApiError> {
        let response = self
            .request(Method::GET, &Self::setting_path(index_uid, category))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT /indexes/{uid}/settings/{category}`. Returns the enqueued task.
    pub async fn update_setting<T: Serialize + ?Sized>(
        &self,
        index_uid: &str,
        category: SettingCategory,
        value: &T,
    ) -> Result<TaskInfo, MeiliApiError> {
        tracing::info!(index_uid, %category, "Submitting settings update");

        let response = self
            .request(Method::PUT, &Self::setting_path(index_uid, category))
            .json(value)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `DELETE /indexes/{uid}/settings`. Returns the enqueued task.
    pub async fn reset_settings(&self, index_uid: &str) -> Result<TaskInfo, MeiliApiError> {
        tracing::info!(index_uid, "Submitting settings reset");

        let response = self
            .request(Method::DELETE, &format!("/indexes/{index_uid}/settings"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn setting_path(index_uid: &str, category: SettingCategory) -> String {
        format!("/indexes/{index_uid}/settings/{}", category.path())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Pass 2xx responses through; anything else becomes
    /// [`MeiliApiError::ApiError`] carrying the engine's error body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, MeiliApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(MeiliApiError::ApiError {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        })
    }

    /// Decode a 2xx engine reply as JSON.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MeiliApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// For endpoints whose reply body is irrelevant, such as `/health`.
    async fn check_status(response: reqwest::Response) -> Result<(), MeiliApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod http_tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn api(server: &MockServer, key: Option<&str>) -> MeiliApi {
        MeiliApi::with_client(reqwest::Client::new(), &server.uri(), key.map(str::to_string))
    }

    #[tokio::test]
    async fn health_succeeds_on_available() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "available"})))
            .mount(&server)
            .await;

        assert!(api(&server, None).health().await.is_ok());
    }

    #[tokio::test]
    async fn non_success_status_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let result = api(&server, None).health().await;
        assert_matches!(
            result,
            Err(MeiliApiError::ApiError { status: 503, body }) if body == "down"
        );
    }

    #[tokio::test]
    async fn api_key_is_sent_as_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/indexes/movies/stats"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"numberOfDocuments": 3})))
            .mount(&server)
            .await;

        let stats = api(&server, Some("secret")).index_stats("movies").await.unwrap();
        assert_eq!(stats["numberOfDocuments"], 3);
    }

    #[tokio::test]
    async fn blank_api_key_sends_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        api(&server, Some("")).health().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn search_posts_request_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/movies/search"))
            .and(body_json(json!({"q": "dune", "offset": 0, "limit": 20})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [{"id": 1, "title": "Dune"}],
                "estimatedTotalHits": 1,
                "processingTimeMs": 2,
                "query": "dune",
                "limit": 20,
                "offset": 0
            })))
            .mount(&server)
            .await;

        let request = SearchRequest {
            q: "dune".into(),
            offset: 0,
            limit: 20,
            ..Default::default()
        };
        let result = api(&server, None).search("movies", &request).await.unwrap();
        assert_eq!(result.hits.len(), 1);
        assert_eq!(result.estimated_total_hits, 1);
        assert_eq!(result.processing_time_ms, 2);
    }

    #[tokio::test]
    async fn update_setting_puts_value_and_returns_task() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/indexes/movies/settings/ranking-rules"))
            .and(body_json(json!(["words", "typo"])))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "taskUid": 17,
                "indexUid": "movies",
                "status": "enqueued",
                "type": "settingsUpdate",
                "enqueuedAt": "2024-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let task = api(&server, None)
            .update_setting("movies", SettingCategory::RankingRules, &["words", "typo"])
            .await
            .unwrap();
        assert_eq!(task.task_uid, 17);
        assert_eq!(task.status.as_deref(), Some("enqueued"));
    }

    #[tokio::test]
    async fn reset_settings_deletes_settings() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/indexes/movies/settings"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"taskUid": 5})))
            .mount(&server)
            .await;

        let task = api(&server, None).reset_settings("movies").await.unwrap();
        assert_eq!(task.task_uid, 5);
    }

    #[tokio::test]
    async fn null_setting_reads_as_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/indexes/movies/settings/stop-words"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
            .mount(&server)
            .await;

        let words: Option<Vec<String>> = api(&server, None)
            .get_setting("movies", SettingCategory::StopWords)
            .await
            .unwrap();
        assert_eq!(words, None);
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let api = MeiliApi::with_client(
            reqwest::Client::new(),
            &format!("{}/", server.uri()),
            None,
        );
        assert_eq!(api.base_url(), server.uri());
        assert!(api.health().await.is_ok());
    }
}
