//! Data loading: resolving and fetching the JSON rate documents

use crate::core::error::WidgetError;
use crate::core::record::{HistoryDocument, RateEntry};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, warn};

pub const DEFAULT_HISTORY_PATH: &str = "api/history.json";
/// `{date}` expands to the requested day as `YYYY-MM-DD`.
pub const DEFAULT_DAILY_PATH: &str = "api/{date}.json";

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the full history document.
    async fn fetch_history(&self) -> Result<HistoryDocument, WidgetError>;

    /// Fetches the single-day document for the given date.
    async fn fetch_daily(&self, date: NaiveDate) -> Result<RateEntry, WidgetError>;
}

/// HTTP-backed rate source. Every request bypasses caches so the widget
/// always sees the archive as currently published.
pub struct HttpRateSource {
    base_url: String,
    history_path: String,
    daily_path: String,
}

impl HttpRateSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_paths(base_url, DEFAULT_HISTORY_PATH, DEFAULT_DAILY_PATH)
    }

    pub fn with_paths(base_url: &str, history_path: &str, daily_path: &str) -> Self {
        HttpRateSource {
            base_url: base_url.to_string(),
            history_path: history_path.to_string(),
            daily_path: daily_path.to_string(),
        }
    }

    /// Joins a configured path onto the base URL. Paths that are already
    /// absolute URLs are used as-is, so per-call overrides can point at a
    /// different host entirely.
    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_history(&self) -> Result<HistoryDocument, WidgetError> {
        fetch_json(&self.url_for(&self.history_path)).await
    }

    async fn fetch_daily(&self, date: NaiveDate) -> Result<RateEntry, WidgetError> {
        let path = self
            .daily_path
            .replace("{date}", &date.format("%Y-%m-%d").to_string());
        fetch_json(&self.url_for(&path)).await
    }
}

/// Issues a no-store GET for `url` and decodes the body as JSON.
pub(crate) async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, WidgetError> {
    debug!("Requesting {url}");

    let client = reqwest::Client::builder()
        .user_agent("karat/0.1")
        .build()
        .map_err(|e| WidgetError::Transport {
            url: url.to_string(),
            source: e,
        })?;

    let response = client
        .get(url)
        .header(CACHE_CONTROL, "no-store")
        .send()
        .await
        .map_err(|e| WidgetError::Transport {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(WidgetError::Fetch {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| WidgetError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    serde_json::from_str(&body).map_err(|e| WidgetError::Decode {
        url: url.to_string(),
        source: e,
    })
}

/// Swallow-to-empty fetch policy: any failure becomes the empty document.
/// Call sites that want strict failures simply `?` the future instead.
pub async fn fetch_or_empty<T, F>(request: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, WidgetError>>,
{
    match request.await {
        Ok(value) => value,
        Err(err) => {
            warn!("Substituting empty document after fetch failure: {err}");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(request_path: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_history_fetch() {
        let mock_response = r#"{
            "2024-01-02": {"gold_24kt": 100.0},
            "2024-01-01": {"gold_24kt": "95.0"}
        }"#;
        let mock_server = create_mock_server("/api/history.json", mock_response).await;

        let source = HttpRateSource::new(&mock_server.uri());
        let history = source.fetch_history().await.unwrap();

        assert_eq!(history.len(), 2);
        assert!(history.contains_key("2024-01-02"));
    }

    #[tokio::test]
    async fn test_history_fetch_sends_no_store() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history.json"))
            .and(header("cache-control", "no-store"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = HttpRateSource::new(&mock_server.uri());
        let history = source.fetch_history().await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_daily_fetch_expands_date_template() {
        let mock_response = r#"{"gold_24kt": 312.5}"#;
        let mock_server = create_mock_server("/api/2024-01-02.json", mock_response).await;

        let source = HttpRateSource::new(&mock_server.uri());
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let entry = source.fetch_daily(date).await.unwrap();

        assert_eq!(
            entry.price(crate::core::Denomination::TwentyFourKt),
            Some(312.5)
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let source = HttpRateSource::new(&mock_server.uri());
        let result = source.fetch_history().await;

        match result {
            Err(WidgetError::Fetch { url, status }) => {
                assert!(url.ends_with("/api/history.json"));
                assert_eq!(status.as_u16(), 500);
            }
            other => panic!("Expected Fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock_server = create_mock_server("/api/history.json", "not json").await;

        let source = HttpRateSource::new(&mock_server.uri());
        let result = source.fetch_history().await;
        assert!(matches!(result, Err(WidgetError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 1 on localhost refuses connections.
        let source = HttpRateSource::new("http://127.0.0.1:1");
        let result = source.fetch_history().await;
        assert!(matches!(result, Err(WidgetError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_absolute_url_override_bypasses_base() {
        let mock_server = create_mock_server("/elsewhere/rates.json", "{}").await;

        let override_url = format!("{}/elsewhere/rates.json", mock_server.uri());
        let source =
            HttpRateSource::with_paths("http://unused.invalid", &override_url, DEFAULT_DAILY_PATH);
        let history = source.fetch_history().await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_or_empty_swallows_failures() {
        let source = HttpRateSource::new("http://127.0.0.1:1");
        let history = fetch_or_empty(source.fetch_history()).await;
        assert!(history.is_empty());
    }
}
