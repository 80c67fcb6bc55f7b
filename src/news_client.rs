//! HTTP client for the upstream news API
//!
//! Issues a single GET per fetch with the reqwest default timeout and no
//! retry. The base URL is injected at construction; there is no hard-coded
//! fallback host anywhere in the relay.

use crate::category::Category;
use crate::error::{Error, FetchError, Result};
use crate::types::NewsEnvelope;

/// Client for `GET <base_url>?category=<value>`
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NewsClient {
    /// Create a client for the given news API base URL
    ///
    /// Returns a configuration error if the base URL does not parse.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|e| {
            Error::config(
                format!("news API base URL {base_url:?} is invalid: {e}"),
                "news_api_base_url",
            )
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Fetch the latest news envelope for a category
    ///
    /// An envelope whose `data` is absent or empty is a success, not an
    /// error; "fetch failed" and "nothing to report" are distinct states.
    pub async fn fetch_latest(
        &self,
        category: Category,
    ) -> std::result::Result<NewsEnvelope, FetchError> {
        let request_url = format!(
            "{}?category={}",
            self.base_url,
            urlencoding::encode(category.as_str())
        );

        tracing::debug!(url = %request_url, %category, "Fetching news");

        let response = self
            .http
            .get(&request_url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %category, "Upstream news API returned error status");
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(FetchError::Network)?;
        let envelope: NewsEnvelope =
            serde_json::from_str(&body).map_err(|e| FetchError::MalformedBody(e.to_string()))?;

        tracing::debug!(articles = envelope.data.len(), %category, "News fetched");
        Ok(envelope)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn envelope_json() -> serde_json::Value {
        serde_json::json!({
            "data": [
                {
                    "title": "Markets rally",
                    "content": "Stocks rose sharply today.",
                    "readMoreUrl": "https://example.com/markets",
                    "author": "Jane Doe"
                }
            ]
        })
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = NewsClient::new("not a url").unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("news_api_base_url")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_sends_category_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("category", "sports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = NewsClient::new(format!("{}/news", server.uri())).unwrap();
        let envelope = client.fetch_latest(Category::Sports).await.unwrap();

        assert_eq!(envelope.data.len(), 1);
        assert_eq!(
            envelope.latest().unwrap().title.as_deref(),
            Some("Markets rally")
        );
    }

    #[tokio::test]
    async fn http_404_is_upstream_error_not_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
            .mount(&server)
            .await;

        let client = NewsClient::new(format!("{}/news", server.uri())).unwrap();
        let err = client.fetch_latest(Category::All).await.unwrap_err();

        match err {
            FetchError::Upstream { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such route");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_503_captures_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = NewsClient::new(format!("{}/news", server.uri())).unwrap();
        let err = client.fetch_latest(Category::All).await.unwrap_err();

        match err {
            FetchError::Upstream { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_data_array_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&server)
            .await;

        let client = NewsClient::new(format!("{}/news", server.uri())).unwrap();
        let envelope = client.fetch_latest(Category::Science).await.unwrap();

        assert!(envelope.latest().is_none());
    }

    #[tokio::test]
    async fn missing_data_field_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = NewsClient::new(format!("{}/news", server.uri())).unwrap();
        let envelope = client.fetch_latest(Category::All).await.unwrap();

        assert!(envelope.data.is_empty());
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = NewsClient::new(format!("{}/news", server.uri())).unwrap();
        let err = client.fetch_latest(Category::All).await.unwrap_err();

        assert!(matches!(err, FetchError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_failure() {
        // Port 9 (discard) on localhost is almost certainly closed
        let client = NewsClient::new("http://127.0.0.1:9/news").unwrap();
        let err = client.fetch_latest(Category::All).await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
    }
}
