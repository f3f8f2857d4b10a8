use crate::config::toml_config::HttpConfig;
use crate::domain::ports::{FetchedPage, Fetcher};
use crate::utils::error::{CatchError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// `Fetcher` over a shared reqwest client with a browser-like identity.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_seconds: u64,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let language = HeaderValue::from_str(&config.accept_language).map_err(|e| {
            CatchError::InvalidConfigValueError {
                field: "http.accept_language".to_string(),
                value: config.accept_language.clone(),
                reason: e.to_string(),
            }
        })?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            timeout_seconds: config.timeout_seconds,
        })
    }
}

fn charset_of(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| part.trim().strip_prefix("charset="))
        .map(|cs| cs.trim_matches('"').to_ascii_lowercase())
        .next()
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        tracing::debug!("🌐 GET {}", url);

        let to_error = |e: reqwest::Error| {
            if e.is_timeout() {
                CatchError::TimeoutError {
                    url: url.to_string(),
                    seconds: self.timeout_seconds,
                }
            } else {
                CatchError::HttpError(e)
            }
        };

        let response = self.client.get(url).send().await.map_err(to_error)?;
        let status = response.status().as_u16();
        let encoding = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_of);
        let body = response.text().await.map_err(to_error)?;

        tracing::debug!("📥 {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
            encoding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn config(timeout_seconds: u64) -> HttpConfig {
        HttpConfig {
            timeout_seconds,
            ..HttpConfig::default()
        }
    }

    #[test]
    fn test_charset_of() {
        assert_eq!(charset_of("text/html; charset=UTF-8").as_deref(), Some("utf-8"));
        assert_eq!(charset_of("text/html;charset=\"Shift_JIS\"").as_deref(), Some("shift_jis"));
        assert_eq!(charset_of("text/html"), None);
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/blog")
                    .header_exists("user-agent")
                    .header("accept-language", "ja,en-US;q=0.7,en;q=0.3");
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body("<html>釣果情報</html>");
            })
            .await;

        let fetcher = HttpFetcher::new(&config(5)).unwrap();
        let page = fetcher.fetch(&server.url("/blog")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<html>釣果情報</html>");
        assert_eq!(page.encoding.as_deref(), Some("utf-8"));
    }

    #[tokio::test]
    async fn test_non_success_is_returned_not_raised() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone");
                then.status(404).body("not found");
            })
            .await;

        let fetcher = HttpFetcher::new(&config(5)).unwrap();
        let page = fetcher.fetch(&server.url("/gone")).await.unwrap();
        assert_eq!(page.status, 404);
        assert!(!page.is_usable(1));
    }

    #[tokio::test]
    async fn test_slow_response_is_a_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200).delay(Duration::from_secs(3)).body("late");
            })
            .await;

        let fetcher = HttpFetcher::new(&config(1)).unwrap();
        let err = fetcher.fetch(&server.url("/slow")).await.unwrap_err();
        assert!(matches!(err, CatchError::TimeoutError { seconds: 1, .. }));
    }
}
