use async_trait::async_trait;
use inkling_common::{InklingError, Result};
use inkling_http::{HttpClient, RequestOpts};
use std::time::Duration;

/// Something that can hand back the raw body behind a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Plain GET of an absolute URL. Errors are returned as-is; there is no
/// retry and no timeout unless one is configured.
#[derive(Clone)]
pub struct WebFetcher {
    http: HttpClient,
}

impl WebFetcher {
    pub fn new() -> Result<Self> {
        let http = HttpClient::unanchored().map_err(|e| InklingError::Http(e.to_string()))?;
        Ok(Self { http })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        if let Some(t) = timeout {
            self.http = self.http.with_timeout(t);
        }
        self
    }
}

#[async_trait]
impl PageSource for WebFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        tracing::info!(%url, "fetching newsletter");
        let body = self
            .http
            .get_text(url, RequestOpts::default())
            .await
            .map_err(|e| InklingError::Http(format!("GET {url}: {e}")))?;
        tracing::debug!(%url, bytes = body.len(), "newsletter fetched");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_body_of_absolute_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/p/daily-defi"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>issue</html>"))
            .mount(&server)
            .await;

        let fetcher = WebFetcher::new().unwrap();
        let body = fetcher
            .fetch_page(&format!("{}/p/daily-defi", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html>issue</html>");
    }

    #[tokio::test]
    async fn http_errors_propagate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = WebFetcher::new().unwrap();
        let err = fetcher
            .fetch_page(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, InklingError::Http(_)), "{err}");
    }

    #[tokio::test]
    async fn relative_urls_are_rejected() {
        let fetcher = WebFetcher::new().unwrap();
        assert!(fetcher.fetch_page("not a url").await.is_err());
    }
}
