//! Minimal HTTP client with safe logging and bearer or OAuth 1.0a auth.
//!
//! - Request options: headers, `Auth`, query params, timeout
//! - Redacts sensitive query params and never logs secret values
//! - OAuth 1.0a user-context signing alongside bearer auth
//! - Optional *raw* request/response logging via `INKLING_HTTP_RAW=1`
//!
//! There are no retries: a failed request is reported once to the caller.
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), inkling_http::HttpError> {
//! let client = inkling_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", inkling_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, body snippets (truncated), final errors, and (optionally)
//! raw request/response lines (target `http.raw`).

pub mod oauth;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub use oauth::OAuth1Keys;

const RAW_ENV: &str = "INKLING_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const SECRET_PARAMS: &[&str] = &[
    "access_token",
    "authorization",
    "auth",
    "key",
    "api_key",
    "token",
    "secret",
    "client_secret",
    "bearer",
];

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn is_secret_param(name: &str) -> bool {
    SECRET_PARAMS.contains(&name.to_ascii_lowercase().as_str())
}

/// Copy of `url` with secret-looking query values replaced.
fn redacted_url(url: &Url) -> Url {
    let mut out = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if is_secret_param(&k) {
                "<redacted>".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return out;
    }
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap, body: Option<&[u8]>) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    if let Some(bytes) = body {
        match std::str::from_utf8(bytes) {
            Ok(s) => {
                let s = truncate_chars(s, RAW_MAX_BODY);
                parts.push(format!("-d '{}'", s.replace('\'', r"'\''")));
            }
            Err(_) => parts.push(format!("--data-binary @- # ({} bytes)", bytes.len())),
        }
    }
    parts.push(format!("'{}'", redacted_url(url).as_str()));
    parts.join(" ")
}

fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let val = if key.eq_ignore_ascii_case("authorization") {
                "<redacted>".to_string()
            } else {
                v.to_str().unwrap_or("").to_string()
            };
            (key, val)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
    },
}

// ==============================
// Auth & Request Options
// ==============================

/// Authentication strategies supported by the HTTP client helpers.
///
/// ```
/// use inkling_http::Auth;
///
/// let bearer = Auth::Bearer("token");
/// assert!(matches!(bearer, Auth::Bearer("token")));
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    /// Authorization: OAuth ... (HMAC-SHA1 signed per request)
    OAuth1(&'a OAuth1Keys),
}

impl Auth<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Auth::Bearer(_) => "bearer",
            Auth::OAuth1(_) => "oauth1",
        }
    }
}

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use inkling_http::{Auth, RequestOpts};
/// use std::borrow::Cow;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     auth: Some(Auth::Bearer("demo")),
///     query: Some(vec![("ids", Cow::Borrowed("20"))]),
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub auth: Option<Auth<'a>>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>,
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Option<Url>,
    inner: Client,
    /// Applied when a request does not set its own timeout. `None` waits indefinitely.
    pub default_timeout: Option<Duration>,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use inkling_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert!(client.default_timeout.is_none());
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        Ok(Self {
            base: Some(base),
            inner: build_inner()?,
            default_timeout: None,
        })
    }

    /// Construct a client that only accepts absolute URLs.
    pub fn unanchored() -> Result<Self, HttpError> {
        Ok(Self {
            base: None,
            inner: build_inner()?,
            default_timeout: None,
        })
    }

    /// Override the default per-request timeout.
    ///
    /// ```no_run
    /// use inkling_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Some(Duration::from_secs(2)));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = Some(dur);
        self
    }

    /// POST JSON using optional Bearer auth.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let opts = RequestOpts {
            auth: bearer.map(Auth::Bearer),
            ..Default::default()
        };
        self.post_json_opts(path, body, opts).await
    }

    /// GET JSON with per-request options.
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let exchange = self.execute(Method::GET, path, None, opts).await?;
        exchange.decode_json()
    }

    /// POST JSON with per-request options.
    pub async fn post_json_opts<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = serde_json::to_vec(body).map_err(|e| HttpError::Build(e.to_string()))?;
        let exchange = self.execute(Method::POST, path, Some(bytes), opts).await?;
        exchange.decode_json()
    }

    /// GET a body as text (lossy UTF-8), e.g. an HTML page.
    pub async fn get_text(&self, path: &str, opts: RequestOpts<'_>) -> Result<String, HttpError> {
        let exchange = self.execute(Method::GET, path, None, opts).await?;
        Ok(String::from_utf8_lossy(&exchange.body).into_owned())
    }

    /// Relative paths join the base; an unanchored client needs absolute URLs.
    fn resolve(&self, path: &str) -> Result<Url, HttpError> {
        match &self.base {
            Some(base) => base.join(path),
            None => Url::parse(path),
        }
        .map_err(|e| HttpError::Url(e.to_string()))
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        opts: RequestOpts<'_>,
    ) -> Result<Exchange, HttpError> {
        let url = self.resolve(path)?;
        let req_id = format!("r{}", uuid::Uuid::new_v4().simple());

        let query: Vec<(&str, Cow<'_, str>)> = opts.query.clone().unwrap_or_default();
        let pairs: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_ref())).collect();

        let mut rb = self.inner.request(method.clone(), url.clone());
        let timeout = opts.timeout.or(self.default_timeout);
        if let Some(t) = timeout {
            rb = rb.timeout(t);
        }
        if !pairs.is_empty() {
            rb = rb.query(&pairs);
        }

        let mut headers = HeaderMap::new();
        if let Some(bytes) = &body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            rb = rb.body(bytes.clone());
        }
        let authorization = match &opts.auth {
            Some(Auth::Bearer(tok)) => Some(format!("Bearer {}", sanitize_api_key(tok)?)),
            Some(Auth::OAuth1(keys)) => {
                Some(oauth::authorization_header(keys, &method, &url, &pairs)?)
            }
            None => None,
        };
        if let Some(value) = authorization {
            let mut value = HeaderValue::from_str(&value)
                .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        rb = rb.headers(headers.clone());

        let redacted_q: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| {
                let v = if is_secret_param(k) { "<redacted>" } else { *v };
                (k.to_string(), v.to_string())
            })
            .collect();

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            query=?redacted_q,
            timeout_ms=timeout.map(|t| t.as_millis() as u64),
            auth_kind=opts.auth.as_ref().map(Auth::kind).unwrap_or("none"),
            has_body=%body.is_some(),
            "http.request.start"
        );

        if raw_enabled() {
            let mut full_url = url.clone();
            if !pairs.is_empty() {
                full_url.query_pairs_mut().extend_pairs(pairs.iter());
            }
            let curl = make_curl(&method, &full_url, &headers, body.as_deref());
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            tracing::warn!(req_id=%req_id, message=%err, "http.network_error.send");
            HttpError::Network(err.to_string())
        })?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await.map_err(|err| {
            tracing::warn!(req_id=%req_id, message=%err, "http.network_error.body");
            HttpError::Network(err.to_string())
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        let x_request_id = headers
            .get("x-request-id")
            .or_else(|| headers.get("x-correlation-id"))
            .or_else(|| headers.get("x-transaction-id"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();
        let rate_remaining = headers
            .get("x-rate-limit-remaining")
            .and_then(|v| v.to_str().ok());

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            x_request_id=%x_request_id,
            rate_limit.remaining=?rate_remaining,
            "http.response.headers"
        );

        if raw_enabled() {
            let text = String::from_utf8_lossy(&bytes);
            tracing::info!(
                target: "http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?redact_headers(&headers),
                body=%truncate_chars(&text, RAW_MAX_BODY)
            );
        }

        let snippet = snip_body(&bytes);
        tracing::trace!(req_id=%req_id, body_snippet=%snippet, "http.response.body_snippet");

        if status.is_success() {
            return Ok(Exchange {
                req_id,
                body: bytes.to_vec(),
            });
        }

        let message = extract_error_message(&bytes);
        tracing::warn!(
            req_id=%req_id,
            %status,
            message=%message,
            x_request_id=%x_request_id,
            body_snippet=%snippet,
            "http.error"
        );
        Err(HttpError::Api {
            status,
            message,
            request_id: x_request_id,
        })
    }
}

fn build_inner() -> Result<Client, HttpError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| HttpError::Build(e.to_string()))
}

/// A successful response body plus the id we logged it under.
struct Exchange {
    req_id: String,
    body: Vec<u8>,
}

impl Exchange {
    fn decode_json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        serde_json::from_slice::<T>(&self.body).map_err(|e| {
            let snippet = snip_body(&self.body);
            tracing::warn!(
                req_id=%self.req_id,
                serde_line=%e.line(),
                serde_col=%e.column(),
                serde_err=%e,
                body_snippet=%snippet,
                "http.response.decode_error"
            );
            HttpError::Decode(e.to_string(), snippet)
        })
    }
}

// ==============================
// Helpers
// ==============================

fn extract_error_message(body: &[u8]) -> String {
    // OpenAI style: {"error":{"message":"..."}}
    #[derive(Deserialize)]
    struct OpenAiEnv {
        error: OpenAiDetail,
    }
    #[derive(Deserialize)]
    struct OpenAiDetail {
        message: String,
    }

    // Twitter: {"errors":[{"message":"...", "detail":"...", "title":"..."}]}
    #[derive(Deserialize)]
    struct TwErrors {
        errors: Vec<Msg>,
    }

    // Generic: {"message":"..."} or {"detail":"..."} or {"title":"..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        title: String,
    }

    fn first_non_empty(m: Msg) -> Option<String> {
        [m.message, m.detail, m.title]
            .into_iter()
            .find(|s| !s.is_empty())
    }

    if let Ok(env) = serde_json::from_slice::<OpenAiEnv>(body) {
        return env.error.message;
    }
    if let Ok(tw) = serde_json::from_slice::<TwErrors>(body) {
        if let Some(msg) = tw.errors.into_iter().next().and_then(first_non_empty) {
            return msg;
        }
    }
    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if let Some(msg) = first_non_empty(m) {
            return msg;
        }
    }
    snip_body(body)
}

fn truncate_chars(s: &str, max: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max) {
        Some((idx, _)) => Cow::Owned(format!("{}...", &s[..idx])),
        None => Cow::Borrowed(s),
    }
}

fn snip_body(body: &[u8]) -> String {
    truncate_chars(&String::from_utf8_lossy(body), 500).into_owned()
}

fn sanitize_api_key(raw: &str) -> Result<String, HttpError> {
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    s.retain(|ch| !ch.is_ascii_whitespace());

    if s.is_empty() {
        return Err(HttpError::Build("API key is empty".into()));
    }
    if !s.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    Ok(s)
}
