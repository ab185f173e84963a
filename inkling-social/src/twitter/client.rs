//! Minimal wrapper around the Twitter/X read endpoints.
//!
//! Picks user-context OAuth 1.0a when all four user keys are present and falls
//! back to the app-only bearer token. Missing credentials are reported when a
//! call is made, not when the client is built.
use crate::twitter::traits::TwitterRead;
use crate::twitter::types::{SearchResponse, Status, TweetsResponse};
use async_trait::async_trait;
use inkling_common::{InklingError, Result};
use inkling_http::{Auth, HttpClient, HttpError, OAuth1Keys, RequestOpts};
use std::borrow::Cow;
use std::time::Duration;

pub const DEFAULT_TWITTER_BASE: &str = "https://api.twitter.com/";

const TWEET_FIELDS: &str = "conversation_id,author_id,created_at,in_reply_to_user_id";

/// Credentials as supplied by configuration; any of them may be missing.
#[derive(Clone, Default)]
pub struct TwitterCredentials {
    pub app_key: Option<String>,
    pub app_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_secret: Option<String>,
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("user_context", &self.user_context().is_some())
            .field("bearer", &non_empty(&self.bearer_token).is_some())
            .finish()
    }
}

impl TwitterCredentials {
    pub fn user_context(&self) -> Option<OAuth1Keys> {
        Some(OAuth1Keys {
            consumer_key: non_empty(&self.app_key)?,
            consumer_secret: non_empty(&self.app_secret)?,
            token: non_empty(&self.access_token)?,
            token_secret: non_empty(&self.access_secret)?,
        })
    }
}

fn non_empty(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Clone)]
pub struct TwitterApi {
    http: HttpClient,
    user_keys: Option<OAuth1Keys>,
    bearer: Option<String>,
}

impl TwitterApi {
    pub fn new(credentials: &TwitterCredentials) -> Result<Self> {
        Self::with_base_url(DEFAULT_TWITTER_BASE, credentials)
    }

    pub fn with_base_url(base_url: &str, credentials: &TwitterCredentials) -> Result<Self> {
        let http = HttpClient::new(base_url).map_err(http_to_inkling)?;
        Ok(Self {
            http,
            user_keys: credentials.user_context(),
            bearer: non_empty(&credentials.bearer_token),
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        if let Some(t) = timeout {
            self.http = self.http.with_timeout(t);
        }
        self
    }

    fn auth(&self) -> Result<Auth<'_>> {
        if let Some(keys) = &self.user_keys {
            return Ok(Auth::OAuth1(keys));
        }
        if let Some(bearer) = &self.bearer {
            return Ok(Auth::Bearer(bearer));
        }
        Err(InklingError::Config(
            "no Twitter credentials: set APP_KEY, APP_SECRET, ACCESS_TOKEN and ACCESS_SECRET, or BEARER_TOKEN"
                .to_string(),
        ))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&str, Cow<'_, str>)>,
    ) -> Result<T> {
        let resp = self
            .http
            .get_json(
                path,
                RequestOpts {
                    auth: Some(self.auth()?),
                    query: Some(query),
                    ..Default::default()
                },
            )
            .await
            .map_err(http_to_inkling)?;
        Ok(resp)
    }
}

#[async_trait]
impl TwitterRead for TwitterApi {
    async fn status(&self, id: &str) -> Result<Status> {
        let status: Status = self
            .get(
                "1.1/statuses/show.json",
                vec![("id", id.into()), ("tweet_mode", "extended".into())],
            )
            .await?;
        tracing::debug!(post_id = %id, screen_name = ?status.screen_name(), "status fetched");
        Ok(status)
    }

    async fn tweets(&self, ids: &[&str]) -> Result<TweetsResponse> {
        let resp: TweetsResponse = self
            .get(
                "2/tweets",
                vec![
                    ("ids", ids.join(",").into()),
                    ("tweet.fields", TWEET_FIELDS.into()),
                ],
            )
            .await?;
        if let Some(errors) = &resp.errors {
            tracing::debug!(?errors, "tweet lookup returned partial errors");
        }
        Ok(resp)
    }

    async fn search_recent(&self, query: &str) -> Result<SearchResponse> {
        let resp: SearchResponse = self
            .get(
                "2/tweets/search/recent",
                vec![
                    ("query", query.into()),
                    ("sort_order", "recency".into()),
                    ("max_results", "100".into()),
                    ("tweet.fields", TWEET_FIELDS.into()),
                ],
            )
            .await?;
        tracing::debug!(%query, result_count = resp.result_count(), "search finished");
        Ok(resp)
    }
}

fn http_to_inkling(e: HttpError) -> InklingError {
    match e {
        HttpError::Decode(..) => InklingError::Decode(e.to_string()),
        other => InklingError::Http(other.to_string()),
    }
}
