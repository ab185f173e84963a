use crate::twitter::types::{SearchResponse, Status, TweetsResponse};
use async_trait::async_trait;
use inkling_common::Result;

/// Read-only slice of the Twitter/X API the fetchers rely on.
#[async_trait]
pub trait TwitterRead: Send + Sync {
    /// v1.1 status lookup; carries the author's screen name.
    async fn status(&self, id: &str) -> Result<Status>;

    /// v2 tweet lookup including `conversation_id`.
    async fn tweets(&self, ids: &[&str]) -> Result<TweetsResponse>;

    /// v2 recent search, newest first.
    async fn search_recent(&self, query: &str) -> Result<SearchResponse>;
}
