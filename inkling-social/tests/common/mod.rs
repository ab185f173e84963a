#![allow(dead_code)]

use async_trait::async_trait;
use inkling_common::{InklingError, Result};
use inkling_social::twitter::TwitterRead;
use inkling_social::twitter::types::{
    Meta, Problem, SearchResponse, Status, StatusUser, Tweet, TweetsResponse,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory stand-in for the Twitter API. Unknown ids fail like a 404.
#[derive(Default)]
pub struct FakeTwitter {
    pub statuses: HashMap<String, Status>,
    pub conversations: HashMap<String, String>,
    pub searches: HashMap<String, Vec<String>>,
    /// Per-id artificial latency for status lookups.
    pub delays_ms: HashMap<String, u64>,
    /// Ids the lookup reports as problems instead of failing the request.
    pub deleted: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeTwitter {
    pub fn with_status(mut self, id: &str, text: &str, author: &str) -> Self {
        self.statuses.insert(
            id.to_string(),
            Status {
                id_str: id.to_string(),
                full_text: Some(text.to_string()),
                text: None,
                user: Some(StatusUser {
                    screen_name: author.to_string(),
                    name: None,
                }),
            },
        );
        self
    }

    pub fn with_conversation(mut self, post_id: &str, conversation_id: &str) -> Self {
        self.conversations
            .insert(post_id.to_string(), conversation_id.to_string());
        self
    }

    pub fn with_search(mut self, query: &str, newest_first: &[&str]) -> Self {
        self.searches.insert(
            query.to_string(),
            newest_first.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_deleted(mut self, id: &str, detail: &str) -> Self {
        self.deleted.insert(id.to_string(), detail.to_string());
        self
    }

    pub fn with_delay(mut self, id: &str, ms: u64) -> Self {
        self.delays_ms.insert(id.to_string(), ms);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TwitterRead for FakeTwitter {
    async fn status(&self, id: &str) -> Result<Status> {
        self.record(format!("status:{id}"));
        if let Some(ms) = self.delays_ms.get(id) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        self.statuses
            .get(id)
            .cloned()
            .ok_or_else(|| InklingError::Http(format!("server returned error 404: No status found with that ID ({id})")))
    }

    async fn tweets(&self, ids: &[&str]) -> Result<TweetsResponse> {
        self.record(format!("tweets:{}", ids.join(",")));
        let data: Vec<Tweet> = ids
            .iter()
            .filter_map(|id| {
                self.conversations.get(*id).map(|conv| Tweet {
                    id: id.to_string(),
                    text: String::new(),
                    author_id: None,
                    created_at: None,
                    conversation_id: Some(conv.clone()),
                    in_reply_to_user_id: None,
                })
            })
            .collect();
        let problems: Vec<Problem> = ids
            .iter()
            .filter_map(|id| {
                self.deleted.get(*id).map(|detail| Problem {
                    value: Some(id.to_string()),
                    detail: Some(detail.clone()),
                    title: Some("Not Found Error".into()),
                })
            })
            .collect();
        if !problems.is_empty() {
            return Ok(TweetsResponse {
                data: (!data.is_empty()).then_some(data),
                errors: Some(problems),
            });
        }
        if data.is_empty() {
            return Err(InklingError::Http("server returned error 400: invalid id".into()));
        }
        Ok(TweetsResponse {
            data: Some(data),
            ..Default::default()
        })
    }

    async fn search_recent(&self, query: &str) -> Result<SearchResponse> {
        self.record(format!("search:{query}"));
        let texts = self.searches.get(query).cloned().unwrap_or_default();
        let count = texts.len() as u32;
        Ok(SearchResponse {
            data: (count > 0).then(|| {
                texts
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| Tweet {
                        id: format!("s{i}"),
                        text,
                        author_id: None,
                        created_at: None,
                        conversation_id: None,
                        in_reply_to_user_id: None,
                    })
                    .collect()
            }),
            meta: Some(Meta {
                result_count: Some(count),
            }),
        })
    }
}
