use serde::{Deserialize, Serialize};

/// v1.1 `statuses/show` payload (only the fields we read).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub id_str: String,
    /// Present when requested with `tweet_mode=extended`.
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user: Option<StatusUser>,
}

impl Status {
    /// Untruncated text when available, otherwise the compat text.
    pub fn body(&self) -> &str {
        self.full_text
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or_default()
    }

    pub fn screen_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.screen_name.as_str())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUser {
    #[serde(default)]
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// v2 `GET /2/tweets` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweetsResponse {
    #[serde(default)]
    pub data: Option<Vec<Tweet>>,
    /// Partial errors, e.g. one of the requested ids was deleted.
    #[serde(default)]
    pub errors: Option<Vec<Problem>>,
}

impl TweetsResponse {
    /// Detail of the first reported problem, e.g. why a requested id is missing.
    pub fn problem(&self) -> Option<&str> {
        self.errors
            .as_ref()?
            .iter()
            .find_map(|p| p.detail.as_deref().or(p.title.as_deref()))
    }
}

/// v2 `GET /2/tweets/search/recent` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<Tweet>>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl SearchResponse {
    pub fn result_count(&self) -> u32 {
        self.meta
            .as_ref()
            .and_then(|m| m.result_count)
            .unwrap_or_else(|| self.data.as_ref().map_or(0, |d| d.len() as u32))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Meta {
    #[serde(default)]
    pub result_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub in_reply_to_user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Problem {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}
