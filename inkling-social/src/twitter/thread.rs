//! Thread reconstruction: the posts one author made inside a conversation,
//! oldest first.
use crate::twitter::traits::TwitterRead;
use inkling_common::{Fetched, InklingError, Result};
use serde::{Deserialize, Serialize};

/// Conversation id reported when a thread could not be fetched.
pub const UNAVAILABLE_CONVERSATION: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Post bodies, oldest first, each followed by `\n`.
    pub text: String,
    pub conversation_id: String,
}

impl Thread {
    pub fn unavailable() -> Self {
        Self {
            text: String::new(),
            conversation_id: UNAVAILABLE_CONVERSATION.to_string(),
        }
    }
}

/// Search expression for the author's own posts in a conversation.
///
/// The spaces after the colons are what the search endpoint has always been
/// sent; whether it honours them is up to the endpoint.
pub fn thread_query(conversation_id: &str, author: &str) -> String {
    format!("conversation_id: {conversation_id} from: {author} to: {author}")
}

/// Rebuild the thread that `post_id` belongs to.
///
/// Any failing step fails the whole fetch; partial threads are never returned.
pub async fn fetch_thread(api: &dyn TwitterRead, post_id: &str) -> Fetched<Thread> {
    match try_fetch_thread(api, post_id).await {
        Ok(thread) => Fetched::Found(thread),
        Err(e) => {
            tracing::warn!(%post_id, error = %e, "thread unavailable");
            Fetched::Failed(e.to_string())
        }
    }
}

async fn try_fetch_thread(api: &dyn TwitterRead, post_id: &str) -> Result<Thread> {
    let lookup = api.tweets(&[post_id]).await?;
    let problem = lookup.problem().map(str::to_string);
    let conversation_id = lookup
        .data
        .and_then(|tweets| tweets.into_iter().next())
        .and_then(|tweet| tweet.conversation_id)
        .ok_or_else(|| {
            InklingError::NotFound(match problem {
                Some(detail) => format!("conversation of post {post_id}: {detail}"),
                None => format!("conversation of post {post_id}"),
            })
        })?;

    let first = api.status(&conversation_id).await?;
    let author = first.screen_name().ok_or_else(|| {
        InklingError::NotFound(format!("author of conversation {conversation_id}"))
    })?;

    let search = api
        .search_recent(&thread_query(&conversation_id, author))
        .await?;

    // Search results come newest first.
    let mut bodies: Vec<String> = if search.result_count() > 0 {
        search
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.text)
            .collect()
    } else {
        Vec::new()
    };
    bodies.push(first.body().to_string());
    bodies.reverse();

    let text: String = bodies.iter().map(|b| format!("{b}\n")).collect();
    tracing::info!(
        %post_id,
        %conversation_id,
        %author,
        posts = bodies.len(),
        "thread fetched"
    );
    Ok(Thread {
        text,
        conversation_id,
    })
}
