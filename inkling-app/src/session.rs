//! Session state: the context buffer and the clients that feed it.
use crate::prompts;
use inkling_common::Result;
use inkling_llm::traits::LlmClient;
use inkling_social::twitter::{Thread, TwitterRead, fetch_post_texts, fetch_thread};
use inkling_web::{PageSource, extract_post_links};
use std::sync::Arc;

/// Conversation history handed to the model on every request.
///
/// Append-only: there is no way to remove or rewrite what is already in it.
#[derive(Debug, Default)]
pub struct Context(String);

impl Context {
    pub fn append(&mut self, text: &str) {
        self.0.push_str(text);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One user session. Created at startup and dropped at exit.
pub struct Session {
    context: Context,
    llm: Arc<dyn LlmClient>,
    twitter: Arc<dyn TwitterRead>,
    pages: Arc<dyn PageSource>,
}

impl Session {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        twitter: Arc<dyn TwitterRead>,
        pages: Arc<dyn PageSource>,
    ) -> Self {
        Self {
            context: Context::default(),
            llm,
            twitter,
            pages,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Label printed in front of model replies, e.g. `[GPT-4]`.
    pub fn label(&self) -> String {
        format!("[{}]", self.llm.model_name().to_uppercase())
    }

    /// Fetch the newsletter at `url` and seed the context with its posts.
    ///
    /// Only the page fetch can fail; posts that cannot be read contribute an
    /// empty text.
    pub async fn load_newsletter(&mut self, url: &str) -> Result<()> {
        let html = self.pages.fetch_page(url).await?;
        let links = extract_post_links(&html);
        tracing::info!(%url, links = links.len(), "post links extracted");

        let texts: Vec<String> = fetch_post_texts(self.twitter.as_ref(), &links)
            .await
            .into_iter()
            .map(|outcome| outcome.into_text())
            .collect();

        let instructions = prompts::newsletter_instructions(&texts.join("\n\n"));
        self.context.append(&instructions);
        self.context.append("\n");
        Ok(())
    }

    /// Ask the model with the current context as system message.
    ///
    /// Returns an empty reply when the call fails.
    pub async fn send_prompt(&self, prompt: &str) -> String {
        let system = prompts::system_prompt(self.context.as_str());
        match self.llm.generate(prompt, Some(&system), None, None).await {
            Ok(resp) => {
                tracing::debug!(tokens = ?resp.tokens_used, reply_chars = resp.text.len(), "reply received");
                resp.text
            }
            Err(e) => {
                tracing::warn!(error = %e, context_chars = self.context.len(), "failed to generate response");
                String::new()
            }
        }
    }

    /// Pull the thread around `post_id` into the context and return the
    /// model's acknowledgement.
    pub async fn request_thread(&mut self, post_id: &str) -> String {
        let thread = fetch_thread(self.twitter.as_ref(), post_id)
            .await
            .or_fallback(Thread::unavailable());
        tracing::info!(%post_id, conversation_id = %thread.conversation_id, "thread added to context");

        self.context.append(&thread.text);
        self.context.append("\n");
        self.send_prompt(&prompts::thread_digest_request(&thread.text))
            .await
    }

    /// Plain chat turn: both sides of the exchange are recorded.
    pub async fn chat(&mut self, input: &str) -> String {
        self.context.append(&format!("\n[you]  : {input}"));
        let reply = self.send_prompt(input).await;
        let label = self.label();
        self.context.append(&format!("\n{label}: {reply}"));
        reply
    }
}
