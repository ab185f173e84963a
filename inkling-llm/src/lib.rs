//! Chat-model integration for Inkling.
//!
//! This crate exposes the [`traits::LlmClient`] interface the session talks to
//! and an OpenAI chat-completions implementation of it.
//!
//! # Examples
//! ```no_run
//! use inkling_llm::openai::OpenAiClient;
//! use inkling_llm::traits::LlmClient;
//!
//! # #[tokio::main]
//! # async fn main() -> inkling_common::Result<()> {
//! let client = OpenAiClient::new(std::env::var("OPENAI_API_KEY").ok(), "gpt-4")?;
//! let reply = client
//!     .generate("Say OK", Some("You are terse."), None, None)
//!     .await?;
//! println!("{}", reply.text);
//! # Ok(())
//! # }
//! ```
pub mod openai;
pub mod traits;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
