use anyhow::Result;
use inkling_common::observability::init_logging;
use inkling_config::{InklingConfig, InklingConfigLoader};
use inkling_llm::openai::OpenAiClient;
use inkling_social::twitter::{TwitterApi, TwitterCredentials};
use inkling_web::WebFetcher;
use repl::Repl;
use session::Session;
use std::sync::Arc;
use tokio::io::BufReader;

mod prompts;
mod repl;
mod session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1) Pick up a local .env before any config source reads the environment.
    dotenv::dotenv().ok();
    let cfg: InklingConfig = InklingConfigLoader::discover().load()?;

    // 2) Logs go to the rolling file only; stdout belongs to the conversation.
    let log_path = init_logging(cfg.logging.to_log_config())?;
    tracing::info!(log = %log_path.display(), model = %cfg.openai.model, "inkling starting");

    let session = build_session(&cfg)?;
    let repl = Repl::new(session, BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    if let Err(e) = repl.run().await {
        tracing::error!(error = %format!("{e:#}"), "session aborted");
        return Err(e);
    }
    Ok(())
}

fn build_session(cfg: &InklingConfig) -> Result<Session> {
    let timeout = cfg.http.timeout();

    let credentials = TwitterCredentials {
        app_key: cfg.twitter.app_key.clone(),
        app_secret: cfg.twitter.app_secret.clone(),
        access_token: cfg.twitter.access_token.clone(),
        access_secret: cfg.twitter.access_secret.clone(),
        bearer_token: cfg.twitter.bearer_token.clone(),
    };
    tracing::debug!(?credentials, "twitter credentials resolved");
    let twitter = TwitterApi::with_base_url(&cfg.twitter.base_url, &credentials)?.with_timeout(timeout);

    let llm = OpenAiClient::with_base_url(
        &cfg.openai.base_url,
        cfg.openai.api_key.clone(),
        cfg.openai.model.clone(),
    )?
    .with_sampling(cfg.openai.temperature, cfg.openai.max_tokens)
    .with_timeout(timeout);

    let pages = WebFetcher::new()?.with_timeout(timeout);

    Ok(Session::new(Arc::new(llm), Arc::new(twitter), Arc::new(pages)))
}
