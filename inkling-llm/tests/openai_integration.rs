mod common;
use inkling_common::Result;
use inkling_llm::openai::OpenAiClient;
use inkling_llm::traits::LlmClient;

#[tokio::test]
#[ignore]
async fn openai_generate_smoketest() -> Result<()> {
    common::init_test_tracing();
    let Ok(key) = std::env::var("OPENAI_API_KEY") else {
        tracing::debug!("Skipping: OPENAI_API_KEY not set");
        return Ok(());
    };
    let model = std::env::var("INKLING_OPENAI_MODEL")
        .unwrap_or_else(|_| inkling_llm::DEFAULT_OPENAI_MODEL.to_string());

    let client = OpenAiClient::new(Some(key), model)?;
    let response = client
        .generate("Say Ok", Some("Answer with one word."), Some(8), Some(0.2))
        .await?;

    tracing::debug!("OpenAi response is: {}", response.text);
    assert!(
        !response.text.trim().is_empty(),
        "response text should not be empty"
    );
    Ok(())
}
