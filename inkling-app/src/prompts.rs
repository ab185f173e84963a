//! Fixed prompt texts sent to the chat model.

/// Printed once the newsletter has been folded into the context.
pub const LOADED_NOTICE: &str = "Newsletter content loaded. Generating a bullet pointed list";

pub const SUMMARY_REQUEST: &str = "Please write a bullet pointed list of the most important things you learned from the newsletter. Provide a link to each tweet that you are referencing.";

/// Persona plus the whole accumulated context, sent as the system message.
pub fn system_prompt(context: &str) -> String {
    format!(
        "You are a helpful Defi-Newsletter reading assistant. The following text includes our conversation up to this point: {context}"
    )
}

/// Instructions that open the context, wrapping the joined post texts.
pub fn newsletter_instructions(combined_posts: &str) -> String {
    format!(
        "\n    The following text is from a DeFi newsletter that covers recent defi news, \n    \
         new project launches, broader finance news, etc. I read these every day in \n    \
         order to find potential profitable opportunities. I generally look for arbitrage\n    \
         opportunities or protocol mechanics that can be cleverly used for profit. \n    \
         Please read the content and answer my questions to help me find profitable strategies: {combined_posts}.\n    \
         Please refer to the content of the newsletter when responding to my questions."
    )
}

pub fn thread_digest_request(thread: &str) -> String {
    format!(
        "Please digest this content and wait for my next question. If you understand respond with \"Ready\": {thread}"
    )
}
