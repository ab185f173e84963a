//! Line-oriented front end: newsletter url first, then the conversation.
use crate::prompts;
use crate::session::Session;
use anyhow::{Context as _, Result, bail};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const URL_PROMPT: &str = "Newsletter URL: ";
pub const USER_PROMPT: &str = "[you]  : ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Exit,
    /// A post id whose thread should be pulled into the context.
    Thread(String),
    Chat(String),
    Empty,
}

pub fn classify_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Input::Empty
    } else if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        Input::Exit
    } else if is_numeric(trimmed) {
        Input::Thread(trimmed.to_string())
    } else {
        Input::Chat(line.to_string())
    }
}

/// Finite decimal numbers (sign, fraction and exponent allowed) and
/// `0x`/`0o`/`0b` integers. `NaN` and the infinities are not numbers here.
fn is_numeric(text: &str) -> bool {
    let radix = |prefix: &str, radix: u32| {
        text.get(..2)
            .filter(|p| p.eq_ignore_ascii_case(prefix))
            .map(|_| &text[2..])
            .is_some_and(|digits| {
                digits.bytes().all(|b| b.is_ascii_alphanumeric()) && u128::from_str_radix(digits, radix).is_ok()
            })
    };
    if radix("0x", 16) || radix("0o", 8) || radix("0b", 2) {
        return true;
    }
    text.parse::<f64>().is_ok_and(f64::is_finite)
}

pub struct Repl<R, W> {
    session: Session,
    input: R,
    output: W,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Run until `exit`/`quit` or end of input. Hands the session back so the
    /// caller can inspect what was accumulated.
    pub async fn run(mut self) -> Result<Session> {
        let url = loop {
            let Some(line) = self.prompt(URL_PROMPT).await? else {
                bail!("input closed before a newsletter URL was given");
            };
            let line = line.trim();
            if !line.is_empty() {
                break line.to_string();
            }
        };

        self.session
            .load_newsletter(&url)
            .await
            .with_context(|| format!("loading newsletter {url}"))?;

        self.print(prompts::LOADED_NOTICE).await?;
        let summary = self.session.send_prompt(prompts::SUMMARY_REQUEST).await;
        self.print(&summary).await?;

        loop {
            let Some(line) = self.prompt(USER_PROMPT).await? else {
                tracing::info!("input closed");
                break;
            };
            match classify_input(&line) {
                Input::Exit => break,
                Input::Empty => continue,
                Input::Thread(id) => {
                    let ack = self.session.request_thread(&id).await;
                    self.reply(&ack).await?;
                }
                Input::Chat(text) => {
                    let answer = self.session.chat(&text).await;
                    self.reply(&answer).await?;
                }
            }
            tracing::debug!(context_chars = self.session.context().len(), "turn done");
        }

        tracing::info!("session finished");
        Ok(self.session)
    }

    /// Write `prompt` and read one line without its terminator. `None` at end of input.
    async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let end = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(end);
        Ok(Some(line))
    }

    async fn reply(&mut self, text: &str) -> Result<()> {
        let line = format!("{}: {text}", self.session.label());
        self.print(&line).await
    }

    async fn print(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }
}
