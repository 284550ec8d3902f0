use crate::config::UpstreamConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Low temperature and a bounded output keep responses deterministic
/// and short.
const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 1024;

/// Errors from the punctuation client.
#[derive(Debug, Error)]
pub enum PunctuateError {
    /// The upstream credential was absent from the environment at startup.
    /// Operator-facing: a deployment problem, not a client error.
    #[error("No API key")]
    MissingApiKey,

    /// The upstream call failed or the response was unusable.
    #[error("{0}")]
    Upstream(String),

    /// The upstream call did not complete within the configured timeout.
    #[error("upstream request timed out")]
    Timeout,
}

impl From<reqwest::Error> for PunctuateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PunctuateError::Timeout
        } else {
            PunctuateError::Upstream(e.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

/// Upstream chat-completion response body
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    error: Option<UpstreamErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

/// Client for the upstream chat-completion API.
///
/// Holds no per-request state. One upstream call per invocation, never
/// retried; a hanging upstream is cut off by the configured timeout.
pub struct PunctuationClient {
    client: reqwest::Client,
    config: UpstreamConfig,
    api_key: Option<String>,
}

impl PunctuationClient {
    /// Build a client.
    ///
    /// The credential is resolved once by the caller (from the environment
    /// variable named in the config) and passed in here; handlers never
    /// consult ambient state.
    pub fn new(config: UpstreamConfig, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config,
            api_key,
        }
    }

    /// Whether a usable credential is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Restore punctuation in `text`.
    ///
    /// Sends one chat-completion request with a language-conditional system
    /// instruction and returns the sanitized result text.
    pub async fn punctuate(&self, text: &str, language: &str) -> Result<String, PunctuateError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(PunctuateError::MissingApiKey),
        };

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_instruction(language).to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let url = format!("{}/v1/chat/completions", self.config.base_url);

        info!("Punctuating {} chars ({})", text.len(), language);

        let bytes = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .bytes()
            .await?;

        let response: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|e| PunctuateError::Upstream(format!("malformed upstream response: {}", e)))?;

        extract_result(response)
    }
}

/// Instruction for the system role, conditioned on the request language.
pub fn system_instruction(language: &str) -> &'static str {
    if language.starts_with("zh") {
        "你是一个标点修复助手。只返回加好标点的文本，不要解释，不要添加任何内容。"
    } else {
        "You are a punctuation restoration assistant. Only return the input text with proper punctuation, and nothing else."
    }
}

/// Pull the punctuated text out of an upstream response body.
///
/// The first choice's content is trimmed and unwrapped from one layer of
/// enclosing quotes. A response without choices yields the upstream error
/// message when present, else "Unknown error".
pub fn extract_result(response: ChatResponse) -> Result<String, PunctuateError> {
    if let Some(choice) = response.choices.into_iter().next() {
        let content = choice.message.content;
        let trimmed = content.trim();
        return Ok(strip_enclosing_quotes(trimmed).to_string());
    }

    let message = response
        .error
        .and_then(|e| e.message)
        .unwrap_or_else(|| "Unknown error".to_string());

    Err(PunctuateError::Upstream(message))
}

/// Strip one layer of enclosing quotes when the first and last characters
/// form a matching pair.
pub fn strip_enclosing_quotes(text: &str) -> &str {
    const PAIRS: [(char, char); 4] = [
        ('"', '"'),
        ('\u{201C}', '\u{201D}'), // curly double
        ('\u{2018}', '\u{2019}'), // curly single
        ('\'', '\''),
    ];

    let mut chars = text.chars();
    let (first, last) = match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => (first, last),
        _ => return text, // zero or one character
    };

    if PAIRS
        .iter()
        .any(|&(open, close)| first == open && last == close)
    {
        &text[first.len_utf8()..text.len() - last.len_utf8()]
    } else {
        text
    }
}
