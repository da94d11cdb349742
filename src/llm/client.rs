use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::llm::errors::LlmError;

/// Longest provider error body kept in [`LlmError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 300;

/// One system instruction plus one user prompt, answered by a single text reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Black-box text completion. Implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;

    /// Whether a credential is present; reported by the health endpoint.
    fn is_configured(&self) -> bool;
}

/// OpenAI-compatible Chat Completions client.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = Client::builder()
            .user_agent(concat!("credcheck/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}

#[derive(Deserialize)]
struct ChoiceMsg {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    #[instrument(skip_all, fields(model = %self.model, max_tokens = request.max_tokens))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: &request.system,
                },
                Msg {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: 0.0,
            max_tokens: request.max_tokens,
        };

        let started = Instant::now();
        let resp = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status,
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: Resp = resp.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = content.chars().count(),
            "completion received"
        );
        Ok(content)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
