use crate::config::Settings;
use crate::error::PipelineError;
use crate::llm::{CompletionRequest, TextGenerator};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const SERVICE: &str = "text generation";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_openai_api_key()?.to_string();
        let base_url = settings
            .openai_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = settings
            .openai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeout_secs = settings.openai_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
        })
    }

    async fn create_chat_completion(
        &self,
        req: &ChatCompletionRequest<'_>,
    ) -> anyhow::Result<ChatCompletionResponse> {
        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );
        let res = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .await
            .map_err(|e| PipelineError::upstream(SERVICE, format!("request failed: {e}")))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| PipelineError::upstream(SERVICE, format!("body read failed: {e}")))?;
        if !status.is_success() {
            return Err(PipelineError::upstream(SERVICE, format!("status={status}: {text}")).into());
        }

        let parsed = serde_json::from_str::<ChatCompletionResponse>(&text).map_err(|e| {
            PipelineError::upstream(SERVICE, format!("undecodable response: {e}"))
        })?;
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, req: CompletionRequest) -> anyhow::Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: &req.prompt,
            }],
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };

        let res = self.create_chat_completion(&body).await?;
        if let Some(reason) = res.choices.first().and_then(|c| c.finish_reason.as_deref()) {
            if reason == "length" {
                tracing::debug!(model = %self.model, max_tokens = req.max_tokens, "completion hit max_tokens");
            }
        }
        response_text(res)
    }
}

fn response_text(res: ChatCompletionResponse) -> anyhow::Result<String> {
    res.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| PipelineError::upstream(SERVICE, "completion has no content").into())
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
