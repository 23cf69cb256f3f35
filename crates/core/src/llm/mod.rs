pub mod openai;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Prompt-completion collaborator.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    fn model(&self) -> &str;

    /// Returns the generated text. A response without content is
    /// `PipelineError::UpstreamUnavailable`.
    async fn complete(&self, req: CompletionRequest) -> anyhow::Result<String>;
}
