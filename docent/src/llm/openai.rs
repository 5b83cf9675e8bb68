//! OpenAI chat-completions client.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::debug;

use crate::error::WorkflowError;
use crate::llm::LlmClient;
use crate::message::Message;

/// Default chat model when none is configured.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// `LlmClient` over the OpenAI chat completions API.
///
/// Reads `OPENAI_API_KEY` from the environment via the client config.
///
/// **Interaction**: Injected as `Arc<dyn LlmClient>` into the workflow by
/// the bot and CLI binaries.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ChatOpenAI {
    /// Client for `model` using environment credentials.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
        }
    }

    /// Client with an explicit config (custom base URL or key).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }

    fn to_request_message(
        message: &Message,
    ) -> Result<ChatCompletionRequestMessage, WorkflowError> {
        let msg = match message {
            Message::System(content) => ChatCompletionRequestSystemMessageArgs::default()
                .content(content.as_str())
                .build()
                .map_err(|e| WorkflowError::ExecutionFailed(e.to_string()))?
                .into(),
            Message::User(content) => ChatCompletionRequestUserMessageArgs::default()
                .content(content.as_str())
                .build()
                .map_err(|e| WorkflowError::ExecutionFailed(e.to_string()))?
                .into(),
            Message::Assistant(content) => ChatCompletionRequestAssistantMessageArgs::default()
                .content(content.as_str())
                .build()
                .map_err(|e| WorkflowError::ExecutionFailed(e.to_string()))?
                .into(),
        };
        Ok(msg)
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn complete(&self, messages: &[Message]) -> Result<String, WorkflowError> {
        let request_messages: Vec<ChatCompletionRequestMessage> = messages
            .iter()
            .map(Self::to_request_message)
            .collect::<Result<_, _>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(request_messages)
            .build()
            .map_err(|e| WorkflowError::ExecutionFailed(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| WorkflowError::ExecutionFailed(format!("chat completion: {}", e)))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!(model = %self.model, chars = content.len(), "chat completion received");
        Ok(content)
    }
}
