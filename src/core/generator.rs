// src/core/generator.rs — Natural-language answers over fetched data
//
// Pipeline: formatter -> prompt template -> hosted model -> plain text.

use std::sync::Arc;

use async_trait::async_trait;

use super::format::format_for_response;
use super::prompt::{PromptInputs, PromptTemplate};
use crate::infra::config::ModelConfig;
use crate::infra::errors::RetailChatError;
use crate::provider::{ChatRequest, ChatResponse, ModelProvider};
use crate::service::RemotePayload;

/// Answers a question about a payload.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(
        &self,
        user_query: &str,
        data: &RemotePayload,
    ) -> Result<String, RetailChatError>;
}

/// Takes the model's text verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrOutputParser;

impl StrOutputParser {
    pub fn parse(&self, response: ChatResponse) -> String {
        response.content
    }
}

/// Template, model and output parser composed into one invocation.
pub struct AnalystChain {
    template: PromptTemplate,
    provider: Arc<dyn ModelProvider>,
    model: String,
    temperature: f32,
    parser: StrOutputParser,
}

impl AnalystChain {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Result<Self, RetailChatError> {
        Ok(Self {
            template: PromptTemplate::analyst()?,
            provider,
            model: model.into(),
            temperature,
            parser: StrOutputParser,
        })
    }

    pub fn from_config(
        provider: Arc<dyn ModelProvider>,
        config: &ModelConfig,
    ) -> Result<Self, RetailChatError> {
        Self::new(provider, config.model.clone(), config.temperature)
    }

    pub async fn invoke(&self, inputs: &PromptInputs) -> Result<String, RetailChatError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: self.template.format_messages(inputs)?,
            temperature: Some(self.temperature),
        };
        let response = self.provider.chat(request).await?;
        tracing::debug!(
            "{} answered with {} tokens",
            self.provider.name(),
            response.usage.total()
        );
        Ok(self.parser.parse(response))
    }
}

#[async_trait]
impl ResponseGenerator for AnalystChain {
    async fn generate(
        &self,
        user_query: &str,
        data: &RemotePayload,
    ) -> Result<String, RetailChatError> {
        let formatted = format_for_response(data);
        let inputs = PromptInputs {
            formatted_data: formatted.render_text(),
            question: user_query.to_string(),
        };
        self.invoke(&inputs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Role, TokenUsage};
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingProvider {
        reply: Result<String, String>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    #[async_trait]
    impl ModelProvider for RecordingProvider {
        fn id(&self) -> &str {
            "recording"
        }

        fn name(&self) -> &str {
            "Recording"
        }

        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, RetailChatError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(content) => Ok(ChatResponse {
                    content: content.clone(),
                    usage: TokenUsage::default(),
                }),
                Err(message) => Err(RetailChatError::Provider {
                    provider: "recording".into(),
                    message: message.clone(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_generate_builds_single_prompt_and_returns_text() {
        let provider = Arc::new(RecordingProvider {
            reply: Ok("  Total sales were 15 units.\n".into()),
            seen: Mutex::new(Vec::new()),
        });
        let chain = AnalystChain::new(provider.clone(), "mixtral-8x7b-32768", 0.0).unwrap();

        let payload = RemotePayload::new(json!({"Total": "15"}));
        let answer = chain.generate("What were total sales?", &payload).await.unwrap();
        assert_eq!(answer, "  Total sales were 15 units.\n");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "mixtral-8x7b-32768");
        assert_eq!(seen[0].temperature, Some(0.0));
        assert_eq!(seen[0].messages.len(), 1);
        assert_eq!(seen[0].messages[0].role, Role::User);
        assert!(seen[0].messages[0].content.contains("\"Total\": \"15\""));
        assert!(seen[0].messages[0]
            .content
            .ends_with("User question: What were total sales?"));
    }

    #[tokio::test]
    async fn test_generate_propagates_provider_error() {
        let provider = Arc::new(RecordingProvider {
            reply: Err("quota exceeded".into()),
            seen: Mutex::new(Vec::new()),
        });
        let chain = AnalystChain::new(provider, "m", 0.0).unwrap();
        let err = chain
            .generate("q", &RemotePayload::new(json!({"a": "1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, RetailChatError::Provider { .. }));
    }
}
