// src/provider/resolver.rs — Build the configured chat provider

use std::sync::Arc;

use super::openai_compat::OpenAICompatProvider;
use super::{ModelProvider, ModelRef};
use crate::infra::config::ModelConfig;
use crate::infra::env;
use crate::infra::errors::RetailChatError;

/// Display name for well-known OpenAI-compatible hosts.
fn display_name(provider_id: &str) -> String {
    match provider_id {
        "groq" => "Groq".into(),
        "openai" => "OpenAI".into(),
        "together" => "Together".into(),
        "openrouter" => "OpenRouter".into(),
        "deepseek" => "DeepSeek".into(),
        other => other.to_string(),
    }
}

/// Resolve the API key from the environment and build the provider.
pub fn build_provider(config: &ModelConfig) -> Result<Arc<dyn ModelProvider>, RetailChatError> {
    let api_key = env::resolve_api_key(config)?;
    Ok(build_provider_with_key(config, api_key))
}

pub fn build_provider_with_key(config: &ModelConfig, api_key: String) -> Arc<dyn ModelProvider> {
    tracing::info!(
        "using model {} at {}",
        model_ref(config),
        config.base_url
    );
    Arc::new(OpenAICompatProvider::new(
        config.provider.clone(),
        display_name(&config.provider),
        api_key,
        config.base_url.clone(),
    ))
}

pub fn model_ref(config: &ModelConfig) -> ModelRef {
    ModelRef::new(&config.provider, &config.model)
}
