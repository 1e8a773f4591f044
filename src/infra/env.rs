// src/infra/env.rs — Process environment and .env credentials

use std::path::PathBuf;

use crate::infra::config::ModelConfig;
use crate::infra::errors::RetailChatError;

/// Load a local `.env` file into the process environment, if one exists.
/// Variables already set in the environment are left untouched.
/// Returns the loaded path; a missing file is `Ok(None)`.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Read the model API key named by `model.api_key_env`.
pub fn resolve_api_key(model: &ModelConfig) -> Result<String, RetailChatError> {
    lookup_key(&model.api_key_env, |name| std::env::var(name).ok())
}

fn lookup_key(
    env_var: &str,
    get: impl Fn(&str) -> Option<String>,
) -> Result<String, RetailChatError> {
    match get(env_var) {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(RetailChatError::NoProvider {
            env_var: env_var.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_present() {
        let key = lookup_key("GROQ_API_KEY", |_| Some(" gsk_abc \n".into())).unwrap();
        assert_eq!(key, "gsk_abc");
    }

    #[test]
    fn test_lookup_key_missing() {
        let err = lookup_key("GROQ_API_KEY", |_| None).unwrap_err();
        assert!(matches!(err, RetailChatError::NoProvider { .. }));
    }

    #[test]
    fn test_lookup_key_blank_is_missing() {
        assert!(lookup_key("GROQ_API_KEY", |_| Some("   ".into())).is_err());
    }
}
