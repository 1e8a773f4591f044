// src/infra/errors.rs — Error types for retail-chat

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetailChatError {
    // Remote data service errors
    #[error("Service call failed: {message}")]
    Service { message: String },

    #[error("Service returned a SOAP fault ({code}): {message}")]
    Fault { code: String, message: String },

    #[error("Service returned no data")]
    EmptyPayload,

    #[error("Could not interpret service descriptor: {0}")]
    Descriptor(String),

    #[error("XML error: {0}")]
    Xml(String),

    // Model errors
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    #[error("Prompt template error: {0}")]
    Template(String),

    // User errors
    #[error("No model credential found. Set {env_var} in the environment or a .env file.")]
    NoProvider { env_var: String },

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RetailChatError {
    /// Whether the error came from the remote data service (fetch path).
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            RetailChatError::Service { .. }
                | RetailChatError::Fault { .. }
                | RetailChatError::EmptyPayload
                | RetailChatError::Descriptor(_)
                | RetailChatError::Xml(_)
        )
    }
}

impl From<quick_xml::Error> for RetailChatError {
    fn from(e: quick_xml::Error) -> Self {
        RetailChatError::Xml(e.to_string())
    }
}

impl From<minijinja::Error> for RetailChatError {
    fn from(e: minijinja::Error) -> Self {
        RetailChatError::Template(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_family() {
        assert!(RetailChatError::EmptyPayload.is_service_error());
        assert!(RetailChatError::Fault {
            code: "s:Client".into(),
            message: "bad".into()
        }
        .is_service_error());
        assert!(!RetailChatError::Provider {
            provider: "groq".into(),
            message: "quota".into()
        }
        .is_service_error());
    }

    #[test]
    fn test_no_provider_message_names_variable() {
        let e = RetailChatError::NoProvider {
            env_var: "GROQ_API_KEY".into(),
        };
        assert!(e.to_string().contains("GROQ_API_KEY"));
    }
}
