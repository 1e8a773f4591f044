// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::RetailChatError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Page title shown in the browser tab and header.
    pub title: String,
    /// Sessions idle for longer than this are dropped.
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 8501,
            title: "Chat with Retail Service".into(),
            session_idle_secs: 3600,
        }
    }
}

/// Remote sell-through report service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub wsdl_url: String,
    pub operation: String,
    /// Element names for the two positional operation arguments.
    pub parameter_names: [String; 2],
    pub default_sbs: String,
    pub default_logged_user_id: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            wsdl_url: "http://retailapp.eastgateindustries.com:8082/RetailAppServices/RetailAppClass.svc?wsdl".into(),
            operation: "RA_REPORT_CLASS_SELLTHRU".into(),
            parameter_names: ["sbs".into(), "loggedUserId".into()],
            default_sbs: "2".into(),
            default_logged_user_id: "141".into(),
        }
    }
}

/// Hosted chat model (any OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub provider: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "groq".into(),
            base_url: "https://api.groq.com/openai/v1".into(),
            model: "mixtral-8x7b-32768".into(),
            temperature: 0.0,
            api_key_env: "GROQ_API_KEY".into(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), RetailChatError> {
        url::Url::parse(&self.service.wsdl_url).map_err(|e| {
            RetailChatError::Config(format!(
                "service.wsdl_url '{}' is not a valid URL: {e}",
                self.service.wsdl_url
            ))
        })?;
        if self.server.session_idle_secs == 0 {
            return Err(RetailChatError::Config(
                "server.session_idle_secs must be greater than zero".into(),
            ));
        }
        if self.service.operation.trim().is_empty() {
            return Err(RetailChatError::Config(
                "service.operation must not be empty".into(),
            ));
        }
        if self.service.parameter_names.iter().any(|p| p.trim().is_empty()) {
            return Err(RetailChatError::Config(
                "service.parameter_names must not contain empty names".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_retail_service() {
        let c = Config::default();
        assert_eq!(c.server.port, 8501);
        assert_eq!(c.service.operation, "RA_REPORT_CLASS_SELLTHRU");
        assert_eq!(c.service.default_sbs, "2");
        assert_eq!(c.service.default_logged_user_id, "141");
        assert_eq!(c.model.model, "mixtral-8x7b-32768");
        assert_eq!(c.model.temperature, 0.0);
        assert_eq!(c.model.api_key_env, "GROQ_API_KEY");
        assert_eq!(c.server.session_idle_secs, 3600);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1");
        assert!(config.service.wsdl_url.ends_with("?wsdl"));
    }

    #[test]
    fn test_parse_partial_sections() {
        let toml_str = r#"
[server]
port = 9000

[service]
wsdl_url = "http://localhost:8082/Report.svc?wsdl"
parameter_names = ["Sbs", "UserId"]

[model]
model = "llama-3.3-70b-versatile"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.title, "Chat with Retail Service");
        assert_eq!(config.service.parameter_names[1], "UserId");
        assert_eq!(config.service.operation, "RA_REPORT_CLASS_SELLTHRU");
        assert_eq!(config.model.model, "llama-3.3-70b-versatile");
        assert_eq!(config.model.provider, "groq");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind = \"0.0.0.0\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0");
    }

    #[test]
    fn test_load_rejects_bad_wsdl_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[service]\nwsdl_url = \"not a url\"").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_load_rejects_zero_idle_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nsession_idle_secs = 0").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.service.wsdl_url, config.service.wsdl_url);
        assert_eq!(deserialized.model.base_url, config.model.base_url);
    }
}
