// src/service/mod.rs — Remote sell-through data service

pub mod envelope;
pub mod soap;
pub mod wsdl;
pub mod xml;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::errors::RetailChatError;
pub use soap::SoapClient;

/// The two free-form arguments of the report call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchParameters {
    pub sbs: String,
    pub logged_user_id: String,
}

impl FetchParameters {
    pub fn new(sbs: impl Into<String>, logged_user_id: impl Into<String>) -> Self {
        Self {
            sbs: sbs.into(),
            logged_user_id: logged_user_id.into(),
        }
    }
}

/// Response of the remote call as an untyped key/value tree.
///
/// No schema is assumed; the payload is only ever rendered into a prompt or shown
/// as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemotePayload(serde_json::Value);

impl RemotePayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// Null, empty strings and empty containers count as "no data".
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => true,
            serde_json::Value::String(s) => s.trim().is_empty(),
            serde_json::Value::Array(a) => a.is_empty(),
            serde_json::Value::Object(o) => o.is_empty(),
            _ => false,
        }
    }

    pub fn to_pretty_text(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

/// Source of report payloads.
#[async_trait]
pub trait DataService: Send + Sync {
    async fn fetch(&self, params: &FetchParameters) -> Result<RemotePayload, RetailChatError>;
}

/// Single best-effort fetch. Errors are logged and collapsed to `None`.
pub async fn fetch_or_log(
    service: &dyn DataService,
    params: &FetchParameters,
) -> Option<RemotePayload> {
    match service.fetch(params).await {
        Ok(payload) if payload.is_empty() => {
            tracing::error!("Error calling SOAP service: {}", RetailChatError::EmptyPayload);
            None
        }
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::error!("Error calling SOAP service: {e}");
            None
        }
    }
}
