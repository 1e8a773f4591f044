// src/service/soap.rs — SOAP client for the sell-through report operation
//
// The descriptor is fetched and interpreted on every call; nothing is cached between
// calls. One attempt per call, no retry.

use async_trait::async_trait;
use url::Url;

use super::wsdl::{self, ServiceDescriptor};
use super::{envelope, DataService, FetchParameters, RemotePayload};
use crate::infra::config::ServiceConfig;
use crate::infra::errors::RetailChatError;

pub struct SoapClient {
    wsdl_url: Url,
    operation: String,
    parameter_names: [String; 2],
    client: reqwest::Client,
}

impl SoapClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, RetailChatError> {
        let wsdl_url = Url::parse(&config.wsdl_url).map_err(|e| {
            RetailChatError::Config(format!("invalid service URL '{}': {e}", config.wsdl_url))
        })?;
        Ok(Self {
            wsdl_url,
            operation: config.operation.clone(),
            parameter_names: config.parameter_names.clone(),
            client: reqwest::Client::new(),
        })
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    async fn get_text(&self, url: &str) -> Result<String, RetailChatError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RetailChatError::Service {
                message: format!("GET {url}: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetailChatError::Service {
                message: format!("GET {url} returned HTTP {status}"),
            });
        }

        response.text().await.map_err(|e| RetailChatError::Service {
            message: format!("GET {url}: {e}"),
        })
    }

    /// Fetch the descriptor (and one level of imports if needed) and resolve the operation.
    pub async fn resolve_descriptor(&self) -> Result<ServiceDescriptor, RetailChatError> {
        let text = self.get_text(self.wsdl_url.as_str()).await?;
        let mut parts = wsdl::parse_parts(&text, &self.operation)?;

        let imports = std::mem::take(&mut parts.imports);
        for location in imports {
            if parts.is_complete() {
                break;
            }
            let url = self
                .wsdl_url
                .join(&location)
                .map_err(|e| RetailChatError::Descriptor(format!("bad import '{location}': {e}")))?;
            tracing::debug!("following descriptor import {url}");
            let imported = self.get_text(url.as_str()).await?;
            parts.merge(wsdl::parse_parts(&imported, &self.operation)?);
        }

        let descriptor = parts.resolve(&self.wsdl_url, &self.operation);
        tracing::debug!(
            "resolved {} at {} (action {})",
            self.operation,
            descriptor.endpoint,
            descriptor.soap_action
        );
        Ok(descriptor)
    }

    /// Invoke the operation with the two parameters, positionally.
    pub async fn call(&self, params: &FetchParameters) -> Result<RemotePayload, RetailChatError> {
        let descriptor = self.resolve_descriptor().await?;

        let request = envelope::build_request(
            &descriptor.target_namespace,
            &self.operation,
            &[
                (self.parameter_names[0].as_str(), params.sbs.as_str()),
                (self.parameter_names[1].as_str(), params.logged_user_id.as_str()),
            ],
        );

        let response = self
            .client
            .post(&descriptor.endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{}\"", descriptor.soap_action))
            .body(request)
            .send()
            .await
            .map_err(|e| RetailChatError::Service {
                message: format!("POST {}: {e}", descriptor.endpoint),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RetailChatError::Service {
            message: format!("reading response from {}: {e}", descriptor.endpoint),
        })?;

        if !status.is_success() {
            // Faults arrive with HTTP 500; prefer the fault detail when the body has one.
            return match envelope::parse_response(&body, &self.operation) {
                Err(fault @ RetailChatError::Fault { .. }) => Err(fault),
                _ => Err(RetailChatError::Service {
                    message: format!("POST {} returned HTTP {status}", descriptor.endpoint),
                }),
            };
        }

        let payload = envelope::parse_response(&body, &self.operation)?;
        tracing::info!("{} returned {} bytes", self.operation, body.len());
        Ok(payload)
    }
}

#[async_trait]
impl DataService for SoapClient {
    async fn fetch(&self, params: &FetchParameters) -> Result<RemotePayload, RetailChatError> {
        self.call(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = ServiceConfig {
            wsdl_url: "::nope".into(),
            ..ServiceConfig::default()
        };
        assert!(matches!(
            SoapClient::new(&config),
            Err(RetailChatError::Config(_))
        ));
    }

    #[test]
    fn test_new_uses_configured_operation() {
        let client = SoapClient::new(&ServiceConfig::default()).unwrap();
        assert_eq!(client.operation(), "RA_REPORT_CLASS_SELLTHRU");
        assert_eq!(client.wsdl_url.query(), Some("wsdl"));
    }
}
