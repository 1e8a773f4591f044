// src/service/wsdl.rs — Service descriptor (WSDL) interpretation
//
// Only what a SOAP 1.1 document/literal call needs: target namespace, endpoint address
// and the operation's SOAPAction. Types from the schema are not modelled.

use url::Url;

use super::xml::{self, Element};
use crate::infra::errors::RetailChatError;

const SOAP11_BINDING_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
const DEFAULT_NAMESPACE: &str = "http://tempuri.org/";

/// Everything needed to address one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescriptor {
    pub target_namespace: String,
    pub endpoint: String,
    pub soap_action: String,
}

/// Pieces found in a single descriptor document; imports may fill in the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorParts {
    pub target_namespace: Option<String>,
    pub endpoint: Option<String>,
    pub soap_action: Option<String>,
    pub port_type: Option<String>,
    /// `wsdl:import` locations, in document order.
    pub imports: Vec<String>,
}

pub fn parse_parts(xml_text: &str, operation: &str) -> Result<DescriptorParts, RetailChatError> {
    let root = xml::parse_document(xml_text)?;
    if root.local_name() != "definitions" {
        return Err(RetailChatError::Descriptor(format!(
            "expected <definitions>, found <{}>",
            root.name
        )));
    }

    Ok(DescriptorParts {
        target_namespace: root.attr("targetNamespace").map(str::to_string),
        endpoint: find_endpoint(&root),
        soap_action: find_soap_action(&root, operation),
        port_type: root
            .descendants("portType")
            .into_iter()
            .find_map(|p| p.attr("name"))
            .map(str::to_string),
        imports: root
            .children
            .iter()
            .filter(|c| c.local_name() == "import")
            .filter_map(|c| c.attr("location"))
            .map(str::to_string)
            .collect(),
    })
}

/// SOAP 1.1 `address@location`, preferred over SOAP 1.2 when both are present.
fn find_endpoint(root: &Element) -> Option<String> {
    let addresses: Vec<&Element> = root
        .descendants("address")
        .into_iter()
        .filter(|a| a.attr("location").is_some())
        .collect();

    let soap11 = root
        .prefix_for(SOAP11_BINDING_NS)
        .map(|p| if p.is_empty() { "address".to_string() } else { format!("{p}:address") });

    soap11
        .and_then(|qname| addresses.iter().find(|a| a.name == qname))
        .or_else(|| addresses.first())
        .and_then(|a| a.attr("location"))
        .map(str::to_string)
}

/// `soapAction` of the binding operation named `operation`.
fn find_soap_action(root: &Element, operation: &str) -> Option<String> {
    root.descendants("binding")
        .into_iter()
        .flat_map(|b| b.children.iter())
        .filter(|op| op.local_name() == "operation" && op.attr("name") == Some(operation))
        .flat_map(|op| op.children.iter())
        .filter(|c| c.local_name() == "operation")
        .find_map(|c| c.attr("soapAction"))
        .map(str::to_string)
}

impl DescriptorParts {
    /// Fill gaps from an imported document without overriding what is already known.
    pub fn merge(&mut self, other: DescriptorParts) {
        if self.target_namespace.is_none() {
            self.target_namespace = other.target_namespace;
        }
        if self.endpoint.is_none() {
            self.endpoint = other.endpoint;
        }
        if self.soap_action.is_none() {
            self.soap_action = other.soap_action;
        }
        if self.port_type.is_none() {
            self.port_type = other.port_type;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.target_namespace.is_some() && self.endpoint.is_some() && self.soap_action.is_some()
    }

    /// Resolve to a usable descriptor, applying the usual fallbacks:
    /// the descriptor URL without its query as endpoint, and
    /// `{namespace}{portType}/{operation}` as SOAPAction.
    pub fn resolve(self, wsdl_url: &Url, operation: &str) -> ServiceDescriptor {
        let target_namespace = self
            .target_namespace
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let endpoint = self.endpoint.unwrap_or_else(|| {
            let mut url = wsdl_url.clone();
            url.set_query(None);
            url.to_string()
        });

        let soap_action = self.soap_action.unwrap_or_else(|| {
            let ns = if target_namespace.ends_with('/') {
                target_namespace.clone()
            } else {
                format!("{target_namespace}/")
            };
            match &self.port_type {
                Some(port_type) => format!("{ns}{port_type}/{operation}"),
                None => format!("{ns}{operation}"),
            }
        });

        ServiceDescriptor {
            target_namespace,
            endpoint,
            soap_action,
        }
    }
}
