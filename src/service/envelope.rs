// src/service/envelope.rs — SOAP 1.1 request envelopes and response decoding

use quick_xml::escape::escape;

use super::xml::{self, Element};
use super::RemotePayload;
use crate::infra::errors::RetailChatError;

pub const SOAP11_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Build a document/literal request with positional arguments as child elements.
pub fn build_request(namespace: &str, operation: &str, args: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in args {
        body.push_str(&format!("<{name}>{}</{name}>", escape(*value)));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap:Envelope xmlns:soap=\"{SOAP11_ENVELOPE_NS}\">\
         <soap:Body><{operation} xmlns=\"{ns}\">{body}</{operation}></soap:Body>\
         </soap:Envelope>",
        ns = escape(namespace),
    )
}

/// Extract the operation result from a response envelope.
///
/// A `Fault` in the body becomes [`RetailChatError::Fault`]; an empty result becomes
/// [`RetailChatError::EmptyPayload`].
pub fn parse_response(xml_text: &str, operation: &str) -> Result<RemotePayload, RetailChatError> {
    let root = xml::parse_document(xml_text)?;
    if root.local_name() != "Envelope" {
        return Err(RetailChatError::Service {
            message: format!("expected SOAP envelope, found <{}>", root.name),
        });
    }

    let body = root.child("Body").ok_or_else(|| RetailChatError::Service {
        message: "SOAP envelope has no Body".into(),
    })?;

    let first = body.children.first().ok_or(RetailChatError::EmptyPayload)?;
    if first.local_name() == "Fault" {
        return Err(fault_error(first));
    }

    let expected = format!("{operation}Response");
    if first.local_name() != expected {
        tracing::warn!(
            "expected <{expected}> in SOAP body, decoding <{}> instead",
            first.name
        );
    }

    // Single return part: unwrap the `...Result` element like a generated client would.
    let value = match first.children.as_slice() {
        [] => serde_json::Value::Null,
        [result] => result.to_value(),
        _ => first.to_value(),
    };

    let payload = RemotePayload::new(value);
    if payload.is_empty() {
        return Err(RetailChatError::EmptyPayload);
    }
    Ok(payload)
}

/// SOAP 1.1 (`faultcode`/`faultstring`) or SOAP 1.2 (`Code/Value`, `Reason/Text`).
fn fault_error(fault: &Element) -> RetailChatError {
    let code = fault
        .child("faultcode")
        .map(|c| c.text.trim().to_string())
        .or_else(|| {
            fault
                .child("Code")
                .and_then(|c| c.child("Value"))
                .map(|v| v.text.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".into());

    let message = fault
        .child("faultstring")
        .map(|c| c.text.trim().to_string())
        .or_else(|| {
            fault
                .child("Reason")
                .and_then(|r| r.child("Text"))
                .map(|t| t.text.trim().to_string())
        })
        .unwrap_or_default();

    RetailChatError::Fault { code, message }
}
