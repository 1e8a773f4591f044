// src/service/xml.rs — Minimal XML element tree on top of quick-xml
//
// SOAP responses and WSDL descriptors are small enough to load whole. The tree keeps
// qualified names so namespace prefixes can be matched against root declarations.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::infra::errors::RetailChatError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Qualified name as written, e.g. `soap:Body`.
    pub name: String,
    /// Attributes as `(qualified name, unescaped value)`.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

fn xml_err(e: impl std::fmt::Display) -> RetailChatError {
    RetailChatError::Xml(e.to_string())
}

/// Strip a namespace prefix: `soap:Body` -> `Body`.
pub fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, l)| l)
}

fn prefix(name: &str) -> Option<&str> {
    name.split_once(':').map(|(p, _)| p)
}

impl Element {
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name || (local(k) == name && !k.starts_with("xmlns")))
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local_name() == local_name)
    }

    /// All descendants (depth-first, document order) with the given local name.
    pub fn descendants<'a>(&'a self, local_name: &'a str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(local_name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, local_name: &str, found: &mut Vec<&'a Element>) {
        for c in &self.children {
            if c.local_name() == local_name {
                found.push(c);
            }
            c.collect_descendants(local_name, found);
        }
    }

    /// Prefix this element declares for `namespace`, if any (`""` for a default namespace).
    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.attributes.iter().find_map(|(k, v)| {
            if v != namespace {
                return None;
            }
            if k == "xmlns" {
                Some("")
            } else {
                k.strip_prefix("xmlns:")
            }
        })
    }

    fn is_nil(&self) -> bool {
        self.attributes.iter().any(|(k, v)| {
            local(k) == "nil" && prefix(k).is_some() && (v == "true" || v == "1")
        })
    }

    /// Convert to a generic key/value tree.
    ///
    /// Leaves become strings, repeated child names become arrays, attributes other than
    /// namespace plumbing are kept under `@name`, and `xsi:nil` becomes null.
    pub fn to_value(&self) -> Value {
        if self.is_nil() {
            return Value::Null;
        }

        let attrs: Vec<&(String, String)> = self
            .attributes
            .iter()
            .filter(|(k, _)| !k.starts_with("xmlns") && !is_xsi_attr(k))
            .collect();

        let text = self.text.trim();
        if self.children.is_empty() && attrs.is_empty() {
            return Value::String(text.to_string());
        }

        let mut map = Map::new();
        for (k, v) in attrs {
            map.insert(format!("@{}", local(k)), Value::String(v.clone()));
        }

        let mut counts: Vec<(&str, usize)> = Vec::new();
        for c in &self.children {
            match counts.iter_mut().find(|(n, _)| *n == c.local_name()) {
                Some((_, n)) => *n += 1,
                None => counts.push((c.local_name(), 1)),
            }
        }

        for c in &self.children {
            let name = c.local_name();
            let repeated = counts.iter().any(|(n, count)| *n == name && *count > 1);
            let value = c.to_value();
            if repeated {
                if let Value::Array(items) = map
                    .entry(name.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()))
                {
                    items.push(value);
                }
            } else {
                map.insert(name.to_string(), value);
            }
        }

        if !text.is_empty() {
            map.insert("#text".into(), Value::String(text.to_string()));
        }
        Value::Object(map)
    }
}

/// Schema-instance plumbing such as `i:type` or `xsi:schemaLocation`.
fn is_xsi_attr(name: &str) -> bool {
    prefix(name).is_some()
        && matches!(
            local(name),
            "nil" | "type" | "schemaLocation" | "noNamespaceSchemaLocation"
        )
}

fn start_element(e: &BytesStart<'_>) -> Result<Element, RetailChatError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = quick_xml::escape::unescape(&raw)
            .map_err(xml_err)?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

/// Parse a full document and return its root element.
pub fn parse_document(xml: &str) -> Result<Element, RetailChatError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(start_element(&e)?),
            Event::Empty(e) => {
                let el = start_element(&e)?;
                attach(&mut stack, &mut root, el);
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| RetailChatError::Xml("unbalanced end tag".into()))?;
                attach(&mut stack, &mut root, el);
            }
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&t.decode().map_err(xml_err)?);
                }
            }
            Event::CData(t) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::GeneralRef(r) => {
                if let Some(top) = stack.last_mut() {
                    if let Some(ch) = r.resolve_char_ref().map_err(xml_err)? {
                        top.text.push(ch);
                    } else {
                        let name = r.decode().map_err(xml_err)?;
                        match quick_xml::escape::resolve_predefined_entity(&name) {
                            Some(s) => top.text.push_str(s),
                            None => {
                                return Err(RetailChatError::Xml(format!(
                                    "unknown entity &{name};"
                                )))
                            }
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(RetailChatError::Xml("unexpected end of document".into()));
    }
    root.ok_or_else(|| RetailChatError::Xml("document has no root element".into()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_nested_document() {
        let root = parse_document(r#"<a:Root xmlns:a="urn:x"><a:Item id="1">one</a:Item><Empty/></a:Root>"#)
            .unwrap();
        assert_eq!(root.local_name(), "Root");
        assert_eq!(root.prefix_for("urn:x"), Some("a"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.child("Item").unwrap().attr("id"), Some("1"));
        assert_eq!(root.child("Item").unwrap().text, "one");
    }

    #[test]
    fn test_entities_in_text_are_resolved() {
        let root = parse_document("<r>Shoes &amp; Bags &#65;&#x42; &lt;ok&gt;</r>").unwrap();
        assert_eq!(root.text, "Shoes & Bags AB <ok>");
    }

    #[test]
    fn test_to_value_groups_repeated_children() {
        let root = parse_document(
            "<Result><Row><Class>Shoes</Class><Units>12</Units></Row>\
             <Row><Class>Bags</Class><Units>3</Units></Row><Total>15</Total></Result>",
        )
        .unwrap();
        assert_eq!(
            root.to_value(),
            json!({
                "Row": [
                    {"Class": "Shoes", "Units": "12"},
                    {"Class": "Bags", "Units": "3"}
                ],
                "Total": "15"
            })
        );
    }

    #[test]
    fn test_to_value_nil_and_attributes() {
        let root = parse_document(
            r#"<Result xmlns:i="http://www.w3.org/2001/XMLSchema-instance" kind="weekly">
                 <Store i:nil="true"/><Name>Main</Name></Result>"#,
        )
        .unwrap();
        assert_eq!(
            root.to_value(),
            json!({"@kind": "weekly", "Store": null, "Name": "Main"})
        );
    }

    #[test]
    fn test_unbalanced_document_is_error() {
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn test_descendants_in_document_order() {
        let root = parse_document("<r><x n=\"1\"><x n=\"2\"/></x><y><x n=\"3\"/></y></r>").unwrap();
        let ns: Vec<&str> = root
            .descendants("x")
            .iter()
            .filter_map(|e| e.attr("n"))
            .collect();
        assert_eq!(ns, vec!["1", "2", "3"]);
    }
}
