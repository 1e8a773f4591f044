// src/core/format.rs — Shape the remote payload for the prompt

use serde::Serialize;

use crate::service::RemotePayload;

/// Payload as the prompt template expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedData {
    pub formatted_data: RemotePayload,
}

impl FormattedData {
    /// Text placed inside the `<DATA>` slot.
    pub fn render_text(&self) -> String {
        self.formatted_data.to_pretty_text()
    }
}

/// Identity wrap under a fixed key. Total; never fails.
pub fn format_for_response(payload: &RemotePayload) -> FormattedData {
    FormattedData {
        formatted_data: payload.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wraps_payload_unchanged() {
        let payload = RemotePayload::new(json!({"Row": [{"Class": "Shoes"}]}));
        let formatted = format_for_response(&payload);
        assert_eq!(formatted.formatted_data, payload);
        assert_eq!(
            serde_json::to_value(&formatted).unwrap(),
            json!({"formatted_data": {"Row": [{"Class": "Shoes"}]}})
        );
    }

    #[test]
    fn test_render_text_is_json() {
        let formatted = format_for_response(&RemotePayload::new(json!({"Total": "15"})));
        let text = formatted.render_text();
        assert!(text.contains("\"Total\": \"15\""));
    }
}
