//! The JSON envelope the API wraps every response in:
//! `{success, message?, data?, debug?}`. The `data` object is kept as a
//! raw JSON value and inspected ad hoc, since its shape differs per
//! endpoint.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
    pub debug: Option<serde_json::Value>,
}

impl Envelope {
    /// Looks up a string field inside the `data` object.
    pub fn data_str(&self, field: &str) -> Option<&str> {
        self.data.as_ref()?.get(field)?.as_str()
    }

    /// The server's diagnostic `debug` value, rendered for printing.
    /// Plain strings are printed as-is, anything else as compact JSON.
    pub fn debug_text(&self) -> Option<String> {
        match self.debug.as_ref()? {
            serde_json::Value::String(text) => Some(text.clone()),
            value => Some(value.to_string()),
        }
    }

    /// The server's `message`, or a placeholder if it sent none.
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("no message given")
    }
}

#[cfg(test)]
mod tests {
    use super::Envelope;

    fn parse(raw: serde_json::Value) -> Envelope {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_data_str_reads_nested_fields() {
        let envelope = parse(serde_json::json!({
            "success": true,
            "data": { "schoolName": "Test School - Updated", "logoUrl": "/uploads/logo.png" },
        }));
        assert_eq!(envelope.data_str("schoolName"), Some("Test School - Updated"));
        assert_eq!(envelope.data_str("logoUrl"), Some("/uploads/logo.png"));
        assert_eq!(envelope.data_str("missing"), None);
    }

    #[test]
    fn test_success_defaults_to_false() {
        let envelope = parse(serde_json::json!({ "message": "boom" }));
        assert!(!envelope.success);
        assert_eq!(envelope.message_text(), "boom");
    }

    #[test]
    fn test_debug_text_renders_strings_and_objects() {
        let envelope = parse(serde_json::json!({
            "success": false,
            "debug": "multer rejected the file",
        }));
        assert_eq!(
            envelope.debug_text().as_deref(),
            Some("multer rejected the file")
        );

        let envelope = parse(serde_json::json!({
            "success": false,
            "debug": { "field": "logo" },
        }));
        assert_eq!(envelope.debug_text().as_deref(), Some(r#"{"field":"logo"}"#));
    }

    #[test]
    fn test_missing_debug_and_message() {
        let envelope = parse(serde_json::json!({ "success": true }));
        assert!(envelope.debug_text().is_none());
        assert_eq!(envelope.message_text(), "no message given");
    }
}
