/// Reads the `ok`/`error`/`warning` envelope every Slack Web API response is
/// wrapped in.
///
/// Works on the raw JSON so an unexpectedly shaped `error` still counts as a
/// failure.
pub mod envelope {
    use serde_json::Value;

    /// `Some(message)` when the response reports a failure.
    pub fn error_message(json: &Value) -> Option<String> {
        let failed = json.get("ok") == Some(&Value::Bool(false));
        match json.get("error") {
            Some(Value::String(message)) => Some(message.clone()),
            Some(error) if !error.is_null() => Some(error.to_string()),
            _ if failed => Some("response reported ok=false".to_string()),
            _ => None,
        }
    }

    pub fn warning(json: &Value) -> Option<&str> {
        json.get("warning").and_then(Value::as_str)
    }

}
