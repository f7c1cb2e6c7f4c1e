use serde::{Deserialize, Serialize};

/// Outcome of a synchronous function invocation, passed through to clients verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// HTTP status reported by the invocation service (200 for RequestResponse).
    pub status_code: i32,
    /// Set when the function itself raised; the invocation still succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_version: Option<String>,
    /// Decoded tail of the execution log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_result: Option<String>,
    /// Function response: JSON when parseable, otherwise a string, `null` when empty.
    pub payload: serde_json::Value,
}

impl InvocationResult {
    /// Interpret a raw response body the way clients expect to read it.
    pub fn decode_payload(raw: &[u8]) -> serde_json::Value {
        if raw.is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_slice(raw)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(raw).into_owned()))
    }

    pub fn is_function_error(&self) -> bool {
        self.function_error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_json_payload() {
        let value = InvocationResult::decode_payload(br#"{"statusCode":200,"body":"ok"}"#);
        assert_eq!(value, json!({"statusCode": 200, "body": "ok"}));
    }

    #[test]
    fn test_decode_non_json_payload() {
        let value = InvocationResult::decode_payload(b"done");
        assert_eq!(value, json!("done"));
    }

    #[test]
    fn test_decode_empty_payload() {
        assert_eq!(InvocationResult::decode_payload(b""), serde_json::Value::Null);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let result = InvocationResult {
            status_code: 200,
            function_error: None,
            executed_version: Some("$LATEST".to_string()),
            log_result: None,
            payload: json!(null),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"status_code": 200, "executed_version": "$LATEST", "payload": null})
        );
        assert!(!result.is_function_error());
    }
}
