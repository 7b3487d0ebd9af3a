//! Logging utilities with sensitive data redaction.

use serde_json::Value;

/// Query parameters whose values never reach the logs
const SENSITIVE_PARAMS: &[&str] = &["key", "access_token", "corpsecret", "secret"];

/// Redact a token, preserving a short prefix for debugging
pub fn redact_token(token: &str) -> String {
    match token.char_indices().nth(6) {
        Some((idx, _)) if token.len() > 12 => format!("{}...[REDACTED]", &token[..idx]),
        _ => "[REDACTED]".to_string(),
    }
}

fn is_sensitive(name: &str) -> bool {
    SENSITIVE_PARAMS.iter().any(|s| name.eq_ignore_ascii_case(s))
}

/// Render query pairs as `a=b&c=[REDACTED]`
pub fn redact_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| {
            if is_sensitive(k) {
                format!("{}=[REDACTED]", k)
            } else {
                format!("{}={}", k, v)
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Copy a JSON body with sensitive fields redacted, at any depth
pub fn redact_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::String(s) if is_sensitive(k) => Value::String(redact_token(s)),
                        _ if is_sensitive(k) => Value::String("[REDACTED]".to_string()),
                        _ => redact_json(v),
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_json).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redact_token() {
        assert_eq!(redact_token("accesstoken-0123456789"), "access...[REDACTED]");
        assert_eq!(redact_token("short"), "[REDACTED]");
    }

    #[test]
    fn test_redact_query() {
        let pairs = vec![
            ("corpid".to_string(), "ww123".to_string()),
            ("corpsecret".to_string(), "s3cr3t".to_string()),
        ];
        assert_eq!(redact_query(&pairs), "corpid=ww123&corpsecret=[REDACTED]");
        assert_eq!(redact_query(&[]), "");
    }

    #[test]
    fn test_redact_json_token_response() {
        let body = json!({
            "errcode": 0,
            "errmsg": "ok",
            "access_token": "SECRET-TOKEN-XYZ-123456",
            "expires_in": 7200
        });

        let redacted = redact_json(&body);
        assert_eq!(redacted["access_token"], "SECRET...[REDACTED]");
        assert_eq!(redacted["errcode"], 0);
        assert_eq!(redacted["expires_in"], 7200);
        assert!(!redacted.to_string().contains("SECRET-TOKEN-XYZ-123456"));
    }

    #[test]
    fn test_redact_json_nested() {
        let body = json!({"data": [{"secret": "abc"}, {"name": "ok"}], "key": 42});
        assert_eq!(
            redact_json(&body),
            json!({"data": [{"secret": "[REDACTED]"}, {"name": "ok"}], "key": "[REDACTED]"})
        );
    }
}
