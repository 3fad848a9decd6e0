use std::collections::HashMap;

use serde_json::Value;

use crate::FormError;
use crate::ratelimit::UNKNOWN_CALLER;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Resolve the caller identifier for rate limiting.
///
/// Prefers the first hop of `X-Forwarded-For`, then the request-context source
/// IP. Requests with no resolvable origin get the sentinel, which the limiter
/// admits without tracking.
pub fn resolve_caller(payload: &Value, headers: &Value) -> String {
    if let Some(xff) = get_header_value(headers, "x-forwarded-for") {
        if let Some(first) = xff.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    v_str(payload, &["requestContext", "http", "sourceIp"])
        .or_else(|| v_str(payload, &["requestContext", "identity", "sourceIp"]))
        .map(ToString::to_string)
        .unwrap_or_else(|| UNKNOWN_CALLER.to_string())
}

/// Parse a URL-encoded form body into a key/value map.
pub fn parse_form_body(body: &str) -> Result<HashMap<String, String>, FormError> {
    let mut fields = HashMap::new();
    for pair in body.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (raw_key, raw_val) = match pair.find('=') {
            Some(idx) => (&pair[..idx], &pair[idx + 1..]),
            None => (pair, ""),
        };
        let key = decode_form_component(raw_key)?;
        let val = decode_form_component(raw_val)?;
        fields.insert(key, val);
    }
    Ok(fields)
}

fn decode_form_component(raw: &str) -> Result<String, FormError> {
    let plus_decoded = raw.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(|cow| cow.into_owned())
        .map_err(|e| FormError::Parse(format!("Invalid form encoding: {}", e)))
}

/// Deserialize a submission from a JSON body, falling back to URL-encoded
/// form fields. Static site forms post both shapes depending on the frontend.
pub fn parse_submission<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, FormError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') {
        return serde_json::from_str(trimmed)
            .map_err(|e| FormError::Parse(format!("Invalid JSON body: {}", e)));
    }

    let fields = parse_form_body(body)?;
    let map: serde_json::Map<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    serde_json::from_value(Value::Object(map))
        .map_err(|e| FormError::Parse(format!("Missing or invalid form field: {}", e)))
}
