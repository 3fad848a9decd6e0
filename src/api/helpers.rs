//! Common helper functions for API handlers.
//!
//! Response builders for the Lambda proxy response shape.

use serde_json::{Value, json};

/// Returns a 200 OK response with an empty JSON body.
#[must_use]
pub fn ok_empty() -> Value {
    json!({ "statusCode": 200, "body": "{}" })
}

/// Returns a 200 OK response with a JSON `message` body.
#[must_use]
pub fn ok_message(text: &str) -> Value {
    json!({
        "statusCode": 200,
        "body": json!({ "message": text }).to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}

/// Returns a 429 response for callers denied by the admission limiter.
#[must_use]
pub fn too_many_requests() -> Value {
    err_response(429, "Too many requests, please try again later")
}

/// Returns a 502 response for upstream provider failures.
#[must_use]
pub fn bad_gateway(message: &str) -> Value {
    err_response(502, message)
}
