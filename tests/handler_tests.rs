use std::sync::{Arc, Once};

use formgate::api::handler::function_handler;
use formgate::ratelimit::RateLimiter;
use lambda_runtime::{Context, LambdaEvent};
use serde_json::{Value, json};

static ENV: Once = Once::new();

// The handler loads configuration before routing, so even tests that never
// reach a provider need the full environment present.
fn ensure_env() {
    ENV.call_once(|| unsafe {
        std::env::set_var("MARKETING_PROVIDER", "buttondown");
        std::env::set_var("MARKETING_API_KEY", "test-key");
        std::env::set_var("MAIL_SERVER_TOKEN", "test-token");
        std::env::set_var("MAIL_FROM", "site@example.com");
        std::env::set_var("NOTIFY_TO", "owner@example.com");
    });
}

fn event(payload: Value) -> LambdaEvent<Value> {
    LambdaEvent::new(payload, Context::default())
}

fn status_of(resp: &Value) -> u64 {
    resp["statusCode"].as_u64().expect("statusCode should be a number")
}

#[tokio::test]
async fn test_missing_headers_is_400() {
    ensure_env();
    let limiter = Arc::new(RateLimiter::new());

    let resp = function_handler(event(json!({})), limiter).await.unwrap();
    assert_eq!(status_of(&resp), 400);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    ensure_env();
    let limiter = Arc::new(RateLimiter::new());

    let payload = json!({
        "headers": { "x-forwarded-for": "203.0.113.10" },
        "rawPath": "/api/elsewhere",
        "body": "{}"
    });
    let resp = function_handler(event(payload), limiter).await.unwrap();
    assert_eq!(status_of(&resp), 404);
}

#[tokio::test]
async fn test_fourth_request_from_same_caller_is_429() {
    ensure_env();
    let limiter = Arc::new(RateLimiter::new());

    // An unroutable path keeps the test offline; admission runs before routing.
    let payload = json!({
        "headers": { "x-forwarded-for": "203.0.113.11" },
        "rawPath": "/api/elsewhere",
        "body": "{}"
    });

    for _ in 0..3 {
        let resp = function_handler(event(payload.clone()), Arc::clone(&limiter))
            .await
            .unwrap();
        assert_eq!(status_of(&resp), 404);
    }

    let resp = function_handler(event(payload), limiter).await.unwrap();
    assert_eq!(status_of(&resp), 429);
}

#[tokio::test]
async fn test_unresolvable_caller_is_never_limited() {
    ensure_env();
    let limiter = Arc::new(RateLimiter::new());

    let payload = json!({
        "headers": {},
        "rawPath": "/api/elsewhere",
        "body": "{}"
    });

    for _ in 0..10 {
        let resp = function_handler(event(payload.clone()), Arc::clone(&limiter))
            .await
            .unwrap();
        assert_eq!(status_of(&resp), 404);
    }
}

#[tokio::test]
async fn test_newsletter_rejects_invalid_email_before_any_provider_call() {
    ensure_env();
    let limiter = Arc::new(RateLimiter::new());

    let payload = json!({
        "headers": { "x-forwarded-for": "203.0.113.12" },
        "rawPath": "/api/newsletter",
        "body": json!({ "email": "not-an-email" }).to_string()
    });
    let resp = function_handler(event(payload), limiter).await.unwrap();
    assert_eq!(status_of(&resp), 400);

    let body: Value = serde_json::from_str(resp["body"].as_str().unwrap()).unwrap();
    assert!(body["error"].as_str().unwrap().contains("not a valid email"));
}

#[tokio::test]
async fn test_reminder_rejects_past_date() {
    ensure_env();
    let limiter = Arc::new(RateLimiter::new());

    let payload = json!({
        "headers": { "x-forwarded-for": "203.0.113.13" },
        "rawPath": "/api/reminder",
        "body": json!({ "email": "person@example.com", "remind_at": "2020-01-01" }).to_string()
    });
    let resp = function_handler(event(payload), limiter).await.unwrap();
    assert_eq!(status_of(&resp), 400);
}

#[tokio::test]
async fn test_missing_body_on_known_route_is_400() {
    ensure_env();
    let limiter = Arc::new(RateLimiter::new());

    let payload = json!({
        "headers": { "x-forwarded-for": "203.0.113.14" },
        "rawPath": "/api/newsletter"
    });
    let resp = function_handler(event(payload), limiter).await.unwrap();
    assert_eq!(status_of(&resp), 400);
}
