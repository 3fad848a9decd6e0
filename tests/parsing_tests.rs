use formgate::api::parsing;
use formgate::core::models::{NewsletterSignup, ReminderRequest};
use serde_json::json;

#[test]
fn test_get_header_value_is_case_insensitive() {
    let headers = json!({ "X-Forwarded-For": "198.51.100.4" });
    assert_eq!(
        parsing::get_header_value(&headers, "x-forwarded-for"),
        Some("198.51.100.4")
    );
    assert_eq!(parsing::get_header_value(&headers, "X-Forwarded-For"), Some("198.51.100.4"));
    assert_eq!(parsing::get_header_value(&headers, "content-type"), None);
}

#[test]
fn test_v_str_walks_nested_objects() {
    let payload = json!({ "requestContext": { "http": { "sourceIp": "198.51.100.4" } } });
    assert_eq!(
        parsing::v_str(&payload, &["requestContext", "http", "sourceIp"]),
        Some("198.51.100.4")
    );
    assert_eq!(parsing::v_str(&payload, &["requestContext", "missing"]), None);
}

#[test]
fn test_resolve_caller_prefers_forwarded_for_first_hop() {
    let payload = json!({});
    let headers = json!({ "x-forwarded-for": "203.0.113.9, 198.51.100.4" });
    assert_eq!(parsing::resolve_caller(&payload, &headers), "203.0.113.9");
}

#[test]
fn test_resolve_caller_falls_back_to_source_ip() {
    let payload = json!({ "requestContext": { "http": { "sourceIp": "198.51.100.4" } } });
    let headers = json!({});
    assert_eq!(parsing::resolve_caller(&payload, &headers), "198.51.100.4");
}

#[test]
fn test_resolve_caller_uses_sentinel_when_unresolvable() {
    let payload = json!({});
    let headers = json!({});
    assert_eq!(parsing::resolve_caller(&payload, &headers), "unknown");
}

#[test]
fn test_parse_form_body_decodes_components() {
    let fields = parsing::parse_form_body("email=person%40example.com&name=Ada+Lovelace").unwrap();
    assert_eq!(fields.get("email").map(String::as_str), Some("person@example.com"));
    assert_eq!(fields.get("name").map(String::as_str), Some("Ada Lovelace"));
}

#[test]
fn test_parse_submission_from_json() {
    let signup: NewsletterSignup =
        parsing::parse_submission(r#"{"email": "person@example.com", "name": "Ada"}"#).unwrap();
    assert_eq!(signup.email, "person@example.com");
    assert_eq!(signup.name.as_deref(), Some("Ada"));
}

#[test]
fn test_parse_submission_from_form_body() {
    let reminder: ReminderRequest =
        parsing::parse_submission("email=person%40example.com&remind_at=2027-01-15").unwrap();
    assert_eq!(reminder.email, "person@example.com");
    assert_eq!(reminder.remind_at, "2027-01-15");
    assert_eq!(reminder.name, None);
}

#[test]
fn test_parse_submission_reports_missing_fields() {
    let result: Result<ReminderRequest, _> = parsing::parse_submission("email=person%40example.com");
    assert!(result.is_err());

    let result: Result<NewsletterSignup, _> = parsing::parse_submission("{not json");
    assert!(result.is_err());
}
