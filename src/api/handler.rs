//! API Lambda handler - thin router that delegates to the form flows.
//!
//! This module handles:
//! - Admission limiting by caller IP (429 on deny)
//! - Request validation (headers, body, fields)
//! - Newsletter signups (delegated to the configured marketing provider)
//! - Reminder requests (delegated to the transactional mailer)

use std::sync::Arc;
use std::time::Instant;

use lambda_runtime::{Error, LambdaEvent};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{helpers, parsing, validate};
use crate::core::config::AppConfig;
use crate::core::models::{NewsletterSignup, ReminderRequest};
use crate::mailer::Mailer;
use crate::providers;
use crate::ratelimit::{Decision, RateLimiter};

/// Lambda handler for the API entrypoint.
///
/// Routes requests to the form flows based on path. The limiter is shared
/// across invocations within one execution environment.
///
/// # Errors
///
/// Returns an error response payload if the request is malformed, over the
/// admission limit, or an upstream provider call fails; otherwise returns a
/// 200 with a JSON body.
#[tracing::instrument(level = "info", skip(event, limiter))]
pub async fn function_handler(
    event: LambdaEvent<Value>,
    limiter: Arc<RateLimiter>,
) -> Result<Value, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let correlation_id = Uuid::new_v4();

    // ========================================================================
    // Extract and validate headers
    // ========================================================================

    let Some(headers) = event.payload.get("headers") else {
        error!("Request missing headers");
        return Ok(helpers::err_response(400, "Missing headers"));
    };

    // ========================================================================
    // Admission check before any other processing
    // ========================================================================

    let caller = parsing::resolve_caller(&event.payload, headers);
    if limiter.check(&caller, Instant::now()) == Decision::Deny {
        warn!(caller = %caller, correlation_id = %correlation_id, "Caller over admission limit");
        return Ok(helpers::too_many_requests());
    }

    // ========================================================================
    // Route to the form flows
    // ========================================================================

    let path_opt = event
        .payload
        .get("rawPath")
        .and_then(|v| v.as_str())
        .or_else(|| event.payload.get("path").and_then(|v| v.as_str()));

    let Some(path) = path_opt else {
        error!("Request missing path");
        return Ok(helpers::err_response(404, "Not found"));
    };
    info!(raw_path = %path, correlation_id = %correlation_id, "Request path");

    if !path.ends_with("/newsletter") && !path.ends_with("/reminder") {
        return Ok(helpers::err_response(404, "Not found"));
    }

    let body = match extract_body(&event.payload) {
        Ok(b) => b,
        Err(response) => return Ok(response),
    };

    let http_client = HttpClient::new();

    if path.ends_with("/newsletter") {
        Ok(handle_newsletter(&config, &http_client, body, correlation_id).await)
    } else {
        Ok(handle_reminder(&config, &http_client, body, correlation_id).await)
    }
}

pub use self::function_handler as handler;

// ============================================================================
// Form Flows
// ============================================================================

async fn handle_newsletter(
    config: &AppConfig,
    http_client: &HttpClient,
    body: &str,
    correlation_id: Uuid,
) -> Value {
    let signup: NewsletterSignup = match parsing::parse_submission(body) {
        Ok(s) => s,
        Err(e) => {
            error!("Signup parse error: {} (corr_id={})", e, correlation_id);
            return helpers::err_response(400, &format!("{e}"));
        }
    };

    if let Err(e) = validate::validate_signup(&signup) {
        warn!("Signup rejected: {} (corr_id={})", e, correlation_id);
        return helpers::err_response(400, &format!("{e}"));
    }

    let provider = match providers::from_config(config) {
        Ok(p) => p,
        Err(e) => {
            error!("Provider config error: {} (corr_id={})", e, correlation_id);
            return helpers::err_response(500, "Provider configuration error");
        }
    };

    if let Err(e) = provider.subscribe(http_client, &signup).await {
        error!("Subscribe failed: {} (corr_id={})", e, correlation_id);
        return helpers::bad_gateway("Could not complete the signup, please try again later");
    }

    // Owner notification is best-effort: the subscriber is already registered.
    let mailer = Mailer::new(config);
    let note = match &signup.name {
        Some(name) => format!("New newsletter signup: {} ({})", signup.email, name),
        None => format!("New newsletter signup: {}", signup.email),
    };
    if let Err(e) = mailer
        .send(http_client, &config.notify_to, "New newsletter signup", &note)
        .await
    {
        warn!("Owner notification failed: {} (corr_id={})", e, correlation_id);
    }

    info!(email = %signup.email, correlation_id = %correlation_id, "Signup completed");
    helpers::ok_message("Thanks for subscribing!")
}

async fn handle_reminder(
    config: &AppConfig,
    http_client: &HttpClient,
    body: &str,
    correlation_id: Uuid,
) -> Value {
    let reminder: ReminderRequest = match parsing::parse_submission(body) {
        Ok(r) => r,
        Err(e) => {
            error!("Reminder parse error: {} (corr_id={})", e, correlation_id);
            return helpers::err_response(400, &format!("{e}"));
        }
    };

    let remind_date = match validate::validate_reminder(&reminder) {
        Ok(d) => d,
        Err(e) => {
            warn!("Reminder rejected: {} (corr_id={})", e, correlation_id);
            return helpers::err_response(400, &format!("{e}"));
        }
    };

    let mailer = Mailer::new(config);

    let note = match &reminder.name {
        Some(name) => format!(
            "New reminder request: {} ({}) for {}",
            reminder.email, name, remind_date
        ),
        None => format!("New reminder request: {} for {}", reminder.email, remind_date),
    };
    if let Err(e) = mailer
        .send(http_client, &config.notify_to, "New reminder request", &note)
        .await
    {
        error!("Reminder notification failed: {} (corr_id={})", e, correlation_id);
        return helpers::bad_gateway("Could not record the reminder, please try again later");
    }

    // Confirmation to the submitter is best-effort.
    let confirmation = format!("We will remind you on {}.", remind_date);
    if let Err(e) = mailer
        .send(http_client, &reminder.email, "Reminder scheduled", &confirmation)
        .await
    {
        warn!("Reminder confirmation failed: {} (corr_id={})", e, correlation_id);
    }

    info!(email = %reminder.email, correlation_id = %correlation_id, "Reminder recorded");
    helpers::ok_message("Reminder scheduled")
}

// ============================================================================
// Request Validation Helpers
// ============================================================================

fn extract_body(payload: &Value) -> Result<&str, Value> {
    let Some(body) = payload.get("body") else {
        error!("Request missing body");
        return Err(helpers::err_response(400, "Missing body"));
    };

    let Some(body_str) = body.as_str() else {
        error!("Request body is not a string");
        return Err(helpers::err_response(400, "Invalid body format"));
    };

    Ok(body_str)
}
