/// formgate - serverless form handlers for newsletter signups and reminder requests.
///
/// This crate implements a single API Lambda that:
/// 1. Resolves the caller's IP and checks it against an in-memory admission limiter
/// 2. Validates the submitted form fields
/// 3. Forwards newsletter subscribers to the configured email-marketing provider
/// 4. Sends notification emails through a transactional email provider
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - reqwest for the provider and mailer HTTP calls
/// - Tokio for async runtime
///
/// The admission limiter lives for the duration of the execution environment and
/// is discarded with it; nothing in this crate persists across process restarts.
// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod mailer;
pub mod providers;
pub mod ratelimit;

pub use errors::FormError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called at the start of the Lambda
/// binary, before the runtime starts taking requests.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
