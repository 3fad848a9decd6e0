//! Email-marketing provider integrations.
//!
//! Each provider wraps one subscribe endpoint. The active provider is chosen
//! by `MARKETING_PROVIDER`; a duplicate-subscriber conflict from any provider
//! is treated as success.

mod buttondown;
mod convertkit;
mod mailerlite;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::FormError;
use crate::core::config::AppConfig;
use crate::core::models::NewsletterSignup;

pub use buttondown::Buttondown;
pub use convertkit::ConvertKit;
pub use mailerlite::MailerLite;

#[async_trait]
pub trait SubscriptionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Forward a validated signup to the provider.
    async fn subscribe(
        &self,
        http_client: &HttpClient,
        signup: &NewsletterSignup,
    ) -> Result<(), FormError>;
}

/// Build the provider selected by configuration.
pub fn from_config(config: &AppConfig) -> Result<Box<dyn SubscriptionProvider>, FormError> {
    match config.marketing_provider.as_str() {
        "buttondown" => Ok(Box::new(Buttondown::new(&config.marketing_api_key))),
        "mailerlite" => Ok(Box::new(MailerLite::new(
            &config.marketing_api_key,
            config.marketing_group_id.as_deref(),
        ))),
        "convertkit" => {
            let form_id = config.marketing_group_id.as_deref().ok_or_else(|| {
                FormError::Config("MARKETING_GROUP_ID is required for convertkit".to_string())
            })?;
            Ok(Box::new(ConvertKit::new(&config.marketing_api_key, form_id)))
        }
        other => Err(FormError::Config(format!(
            "unsupported marketing provider: {}",
            other
        ))),
    }
}

/// Shared non-success handling: read the body for the log and error message,
/// treating a duplicate-subscriber conflict as success.
pub(crate) async fn check_subscribe_response(
    provider: &'static str,
    resp: reqwest::Response,
) -> Result<(), FormError> {
    use tracing::{error, info};

    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    if status == reqwest::StatusCode::CONFLICT {
        info!(provider = provider, "Subscriber already exists, treating as success");
        return Ok(());
    }

    let body_text = resp
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read body>".to_string());
    error!(
        "{} subscribe failed: status={} body={}",
        provider, status, body_text
    );
    Err(FormError::Provider(format!(
        "{}: status {}: {}",
        provider, status, body_text
    )))
}
