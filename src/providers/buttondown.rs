use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::info;

use super::{SubscriptionProvider, check_subscribe_response};
use crate::FormError;
use crate::core::models::NewsletterSignup;

const SUBSCRIBERS_URL: &str = "https://api.buttondown.email/v1/subscribers";

pub struct Buttondown {
    api_key: String,
}

impl Buttondown {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl SubscriptionProvider for Buttondown {
    fn name(&self) -> &'static str {
        "buttondown"
    }

    async fn subscribe(
        &self,
        http_client: &HttpClient,
        signup: &NewsletterSignup,
    ) -> Result<(), FormError> {
        let mut payload = json!({ "email_address": signup.email });
        if let Some(name) = &signup.name {
            payload["metadata"] = json!({ "name": name });
        }

        info!(email = %signup.email, "Forwarding signup to Buttondown");
        let resp = http_client
            .post(SUBSCRIBERS_URL)
            .header("Authorization", format!("Token {}", self.api_key))
            .json(&payload)
            .send()
            .await?;

        check_subscribe_response(self.name(), resp).await
    }
}
