use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::info;

use super::{SubscriptionProvider, check_subscribe_response};
use crate::FormError;
use crate::core::models::NewsletterSignup;

const SUBSCRIBERS_URL: &str = "https://connect.mailerlite.com/api/subscribers";

pub struct MailerLite {
    api_key: String,
    group_id: Option<String>,
}

impl MailerLite {
    pub fn new(api_key: &str, group_id: Option<&str>) -> Self {
        Self {
            api_key: api_key.to_string(),
            group_id: group_id.map(ToString::to_string),
        }
    }
}

#[async_trait]
impl SubscriptionProvider for MailerLite {
    fn name(&self) -> &'static str {
        "mailerlite"
    }

    async fn subscribe(
        &self,
        http_client: &HttpClient,
        signup: &NewsletterSignup,
    ) -> Result<(), FormError> {
        let mut payload = json!({ "email": signup.email });
        if let Some(name) = &signup.name {
            payload["fields"] = json!({ "name": name });
        }
        if let Some(group_id) = &self.group_id {
            payload["groups"] = json!([group_id]);
        }

        info!(email = %signup.email, "Forwarding signup to MailerLite");
        let resp = http_client
            .post(SUBSCRIBERS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await?;

        check_subscribe_response(self.name(), resp).await
    }
}
