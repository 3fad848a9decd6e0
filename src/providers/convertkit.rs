use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::info;

use super::{SubscriptionProvider, check_subscribe_response};
use crate::FormError;
use crate::core::models::NewsletterSignup;

pub struct ConvertKit {
    api_key: String,
    form_id: String,
}

impl ConvertKit {
    pub fn new(api_key: &str, form_id: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            form_id: form_id.to_string(),
        }
    }
}

#[async_trait]
impl SubscriptionProvider for ConvertKit {
    fn name(&self) -> &'static str {
        "convertkit"
    }

    async fn subscribe(
        &self,
        http_client: &HttpClient,
        signup: &NewsletterSignup,
    ) -> Result<(), FormError> {
        let url = format!(
            "https://api.convertkit.com/v3/forms/{}/subscribe",
            self.form_id
        );
        let mut payload = json!({
            "api_key": self.api_key,
            "email": signup.email,
        });
        if let Some(name) = &signup.name {
            payload["first_name"] = json!(name);
        }

        info!(email = %signup.email, "Forwarding signup to ConvertKit");
        let resp = http_client.post(&url).json(&payload).send().await?;

        check_subscribe_response(self.name(), resp).await
    }
}
