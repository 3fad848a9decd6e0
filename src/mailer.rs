//! Transactional email client (Postmark JSON API).

use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::{error, info};

use crate::FormError;
use crate::core::config::AppConfig;

const POSTMARK_EMAIL_URL: &str = "https://api.postmarkapp.com/email";

pub struct Mailer {
    server_token: String,
    from: String,
}

impl Mailer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            server_token: config.mail_server_token.clone(),
            from: config.mail_from.clone(),
        }
    }

    /// Send a plain-text email. Returns `FormError::Mail` on any non-success
    /// status, with the response body in the message.
    pub async fn send(
        &self,
        http_client: &HttpClient,
        to: &str,
        subject: &str,
        text_body: &str,
    ) -> Result<(), FormError> {
        let payload = json!({
            "From": self.from,
            "To": to,
            "Subject": subject,
            "TextBody": text_body,
            "MessageStream": "outbound",
        });

        let resp = http_client
            .post(POSTMARK_EMAIL_URL)
            .header("Accept", "application/json")
            .header("X-Postmark-Server-Token", &self.server_token)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!("Postmark send failed: status={} body={}", status, body_text);
            return Err(FormError::Mail(format!("status {}: {}", status, body_text)));
        }

        info!(to = %to, subject = %subject, "Sent transactional email");
        Ok(())
    }
}
