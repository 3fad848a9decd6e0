use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub marketing_provider: String,
    pub marketing_api_key: String,
    pub marketing_group_id: Option<String>,
    pub mail_server_token: String,
    pub mail_from: String,
    pub notify_to: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            marketing_provider: env::var("MARKETING_PROVIDER")
                .map_err(|e| format!("MARKETING_PROVIDER: {}", e))?,
            marketing_api_key: env::var("MARKETING_API_KEY")
                .map_err(|e| format!("MARKETING_API_KEY: {}", e))?,
            marketing_group_id: env::var("MARKETING_GROUP_ID").ok(),
            mail_server_token: env::var("MAIL_SERVER_TOKEN")
                .map_err(|e| format!("MAIL_SERVER_TOKEN: {}", e))?,
            mail_from: env::var("MAIL_FROM").map_err(|e| format!("MAIL_FROM: {}", e))?,
            notify_to: env::var("NOTIFY_TO").map_err(|e| format!("NOTIFY_TO: {}", e))?,
        })
    }
}
