use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsletterSignup {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    // ISO date (YYYY-MM-DD) the submitter wants to be reminded on
    pub remind_at: String,
}
