use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Failed to parse request: {0}")]
    Parse(String),

    #[error("Invalid submission: {0}")]
    Validation(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Marketing provider request failed: {0}")]
    Provider(String),

    #[error("Transactional email request failed: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FormError {
    fn from(error: reqwest::Error) -> Self {
        FormError::Http(error.to_string())
    }
}

impl From<anyhow::Error> for FormError {
    fn from(error: anyhow::Error) -> Self {
        FormError::Provider(error.to_string())
    }
}

impl From<serde_json::Error> for FormError {
    fn from(error: serde_json::Error) -> Self {
        FormError::Parse(error.to_string())
    }
}
