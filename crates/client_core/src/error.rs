use thiserror::Error;

use crate::wizard::WizardStage;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("HTTP Error: {status}")]
    Http { status: u16 },
    #[error("no JSON object found in webhook response")]
    MalformedResponse { raw: String },
    #[error("webhook response is not valid JSON: {source}")]
    Decode {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("unsupported media type '{0}', expected an image")]
    UnsupportedMedia(String),
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid webhook endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl WebhookError {
    /// The response body the failure was observed on, when one was read.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            WebhookError::MalformedResponse { raw } | WebhookError::Decode { raw, .. } => {
                Some(raw.as_str())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WebhookError {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => WebhookError::Http {
                status: status.as_u16(),
            },
            None => WebhookError::Network(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("a webhook request is already in flight")]
    Busy,
    #[error("cannot {action} while {stage:?}")]
    InvalidTransition {
        stage: WizardStage,
        action: &'static str,
    },
    #[error("no analysis result available")]
    NoResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    #[error("first name is required")]
    MissingFirstName,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("style guide request already submitted")]
    AlreadySubmitting,
    #[error(transparent)]
    Wizard(#[from] WizardError),
}
