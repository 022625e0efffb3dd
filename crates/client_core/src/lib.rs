//! Client core for the Chroma style analysis webhook: response recovery,
//! result mapping, webhook transport and the wizard state machine.

pub mod error;
pub mod lead;
pub mod links;
pub mod mapper;
pub mod response;
pub mod session;
pub mod webhook;
pub mod wizard;

pub use error::{LeadError, WebhookError, WizardError};
pub use lead::{LeadCapture, LeadStatus};
pub use session::StyleSession;
pub use webhook::{
    FilterSearchQuery, HttpStyleWebhook, ImageUpload, LeadSubmission, StyleWebhook,
    DEFAULT_WEBHOOK_URL,
};
pub use wizard::{RequestToken, Transition, Wizard, WizardStage};
