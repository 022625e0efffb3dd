use tracing::{info, warn};

use crate::{
    error::{LeadError, WebhookError, WizardError},
    webhook::LeadSubmission,
    wizard::Wizard,
};

pub const LEAD_FAILURE_ALERT: &str = "Es gab einen Fehler. Bitte versuche es erneut.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadStatus {
    #[default]
    Editing,
    Submitting,
    Sent,
}

/// Style guide request form. Its outcome never changes the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadCapture {
    pub first_name: String,
    pub email: String,
    status: LeadStatus,
    alert: Option<String>,
}

impl LeadCapture {
    pub fn new(first_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn status(&self) -> LeadStatus {
        self.status
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn begin_submit(&mut self, wizard: &Wizard) -> Result<LeadSubmission, LeadError> {
        if self.status == LeadStatus::Submitting {
            return Err(LeadError::AlreadySubmitting);
        }
        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            return Err(LeadError::MissingFirstName);
        }
        let email = self.email.trim();
        if !is_plausible_email(email) {
            return Err(LeadError::InvalidEmail(email.to_string()));
        }
        let result = wizard.result().ok_or(WizardError::NoResult)?;

        let submission = LeadSubmission {
            first_name: first_name.to_string(),
            email: email.to_string(),
            gender: wizard.filters().gender,
            analysis_text: result.display_description().to_string(),
            filters: wizard.filters().clone(),
            analysis_id: result.analysis_id.clone(),
        };
        self.status = LeadStatus::Submitting;
        self.alert = None;
        Ok(submission)
    }

    pub fn finish_submit(&mut self, outcome: Result<(), WebhookError>) {
        match outcome {
            Ok(()) => {
                info!("style guide requested");
                self.status = LeadStatus::Sent;
            }
            Err(err) => {
                warn!(error = %err, "style guide request failed");
                self.status = LeadStatus::Editing;
                self.alert = Some(LEAD_FAILURE_ALERT.to_string());
            }
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

#[cfg(test)]
#[path = "tests/lead_tests.rs"]
mod tests;
