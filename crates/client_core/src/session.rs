use crate::{
    error::{LeadError, WizardError},
    lead::{LeadCapture, LeadStatus},
    webhook::{ImageUpload, StyleWebhook},
    wizard::{Wizard, WizardStage},
};

/// Runs wizard actions against a webhook one at a time.
pub struct StyleSession<W: StyleWebhook> {
    webhook: W,
    wizard: Wizard,
}

impl<W: StyleWebhook> StyleSession<W> {
    pub fn new(webhook: W) -> Self {
        Self {
            webhook,
            wizard: Wizard::new(),
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    pub fn webhook(&self) -> &W {
        &self.webhook
    }

    pub async fn analyze(&mut self, image: &ImageUpload) -> Result<WizardStage, WizardError> {
        let token = self.wizard.begin_analysis()?;
        let outcome = self.webhook.submit_analysis(image).await;
        self.wizard.finish_analysis(token, outcome);
        Ok(self.wizard.stage())
    }

    pub async fn find_outfits(&mut self) -> Result<WizardStage, WizardError> {
        let (token, query) = self.wizard.begin_filter_search()?;
        let outcome = self.webhook.submit_filter_search(&query).await;
        self.wizard.finish_filter_search(token, outcome);
        Ok(self.wizard.stage())
    }

    pub async fn request_style_guide(
        &self,
        lead: &mut LeadCapture,
    ) -> Result<LeadStatus, LeadError> {
        let submission = lead.begin_submit(&self.wizard)?;
        let outcome = self
            .webhook
            .submit_lead_capture(&submission)
            .await
            .map(|_| ());
        lead.finish_submit(outcome);
        Ok(lead.status())
    }

    pub fn reset(&mut self) {
        self.wizard.reset();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
