//! Upload → analyze → results wizard.
//!
//! The wizard is a plain owned value: whoever drives it calls a `begin_*`
//! method, performs the webhook call, and feeds the outcome back through the
//! matching `finish_*` method together with the token it was handed. Tokens
//! are single-use; a completion whose token no longer matches (because of a
//! reset or a newer request) is dropped without touching state.

use shared::domain::{AnalysisResult, FilterSettings};
use tracing::{debug, info, warn};

use crate::{
    error::{WebhookError, WizardError},
    mapper::{map_analysis, map_search_queries},
    response::decode_payload,
    webhook::FilterSearchQuery,
};

pub const FALLBACK_DEBUG_PAYLOAD: &str = "Keine lesbare Antwort vom Server erhalten.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStage {
    #[default]
    Idle,
    Analyzing,
    Complete,
    FindingOutfits,
    Error,
}

impl WizardStage {
    /// A webhook request is outstanding; triggering actions must be disabled.
    pub fn is_busy(self) -> bool {
        matches!(self, WizardStage::Analyzing | WizardStage::FindingOutfits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Discarded,
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    stage: WizardStage,
    result: Option<AnalysisResult>,
    filters: FilterSettings,
    debug_payload: Option<String>,
    pending: Option<RequestToken>,
    issued: u64,
}

/// Equality covers the session state only; the token counter is ignored.
impl PartialEq for Wizard {
    fn eq(&self, other: &Self) -> bool {
        self.stage == other.stage
            && self.result == other.result
            && self.filters == other.filters
            && self.debug_payload == other.debug_payload
            && self.pending == other.pending
    }
}

impl Eq for Wizard {}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn filters(&self) -> &FilterSettings {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> Result<&mut FilterSettings, WizardError> {
        if self.stage.is_busy() {
            return Err(WizardError::Busy);
        }
        Ok(&mut self.filters)
    }

    pub fn debug_payload(&self) -> Option<&str> {
        self.debug_payload.as_deref()
    }

    pub fn begin_analysis(&mut self) -> Result<RequestToken, WizardError> {
        self.ensure_stage(WizardStage::Idle, "start an analysis")?;
        self.stage = WizardStage::Analyzing;
        self.debug_payload = None;
        let token = self.issue_token();
        info!(token = token.0, "analysis started");
        Ok(token)
    }

    pub fn finish_analysis(
        &mut self,
        token: RequestToken,
        outcome: Result<String, WebhookError>,
    ) -> Transition {
        if !self.accepts(token, WizardStage::Analyzing) {
            return Transition::Discarded;
        }
        self.pending = None;

        match outcome.and_then(|raw| decode_payload(&raw)).map(map_analysis) {
            Ok(result) => {
                info!(
                    analysis_id = %result.analysis_id,
                    season_type = result.season_type.as_deref().unwrap_or("<none>"),
                    colors = result.color_palette.len(),
                    "analysis complete"
                );
                self.result = Some(result);
                self.debug_payload = None;
                self.stage = WizardStage::Complete;
            }
            Err(err) => {
                warn!(error = %err, "analysis failed");
                self.result = None;
                self.debug_payload = Some(debug_payload_for(&err));
                self.stage = WizardStage::Error;
            }
        }
        Transition::Applied
    }

    pub fn begin_filter_search(
        &mut self,
    ) -> Result<(RequestToken, FilterSearchQuery), WizardError> {
        self.ensure_stage(WizardStage::Complete, "search outfits")?;
        let result = self.result.as_ref().ok_or(WizardError::NoResult)?;
        let query = FilterSearchQuery {
            filters: self.filters.clone(),
            previous_analysis_text: result.user_analysis.clone(),
            analysis_id: result.analysis_id.clone(),
        };
        self.stage = WizardStage::FindingOutfits;
        let token = self.issue_token();
        info!(token = token.0, analysis_id = %query.analysis_id, "filter search started");
        Ok((token, query))
    }

    /// Failures are swallowed: the wizard returns to `Complete` with the
    /// previous result untouched.
    pub fn finish_filter_search(
        &mut self,
        token: RequestToken,
        outcome: Result<String, WebhookError>,
    ) -> Transition {
        if !self.accepts(token, WizardStage::FindingOutfits) {
            return Transition::Discarded;
        }
        self.pending = None;
        self.stage = WizardStage::Complete;

        match outcome.and_then(|raw| decode_payload(&raw)) {
            Ok(payload) => {
                let queries = map_search_queries(payload);
                if let Some(result) = self.result.as_mut() {
                    info!(queries = queries.len(), "search queries refreshed");
                    result.zalando_search_queries = queries;
                }
            }
            Err(err) => {
                warn!(error = %err, "filter search failed; keeping previous recommendations");
            }
        }
        Transition::Applied
    }

    /// Back to `Idle` from anywhere. Any outstanding request is orphaned.
    pub fn reset(&mut self) {
        if let Some(token) = self.pending.take() {
            debug!(token = token.0, "reset orphans in-flight request");
        }
        self.stage = WizardStage::Idle;
        self.result = None;
        self.debug_payload = None;
        self.filters = FilterSettings::default();
    }

    fn ensure_stage(&self, expected: WizardStage, action: &'static str) -> Result<(), WizardError> {
        if self.stage.is_busy() {
            return Err(WizardError::Busy);
        }
        if self.stage != expected {
            return Err(WizardError::InvalidTransition {
                stage: self.stage,
                action,
            });
        }
        Ok(())
    }

    fn issue_token(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.pending = Some(token);
        token
    }

    fn accepts(&self, token: RequestToken, stage: WizardStage) -> bool {
        let fresh = self.pending == Some(token) && self.stage == stage;
        if !fresh {
            debug!(token = token.0, stage = ?self.stage, "discarding stale webhook response");
        }
        fresh
    }
}

fn debug_payload_for(err: &WebhookError) -> String {
    if let Some(raw) = err.raw_response().filter(|raw| !raw.is_empty()) {
        return raw.to_string();
    }
    let message = err.to_string();
    if message.is_empty() {
        FALLBACK_DEBUG_PAYLOAD.to_string()
    } else {
        message
    }
}

#[cfg(test)]
#[path = "tests/wizard_tests.rs"]
mod tests;
