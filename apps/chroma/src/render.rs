//! Plain-text rendering of wizard stages.

use client_core::{
    links::{catalog_link, category_link},
    LeadCapture, LeadStatus, Wizard, WizardStage,
};
use shared::domain::{AnalysisResult, FilterSettings};

pub fn render_wizard(wizard: &Wizard) -> String {
    match wizard.stage() {
        WizardStage::Idle => "Ready for a portrait upload.".to_string(),
        WizardStage::Analyzing => "Analyzing identity...".to_string(),
        WizardStage::FindingOutfits => "Searching outfits...".to_string(),
        WizardStage::Error => render_failure(wizard.debug_payload()),
        WizardStage::Complete => match wizard.result() {
            Some(result) if result.is_degraded() => render_degraded(result),
            Some(result) => render_result(result, wizard.filters()),
            None => "No analysis data received.".to_string(),
        },
    }
}

fn render_failure(debug_payload: Option<&str>) -> String {
    let mut lines = vec![
        "SYSTEM FAILURE".to_string(),
        "Die chromatische Analyse konnte nicht abgeschlossen werden.".to_string(),
    ];
    if let Some(debug) = debug_payload {
        lines.push(String::new());
        lines.push("Critical Data Debugger:".to_string());
        lines.push(debug.to_string());
    }
    lines.join("\n")
}

fn render_degraded(result: &AnalysisResult) -> String {
    let received = serde_json::to_string(result).unwrap_or_default();
    format!("Analysis incomplete: no season type received.\nReceived: {received}")
}

pub fn render_result(result: &AnalysisResult, filters: &FilterSettings) -> String {
    let mut lines = vec![
        result.season_type.clone().unwrap_or_default().to_uppercase(),
        format!("\"{}\"", result.display_description()),
    ];

    if !result.color_palette.is_empty() {
        lines.push(String::new());
        lines.push("Palette:".to_string());
        for color in &result.color_palette {
            lines.push(format!("  {:<16} {}", color.name, color.hex));
        }
    }

    if !result.zalando_search_queries.is_empty() {
        lines.push(String::new());
        lines.push("Recommendations:".to_string());
        for query in &result.zalando_search_queries {
            lines.push(format!("  {query}"));
            lines.push(format!("    {}", catalog_link(query)));
        }
    }

    if !filters.categories.is_empty() && !result.color_palette.is_empty() {
        lines.push(String::new());
        lines.push(format!("Shop ({}):", filters.gender));
        for category in &filters.categories {
            for color in &result.color_palette {
                lines.push(format!("  {category} in {}", color.name));
                lines.push(format!(
                    "    {}",
                    category_link(filters, category, &color.name)
                ));
            }
        }
    }

    lines.join("\n")
}

pub fn render_lead(lead: &LeadCapture) -> String {
    match (lead.status(), lead.alert()) {
        (LeadStatus::Sent, _) => format!("Style guide is on its way to {}.", lead.email.trim()),
        (_, Some(alert)) => alert.to_string(),
        (LeadStatus::Submitting, None) => "Sending style guide request...".to_string(),
        (LeadStatus::Editing, None) => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
