use chrono::Utc;
use shared::{
    domain::AnalysisResult,
    protocol::{AnalysisPayload, UserAnalysisDetail, UserAnalysisField},
};

pub const FALLBACK_USER_ANALYSIS: &str = "Dein Style-Profil";

/// Builds the canonical result from a decoded webhook payload.
///
/// Nested `user_analysis` values win over their top-level twins, and empty
/// strings are treated as missing.
pub fn map_analysis(payload: AnalysisPayload) -> AnalysisResult {
    let AnalysisPayload {
        analysis_id,
        user_analysis,
        season_type,
        description_premium,
        color_palette,
        zalando_search_queries,
    } = payload;

    let (plain_text, detail) = match user_analysis {
        Some(UserAnalysisField::Text(text)) => {
            (non_empty(Some(text)), UserAnalysisDetail::default())
        }
        Some(UserAnalysisField::Detailed(detail)) => (None, detail),
        Some(UserAnalysisField::Other(_)) | None => (None, UserAnalysisDetail::default()),
    };
    let nested_premium = non_empty(detail.description_premium);

    AnalysisResult {
        analysis_id: non_empty(analysis_id).unwrap_or_else(fallback_analysis_id),
        user_analysis: nested_premium
            .clone()
            .or(plain_text)
            .unwrap_or_else(|| FALLBACK_USER_ANALYSIS.to_string()),
        season_type: non_empty(detail.season_type).or_else(|| non_empty(season_type)),
        description_premium: nested_premium.or_else(|| non_empty(description_premium)),
        color_palette: color_palette.unwrap_or_default(),
        zalando_search_queries: zalando_search_queries.unwrap_or_default(),
    }
}

/// Filter searches only contribute fresh search queries.
pub fn map_search_queries(payload: AnalysisPayload) -> Vec<String> {
    payload.zalando_search_queries.unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn fallback_analysis_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

#[cfg(test)]
#[path = "tests/mapper_tests.rs"]
mod tests;
