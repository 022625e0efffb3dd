use serde_json::json;
use shared::domain::ColorSwatch;

use super::*;

fn payload(value: serde_json::Value) -> AnalysisPayload {
    serde_json::from_value(value).expect("payload")
}

#[test]
fn nested_premium_description_becomes_user_analysis() {
    let result = map_analysis(payload(json!({
        "analysis_id": "A1",
        "user_analysis": { "description_premium": "X", "season_type": "Summer" },
        "season_type": "Winter",
        "description_premium": "top-level"
    })));

    assert_eq!(result.user_analysis, "X");
    assert_eq!(result.description_premium.as_deref(), Some("X"));
    assert_eq!(result.season_type.as_deref(), Some("Summer"));
}

#[test]
fn plain_user_analysis_is_kept_and_top_level_fields_fill_in() {
    let result = map_analysis(payload(json!({
        "user_analysis": "desc",
        "season_type": "Winter",
        "description_premium": "premium"
    })));

    assert_eq!(result.user_analysis, "desc");
    assert_eq!(result.season_type.as_deref(), Some("Winter"));
    assert_eq!(result.description_premium.as_deref(), Some("premium"));
}

#[test]
fn nested_object_without_premium_falls_back_to_fixed_phrase() {
    let result = map_analysis(payload(json!({
        "user_analysis": { "season_type": "Spring" }
    })));

    assert_eq!(result.user_analysis, FALLBACK_USER_ANALYSIS);
    assert_eq!(result.season_type.as_deref(), Some("Spring"));
}

#[test]
fn empty_payload_maps_to_populated_defaults() {
    let result = map_analysis(AnalysisPayload::default());

    assert_eq!(result.user_analysis, FALLBACK_USER_ANALYSIS);
    assert!(!result.analysis_id.is_empty());
    assert!(result.analysis_id.parse::<i64>().is_ok());
    assert_eq!(result.season_type, None);
    assert_eq!(result.description_premium, None);
    assert!(result.color_palette.is_empty());
    assert!(result.zalando_search_queries.is_empty());
}

#[test]
fn empty_strings_count_as_missing() {
    let result = map_analysis(payload(json!({
        "analysis_id": "",
        "user_analysis": "",
        "season_type": ""
    })));

    assert_ne!(result.analysis_id, "");
    assert_eq!(result.user_analysis, FALLBACK_USER_ANALYSIS);
    assert_eq!(result.season_type, None);
}

#[test]
fn non_text_user_analysis_is_ignored() {
    let result = map_analysis(payload(json!({ "user_analysis": 17 })));
    assert_eq!(result.user_analysis, FALLBACK_USER_ANALYSIS);
}

#[test]
fn array_user_analysis_falls_back_to_fixed_phrase() {
    let result = map_analysis(payload(json!({ "user_analysis": ["rich text", "Winter"] })));

    assert_eq!(result.user_analysis, FALLBACK_USER_ANALYSIS);
    assert_eq!(result.season_type, None);
    assert_eq!(result.description_premium, None);
}

#[test]
fn mixed_palette_keeps_every_entry() {
    let result = map_analysis(payload(json!({
        "color_palette": [{ "name": "Navy", "hex": "#1A2B3C" }, "Black"]
    })));

    assert_eq!(
        result.color_palette,
        vec![
            ColorSwatch::new("Navy", "#1A2B3C"),
            ColorSwatch::new("Black", "")
        ]
    );
}

#[test]
fn palette_and_queries_keep_order() {
    let result = map_analysis(payload(json!({
        "color_palette": [
            { "name": "Navy", "hex": "#1A2B3C" },
            { "name": "Sand", "hex": "#D8C3A5" }
        ],
        "zalando_search_queries": ["navy blazer", "sand chinos"]
    })));

    assert_eq!(
        result.color_palette,
        vec![
            ColorSwatch::new("Navy", "#1A2B3C"),
            ColorSwatch::new("Sand", "#D8C3A5")
        ]
    );
    assert_eq!(
        result.zalando_search_queries,
        vec!["navy blazer".to_string(), "sand chinos".to_string()]
    );
}

#[test]
fn search_queries_default_to_empty() {
    assert!(map_search_queries(AnalysisPayload::default()).is_empty());
    assert_eq!(
        map_search_queries(payload(json!({ "zalando_search_queries": ["new1", "new2"] }))),
        vec!["new1".to_string(), "new2".to_string()]
    );
}
