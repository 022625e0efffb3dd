use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{ColorSwatch, FilterSettings, Gender};

/// JSON bodies posted to the style webhook. The image upload is multipart
/// and has no JSON counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WebhookRequest {
    FilterSearch {
        filters: FilterSettings,
        previous_analysis_text: String,
        analysis_id: String,
    },
    StyleGuidePdf {
        first_name: String,
        gender: Gender,
        email: String,
        analysis_text: String,
        filters: FilterSettings,
        analysis_id: String,
    },
}

impl WebhookRequest {
    pub fn mode(&self) -> &'static str {
        match self {
            WebhookRequest::FilterSearch { .. } => "filter_search",
            WebhookRequest::StyleGuidePdf { .. } => "style_guide_pdf",
        }
    }

    pub fn analysis_id(&self) -> &str {
        match self {
            WebhookRequest::FilterSearch { analysis_id, .. }
            | WebhookRequest::StyleGuidePdf { analysis_id, .. } => analysis_id,
        }
    }
}

/// `user_analysis` arrives either as plain text or as a nested object.
/// Anything else, arrays included, is kept as `Other`.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAnalysisField {
    Text(String),
    Detailed(UserAnalysisDetail),
    Other(Value),
}

impl<'de> Deserialize<'de> for UserAnalysisField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => UserAnalysisField::Text(text),
            Value::Object(fields) => {
                let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);
                UserAnalysisField::Detailed(UserAnalysisDetail {
                    description_premium: text("description_premium"),
                    season_type: text("season_type"),
                })
            }
            other => UserAnalysisField::Other(other),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserAnalysisDetail {
    pub description_premium: Option<String>,
    pub season_type: Option<String>,
}

/// Loosely-typed webhook response envelope. Every field is optional and a
/// field of the wrong JSON type decodes as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default, deserialize_with = "lenient_id")]
    pub analysis_id: Option<String>,
    #[serde(default)]
    pub user_analysis: Option<UserAnalysisField>,
    #[serde(default, deserialize_with = "lenient")]
    pub season_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description_premium: Option<String>,
    #[serde(default, deserialize_with = "lenient_palette")]
    pub color_palette: Option<Vec<ColorSwatch>>,
    #[serde(default, deserialize_with = "lenient")]
    pub zalando_search_queries: Option<Vec<String>>,
}

pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

/// Decodes the palette entry by entry. An entry that is not an object
/// becomes a swatch named after its text, with no hex value.
fn lenient_palette<'de, D>(deserializer: D) -> Result<Option<Vec<ColorSwatch>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(entries)) => {
            Some(entries.into_iter().map(swatch_from_value).collect())
        }
        _ => None,
    })
}

fn swatch_from_value(entry: Value) -> ColorSwatch {
    match entry {
        Value::Object(fields) => {
            ColorSwatch::new(text_of(fields.get("name")), text_of(fields.get("hex")))
        }
        other => ColorSwatch::new(text_of(Some(&other)), ""),
    }
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(text_of(value.as_ref()))
}
