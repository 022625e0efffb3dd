use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::OptionError, protocol::lenient_text};

macro_rules! filter_option {
    ($name:ident, $field:literal, default = $default:ident, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = OptionError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let wanted = value.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label().to_lowercase() == wanted)
                    .ok_or_else(|| OptionError::unknown($field, value))
            }
        }
    };
}

filter_option!(Gender, "gender", default = Damen, {
    Damen => "Damen",
    Herren => "Herren",
});

filter_option!(Occasion, "occasion", default = Freizeit, {
    Freizeit => "Freizeit",
    Alle => "Alle",
    Business => "Business",
    Casual => "Casual",
    Party => "Party",
    Hochzeit => "Hochzeit",
    Sport => "Sport",
});

filter_option!(Budget, "budget", default = Mittel, {
    Mittel => "Mittel",
    Alle => "Alle",
    Low => "€",
    Mid => "€€",
    High => "€€€",
});

filter_option!(Vibe, "vibe", default = Minimalistisch, {
    Minimalistisch => "Minimalistisch",
    Klassisch => "Klassisch",
    Elegant => "Elegant",
    Sportlich => "Sportlich",
});

filter_option!(Season, "season", default = Uebergang, {
    Uebergang => "Übergang",
    Alle => "Alle",
    Fruehling => "Frühling",
    Sommer => "Sommer",
    Herbst => "Herbst",
    Winter => "Winter",
});

filter_option!(Fit, "fit", default = Regular, {
    Regular => "Regular",
    Alle => "Alle",
    SlimFit => "Slim Fit",
    RegularFit => "Regular Fit",
    Oversized => "Oversized",
    Petite => "Petite",
    Tall => "Tall",
});

const WOMEN_CATEGORIES: &[&str] = &[
    "Blazer",
    "Kleider",
    "Strickmode",
    "Hosen",
    "Blusen",
    "Mäntel",
    "Shirts & Tops",
    "Röcke",
];

const MEN_CATEGORIES: &[&str] = &[
    "Sakkos",
    "Hemden",
    "Strickwaren",
    "Hosen",
    "Jacken",
    "Mäntel",
    "T-Shirts",
    "Anzüge",
];

impl Gender {
    /// Clothing categories the shop offers for this gender.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Gender::Damen => WOMEN_CATEGORIES,
            Gender::Herren => MEN_CATEGORIES,
        }
    }
}

/// Occasion, season and fit values of `Alle` mean "no restriction".
pub trait Unrestricted {
    fn is_unrestricted(&self) -> bool;
}

impl Unrestricted for Occasion {
    fn is_unrestricted(&self) -> bool {
        *self == Occasion::Alle
    }
}

impl Unrestricted for Season {
    fn is_unrestricted(&self) -> bool {
        *self == Season::Alle
    }
}

impl Unrestricted for Fit {
    fn is_unrestricted(&self) -> bool {
        *self == Fit::Alle
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSettings {
    pub gender: Gender,
    pub occasion: Occasion,
    pub budget: Budget,
    pub vibe: Vibe,
    pub season: Season,
    pub fit: Fit,
    pub categories: Vec<String>,
}

impl FilterSettings {
    /// Switches gender and drops selected categories the new catalog lacks.
    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
        let catalog = gender.categories();
        self.categories
            .retain(|category| catalog.contains(&category.as_str()));
    }

    /// Adds or removes a category label. Returns whether it is now selected.
    pub fn toggle_category(&mut self, category: &str) -> Result<bool, OptionError> {
        let wanted = category.trim().to_lowercase();
        let Some(known) = self
            .gender
            .categories()
            .iter()
            .find(|known| known.to_lowercase() == wanted)
        else {
            return Err(OptionError::UnknownCategory {
                gender: self.gender.to_string(),
                category: category.to_string(),
            });
        };

        if let Some(pos) = self.categories.iter().position(|c| c == known) {
            self.categories.remove(pos);
            Ok(false)
        } else {
            self.categories.push((*known).to_string());
            Ok(true)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorSwatch {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub hex: String,
}

impl ColorSwatch {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_id: String,
    pub user_analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_premium: Option<String>,
    pub color_palette: Vec<ColorSwatch>,
    pub zalando_search_queries: Vec<String>,
}

impl AnalysisResult {
    /// Narrative to show and to send along with a guide request.
    pub fn display_description(&self) -> &str {
        self.description_premium
            .as_deref()
            .unwrap_or(&self.user_analysis)
    }

    /// A result without a season type cannot be rendered as a full profile.
    pub fn is_degraded(&self) -> bool {
        self.season_type.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_match_session_start_values() {
        let filters = FilterSettings::default();
        assert_eq!(filters.gender, Gender::Damen);
        assert_eq!(filters.occasion, Occasion::Freizeit);
        assert_eq!(filters.budget, Budget::Mittel);
        assert_eq!(filters.vibe, Vibe::Minimalistisch);
        assert_eq!(filters.season, Season::Uebergang);
        assert_eq!(filters.fit, Fit::Regular);
        assert!(filters.categories.is_empty());
    }

    #[test]
    fn filters_serialize_with_wire_labels() {
        let value = serde_json::to_value(FilterSettings::default()).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "gender": "Damen",
                "occasion": "Freizeit",
                "budget": "Mittel",
                "vibe": "Minimalistisch",
                "season": "Übergang",
                "fit": "Regular",
                "categories": []
            })
        );
    }

    #[test]
    fn options_parse_case_insensitively() {
        assert_eq!("herren".parse::<Gender>(), Ok(Gender::Herren));
        assert_eq!(" slim fit ".parse::<Fit>(), Ok(Fit::SlimFit));
        assert_eq!("ÜBERGANG".parse::<Season>(), Ok(Season::Uebergang));
        assert_eq!("€€".parse::<Budget>(), Ok(Budget::Mid));
    }

    #[test]
    fn unknown_option_names_the_field() {
        let err = "Gala".parse::<Occasion>().expect_err("must fail");
        assert_eq!(err, OptionError::unknown("occasion", "Gala"));
        assert_eq!(err.to_string(), "unknown occasion option 'Gala'");
    }

    #[test]
    fn toggle_category_adds_then_removes() {
        let mut filters = FilterSettings::default();
        assert_eq!(filters.toggle_category("blazer"), Ok(true));
        assert_eq!(filters.categories, vec!["Blazer".to_string()]);
        assert_eq!(filters.toggle_category("Blazer"), Ok(false));
        assert!(filters.categories.is_empty());
    }

    #[test]
    fn toggle_category_ignores_case_beyond_ascii() {
        let mut filters = FilterSettings::default();
        assert_eq!(filters.toggle_category("MÄNTEL"), Ok(true));
        assert_eq!(filters.categories, vec!["Mäntel".to_string()]);
        assert_eq!("ÜBERGANG".parse::<Season>(), Ok(Season::Uebergang));
    }

    #[test]
    fn toggle_category_rejects_labels_outside_catalog() {
        let mut filters = FilterSettings::default();
        assert!(matches!(
            filters.toggle_category("Sakkos"),
            Err(OptionError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn switching_gender_keeps_only_shared_categories() {
        let mut filters = FilterSettings::default();
        filters.toggle_category("Hosen").expect("hosen");
        filters.toggle_category("Kleider").expect("kleider");
        filters.toggle_category("Mäntel").expect("mäntel");

        filters.set_gender(Gender::Herren);

        assert_eq!(filters.gender, Gender::Herren);
        assert_eq!(
            filters.categories,
            vec!["Hosen".to_string(), "Mäntel".to_string()]
        );
    }

    #[test]
    fn display_description_prefers_premium_text() {
        let mut result = AnalysisResult {
            analysis_id: "A1".into(),
            user_analysis: "basic".into(),
            season_type: Some("Winter".into()),
            description_premium: None,
            color_palette: Vec::new(),
            zalando_search_queries: Vec::new(),
        };
        assert_eq!(result.display_description(), "basic");
        assert!(!result.is_degraded());

        result.description_premium = Some("premium".into());
        result.season_type = None;
        assert_eq!(result.display_description(), "premium");
        assert!(result.is_degraded());
    }
}
