//! Shop search links for recommended queries and palette colors.

use shared::domain::{FilterSettings, Gender, Unrestricted};
use url::form_urlencoded;

const CATALOG_URL: &str = "https://www.zalando.ch/katalog/";
const WOMEN_URL: &str = "https://www.zalando.ch/damen/";
const MEN_URL: &str = "https://www.zalando.ch/herren/";

pub fn catalog_link(query: &str) -> String {
    let words = query.split_whitespace().collect::<Vec<_>>().join(" ");
    with_query(CATALOG_URL, &words)
}

/// Category + color search narrowed by the occasion, fit and season filters.
pub fn category_link(filters: &FilterSettings, category: &str, color_name: &str) -> String {
    let base = match filters.gender {
        Gender::Herren => MEN_URL,
        Gender::Damen => WOMEN_URL,
    };

    let mut parts = vec![category, color_name];
    if !filters.occasion.is_unrestricted() {
        parts.push(filters.occasion.label());
    }
    if !filters.fit.is_unrestricted() {
        parts.push(filters.fit.label());
    }
    if !filters.season.is_unrestricted() {
        parts.push(filters.season.label());
    }

    with_query(base, &parts.join(" "))
}

fn with_query(base: &str, query: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{base}?q={encoded}")
}
