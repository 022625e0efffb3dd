use std::{collections::HashMap, fs, path::Path};

use client_core::DEFAULT_WEBHOOK_URL;

pub const CONFIG_FILE: &str = "chroma.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub webhook_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.into(),
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("webhook_url") {
                settings.webhook_url = v.clone();
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
        }
    }

    for key in ["CHROMA_WEBHOOK_URL", "APP__WEBHOOK_URL"] {
        if let Some(v) = env(key).filter(|v| !v.trim().is_empty()) {
            settings.webhook_url = v;
        }
    }

    for key in ["CHROMA_LOG", "APP__LOG"] {
        if let Some(v) = env(key).filter(|v| !v.trim().is_empty()) {
            settings.log_filter = v;
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
