use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown {field} option '{value}'")]
    UnknownOption { field: &'static str, value: String },
    #[error("category '{category}' is not offered for {gender}")]
    UnknownCategory { gender: String, category: String },
}

impl OptionError {
    pub fn unknown(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownOption {
            field,
            value: value.into(),
        }
    }
}
