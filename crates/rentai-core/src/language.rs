//! Language preference.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tokio::sync::watch;

use crate::error::{RentaiError, Result};

/// Supported interface locales.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
    #[serde(rename = "am")]
    #[strum(serialize = "am")]
    Amharic,
    #[serde(rename = "om")]
    #[strum(serialize = "om")]
    AfaanOromo,
}

impl Language {
    /// Every supported language, default first.
    pub fn all() -> impl Iterator<Item = Language> {
        Language::iter()
    }

    /// Locale code, e.g. `"am"`.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Amharic => "am",
            Language::AfaanOromo => "om",
        }
    }

    /// Name of the language in its own script.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Amharic => "አማርኛ",
            Language::AfaanOromo => "Afaan Oromoo",
        }
    }

    /// Value the recommendation service expects in `TenantPreference.language`.
    pub fn preference_value(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Amharic => "amharic",
            Language::AfaanOromo => "oromo",
        }
    }

    /// Parses a locale code, rejecting anything unsupported.
    pub fn parse(code: &str) -> Result<Self> {
        Self::from_str(code.trim()).map_err(|_| {
            let supported: Vec<&str> = Language::all().map(|l| l.code()).collect();
            RentaiError::validation(format!(
                "unsupported language '{}' (supported: {})",
                code,
                supported.join(", ")
            ))
        })
    }
}

/// Persisted form of the language store (`language-storage`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LanguageSnapshot {
    #[serde(default)]
    pub language: Language,
}

/// Single owner of the language preference.
pub trait LanguageStore: Send + Sync {
    fn get(&self) -> Language;

    fn subscribe(&self) -> watch::Receiver<Language>;

    /// Persists and publishes the new language.
    fn set_language(&self, language: Language) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(LanguageSnapshot::default().language, Language::English);
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!(Language::parse("am").unwrap(), Language::Amharic);
        assert_eq!(Language::parse(" om ").unwrap(), Language::AfaanOromo);
        assert_eq!(Language::Amharic.to_string(), "am");
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        let err = Language::parse("fr").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("en, am, om"));
    }

    #[test]
    fn test_snapshot_wire_format() {
        let json = serde_json::to_string(&LanguageSnapshot {
            language: Language::Amharic,
        })
        .unwrap();
        assert_eq!(json, r#"{"language":"am"}"#);
    }
}
