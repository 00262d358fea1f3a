//! Supported output languages and their display strings.
//!
//! Every tag has its own complete row in the locale table. Nothing falls back
//! to another language's wording; an unknown tag is rejected when parsed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::XlfillError;
use crate::types::Severity;

/// Output language of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    Hungarian,
    #[default]
    English,
    German,
}

/// Display strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub affirmative: &'static str,
    pub negative: &'static str,
    pub not_applicable: &'static str,
    pub critical: &'static str,
    pub medium: &'static str,
    pub low: &'static str,
}

const HUNGARIAN: Locale = Locale {
    affirmative: "Igen",
    negative: "Nem",
    not_applicable: "N/A",
    critical: "Kritikus",
    medium: "Közepes",
    low: "Alacsony",
};

const ENGLISH: Locale = Locale {
    affirmative: "Yes",
    negative: "No",
    not_applicable: "N/A",
    critical: "Critical",
    medium: "Medium",
    low: "Low",
};

const GERMAN: Locale = Locale {
    affirmative: "Ja",
    negative: "Nein",
    not_applicable: "N/A",
    critical: "Kritisch",
    medium: "Mittel",
    low: "Gering",
};

impl Language {
    /// All supported languages, in tag order.
    pub const ALL: [Language; 3] = [Language::Hungarian, Language::English, Language::German];

    /// Primary language subtag ("hu", "en", "de").
    pub fn tag(self) -> &'static str {
        match self {
            Language::Hungarian => "hu",
            Language::English => "en",
            Language::German => "de",
        }
    }

    pub fn locale(self) -> &'static Locale {
        match self {
            Language::Hungarian => &HUNGARIAN,
            Language::English => &ENGLISH,
            Language::German => &GERMAN,
        }
    }

    /// Localized label for an error-record severity.
    pub fn severity_label(self, severity: Severity) -> &'static str {
        let locale = self.locale();
        match severity {
            Severity::Critical => locale.critical,
            Severity::Medium => locale.medium,
            Severity::Low => locale.low,
        }
    }
}

impl FromStr for Language {
    type Err = XlfillError;

    /// Accepts the primary subtag in any case, with or without a region
    /// (`"hu"`, `"HU"`, `"hu-HU"`, `"de_AT"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "hu" => Ok(Language::Hungarian),
            "en" => Ok(Language::English),
            "de" => Ok(Language::German),
            _ => Err(XlfillError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = XlfillError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.tag().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
