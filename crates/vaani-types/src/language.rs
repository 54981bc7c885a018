use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of languages the app accepts at its boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Ta,
    Te,
    Mr,
    Bn,
    Gu,
    Kn,
    Ml,
    Pa,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::En,
        Language::Hi,
        Language::Ta,
        Language::Te,
        Language::Mr,
        Language::Bn,
        Language::Gu,
        Language::Kn,
        Language::Ml,
        Language::Pa,
    ];

    /// Two-letter code used on the wire ("en", "hi", ...)
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Ta => "ta",
            Language::Te => "te",
            Language::Mr => "mr",
            Language::Bn => "bn",
            Language::Gu => "gu",
            Language::Kn => "kn",
            Language::Ml => "ml",
            Language::Pa => "pa",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Ta => "Tamil",
            Language::Te => "Telugu",
            Language::Mr => "Marathi",
            Language::Bn => "Bengali",
            Language::Gu => "Gujarati",
            Language::Kn => "Kannada",
            Language::Ml => "Malayalam",
            Language::Pa => "Punjabi",
        }
    }

    /// Regional locale, e.g. "hi-IN"
    pub fn locale(&self) -> &'static str {
        match self {
            Language::En => "en-IN",
            Language::Hi => "hi-IN",
            Language::Ta => "ta-IN",
            Language::Te => "te-IN",
            Language::Mr => "mr-IN",
            Language::Bn => "bn-IN",
            Language::Gu => "gu-IN",
            Language::Kn => "kn-IN",
            Language::Ml => "ml-IN",
            Language::Pa => "pa-IN",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Language::En => "🇬🇧",
            _ => "🇮🇳",
        }
    }

    /// ISO 639-3 tag, the form multilingual MT tokenizers expect
    pub fn iso639_3(&self) -> &'static str {
        match self {
            Language::En => "eng",
            Language::Hi => "hin",
            Language::Ta => "tam",
            Language::Te => "tel",
            Language::Mr => "mar",
            Language::Bn => "ben",
            Language::Gu => "guj",
            Language::Kn => "kan",
            Language::Ml => "mal",
            Language::Pa => "pan",
        }
    }

    /// Exact lookup, no case folding or trimming
    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Supported language codes, alphabetically sorted
pub fn supported_codes() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = Language::ALL.iter().map(Language::code).collect();
    codes.sort_unstable();
    codes
}

/// Ordered (source, target) combination. Same-language pairs are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl LanguagePair {
    pub fn new(source: Language, target: Language) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>(), Ok(lang));
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!("EN".parse::<Language>(), Err(UnknownLanguage("EN".to_string())));
        assert!(" en".parse::<Language>().is_err());
        assert!("xx".parse::<Language>().is_err());
        assert!(Language::from_code("").is_none());
    }

    #[test]
    fn test_supported_codes_sorted() {
        assert_eq!(
            supported_codes(),
            vec!["bn", "en", "gu", "hi", "kn", "ml", "mr", "pa", "ta", "te"]
        );
    }

    #[test]
    fn test_metadata() {
        assert_eq!(Language::Hi.name(), "Hindi");
        assert_eq!(Language::Ta.locale(), "ta-IN");
        assert_eq!(Language::Kn.iso639_3(), "kan");
        assert_eq!(Language::En.flag(), "🇬🇧");
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&LanguagePair::new(Language::En, Language::Hi)).unwrap();
        assert_eq!(json, r#"{"source":"en","target":"hi"}"#);
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(LanguagePair::new(Language::Mr, Language::En).to_string(), "mr -> en");
    }
}
