//! Maps a language pair to the backend that serves it.
//!
//! The table is fixed at build time and constructed once per process. Lookup
//! fails closed: a pair missing from the table is an error, never a
//! substitution with some default language.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, LazyLock};

use vaani_types::{Language, LanguagePair};

use crate::backend::{BackendDescriptor, BackendTags};
use crate::error::TranslateError;

/// (source, target, backend id, multilingual target token)
pub type PairEntry = (Language, Language, &'static str, Option<&'static str>);

const SUPPORTED_PAIRS: &[PairEntry] = &[
    (Language::En, Language::Hi, "Helsinki-NLP/opus-mt-en-hi", None),
    (Language::Hi, Language::En, "Helsinki-NLP/opus-mt-hi-en", None),
    (Language::En, Language::Ta, "Helsinki-NLP/opus-mt-en-ta", None),
    (Language::Ta, Language::En, "Helsinki-NLP/opus-mt-ta-en", None),
    (Language::En, Language::Te, "Helsinki-NLP/opus-mt-en-te", None),
    (Language::Te, Language::En, "Helsinki-NLP/opus-mt-te-en", None),
    (Language::En, Language::Bn, "Helsinki-NLP/opus-mt-en-bn", None),
    (Language::Bn, Language::En, "Helsinki-NLP/opus-mt-bn-en", None),
    (Language::En, Language::Mr, "Helsinki-NLP/opus-mt-en-mr", None),
    (Language::Mr, Language::En, "Helsinki-NLP/opus-mt-mr-en", None),
    (Language::En, Language::Gu, "Helsinki-NLP/opus-mt-en-gu", None),
    (Language::Gu, Language::En, "Helsinki-NLP/opus-mt-gu-en", None),
    (Language::En, Language::Pa, "Helsinki-NLP/opus-mt-en-pa", None),
    (Language::Pa, Language::En, "Helsinki-NLP/opus-mt-pa-en", None),
    // Dravidian multilingual models, shared across pairs
    (Language::En, Language::Kn, "Helsinki-NLP/opus-mt-en-dra", Some(">>kan<<")),
    (Language::En, Language::Ml, "Helsinki-NLP/opus-mt-en-dra", Some(">>mal<<")),
    (Language::Kn, Language::En, "Helsinki-NLP/opus-mt-dra-en", None),
    (Language::Ml, Language::En, "Helsinki-NLP/opus-mt-dra-en", None),
];

static SHARED: LazyLock<Arc<PairResolver>> =
    LazyLock::new(|| Arc::new(PairResolver::from_entries(SUPPORTED_PAIRS)));

#[derive(Debug, Clone)]
pub struct PairResolver {
    table: HashMap<LanguagePair, BackendDescriptor>,
}

impl PairResolver {
    /// Process-wide resolver over the built-in table
    pub fn shared() -> Arc<PairResolver> {
        Arc::clone(&SHARED)
    }

    pub fn from_entries(entries: &[PairEntry]) -> Self {
        let table = entries
            .iter()
            .map(|&(source, target, backend_id, target_token)| {
                let pair = LanguagePair::new(source, target);
                let descriptor = BackendDescriptor {
                    backend_id,
                    pair,
                    tags: BackendTags {
                        source_tag: source.iso639_3(),
                        target_tag: target.iso639_3(),
                        target_token,
                    },
                };
                (pair, descriptor)
            })
            .collect();

        Self { table }
    }

    /// Resolve raw codes. Unknown codes fail the same way unsupported pairs do.
    pub fn resolve(
        &self,
        source: &str,
        target: &str,
    ) -> Result<&BackendDescriptor, TranslateError> {
        let unsupported = || TranslateError::UnsupportedLanguagePair {
            from: source.to_string(),
            to: target.to_string(),
        };

        let (Some(src), Some(tgt)) = (Language::from_code(source), Language::from_code(target))
        else {
            return Err(unsupported());
        };

        self.table
            .get(&LanguagePair::new(src, tgt))
            .ok_or_else(unsupported)
    }

    pub fn resolve_pair(&self, pair: LanguagePair) -> Result<&BackendDescriptor, TranslateError> {
        self.table
            .get(&pair)
            .ok_or_else(|| TranslateError::UnsupportedLanguagePair {
                from: pair.source.code().to_string(),
                to: pair.target.code().to_string(),
            })
    }

    pub fn supported_pairs(&self) -> Vec<LanguagePair> {
        let mut pairs: Vec<LanguagePair> = self.table.keys().copied().collect();
        pairs.sort();
        pairs
    }

    /// Distinct backend identities referenced by the table
    pub fn backend_ids(&self) -> BTreeSet<&'static str> {
        self.table.values().map(|d| d.backend_id).collect()
    }
}

impl Default for PairResolver {
    fn default() -> Self {
        Self::from_entries(SUPPORTED_PAIRS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_pair_resolves() {
        let resolver = PairResolver::shared();
        for &(source, target, backend_id, _) in SUPPORTED_PAIRS {
            let descriptor = resolver.resolve(source.code(), target.code()).unwrap();
            assert_eq!(descriptor.backend_id, backend_id);
            assert_eq!(descriptor.pair, LanguagePair::new(source, target));
        }
        assert_eq!(resolver.supported_pairs().len(), SUPPORTED_PAIRS.len());
    }

    #[test]
    fn test_tags_are_iso639_3() {
        let resolver = PairResolver::default();
        let descriptor = resolver.resolve("en", "hi").unwrap();
        assert_eq!(descriptor.tags.source_tag, "eng");
        assert_eq!(descriptor.tags.target_tag, "hin");
        assert_eq!(descriptor.tags.target_token, None);

        let descriptor = resolver.resolve("en", "ml").unwrap();
        assert_eq!(descriptor.tags.target_token, Some(">>mal<<"));
    }

    #[test]
    fn test_unknown_code_fails_closed() {
        let resolver = PairResolver::default();
        match resolver.resolve("en", "xx") {
            Err(TranslateError::UnsupportedLanguagePair { from, to }) => {
                assert_eq!(from, "en");
                assert_eq!(to, "xx");
            }
            other => panic!("Expected UnsupportedLanguagePair, got {:?}", other),
        }
    }

    #[test]
    fn test_supported_languages_without_a_model_fail() {
        let resolver = PairResolver::default();
        // Both languages exist, but no backend serves the pair
        assert!(resolver.resolve("hi", "ta").is_err());
        assert!(resolver.resolve_pair(LanguagePair::new(Language::Kn, Language::Ml)).is_err());
    }

    #[test]
    fn test_same_language_pair_is_unsupported() {
        let resolver = PairResolver::default();
        let err = resolver.resolve("en", "en").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported language pair: en -> en");
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        let resolver = PairResolver::default();
        assert!(resolver.resolve("EN", "hi").is_err());
    }

    #[test]
    fn test_multilingual_backend_is_shared() {
        let resolver = PairResolver::default();
        let kn = resolver.resolve("en", "kn").unwrap();
        let ml = resolver.resolve("en", "ml").unwrap();
        assert_eq!(kn.backend_id, ml.backend_id);
        assert_ne!(kn.tags, ml.tags);
        assert!(resolver.backend_ids().len() < SUPPORTED_PAIRS.len());
    }
}
