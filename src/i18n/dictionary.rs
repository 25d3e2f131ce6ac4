//! Translation dictionary: language name → (source string → translated string).
//!
//! Loaded once per page session from `translations.json` and treated as
//! read-only afterwards.

use crate::i18n::Language;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Error raised when a translations document does not have the expected shape.
#[derive(Debug, Error)]
#[error("translations document must map language names to string tables: {0}")]
pub struct DictionaryError(#[from] serde_json::Error);

/// Language-keyed string substitution table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TranslationDictionary {
    languages: HashMap<String, HashMap<String, String>>,
}

impl TranslationDictionary {
    /// An empty dictionary; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dictionary from an already-parsed translations document.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DictionaryError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Add (or replace) one entry.
    pub fn insert(
        &mut self,
        language: &Language,
        source: impl Into<String>,
        translated: impl Into<String>,
    ) {
        self.languages
            .entry(language.name().to_string())
            .or_default()
            .insert(source.into(), translated.into());
    }

    /// Look up the translation of `source` in `language`.
    ///
    /// Empty sources are never looked up and empty translations count as
    /// missing, so both fall back to the original string.
    pub fn lookup(&self, language: &Language, source: &str) -> Option<&str> {
        if source.is_empty() {
            return None;
        }
        self.languages
            .get(language.name())
            .and_then(|table| table.get(source))
            .map(String::as_str)
            .filter(|translated| !translated.is_empty())
    }

    /// Languages that have at least one entry, sorted by name.
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Check if the dictionary has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.languages.values().all(HashMap::is_empty)
    }
}
