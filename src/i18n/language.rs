//! Language type: the user-selected display language.
//!
//! Languages are identified by their display name (e.g., "English",
//! "Español"), which is also how the translation dictionary is keyed and how
//! the header lists them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the canonical (source) language that content is authored in.
pub const CANONICAL_LANGUAGE: &str = "English";

/// A display language, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language {
    name: String,
}

impl Language {
    /// Create a language from its display name.
    ///
    /// Surrounding whitespace is dropped. Any name is accepted: a language
    /// without dictionary entries simply renders untranslated.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
        }
    }

    /// Get the canonical (source) language.
    ///
    /// This is the language that content documents are written in and the
    /// language a page session starts with unless configured otherwise.
    pub fn canonical() -> Self {
        Self::new(CANONICAL_LANGUAGE)
    }

    /// Get the display name of the language.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        self.name == CANONICAL_LANGUAGE
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Language {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
