//! Internationalization (i18n) module.
//!
//! Content documents are authored in English and translated at render time by
//! plain string substitution against a language-keyed dictionary.
//!
//! # Architecture
//!
//! - `language`: the `Language` type (identified by display name)
//! - `dictionary`: the `TranslationDictionary` loaded from `translations.json`
//! - `resolver`: `translate`, which rewrites every leaf string of a JSON tree
//! - `switch`: `LanguageSwitch`, the current-language owner and its subscribers
//!
//! # Example
//!
//! ```rust,ignore
//! use sustain_site::i18n::{translate, Language, TranslationDictionary};
//!
//! let dictionary = TranslationDictionary::from_value(translations_json)?;
//! let spanish = Language::new("Español");
//! let translated = translate(&homepage_json, &spanish, &dictionary);
//! ```

mod dictionary;
mod language;
mod resolver;
mod switch;

pub use dictionary::{DictionaryError, TranslationDictionary};
pub use language::{Language, CANONICAL_LANGUAGE};
pub use resolver::{translate, translate_str};
pub use switch::{LanguageSubscriber, LanguageSwitch, SubscriptionId, SwitchState};
