//! Translation resolver: substitutes leaf strings of a JSON tree.

use crate::i18n::{Language, TranslationDictionary};
use serde_json::Value;

/// Translate every string inside `value` into `language`.
///
/// Strings with a dictionary entry are replaced, all other strings are kept.
/// Arrays keep their order and length, objects keep every key, and numbers,
/// booleans and null pass through untouched. The function never fails: a
/// missing language or key simply leaves the string as it was.
pub fn translate(value: &Value, language: &Language, dictionary: &TranslationDictionary) -> Value {
    match value {
        Value::String(source) => Value::String(translate_str(source, language, dictionary)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| translate(item, language, dictionary))
                .collect(),
        ),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field)| (key.clone(), translate(field, language, dictionary)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Translate a single string, falling back to the original.
pub fn translate_str(source: &str, language: &Language, dictionary: &TranslationDictionary) -> String {
    dictionary
        .lookup(language, source)
        .unwrap_or(source)
        .to_string()
}
