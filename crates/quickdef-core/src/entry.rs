//! Wire shape of a dictionary entry and the first-wins reduction to a
//! [`LookupResult`].

use quickdef_types::LookupResult;
use serde::Deserialize;

pub const NO_DEFINITION: &str = "No definition available";
pub const MAX_SYNONYMS: usize = 5;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meaning {
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
}

impl DictionaryEntry {
    /// Only the first meaning and its first definition are looked at
    pub fn to_lookup_result(&self) -> LookupResult {
        let meaning = self.meanings.first();
        let first = meaning.and_then(|m| m.definitions.first());

        let definition = first
            .and_then(|d| d.definition.as_deref())
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DEFINITION)
            .to_string();

        let example = first
            .and_then(|d| d.example.clone())
            .filter(|e| !e.is_empty());

        let synonyms = meaning
            .map(|m| m.synonyms.iter().take(MAX_SYNONYMS).cloned().collect())
            .unwrap_or_default();

        LookupResult {
            definition,
            synonyms,
            example,
        }
    }
}
