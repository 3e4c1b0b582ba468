use indexmap::IndexSet;

use crate::{dictionary::TermDictionaryEntry, dictionary_database::TermEntry};

/// A deinflected candidate of a prefix of the searched text, plus the
/// database records that matched it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseDeinflection {
    /// The span of the searched text this candidate was derived from.
    pub original_text: String,
    /// `original_text` after the text transforms were applied.
    pub transformed_text: String,
    pub deinflected_text: String,
    /// Word class bitmask from the deinflector. `0` accepts any record.
    pub rules: u32,
    pub reasons: Vec<String>,
    pub database_entries: Vec<TermEntry>,
}

impl DatabaseDeinflection {
    pub fn new(
        original_text: impl Into<String>,
        transformed_text: impl Into<String>,
        deinflected_text: impl Into<String>,
        rules: u32,
        reasons: Vec<String>,
    ) -> Self {
        Self {
            original_text: original_text.into(),
            transformed_text: transformed_text.into(),
            deinflected_text: deinflected_text.into(),
            rules,
            reasons,
            database_entries: vec![],
        }
    }
}

/// Entries collected for a single merged result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictionaryEntryGroup {
    pub ids: IndexSet<i64>,
    pub dictionary_entries: Vec<TermDictionaryEntry>,
}

impl DictionaryEntryGroup {
    /// Adds `entry` unless an entry with the same id is already present.
    pub fn insert(&mut self, entry: TermDictionaryEntry) -> bool {
        if !self.ids.insert(entry.id) {
            return false;
        }
        self.dictionary_entries.push(entry);
        true
    }
}
