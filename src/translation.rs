use fancy_regex::Regex;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{dictionary::TermDictionaryEntry, settings::TranslationCollapseEmphaticSequences};
pub use crate::settings::TranslationConvertType;

/// Determines the shape of the entries returned by `Translator::find_terms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FindTermsMode {
    /// Entries sharing a headword and inflection chain are grouped.
    #[default]
    Group,
    /// Entries sharing a sequence number in the main dictionary are merged.
    Merge,
    /// Every database record becomes its own entry.
    Split,
    /// Like `Split`, but no tags or metadata are resolved.
    Simple,
}

/// Wildcard matching of the literal search text; disables deinflection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindTermsWildcard {
    Prefix,
    Suffix,
}

/// A single regex replacement applied to the searched text.
#[derive(Clone, Debug)]
pub struct FindTermsTextReplacement {
    pub pattern: Regex,
    pub replacement: String,
    /// Replace every match instead of only the first.
    pub is_global: bool,
}

/// One axis value of the text replacement variants.
/// `None` searches the text without any replacement applied.
pub type FindTermsTextReplacements = Vec<Option<Vec<FindTermsTextReplacement>>>;

/// Details about an enabled term dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FindTermDictionary {
    /// The index of the dictionary
    pub index: usize,
    /// The priority of the dictionary
    pub priority: i64,
    /// Whether or not secondary term searches are allowed for this dictionary.
    pub allow_secondary_searches: bool,
}

/// Details about an enabled kanji dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FindKanjiDictionary {
    pub index: usize,
    pub priority: i64,
}

pub type TermEnabledDictionaryMap = IndexMap<String, FindTermDictionary>;
pub type KanjiEnabledDictionaryMap = IndexMap<String, FindKanjiDictionary>;

/// Ordering information of a dictionary, used for tie-breaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DictionaryOrder {
    pub index: usize,
    pub priority: i64,
}

/// Shared view over both kinds of enabled dictionary maps.
pub trait EnabledDictionaryMap {
    fn dictionary_order(&self, dictionary: &str) -> DictionaryOrder;
}

impl EnabledDictionaryMap for TermEnabledDictionaryMap {
    fn dictionary_order(&self, dictionary: &str) -> DictionaryOrder {
        match self.get(dictionary) {
            Some(info) => DictionaryOrder {
                index: info.index,
                priority: info.priority,
            },
            None => DictionaryOrder {
                index: self.len(),
                priority: 0,
            },
        }
    }
}

impl EnabledDictionaryMap for KanjiEnabledDictionaryMap {
    fn dictionary_order(&self, dictionary: &str) -> DictionaryOrder {
        match self.get(dictionary) {
            Some(info) => DictionaryOrder {
                index: info.index,
                priority: info.priority,
            },
            None => DictionaryOrder {
                index: self.len(),
                priority: 0,
            },
        }
    }
}

/// An options object for use with `Translator::find_kanji`.
#[derive(Clone, Debug, Default)]
pub struct FindKanjiOptions {
    /// The mapping of dictionaries to search for kanji in.
    /// The key is the dictionary name.
    pub enabled_dictionary_map: KanjiEnabledDictionaryMap,
}

/// An options object for use with `Translator::find_terms`.
#[derive(Clone, Debug)]
pub struct FindTermsOptions {
    /// Searches the literal text as a prefix or suffix instead of deinflecting it.
    pub wildcard: Option<FindTermsWildcard>,
    /// The name of the primary dictionary used by [FindTermsMode::Merge].
    pub main_dictionary: String,
    /// Whether or not non-Japanese characters should be cut off the text.
    pub remove_non_japanese_characters: bool,
    pub convert_half_width_characters: TranslationConvertType,
    pub convert_numeric_characters: TranslationConvertType,
    pub convert_alphabetic_characters: TranslationConvertType,
    pub convert_hiragana_to_katakana: TranslationConvertType,
    pub convert_katakana_to_hiragana: TranslationConvertType,
    pub collapse_emphatic_sequences: TranslationCollapseEmphaticSequences,
    /// An iterable sequence of text replacements to be applied during the term lookup process.
    pub text_replacements: FindTermsTextReplacements,
    /// The mapping of dictionaries to search for terms in.
    /// The key is the dictionary name.
    pub enabled_dictionary_map: TermEnabledDictionaryMap,
}

impl Default for FindTermsOptions {
    fn default() -> Self {
        Self {
            wildcard: None,
            main_dictionary: String::new(),
            remove_non_japanese_characters: false,
            convert_half_width_characters: TranslationConvertType::False,
            convert_numeric_characters: TranslationConvertType::False,
            convert_alphabetic_characters: TranslationConvertType::False,
            convert_hiragana_to_katakana: TranslationConvertType::False,
            convert_katakana_to_hiragana: TranslationConvertType::Variant,
            collapse_emphatic_sequences: TranslationCollapseEmphaticSequences::False,
            text_replacements: vec![None],
            enabled_dictionary_map: TermEnabledDictionaryMap::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FindTermsResult {
    pub dictionary_entries: Vec<TermDictionaryEntry>,
    /// Length (in characters) of the longest original text that matched.
    pub original_text_length: usize,
}
