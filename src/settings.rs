use fancy_regex::Regex;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    errors::TranslatorError,
    translation::{
        FindKanjiDictionary, FindKanjiOptions, FindTermDictionary, FindTermsMode,
        FindTermsOptions, FindTermsTextReplacement, FindTermsTextReplacements, FindTermsWildcard,
        KanjiEnabledDictionaryMap, TermEnabledDictionaryMap,
    },
};

/// A struct used for configuring lookups.
///
/// # Usage
/// Deserialize it from a stored profile, then build the per-call options with
/// [ProfileOptions::find_terms_options] and [ProfileOptions::find_kanji_options].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProfileOptions {
    pub general: GeneralOptions,
    pub scanning: ScanningOptions,
    pub translation: TranslationOptions,
    /// Insertion order is the dictionary order used for sorting.
    pub dictionaries: IndexMap<String, DictionaryOptions>,
}

impl ProfileOptions {
    /// Gets the main dictionary for this [ProfileOptions]
    pub fn main_dictionary(&self) -> &str {
        self.general.main_dictionary.as_str()
    }

    /// Updates the main dictionary and returns the previous one
    pub fn set_main_dictionary(&mut self, new: String) -> String {
        std::mem::replace(&mut self.general.main_dictionary, new)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn find_terms_options(
        &self,
        wildcard: Option<FindTermsWildcard>,
    ) -> Result<FindTermsOptions, TranslatorError> {
        let TranslationOptions {
            convert_half_width_characters,
            convert_numeric_characters,
            convert_alphabetic_characters,
            convert_hiragana_to_katakana,
            convert_katakana_to_hiragana,
            collapse_emphatic_sequences,
            text_replacements,
        } = &self.translation;

        Ok(FindTermsOptions {
            wildcard,
            main_dictionary: self.general.main_dictionary.clone(),
            remove_non_japanese_characters: !self.scanning.alphanumeric,
            convert_half_width_characters: *convert_half_width_characters,
            convert_numeric_characters: *convert_numeric_characters,
            convert_alphabetic_characters: *convert_alphabetic_characters,
            convert_hiragana_to_katakana: *convert_hiragana_to_katakana,
            convert_katakana_to_hiragana: *convert_katakana_to_hiragana,
            collapse_emphatic_sequences: *collapse_emphatic_sequences,
            text_replacements: text_replacements.compile()?,
            enabled_dictionary_map: self.term_enabled_dictionary_map(),
        })
    }

    pub fn find_kanji_options(&self) -> FindKanjiOptions {
        let enabled_dictionary_map: KanjiEnabledDictionaryMap = self
            .enabled_dictionaries()
            .map(|(index, dictionary)| {
                (
                    dictionary.name.clone(),
                    FindKanjiDictionary {
                        index,
                        priority: dictionary.priority,
                    },
                )
            })
            .collect();
        FindKanjiOptions {
            enabled_dictionary_map,
        }
    }

    fn term_enabled_dictionary_map(&self) -> TermEnabledDictionaryMap {
        self.enabled_dictionaries()
            .map(|(index, dictionary)| {
                (
                    dictionary.name.clone(),
                    FindTermDictionary {
                        index,
                        priority: dictionary.priority,
                        allow_secondary_searches: dictionary.allow_secondary_searches,
                    },
                )
            })
            .collect()
    }

    /// Enabled dictionaries paired with their consecutive index.
    fn enabled_dictionaries(&self) -> impl Iterator<Item = (usize, &DictionaryOptions)> {
        self.dictionaries
            .values()
            .filter(|dictionary| dictionary.enabled)
            .enumerate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralOptions {
    pub result_output_mode: FindTermsMode,
    /// The dictionary whose sequence numbers are used to merge entries.
    pub main_dictionary: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningOptions {
    /// Whether non-Japanese characters are kept in the scanned text.
    pub alphanumeric: bool,
}

impl Default for ScanningOptions {
    fn default() -> Self {
        Self { alphanumeric: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationOptions {
    pub convert_half_width_characters: TranslationConvertType,
    pub convert_numeric_characters: TranslationConvertType,
    pub convert_alphabetic_characters: TranslationConvertType,
    pub convert_hiragana_to_katakana: TranslationConvertType,
    pub convert_katakana_to_hiragana: TranslationConvertType,
    pub collapse_emphatic_sequences: TranslationCollapseEmphaticSequences,
    pub text_replacements: TranslationTextReplacementOptions,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            convert_half_width_characters: TranslationConvertType::False,
            convert_numeric_characters: TranslationConvertType::False,
            convert_alphabetic_characters: TranslationConvertType::False,
            convert_hiragana_to_katakana: TranslationConvertType::False,
            convert_katakana_to_hiragana: TranslationConvertType::Variant,
            collapse_emphatic_sequences: TranslationCollapseEmphaticSequences::False,
            text_replacements: TranslationTextReplacementOptions::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationConvertType {
    #[default]
    False,
    True,
    /// Search both the converted and the unconverted text.
    Variant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationCollapseEmphaticSequences {
    #[default]
    False,
    True,
    /// Also try removing the emphatic characters entirely.
    Full,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationTextReplacementOptions {
    /// Also search the text without any replacement applied.
    pub search_original: bool,
    pub groups: Vec<Vec<TranslationTextReplacementGroup>>,
}

impl Default for TranslationTextReplacementOptions {
    fn default() -> Self {
        Self {
            search_original: true,
            groups: vec![],
        }
    }
}

impl TranslationTextReplacementOptions {
    /// Compiles every group into regex replacements.
    ///
    /// Patterns are always global; `ignore_case` adds the `(?i)` flag.
    pub fn compile(&self) -> Result<FindTermsTextReplacements, TranslatorError> {
        let mut text_replacements: FindTermsTextReplacements = vec![];
        if self.search_original {
            text_replacements.push(None);
        }
        for group in &self.groups {
            let mut replacements = Vec::with_capacity(group.len());
            for TranslationTextReplacementGroup {
                pattern,
                ignore_case,
                replacement,
            } in group
            {
                let source = match ignore_case {
                    true => format!("(?i){pattern}"),
                    false => pattern.clone(),
                };
                let pattern = Regex::new(&source).map_err(|reason| {
                    TranslatorError::InvalidTextReplacement {
                        pattern: pattern.clone(),
                        reason: Box::new(reason),
                    }
                })?;
                replacements.push(FindTermsTextReplacement {
                    pattern,
                    replacement: replacement.clone(),
                    is_global: true,
                });
            }
            text_replacements.push(Some(replacements));
        }
        Ok(text_replacements)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TranslationTextReplacementGroup {
    pub pattern: String,
    pub ignore_case: bool,
    pub replacement: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryOptions {
    /// The title of the dictionary.
    pub name: String,
    /// Higher priorities sort first.
    pub priority: i64,
    /// Whether or not the dictionary will be used.
    pub enabled: bool,
    /// If you have two dictionaries, `Dict 1` and `Dict 2`:
    /// - Set the result output mode to `Merge`.
    /// - Choose `Dict 1` as the main dictionary.
    /// - Enable `allow_secondary_searches` on `Dict 2`.
    ///
    /// Entries from `Dict 1` are merged by sequence, then their headwords are used
    /// for a secondary exact lookup in `Dict 2`.
    pub allow_secondary_searches: bool,
}

impl Default for DictionaryOptions {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl DictionaryOptions {
    pub fn new(dict_name: String) -> Self {
        DictionaryOptions {
            name: dict_name,
            priority: 0,
            enabled: true,
            allow_secondary_searches: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile() -> ProfileOptions {
        let mut profile = ProfileOptions::default();
        for (name, enabled, secondary) in [
            ("JMdict", true, false),
            ("Disabled", false, true),
            ("KireiCake", true, true),
        ] {
            let mut dictionary = DictionaryOptions::new(name.to_string());
            dictionary.enabled = enabled;
            dictionary.allow_secondary_searches = secondary;
            profile.dictionaries.insert(name.to_string(), dictionary);
        }
        profile
    }

    #[test]
    fn enabled_dictionaries_get_consecutive_indices() {
        let options = profile().find_terms_options(None).unwrap();
        let map = &options.enabled_dictionary_map;
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["JMdict", "KireiCake"]);
        assert_eq!(map["KireiCake"].index, 1);
        assert!(map["KireiCake"].allow_secondary_searches);

        let kanji = profile().find_kanji_options();
        assert_eq!(kanji.enabled_dictionary_map["KireiCake"].index, 1);
    }

    #[test]
    fn search_original_prepends_unmodified_variant() {
        let mut profile = profile();
        profile.translation.text_replacements.groups = vec![vec![
            TranslationTextReplacementGroup {
                pattern: "ABC".to_string(),
                ignore_case: true,
                replacement: "x".to_string(),
            },
        ]];
        let options = profile.find_terms_options(None).unwrap();
        assert_eq!(options.text_replacements.len(), 2);
        assert!(options.text_replacements[0].is_none());
        let group = options.text_replacements[1].as_ref().unwrap();
        assert!(group[0].pattern.is_match("abc").unwrap());
        assert!(group[0].is_global);
    }

    #[test]
    fn main_dictionary_flows_into_options() {
        let mut profile = profile();
        assert_eq!(profile.set_main_dictionary("JMdict".to_string()), "");
        assert_eq!(profile.set_main_dictionary("KireiCake".to_string()), "JMdict");
        assert_eq!(profile.main_dictionary(), "KireiCake");
        let options = profile.find_terms_options(None).unwrap();
        assert_eq!(options.main_dictionary, "KireiCake");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let mut profile = profile();
        profile.translation.text_replacements.groups = vec![vec![
            TranslationTextReplacementGroup {
                pattern: "(".to_string(),
                ..Default::default()
            },
        ]];
        let err = profile.find_terms_options(None).unwrap_err();
        assert!(matches!(err, TranslatorError::InvalidTextReplacement { .. }));
    }

    #[test]
    fn profile_deserializes_with_defaults() {
        let json = r#"{
            "general": { "result_output_mode": "merge", "main_dictionary": "JMdict" },
            "scanning": { "alphanumeric": false },
            "translation": { "collapse_emphatic_sequences": "full" },
            "dictionaries": { "JMdict": { "name": "JMdict", "priority": 3 } }
        }"#;
        let profile = ProfileOptions::from_json(json).unwrap();
        assert_eq!(profile.general.result_output_mode, FindTermsMode::Merge);
        assert_eq!(
            profile.translation.collapse_emphatic_sequences,
            TranslationCollapseEmphaticSequences::Full
        );
        assert_eq!(
            profile.translation.convert_katakana_to_hiragana,
            TranslationConvertType::Variant
        );
        assert!(profile.dictionaries["JMdict"].enabled);

        let options = profile.find_terms_options(None).unwrap();
        assert!(options.remove_non_japanese_characters);
        assert_eq!(options.main_dictionary, "JMdict");
        assert_eq!(options.enabled_dictionary_map["JMdict"].priority, 3);
    }
}
