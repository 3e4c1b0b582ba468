use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumOrStr {
    Num(i64),
    Str(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DictionaryEntryType {
    Kanji,
    Term,
}

/// A single glossary item of a term definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermGlossary {
    Text(String),
    Image(TermGlossaryImage),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermGlossaryImage {
    pub path: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<&str> for TermGlossary {
    fn from(value: &str) -> Self {
        TermGlossary::Text(value.to_string())
    }
}

/// A tag represents some brief information about part of a dictionary entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The name of the tag.
    pub name: String,
    /// The category of the tag.
    pub category: String,
    /// A number indicating the sorting order of the tag.
    pub order: i64,
    /// A score value for the tag.
    pub score: i64,
    /// An array of descriptions for the tag. If there are multiple entries,
    /// the values will typically have originated from different dictionaries.
    /// However, there is no correlation between the length of this array and
    /// the length of the `dictionaries` field, as duplicates are removed.
    pub content: Vec<String>,
    /// An array of dictionary names that contained a tag with this name and category.
    pub dictionaries: Vec<String>,
    /// Whether or not this tag is redundant with previous tags.
    pub redundant: bool,
}

/// Unresolved tag names which all belong to the same dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    pub dictionary: String,
    pub tag_names: Vec<String>,
}

impl TagGroup {
    pub fn new(dictionary: impl Into<String>, tag_names: Vec<String>) -> Self {
        Self {
            dictionary: dictionary.into(),
            tag_names,
        }
    }
}

/// Anything that carries raw tag groups which get expanded into [Tag]s.
pub trait TagTarget: Send {
    fn tag_groups_mut(&mut self) -> &mut Vec<TagGroup>;
    fn tags_mut(&mut self) -> &mut Vec<Tag>;
}

macro_rules! impl_tag_target {
    ($($ty:ty),*) => {
        $(
            impl TagTarget for $ty {
                fn tag_groups_mut(&mut self) -> &mut Vec<TagGroup> {
                    &mut self.tag_groups
                }
                fn tags_mut(&mut self) -> &mut Vec<Tag> {
                    &mut self.tags
                }
            }
        )*
    };
}

impl_tag_target!(TermHeadword, TermDefinition, TermPitch, KanjiDictionaryEntry);

/* Kanji */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiStat {
    pub name: String,
    pub category: String,
    pub content: String,
    pub order: i64,
    pub score: i64,
    pub dictionary: String,
    pub value: String,
}

pub type KanjiStatGroups = IndexMap<String, Vec<KanjiStat>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiFrequency {
    pub index: usize,
    pub dictionary: String,
    pub dictionary_index: usize,
    pub dictionary_priority: i64,
    pub character: String,
    pub frequency: NumOrStr,
}

/// A dictionary entry for a kanji character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiDictionaryEntry {
    pub entry_type: DictionaryEntryType,
    /// The kanji character that was looked up.
    pub character: String,
    pub dictionary: String,
    pub onyomi: Vec<String>,
    pub kunyomi: Vec<String>,
    /// Tag groups waiting to be expanded into `tags`.
    pub tag_groups: Vec<TagGroup>,
    pub tags: Vec<Tag>,
    pub stats: KanjiStatGroups,
    pub definitions: Vec<String>,
    pub frequencies: Vec<KanjiFrequency>,
}

/* Terms */

/// Information about how a headword was matched against the searched text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSource {
    /// The original text that was searched.
    pub original_text: String,
    /// The original text after being transformed, but before applying deinflections.
    pub transformed_text: String,
    /// The final text after applying deinflections.
    pub deinflected_text: String,
    /// Whether or not this source came from the text that was searched,
    /// rather than a related-entry expansion.
    pub is_primary: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermHeadword {
    /// The original order of the headword, which is usually used for sorting.
    pub index: usize,
    pub term: String,
    /// The reading of the term. Never empty; falls back to `term`.
    pub reading: String,
    pub sources: Vec<TermSource>,
    pub tag_groups: Vec<TagGroup>,
    pub tags: Vec<Tag>,
    /// Word classes (parts of speech) of the headword.
    pub word_classes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDefinition {
    pub index: usize,
    /// Sorted, unique indices into the owning entry's headwords.
    pub headword_indices: Vec<usize>,
    pub dictionary: String,
    /// `-1` when the record has no sequence.
    pub sequence: i64,
    pub is_primary: bool,
    pub tag_groups: Vec<TagGroup>,
    pub tags: Vec<Tag>,
    pub entries: Vec<TermGlossary>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPitch {
    /// Mora position of the pitch accent downstep.
    pub position: i64,
    pub tag_groups: Vec<TagGroup>,
    pub tags: Vec<Tag>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPronunciation {
    pub index: usize,
    pub headword_index: usize,
    pub dictionary: String,
    pub dictionary_index: usize,
    pub dictionary_priority: i64,
    pub pitches: Vec<TermPitch>,
}

/// Frequency information corresponds to how frequently a term appears in a corpus,
/// which can be a number of occurrences or an overall rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency {
    pub index: usize,
    pub headword_index: usize,
    pub dictionary: String,
    pub dictionary_index: usize,
    pub dictionary_priority: i64,
    /// Whether or not the frequency had an explicit reading specified.
    pub has_reading: bool,
    pub frequency: NumOrStr,
}

/// A dictionary entry for a term or group of terms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDictionaryEntry {
    pub entry_type: DictionaryEntryType,
    /// Database id of the record, or `-1` if several records were merged.
    pub id: i64,
    /// Whether or not any of the sources is a primary source.
    pub is_primary: bool,
    /// Deinflection reasons applied to the source text to reach the term.
    pub inflections: Vec<String>,
    pub score: i64,
    /// Order of the owning dictionary in the enabled dictionary map.
    pub dictionary_index: usize,
    pub dictionary_priority: i64,
    /// Number of primary sources whose deinflected text exactly equals the term.
    pub source_term_exact_match_count: usize,
    /// Length (in characters) of the longest transformed text of a primary source.
    pub max_transformed_text_length: usize,
    pub headwords: Vec<TermHeadword>,
    pub definitions: Vec<TermDefinition>,
    pub pronunciations: Vec<TermPronunciation>,
    pub frequencies: Vec<TermFrequency>,
}
