use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    dictionary::{NumOrStr, TermGlossary},
    errors::DatabaseError,
    translation::{FindTermsWildcard, KanjiEnabledDictionaryMap, TermEnabledDictionaryMap},
};

/// A term record returned by a bulk query.
///
/// `index` is the position of the query item (inside the bulk input list)
/// that produced this record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub index: usize,
    pub id: i64,
    pub term: String,
    /// May be empty, in which case the term doubles as the reading.
    pub reading: String,
    pub definition_tags: Vec<String>,
    pub term_tags: Vec<String>,
    pub rules: Vec<String>,
    pub definitions: Vec<TermGlossary>,
    pub score: i64,
    pub dictionary: String,
    /// Negative when the record has no sequence.
    pub sequence: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseTag {
    pub name: String,
    pub category: String,
    pub notes: String,
    pub order: i64,
    pub score: i64,
    pub dictionary: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchAccentData {
    pub position: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMetaPitchData {
    pub reading: String,
    pub pitches: Vec<PitchAccentData>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermMetaFrequencyData {
    WithReading { reading: String, frequency: NumOrStr },
    Generic(NumOrStr),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermMetaData {
    Frequency(TermMetaFrequencyData),
    Pitch(TermMetaPitchData),
}

/// Represents a single term metadata entry found by `find_term_meta_bulk`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseTermMeta {
    /// Index of the original query term in the input list.
    pub index: usize,
    pub term: String,
    pub data: TermMetaData,
    pub dictionary: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiEntry {
    pub index: usize,
    pub character: String,
    pub onyomi: Vec<String>,
    pub kunyomi: Vec<String>,
    pub tags: Vec<String>,
    pub definitions: Vec<String>,
    pub stats: IndexMap<String, String>,
    pub dictionary: String,
}

/// Kanji metas only carry frequency data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseKanjiMeta {
    pub index: usize,
    pub character: String,
    pub frequency: NumOrStr,
    pub dictionary: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceQuery {
    pub query: i64,
    pub dictionary: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermExactQueryRequest {
    pub term: String,
    pub reading: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagQuery {
    /// The tag name base (everything before the first `:`).
    pub query: String,
    pub dictionary: String,
}

/// The persistent store the translator reads from.
///
/// Every bulk operation must preserve the input order in the `index`
/// of the records it returns. An empty result is not an error.
#[async_trait]
pub trait DictionaryDatabase: Send + Sync {
    /// Finds terms whose expression or reading matches one of `term_list`.
    ///
    /// With a `wildcard`, the items are matched as prefixes or suffixes instead.
    async fn find_terms_bulk(
        &self,
        term_list: &[String],
        dictionaries: &TermEnabledDictionaryMap,
        wildcard: Option<FindTermsWildcard>,
    ) -> Result<Vec<TermEntry>, DatabaseError>;

    async fn find_terms_by_sequence_bulk(
        &self,
        queries: &[SequenceQuery],
    ) -> Result<Vec<TermEntry>, DatabaseError>;

    async fn find_terms_exact_bulk(
        &self,
        term_list: &[TermExactQueryRequest],
        dictionaries: &TermEnabledDictionaryMap,
    ) -> Result<Vec<TermEntry>, DatabaseError>;

    /// Returns exactly one slot per query, `None` when the tag is unknown.
    async fn find_tag_meta_bulk(
        &self,
        queries: &[TagQuery],
    ) -> Result<Vec<Option<DatabaseTag>>, DatabaseError>;

    async fn find_term_meta_bulk(
        &self,
        term_list: &[String],
        dictionaries: &TermEnabledDictionaryMap,
    ) -> Result<Vec<DatabaseTermMeta>, DatabaseError>;

    async fn find_kanji_bulk(
        &self,
        kanji_list: &[String],
        dictionaries: &KanjiEnabledDictionaryMap,
    ) -> Result<Vec<KanjiEntry>, DatabaseError>;

    async fn find_kanji_meta_bulk(
        &self,
        kanji_list: &[String],
        dictionaries: &KanjiEnabledDictionaryMap,
    ) -> Result<Vec<DatabaseKanjiMeta>, DatabaseError>;
}
