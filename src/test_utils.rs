use async_trait::async_trait;
use icu::collator::CollatorBorrowed;
use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::{
    deinflector::ReasonDeinflector,
    dictionary::{NumOrStr, TermGlossary},
    dictionary_database::{
        DatabaseKanjiMeta, DatabaseTag, DatabaseTermMeta, DictionaryDatabase, KanjiEntry,
        SequenceQuery, TagQuery, TermEntry, TermExactQueryRequest, TermMetaData,
    },
    errors::DatabaseError,
    translation::{
        FindKanjiDictionary, FindTermDictionary, FindTermsWildcard, KanjiEnabledDictionaryMap,
        TermEnabledDictionaryMap,
    },
    translator::create_string_comparer,
};

pub(crate) fn invariant_collator() -> CollatorBorrowed<'static> {
    create_string_comparer().unwrap()
}

pub(crate) const PAST_TENSE_REASONS: &str = r#"{
    "past": [
        {"kanaIn": "た", "kanaOut": "る", "rulesIn": [], "rulesOut": ["v1"]},
        {"kanaIn": "った", "kanaOut": "う", "rulesIn": [], "rulesOut": ["v5"]}
    ],
    "negative": [
        {"kanaIn": "ない", "kanaOut": "る", "rulesIn": [], "rulesOut": ["v1"]}
    ]
}"#;

pub(crate) fn past_tense_deinflector() -> ReasonDeinflector {
    ReasonDeinflector::from_json(PAST_TENSE_REASONS).unwrap()
}

/// `(name, priority, allow_secondary_searches)` in dictionary order.
pub(crate) fn term_dictionary_map(dictionaries: &[(&str, i64, bool)]) -> TermEnabledDictionaryMap {
    dictionaries
        .iter()
        .enumerate()
        .map(|(index, &(name, priority, allow_secondary_searches))| {
            (
                name.to_string(),
                FindTermDictionary {
                    index,
                    priority,
                    allow_secondary_searches,
                },
            )
        })
        .collect()
}

pub(crate) fn kanji_dictionary_map(dictionaries: &[(&str, i64)]) -> KanjiEnabledDictionaryMap {
    dictionaries
        .iter()
        .enumerate()
        .map(|(index, &(name, priority))| (name.to_string(), FindKanjiDictionary { index, priority }))
        .collect()
}

pub(crate) fn term_entry(
    id: i64,
    term: &str,
    reading: &str,
    dictionary: &str,
    glossary: &[&str],
) -> TermEntry {
    TermEntry {
        index: 0,
        id,
        term: term.to_string(),
        reading: reading.to_string(),
        definition_tags: vec![],
        term_tags: vec![],
        rules: vec![],
        definitions: glossary.iter().map(|&text| TermGlossary::from(text)).collect(),
        score: 0,
        dictionary: dictionary.to_string(),
        sequence: -1,
    }
}

pub(crate) fn database_tag(name: &str, category: &str, order: i64, notes: &str, dictionary: &str) -> DatabaseTag {
    DatabaseTag {
        name: name.to_string(),
        category: category.to_string(),
        notes: notes.to_string(),
        order,
        score: 0,
        dictionary: dictionary.to_string(),
    }
}

/// A single call made against a [MemoryDatabase].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Batch {
    Terms(Vec<String>),
    TermsBySequence(Vec<SequenceQuery>),
    TermsExact(Vec<TermExactQueryRequest>),
    Tags(Vec<TagQuery>),
    TermMeta(Vec<String>),
    Kanji(Vec<String>),
    KanjiMeta(Vec<String>),
}

#[derive(Clone, Debug)]
struct MemoryTermMeta {
    term: String,
    dictionary: String,
    data: TermMetaData,
}

/// In-memory [DictionaryDatabase] that records every batch it answers.
#[derive(Debug, Default)]
pub(crate) struct MemoryDatabase {
    terms: Vec<TermEntry>,
    tags: Vec<DatabaseTag>,
    term_metas: Vec<MemoryTermMeta>,
    kanji: Vec<KanjiEntry>,
    kanji_metas: Vec<DatabaseKanjiMeta>,
    term_failure: Option<String>,
    batches: Mutex<Vec<Batch>>,
}

impl MemoryDatabase {
    pub(crate) fn with_term(mut self, term: TermEntry) -> Self {
        self.terms.push(term);
        self
    }

    pub(crate) fn with_tag(mut self, tag: DatabaseTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub(crate) fn with_term_meta(mut self, term: &str, dictionary: &str, data: TermMetaData) -> Self {
        self.term_metas.push(MemoryTermMeta {
            term: term.to_string(),
            dictionary: dictionary.to_string(),
            data,
        });
        self
    }

    pub(crate) fn with_kanji(mut self, kanji: KanjiEntry) -> Self {
        self.kanji.push(kanji);
        self
    }

    pub(crate) fn with_kanji_meta(mut self, character: &str, dictionary: &str, frequency: NumOrStr) -> Self {
        self.kanji_metas.push(DatabaseKanjiMeta {
            index: 0,
            character: character.to_string(),
            frequency,
            dictionary: dictionary.to_string(),
        });
        self
    }

    /// Makes every `find_terms_bulk` call fail with `message`.
    pub(crate) fn with_term_failure(mut self, message: &str) -> Self {
        self.term_failure = Some(message.to_string());
        self
    }

    pub(crate) fn batches(&self) -> Vec<Batch> {
        self.batches.lock().clone()
    }

    pub(crate) fn tag_batches(&self) -> Vec<Vec<TagQuery>> {
        self.batches()
            .into_iter()
            .filter_map(|batch| match batch {
                Batch::Tags(queries) => Some(queries),
                _ => None,
            })
            .collect()
    }

    fn record(&self, batch: Batch) {
        self.batches.lock().push(batch);
    }

    fn indexed(record: &TermEntry, index: usize) -> TermEntry {
        TermEntry {
            index,
            ..record.clone()
        }
    }
}

fn matches_wildcard(value: &str, query: &str, wildcard: Option<FindTermsWildcard>) -> bool {
    match wildcard {
        None => value == query,
        Some(FindTermsWildcard::Prefix) => value.starts_with(query),
        Some(FindTermsWildcard::Suffix) => value.ends_with(query),
    }
}

#[async_trait]
impl DictionaryDatabase for MemoryDatabase {
    async fn find_terms_bulk(
        &self,
        term_list: &[String],
        dictionaries: &TermEnabledDictionaryMap,
        wildcard: Option<FindTermsWildcard>,
    ) -> Result<Vec<TermEntry>, DatabaseError> {
        self.record(Batch::Terms(term_list.to_vec()));
        if let Some(message) = &self.term_failure {
            return Err(DatabaseError::Query(message.clone()));
        }
        let mut results = vec![];
        for (index, query) in term_list.iter().enumerate() {
            for record in &self.terms {
                if !dictionaries.contains_key(&record.dictionary) {
                    continue;
                }
                if matches_wildcard(&record.term, query, wildcard)
                    || matches_wildcard(&record.reading, query, wildcard)
                {
                    results.push(Self::indexed(record, index));
                }
            }
        }
        Ok(results)
    }

    async fn find_terms_by_sequence_bulk(
        &self,
        queries: &[SequenceQuery],
    ) -> Result<Vec<TermEntry>, DatabaseError> {
        self.record(Batch::TermsBySequence(queries.to_vec()));
        let mut results = vec![];
        for (index, query) in queries.iter().enumerate() {
            results.extend(
                self.terms
                    .iter()
                    .filter(|record| {
                        record.sequence == query.query && record.dictionary == query.dictionary
                    })
                    .map(|record| Self::indexed(record, index)),
            );
        }
        Ok(results)
    }

    async fn find_terms_exact_bulk(
        &self,
        term_list: &[TermExactQueryRequest],
        dictionaries: &TermEnabledDictionaryMap,
    ) -> Result<Vec<TermEntry>, DatabaseError> {
        self.record(Batch::TermsExact(term_list.to_vec()));
        let mut results = vec![];
        for (index, query) in term_list.iter().enumerate() {
            results.extend(
                self.terms
                    .iter()
                    .filter(|record| {
                        dictionaries.contains_key(&record.dictionary)
                            && record.term == query.term
                            && record.reading == query.reading
                    })
                    .map(|record| Self::indexed(record, index)),
            );
        }
        Ok(results)
    }

    async fn find_tag_meta_bulk(
        &self,
        queries: &[TagQuery],
    ) -> Result<Vec<Option<DatabaseTag>>, DatabaseError> {
        self.record(Batch::Tags(queries.to_vec()));
        Ok(queries
            .iter()
            .map(|query| {
                self.tags
                    .iter()
                    .find(|tag| tag.name == query.query && tag.dictionary == query.dictionary)
                    .cloned()
            })
            .collect())
    }

    async fn find_term_meta_bulk(
        &self,
        term_list: &[String],
        dictionaries: &TermEnabledDictionaryMap,
    ) -> Result<Vec<DatabaseTermMeta>, DatabaseError> {
        self.record(Batch::TermMeta(term_list.to_vec()));
        let mut results = vec![];
        for (index, term) in term_list.iter().enumerate() {
            results.extend(
                self.term_metas
                    .iter()
                    .filter(|meta| &meta.term == term && dictionaries.contains_key(&meta.dictionary))
                    .map(|meta| DatabaseTermMeta {
                        index,
                        term: meta.term.clone(),
                        data: meta.data.clone(),
                        dictionary: meta.dictionary.clone(),
                    }),
            );
        }
        Ok(results)
    }

    async fn find_kanji_bulk(
        &self,
        kanji_list: &[String],
        dictionaries: &KanjiEnabledDictionaryMap,
    ) -> Result<Vec<KanjiEntry>, DatabaseError> {
        self.record(Batch::Kanji(kanji_list.to_vec()));
        let mut results = vec![];
        for (index, character) in kanji_list.iter().enumerate() {
            results.extend(
                self.kanji
                    .iter()
                    .filter(|kanji| {
                        &kanji.character == character && dictionaries.contains_key(&kanji.dictionary)
                    })
                    .map(|kanji| KanjiEntry {
                        index,
                        ..kanji.clone()
                    }),
            );
        }
        Ok(results)
    }

    async fn find_kanji_meta_bulk(
        &self,
        kanji_list: &[String],
        dictionaries: &KanjiEnabledDictionaryMap,
    ) -> Result<Vec<DatabaseKanjiMeta>, DatabaseError> {
        self.record(Batch::KanjiMeta(kanji_list.to_vec()));
        let mut results = vec![];
        for (index, character) in kanji_list.iter().enumerate() {
            results.extend(
                self.kanji_metas
                    .iter()
                    .filter(|meta| {
                        &meta.character == character && dictionaries.contains_key(&meta.dictionary)
                    })
                    .map(|meta| DatabaseKanjiMeta {
                        index,
                        ..meta.clone()
                    }),
            );
        }
        Ok(results)
    }
}

/// Stat names of a kanji record, in order.
pub(crate) fn kanji_stats(stats: &[(&str, &str)]) -> IndexMap<String, String> {
    stats
        .iter()
        .map(|&(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
