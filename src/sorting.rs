//! Deterministic orderings for entries and their attached data.
//!
//! Every sort here is stable, so ties keep their incoming order.

use std::cmp::Ordering;

use icu::collator::CollatorBorrowed;

use crate::{
    dictionary::{KanjiFrequency, KanjiStat, Tag, TermDictionaryEntry, TermFrequency, TermPronunciation},
    translation_internal::DictionaryEntryGroup,
};

/// Ranks term entries from best to worst match.
pub fn compare_term_dictionary_entries(
    collator: &CollatorBorrowed<'_>,
    v1: &TermDictionaryEntry,
    v2: &TermDictionaryEntry,
) -> Ordering {
    // longer source text first
    v2.max_transformed_text_length
        .cmp(&v1.max_transformed_text_length)
        // fewer inflections first
        .then_with(|| v1.inflections.len().cmp(&v2.inflections.len()))
        .then_with(|| {
            v2.source_term_exact_match_count
                .cmp(&v1.source_term_exact_match_count)
        })
        .then_with(|| v2.dictionary_priority.cmp(&v1.dictionary_priority))
        .then_with(|| v2.score.cmp(&v1.score))
        .then_with(|| {
            for (h1, h2) in v1.headwords.iter().zip(&v2.headwords) {
                let ordering = h2
                    .term
                    .chars()
                    .count()
                    .cmp(&h1.term.chars().count())
                    .then_with(|| collator.compare(&h1.term, &h2.term));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        })
        .then_with(|| v1.dictionary_index.cmp(&v2.dictionary_index))
}

pub fn sort_term_dictionary_entries(
    collator: &CollatorBorrowed<'_>,
    entries: &mut [TermDictionaryEntry],
) {
    entries.sort_by(|v1, v2| compare_term_dictionary_entries(collator, v1, v2));
}

/// An entry about to be merged, with its headword indices remapped
/// into the merged headword list.
#[derive(Clone, Debug)]
pub struct DefinitionEntry {
    pub index: usize,
    pub entry: TermDictionaryEntry,
    pub headword_index_map: Vec<usize>,
}

impl DefinitionEntry {
    fn remapped(&self, headword_index: usize) -> usize {
        self.headword_index_map
            .get(headword_index)
            .copied()
            .unwrap_or(headword_index)
    }
}

pub fn compare_definition_entries(v1: &DefinitionEntry, v2: &DefinitionEntry) -> Ordering {
    let (e1, e2) = (&v1.entry, &v2.entry);
    e2.dictionary_priority
        .cmp(&e1.dictionary_priority)
        .then_with(|| e2.score.cmp(&e1.score))
        .then_with(|| {
            for (d1, d2) in e1.definitions.iter().zip(&e2.definitions) {
                let (h1, h2) = (&d1.headword_indices, &d2.headword_indices);
                // definitions covering fewer headwords first
                let ordering = h1.len().cmp(&h2.len());
                if ordering != Ordering::Equal {
                    return ordering;
                }
                for (&i1, &i2) in h1.iter().zip(h2) {
                    let ordering = v1.remapped(i1).cmp(&v2.remapped(i2));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
            }
            Ordering::Equal
        })
        .then_with(|| e1.dictionary_index.cmp(&e2.dictionary_index))
        .then_with(|| v1.index.cmp(&v2.index))
}

pub fn sort_definition_entries(entries: &mut [DefinitionEntry]) {
    entries.sort_by(compare_definition_entries);
}

pub fn sort_entries_by_id(group: &mut DictionaryEntryGroup) {
    if group.dictionary_entries.len() <= 1 {
        return;
    }
    group.dictionary_entries.sort_by_key(|entry| entry.id);
}

pub fn sort_term_frequencies(frequencies: &mut [TermFrequency]) {
    frequencies.sort_by(|v1, v2| {
        v2.dictionary_priority
            .cmp(&v1.dictionary_priority)
            .then_with(|| v1.headword_index.cmp(&v2.headword_index))
            .then_with(|| v1.dictionary_index.cmp(&v2.dictionary_index))
            .then_with(|| v1.index.cmp(&v2.index))
    });
}

pub fn sort_term_pronunciations(pronunciations: &mut [TermPronunciation]) {
    pronunciations.sort_by(|v1, v2| {
        v2.dictionary_priority
            .cmp(&v1.dictionary_priority)
            .then_with(|| v1.headword_index.cmp(&v2.headword_index))
            .then_with(|| v1.dictionary_index.cmp(&v2.dictionary_index))
            .then_with(|| v1.index.cmp(&v2.index))
    });
}

pub fn sort_kanji_frequencies(frequencies: &mut [KanjiFrequency]) {
    frequencies.sort_by(|v1, v2| {
        v2.dictionary_priority
            .cmp(&v1.dictionary_priority)
            .then_with(|| v1.dictionary_index.cmp(&v2.dictionary_index))
            .then_with(|| v1.index.cmp(&v2.index))
    });
}

pub fn sort_tags(collator: &CollatorBorrowed<'_>, tags: &mut [Tag]) {
    tags.sort_by(|v1, v2| {
        v1.order
            .cmp(&v2.order)
            .then_with(|| collator.compare(&v1.name, &v2.name))
    });
}

pub fn sort_kanji_stats(collator: &CollatorBorrowed<'_>, stats: &mut [KanjiStat]) {
    if stats.len() <= 1 {
        return;
    }
    stats.sort_by(|v1, v2| {
        v1.order
            .cmp(&v2.order)
            .then_with(|| collator.compare(&v1.content, &v2.content))
    });
}
