use icu::{
    collator::{options::CollatorOptions, Collator, CollatorBorrowed},
    locale::locale,
};
use indexmap::{IndexMap, IndexSet};

use crate::{
    deinflector::Deinflector,
    dictionary::{
        DictionaryEntryType, KanjiDictionaryEntry, KanjiFrequency, KanjiStat, KanjiStatGroups,
        TagGroup, TagTarget, TermDictionaryEntry, TermFrequency, TermPitch, TermPronunciation,
    },
    dictionary_database::{
        DictionaryDatabase, TagQuery, TermMetaData, TermMetaFrequencyData,
    },
    errors::TranslatorError,
    language::ja::{
        japanese::{
            collapse_emphatic_sequences, convert_halfwidth_kana_to_fullwidth,
            convert_hiragana_to_katakana, convert_katakana_to_hiragana,
            convert_numeric_to_fullwidth, trim_to_japanese,
        },
        wanakana::convert_alphabetic_to_kana,
    },
    regex_util::apply_text_replacement,
    sorting::{
        sort_kanji_frequencies, sort_kanji_stats, sort_term_dictionary_entries,
        sort_term_frequencies, sort_term_pronunciations,
    },
    tag_aggregator::{
        flag_redundant_definition_tags, get_name_base, term_tag_targets, TagAggregator, TagCache,
    },
    term_grouping::{
        create_term_dictionary_entry_from_database_entry, get_related_dictionary_entries,
        group_dictionary_entries_by_headword,
    },
    text_source_map::TextSourceMap,
    text_variants::{TextVariant, TextVariants},
    translation::{
        EnabledDictionaryMap, FindKanjiOptions, FindTermsMode, FindTermsOptions, FindTermsResult,
        FindTermsTextReplacement, FindTermsWildcard, KanjiEnabledDictionaryMap,
        TermEnabledDictionaryMap,
    },
    translation_internal::DatabaseDeinflection,
};

/// Collator used for every string tie-break.
///
/// Invariant Locale
/// Default: "en-US"
pub fn create_string_comparer() -> Result<CollatorBorrowed<'static>, TranslatorError> {
    Collator::try_new(locale!("en-US").into(), CollatorOptions::default())
        .map_err(|err| TranslatorError::Collator(err.to_string()))
}

/// Finds term and kanji dictionary entries for text.
pub struct Translator<D: DictionaryDatabase> {
    db: D,
    deinflector: Box<dyn Deinflector>,
    tag_cache: TagCache,
    string_comparer: CollatorBorrowed<'static>,
}

impl<D: DictionaryDatabase> Translator<D> {
    pub fn new(db: D, deinflector: impl Deinflector + 'static) -> Result<Self, TranslatorError> {
        Ok(Self {
            db,
            deinflector: Box::new(deinflector),
            tag_cache: TagCache::new(),
            string_comparer: create_string_comparer()?,
        })
    }

    pub fn database(&self) -> &D {
        &self.db
    }

    pub fn tag_cache(&self) -> &TagCache {
        &self.tag_cache
    }

    /// Forgets every tag resolved so far.
    /// Must be called whenever the dictionaries in the database change.
    pub fn clear_database_caches(&self) {
        log::debug!("clearing {} cached tags", self.tag_cache.len());
        self.tag_cache.clear();
    }

    fn tag_aggregator(&self) -> TagAggregator<'_, D> {
        TagAggregator::new(&self.db, &self.tag_cache, &self.string_comparer)
    }

    /// Finds term definitions for the given text.
    ///
    /// # Arguments
    /// * `mode` - Shape of the returned entries, see [FindTermsMode].
    /// * `text` - The text to find terms for. Every prefix of it is searched.
    /// * `options` - Search options, see [FindTermsOptions].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn find_terms(
        &self,
        mode: FindTermsMode,
        text: &str,
        options: &FindTermsOptions,
    ) -> Result<FindTermsResult, TranslatorError> {
        let enabled_dictionary_map = &options.enabled_dictionary_map;
        let (dictionary_entries, original_text_length) =
            self.find_terms_internal(text, options).await?;

        let mut dictionary_entries = match mode {
            FindTermsMode::Group => group_dictionary_entries_by_headword(dictionary_entries),
            FindTermsMode::Merge => {
                get_related_dictionary_entries(
                    &self.db,
                    dictionary_entries,
                    &options.main_dictionary,
                    enabled_dictionary_map,
                )
                .await?
            }
            FindTermsMode::Split | FindTermsMode::Simple => dictionary_entries,
        };

        if dictionary_entries.len() > 1 {
            sort_term_dictionary_entries(&self.string_comparer, &mut dictionary_entries);
        }

        if mode == FindTermsMode::Simple {
            clear_term_tags(&mut dictionary_entries);
        } else {
            self.add_term_meta(&mut dictionary_entries, enabled_dictionary_map)
                .await?;
            self.expand_term_tags(&mut dictionary_entries).await?;
            for entry in dictionary_entries.iter_mut() {
                flag_redundant_definition_tags(entry);
                sort_term_frequencies(&mut entry.frequencies);
                sort_term_pronunciations(&mut entry.pronunciations);
            }
        }

        log::debug!(
            "find_terms({mode:?}): {} entries, original text length {original_text_length}",
            dictionary_entries.len()
        );
        Ok(FindTermsResult {
            dictionary_entries,
            original_text_length,
        })
    }

    /// Finds kanji definitions for every unique character of `text`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn find_kanji(
        &self,
        text: &str,
        options: &FindKanjiOptions,
    ) -> Result<Vec<KanjiDictionaryEntry>, TranslatorError> {
        let enabled_dictionary_map = &options.enabled_dictionary_map;
        let kanji_list: Vec<String> = text
            .chars()
            .map(String::from)
            .collect::<IndexSet<String>>()
            .into_iter()
            .collect();

        let mut records = self
            .db
            .find_kanji_bulk(&kanji_list, enabled_dictionary_map)
            .await?;
        if records.is_empty() {
            return Ok(vec![]);
        }
        records.sort_by_key(|record| record.index);

        let mut dictionary_entries = Vec::with_capacity(records.len());
        for record in records {
            let stats = self
                .expand_kanji_stats(&record.stats, &record.dictionary)
                .await?;
            let mut tag_groups = vec![];
            if !record.tags.is_empty() {
                tag_groups.push(TagGroup::new(record.dictionary.clone(), record.tags));
            }
            dictionary_entries.push(KanjiDictionaryEntry {
                entry_type: DictionaryEntryType::Kanji,
                character: record.character,
                dictionary: record.dictionary,
                onyomi: record.onyomi,
                kunyomi: record.kunyomi,
                tag_groups,
                tags: vec![],
                stats,
                definitions: record.definitions,
                frequencies: vec![],
            });
        }

        self.add_kanji_meta(&mut dictionary_entries, enabled_dictionary_map)
            .await?;
        {
            let mut targets: Vec<&mut dyn TagTarget> = dictionary_entries
                .iter_mut()
                .filter(|entry| !entry.tag_groups.is_empty())
                .map(|entry| entry as &mut dyn TagTarget)
                .collect();
            self.tag_aggregator().expand_and_group(&mut targets).await?;
        }
        for entry in dictionary_entries.iter_mut() {
            sort_kanji_frequencies(&mut entry.frequencies);
        }

        log::debug!("find_kanji: {} entries", dictionary_entries.len());
        Ok(dictionary_entries)
    }

    async fn find_terms_internal(
        &self,
        text: &str,
        options: &FindTermsOptions,
    ) -> Result<(Vec<TermDictionaryEntry>, usize), TranslatorError> {
        let text = match options.remove_non_japanese_characters {
            true => trim_to_japanese(text),
            false => text,
        };
        if text.is_empty() {
            return Ok((vec![], 0));
        }

        let deinflections = match options.wildcard {
            Some(wildcard) => self.find_terms_wildcard(text, options, wildcard).await?,
            None => self.find_term_deinflections(text, options).await?,
        };

        let mut original_text_length = 0;
        let mut dictionary_entries = vec![];
        let mut ids: IndexSet<i64> = IndexSet::new();
        for deinflection in &deinflections {
            if deinflection.database_entries.is_empty() {
                continue;
            }
            original_text_length =
                original_text_length.max(deinflection.original_text.chars().count());
            for record in &deinflection.database_entries {
                if !ids.insert(record.id) {
                    continue;
                }
                dictionary_entries.push(create_term_dictionary_entry_from_database_entry(
                    record,
                    &deinflection.original_text,
                    &deinflection.transformed_text,
                    &deinflection.deinflected_text,
                    deinflection.reasons.clone(),
                    true,
                    &options.enabled_dictionary_map,
                ));
            }
        }
        Ok((dictionary_entries, original_text_length))
    }

    async fn find_terms_wildcard(
        &self,
        text: &str,
        options: &FindTermsOptions,
        wildcard: FindTermsWildcard,
    ) -> Result<Vec<DatabaseDeinflection>, TranslatorError> {
        let records = self
            .db
            .find_terms_bulk(
                &[text.to_string()],
                &options.enabled_dictionary_map,
                Some(wildcard),
            )
            .await?;
        if records.is_empty() {
            return Ok(vec![]);
        }
        let mut deinflection = DatabaseDeinflection::new(text, text, text, 0, vec![]);
        deinflection.database_entries = records;
        Ok(vec![deinflection])
    }

    async fn find_term_deinflections(
        &self,
        text: &str,
        options: &FindTermsOptions,
    ) -> Result<Vec<DatabaseDeinflection>, TranslatorError> {
        let mut deinflections = self.get_all_deinflections(text, options)?;
        if deinflections.is_empty() {
            return Ok(deinflections);
        }

        // one lookup per unique deinflected term
        let mut unique_terms: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (index, deinflection) in deinflections.iter().enumerate() {
            unique_terms
                .entry(deinflection.deinflected_text.clone())
                .or_default()
                .push(index);
        }
        let term_list: Vec<String> = unique_terms.keys().cloned().collect();
        log::trace!(
            "{} deinflections over {} unique terms",
            deinflections.len(),
            term_list.len()
        );

        let records = self
            .db
            .find_terms_bulk(&term_list, &options.enabled_dictionary_map, None)
            .await?;
        for record in records {
            let Some((_, indices)) = unique_terms.get_index(record.index) else {
                continue;
            };
            let definition_rules = self.deinflector.rules_to_rule_flags(&record.rules);
            for &index in indices {
                let deinflection = &mut deinflections[index];
                if deinflection.rules == 0 || (definition_rules & deinflection.rules) != 0 {
                    deinflection.database_entries.push(record.clone());
                }
            }
        }
        Ok(deinflections)
    }

    /// Deinflects every prefix of every text variant, longest prefix first.
    ///
    /// A prefix already produced by an earlier variant ends that variant.
    fn get_all_deinflections(
        &self,
        text: &str,
        options: &FindTermsOptions,
    ) -> Result<Vec<DatabaseDeinflection>, TranslatorError> {
        let mut deinflections = vec![];
        let mut used: IndexSet<String> = IndexSet::new();

        for variant in TextVariants::new(options) {
            let mut source_map = TextSourceMap::new(text);
            let transformed = apply_text_variant(text, variant, &mut source_map)?;
            let chars: Vec<char> = transformed.chars().collect();

            for length in (1..=chars.len()).rev() {
                let substring: String = chars[..length].iter().collect();
                if used.contains(&substring) {
                    break;
                }
                let raw_source = source_map.source_prefix(length);
                for deinflection in self.deinflector.deinflect(&substring) {
                    deinflections.push(DatabaseDeinflection::new(
                        raw_source.clone(),
                        substring.clone(),
                        deinflection.term,
                        deinflection.rules,
                        deinflection.reasons,
                    ));
                }
                used.insert(substring);
            }
        }
        Ok(deinflections)
    }

    async fn expand_term_tags(
        &self,
        dictionary_entries: &mut [TermDictionaryEntry],
    ) -> Result<(), TranslatorError> {
        let mut targets = term_tag_targets(dictionary_entries);
        self.tag_aggregator().expand_and_group(&mut targets).await?;
        Ok(())
    }

    /// Attaches frequencies and pronunciations to every headword.
    async fn add_term_meta(
        &self,
        dictionary_entries: &mut [TermDictionaryEntry],
        enabled_dictionary_map: &TermEnabledDictionaryMap,
    ) -> Result<(), TranslatorError> {
        // term -> reading -> (entry index, headword index)
        let mut headword_map: IndexMap<String, IndexMap<String, Vec<(usize, usize)>>> =
            IndexMap::new();
        for (entry_index, entry) in dictionary_entries.iter().enumerate() {
            for (headword_index, headword) in entry.headwords.iter().enumerate() {
                headword_map
                    .entry(headword.term.clone())
                    .or_default()
                    .entry(headword.reading.clone())
                    .or_default()
                    .push((entry_index, headword_index));
            }
        }
        if headword_map.is_empty() {
            return Ok(());
        }

        let term_list: Vec<String> = headword_map.keys().cloned().collect();
        let metas = self
            .db
            .find_term_meta_bulk(&term_list, enabled_dictionary_map)
            .await?;

        for meta in metas {
            let Some((_, reading_map)) = headword_map.get_index(meta.index) else {
                continue;
            };
            let order = enabled_dictionary_map.dictionary_order(&meta.dictionary);

            for (reading, targets) in reading_map {
                match &meta.data {
                    TermMetaData::Frequency(data) => {
                        let (has_reading, frequency) = match data {
                            TermMetaFrequencyData::WithReading {
                                reading: frequency_reading,
                                frequency,
                            } => {
                                if frequency_reading != reading {
                                    continue;
                                }
                                (true, frequency)
                            }
                            TermMetaFrequencyData::Generic(frequency) => (false, frequency),
                        };
                        for &(entry_index, headword_index) in targets {
                            let frequencies = &mut dictionary_entries[entry_index].frequencies;
                            frequencies.push(TermFrequency {
                                index: frequencies.len(),
                                headword_index,
                                dictionary: meta.dictionary.clone(),
                                dictionary_index: order.index,
                                dictionary_priority: order.priority,
                                has_reading,
                                frequency: frequency.clone(),
                            });
                        }
                    }
                    TermMetaData::Pitch(data) => {
                        if &data.reading != reading {
                            continue;
                        }
                        let pitches: Vec<TermPitch> = data
                            .pitches
                            .iter()
                            .map(|pitch| {
                                let mut tag_groups = vec![];
                                if !pitch.tags.is_empty() {
                                    tag_groups
                                        .push(TagGroup::new(meta.dictionary.clone(), pitch.tags.clone()));
                                }
                                TermPitch {
                                    position: pitch.position,
                                    tag_groups,
                                    tags: vec![],
                                }
                            })
                            .collect();
                        for &(entry_index, headword_index) in targets {
                            let pronunciations =
                                &mut dictionary_entries[entry_index].pronunciations;
                            pronunciations.push(TermPronunciation {
                                index: pronunciations.len(),
                                headword_index,
                                dictionary: meta.dictionary.clone(),
                                dictionary_index: order.index,
                                dictionary_priority: order.priority,
                                pitches: pitches.clone(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    async fn add_kanji_meta(
        &self,
        dictionary_entries: &mut [KanjiDictionaryEntry],
        enabled_dictionary_map: &KanjiEnabledDictionaryMap,
    ) -> Result<(), TranslatorError> {
        let kanji_list: Vec<String> = dictionary_entries
            .iter()
            .map(|entry| entry.character.clone())
            .collect();
        let metas = self
            .db
            .find_kanji_meta_bulk(&kanji_list, enabled_dictionary_map)
            .await?;

        for meta in metas {
            let Some(entry) = dictionary_entries.get_mut(meta.index) else {
                continue;
            };
            let order = enabled_dictionary_map.dictionary_order(&meta.dictionary);
            entry.frequencies.push(KanjiFrequency {
                index: entry.frequencies.len(),
                dictionary: meta.dictionary,
                dictionary_index: order.index,
                dictionary_priority: order.priority,
                character: meta.character,
                frequency: meta.frequency,
            });
        }
        Ok(())
    }

    /// Resolves stat names through the tag table and groups them by category.
    /// Stats with no matching tag are dropped.
    async fn expand_kanji_stats(
        &self,
        stats: &IndexMap<String, String>,
        dictionary: &str,
    ) -> Result<KanjiStatGroups, TranslatorError> {
        let mut groups = KanjiStatGroups::new();
        if stats.is_empty() {
            return Ok(groups);
        }

        let queries: Vec<TagQuery> = stats
            .keys()
            .map(|name| TagQuery {
                query: get_name_base(name).to_string(),
                dictionary: dictionary.to_string(),
            })
            .collect();
        let database_tags = self.db.find_tag_meta_bulk(&queries).await?;

        for ((name, value), database_tag) in stats.iter().zip(database_tags) {
            let Some(tag) = database_tag else {
                continue;
            };
            let category = match tag.category.is_empty() {
                true => "default".to_string(),
                false => tag.category.clone(),
            };
            groups.entry(tag.category).or_default().push(KanjiStat {
                name: name.clone(),
                category,
                content: tag.notes,
                order: tag.order,
                score: tag.score,
                dictionary: dictionary.to_string(),
                value: value.clone(),
            });
        }

        for group in groups.values_mut() {
            sort_kanji_stats(&self.string_comparer, group);
        }
        Ok(groups)
    }
}

/// Runs the transforms selected by `variant`, in their fixed order.
fn apply_text_variant(
    text: &str,
    variant: TextVariant<'_>,
    source_map: &mut TextSourceMap,
) -> Result<String, TranslatorError> {
    let mut text = text.to_string();
    if let Some(replacements) = variant.text_replacements {
        text = apply_text_replacements(&text, source_map, replacements)?;
    }
    if variant.half_width {
        text = convert_halfwidth_kana_to_fullwidth(&text, source_map);
    }
    if variant.numeric {
        text = convert_numeric_to_fullwidth(&text);
    }
    if variant.alphabetic {
        text = convert_alphabetic_to_kana(&text, source_map);
    }
    if variant.hiragana_to_katakana {
        text = convert_hiragana_to_katakana(&text);
    }
    if variant.katakana_to_hiragana {
        text = convert_katakana_to_hiragana(&text, false);
    }
    if variant.collapse_emphatic {
        text = collapse_emphatic_sequences(&text, variant.collapse_emphatic_full, source_map);
    }
    Ok(text)
}

fn apply_text_replacements(
    text: &str,
    source_map: &mut TextSourceMap,
    replacements: &[FindTermsTextReplacement],
) -> Result<String, TranslatorError> {
    let mut text = text.to_string();
    for FindTermsTextReplacement {
        pattern,
        replacement,
        is_global,
    } in replacements
    {
        text = apply_text_replacement(&text, source_map, pattern, replacement, *is_global)
            .map_err(|reason| TranslatorError::InvalidTextReplacement {
                pattern: pattern.as_str().to_string(),
                reason: Box::new(reason),
            })?;
    }
    Ok(text)
}

/// Drops every unresolved tag group and resolved tag.
fn clear_term_tags(dictionary_entries: &mut [TermDictionaryEntry]) {
    for entry in dictionary_entries.iter_mut() {
        for headword in entry.headwords.iter_mut() {
            headword.tag_groups.clear();
            headword.tags.clear();
        }
        for definition in entry.definitions.iter_mut() {
            definition.tag_groups.clear();
            definition.tags.clear();
        }
        for pitch in entry
            .pronunciations
            .iter_mut()
            .flat_map(|pronunciation| pronunciation.pitches.iter_mut())
        {
            pitch.tag_groups.clear();
            pitch.tags.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{past_tense_deinflector, MemoryDatabase};

    #[test]
    fn variant_transforms_run_in_order() {
        let options = FindTermsOptions {
            convert_half_width_characters: crate::settings::TranslationConvertType::True,
            convert_katakana_to_hiragana: crate::settings::TranslationConvertType::True,
            ..Default::default()
        };
        let variant = TextVariants::new(&options).next().unwrap();
        let mut source_map = TextSourceMap::new("ｶﾞｸｾｲ");
        let text = apply_text_variant("ｶﾞｸｾｲ", variant, &mut source_map).unwrap();
        assert_eq!(text, "がくせい");
        assert_eq!(source_map.source_prefix(1), "ｶﾞ");
    }

    #[test]
    fn used_prefixes_stop_later_variants() {
        let translator = Translator::new(MemoryDatabase::default(), past_tense_deinflector()).unwrap();
        let options = FindTermsOptions::default();
        let deinflections = translator.get_all_deinflections("カタ", &options).unwrap();
        let transformed: IndexSet<&str> = deinflections
            .iter()
            .map(|d| d.transformed_text.as_str())
            .collect();
        assert_eq!(
            transformed.into_iter().collect::<Vec<_>>(),
            vec!["カタ", "カ", "かた", "か"]
        );
        assert!(deinflections
            .iter()
            .filter(|d| d.transformed_text == "かた")
            .all(|d| d.original_text == "カタ"));
    }
}
