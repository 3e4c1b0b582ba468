//! Builds term entries from database records and merges them into
//! grouped entries.

use indexmap::IndexMap;

use crate::{
    dictionary::{
        DictionaryEntryType, TagGroup, TermDefinition, TermDictionaryEntry, TermGlossary,
        TermHeadword, TermSource,
    },
    dictionary_database::{DictionaryDatabase, SequenceQuery, TermEntry, TermExactQueryRequest},
    errors::DatabaseError,
    sorting::{sort_definition_entries, sort_entries_by_id, DefinitionEntry},
    translation::{EnabledDictionaryMap, TermEnabledDictionaryMap},
    translation_internal::DictionaryEntryGroup,
};

/// Turns a single database record into a one-headword, one-definition entry.
pub fn create_term_dictionary_entry_from_database_entry(
    record: &TermEntry,
    original_text: &str,
    transformed_text: &str,
    deinflected_text: &str,
    reasons: Vec<String>,
    is_primary: bool,
    enabled_dictionary_map: &TermEnabledDictionaryMap,
) -> TermDictionaryEntry {
    let TermEntry {
        id,
        term,
        reading,
        definition_tags,
        term_tags,
        rules,
        definitions,
        score,
        dictionary,
        sequence,
        ..
    } = record;

    let reading = match reading.is_empty() {
        true => term.clone(),
        false => reading.clone(),
    };
    let order = enabled_dictionary_map.dictionary_order(dictionary);
    let source_term_exact_match_count = (is_primary && deinflected_text == term.as_str()) as usize;
    let source = TermSource {
        original_text: original_text.to_string(),
        transformed_text: transformed_text.to_string(),
        deinflected_text: deinflected_text.to_string(),
        is_primary,
    };

    let mut headword_tag_groups = vec![];
    let mut definition_tag_groups = vec![];
    if !term_tags.is_empty() {
        headword_tag_groups.push(TagGroup::new(dictionary.clone(), term_tags.clone()));
    }
    if !definition_tags.is_empty() {
        definition_tag_groups.push(TagGroup::new(dictionary.clone(), definition_tags.clone()));
    }

    TermDictionaryEntry {
        entry_type: DictionaryEntryType::Term,
        id: *id,
        is_primary,
        inflections: reasons,
        score: *score,
        dictionary_index: order.index,
        dictionary_priority: order.priority,
        source_term_exact_match_count,
        max_transformed_text_length: transformed_text.chars().count(),
        headwords: vec![TermHeadword {
            index: 0,
            term: term.clone(),
            reading,
            sources: vec![source],
            tag_groups: headword_tag_groups,
            tags: vec![],
            word_classes: rules.clone(),
        }],
        definitions: vec![TermDefinition {
            index: 0,
            headword_indices: vec![0],
            dictionary: dictionary.clone(),
            sequence: (*sequence).max(-1),
            is_primary,
            tag_groups: definition_tag_groups,
            tags: vec![],
            entries: definitions.clone(),
        }],
        pronunciations: vec![],
        frequencies: vec![],
    }
}

/// An entry created from a related (non-searched) record.
fn create_related_entry(
    record: &TermEntry,
    source_text: &str,
    enabled_dictionary_map: &TermEnabledDictionaryMap,
) -> TermDictionaryEntry {
    create_term_dictionary_entry_from_database_entry(
        record,
        source_text,
        source_text,
        source_text,
        vec![],
        false,
        enabled_dictionary_map,
    )
}

fn headword_key(entry: &TermDictionaryEntry) -> Option<(String, String)> {
    entry
        .headwords
        .first()
        .map(|headword| (headword.term.clone(), headword.reading.clone()))
}

/// Groups entries sharing the first headword's term, reading and inflection chain.
pub fn group_dictionary_entries_by_headword(
    entries: impl IntoIterator<Item = TermDictionaryEntry>,
) -> Vec<TermDictionaryEntry> {
    let mut groups: IndexMap<(String, String, Vec<String>), Vec<TermDictionaryEntry>> =
        IndexMap::new();
    for entry in entries {
        let (term, reading) = headword_key(&entry).unwrap_or_default();
        groups
            .entry((term, reading, entry.inflections.clone()))
            .or_default()
            .push(entry);
    }
    groups
        .into_values()
        .map(|group| create_grouped_dictionary_entry(group, false))
        .collect()
}

fn add_unique_strings(list: &mut Vec<String>, new_items: &[String]) {
    for item in new_items {
        if !list.contains(item) {
            list.push(item.clone());
        }
    }
}

fn add_unique_sources(sources: &mut Vec<TermSource>, new_sources: &[TermSource]) {
    if sources.is_empty() {
        sources.extend_from_slice(new_sources);
        return;
    }
    for new_source in new_sources {
        let existing = sources.iter_mut().find(|source| {
            source.deinflected_text == new_source.deinflected_text
                && source.transformed_text == new_source.transformed_text
                && source.original_text == new_source.original_text
        });
        match existing {
            Some(source) => source.is_primary |= new_source.is_primary,
            None => sources.push(new_source.clone()),
        }
    }
}

/// Tag groups of the same dictionary share one group with unique names.
pub fn add_unique_tag_groups(tag_groups: &mut Vec<TagGroup>, new_tag_groups: &[TagGroup]) {
    for new_group in new_tag_groups {
        match tag_groups
            .iter_mut()
            .find(|group| group.dictionary == new_group.dictionary)
        {
            Some(group) => add_unique_strings(&mut group.tag_names, &new_group.tag_names),
            None => tag_groups.push(new_group.clone()),
        }
    }
}

fn add_term_headwords(
    headwords: &mut IndexMap<(String, String), TermHeadword>,
    new_headwords: &[TermHeadword],
) -> Vec<usize> {
    let mut headword_index_map = Vec::with_capacity(new_headwords.len());
    for new_headword in new_headwords {
        let next_index = headwords.len();
        let headword = headwords
            .entry((new_headword.term.clone(), new_headword.reading.clone()))
            .or_insert_with(|| TermHeadword {
                index: next_index,
                term: new_headword.term.clone(),
                reading: new_headword.reading.clone(),
                sources: vec![],
                tag_groups: vec![],
                tags: vec![],
                word_classes: vec![],
            });
        add_unique_sources(&mut headword.sources, &new_headword.sources);
        add_unique_tag_groups(&mut headword.tag_groups, &new_headword.tag_groups);
        add_unique_strings(&mut headword.word_classes, &new_headword.word_classes);
        headword_index_map.push(headword.index);
    }
    headword_index_map
}

/// Inserts into a sorted list, skipping values already present.
fn add_unique_headword_index(headword_indices: &mut Vec<usize>, headword_index: usize) {
    if let Err(position) = headword_indices.binary_search(&headword_index) {
        headword_indices.insert(position, headword_index);
    }
}

fn remap(headword_index_map: &[usize], headword_index: usize) -> usize {
    headword_index_map
        .get(headword_index)
        .copied()
        .unwrap_or(headword_index)
}

fn add_term_definitions(
    definitions: &mut Vec<TermDefinition>,
    new_definitions: &[TermDefinition],
    headword_index_map: &[usize],
) {
    for definition in new_definitions {
        definitions.push(TermDefinition {
            index: definitions.len(),
            headword_indices: definition
                .headword_indices
                .iter()
                .map(|&index| remap(headword_index_map, index))
                .collect(),
            ..definition.clone()
        });
    }
}

type DefinitionKey = (String, i64, Vec<TermGlossary>);

/// Like [add_term_definitions], but definitions with the same dictionary,
/// sequence and glossary collapse into one.
fn add_term_definitions_unique(
    definitions: &mut Vec<TermDefinition>,
    definitions_map: &mut IndexMap<DefinitionKey, usize>,
    new_definitions: &[TermDefinition],
    headword_index_map: &[usize],
) {
    for new_definition in new_definitions {
        let key = (
            new_definition.dictionary.clone(),
            new_definition.sequence,
            new_definition.entries.clone(),
        );
        let position = match definitions_map.get(&key) {
            Some(&position) => {
                definitions[position].is_primary |= new_definition.is_primary;
                position
            }
            None => {
                let position = definitions.len();
                definitions.push(TermDefinition {
                    index: position,
                    headword_indices: vec![],
                    dictionary: new_definition.dictionary.clone(),
                    sequence: new_definition.sequence,
                    is_primary: new_definition.is_primary,
                    tag_groups: vec![],
                    tags: vec![],
                    entries: new_definition.entries.clone(),
                });
                definitions_map.insert(key, position);
                position
            }
        };

        let definition = &mut definitions[position];
        for &headword_index in &new_definition.headword_indices {
            add_unique_headword_index(
                &mut definition.headword_indices,
                remap(headword_index_map, headword_index),
            );
        }
        add_unique_tag_groups(&mut definition.tag_groups, &new_definition.tag_groups);
    }
}

/// Merges `entries` into a single entry with id `-1`.
///
/// Headwords keep the order of `entries`; definitions follow the
/// definition ordering of their source entries.
pub fn create_grouped_dictionary_entry(
    entries: Vec<TermDictionaryEntry>,
    mut check_duplicate_definitions: bool,
) -> TermDictionaryEntry {
    let mut headwords: IndexMap<(String, String), TermHeadword> = IndexMap::new();
    let mut definition_entries: Vec<DefinitionEntry> = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let headword_index_map = add_term_headwords(&mut headwords, &entry.headwords);
            DefinitionEntry {
                index,
                entry,
                headword_index_map,
            }
        })
        .collect();

    if definition_entries.len() > 1 {
        sort_definition_entries(&mut definition_entries);
    } else {
        check_duplicate_definitions = false;
    }

    let mut score = i64::MIN;
    let mut dictionary_index = usize::MAX;
    let mut dictionary_priority = i64::MIN;
    let mut max_transformed_text_length = 0;
    let mut source_term_exact_match_count = 0;
    let mut is_primary = false;
    let mut inflections: Option<Vec<String>> = None;
    let mut definitions: Vec<TermDefinition> = vec![];
    let mut definitions_map: IndexMap<DefinitionKey, usize> = IndexMap::new();

    for DefinitionEntry {
        entry,
        headword_index_map,
        ..
    } in definition_entries
    {
        score = score.max(entry.score);
        dictionary_index = dictionary_index.min(entry.dictionary_index);
        dictionary_priority = dictionary_priority.max(entry.dictionary_priority);
        if entry.is_primary {
            is_primary = true;
            max_transformed_text_length =
                max_transformed_text_length.max(entry.max_transformed_text_length);
            source_term_exact_match_count += entry.source_term_exact_match_count;
            let shorter = match &inflections {
                Some(current) => entry.inflections.len() < current.len(),
                None => true,
            };
            if shorter {
                inflections = Some(entry.inflections.clone());
            }
        }
        match check_duplicate_definitions {
            true => add_term_definitions_unique(
                &mut definitions,
                &mut definitions_map,
                &entry.definitions,
                &headword_index_map,
            ),
            false => {
                add_term_definitions(&mut definitions, &entry.definitions, &headword_index_map)
            }
        }
    }

    TermDictionaryEntry {
        entry_type: DictionaryEntryType::Term,
        id: -1,
        is_primary,
        inflections: inflections.unwrap_or_default(),
        score,
        dictionary_index,
        dictionary_priority,
        source_term_exact_match_count,
        max_transformed_text_length,
        headwords: headwords.into_values().collect(),
        definitions,
        pronunciations: vec![],
        frequencies: vec![],
    }
}

/// Dictionaries allowed to take part in secondary searches.
pub fn get_secondary_search_dictionary_map(
    enabled_dictionary_map: &TermEnabledDictionaryMap,
) -> TermEnabledDictionaryMap {
    enabled_dictionary_map
        .iter()
        .filter(|(_, dictionary)| dictionary.allow_secondary_searches)
        .map(|(name, dictionary)| (name.clone(), dictionary.clone()))
        .collect()
}

/// Merges entries of the main dictionary that share a sequence number,
/// pulling in the rest of each sequence plus related secondary records.
///
/// Entries outside of any sequence group are grouped by headword.
pub async fn get_related_dictionary_entries<D: DictionaryDatabase + ?Sized>(
    db: &D,
    entries: Vec<TermDictionaryEntry>,
    main_dictionary: &str,
    enabled_dictionary_map: &TermEnabledDictionaryMap,
) -> Result<Vec<TermDictionaryEntry>, DatabaseError> {
    let mut sequence_list: Vec<SequenceQuery> = vec![];
    let mut groups: Vec<DictionaryEntryGroup> = vec![];
    let mut group_by_sequence: IndexMap<i64, usize> = IndexMap::new();
    let mut ungrouped: IndexMap<i64, TermDictionaryEntry> = IndexMap::new();

    for entry in entries {
        let sequence = entry
            .definitions
            .first()
            .filter(|definition| definition.dictionary == main_dictionary && definition.sequence >= 0)
            .map(|definition| definition.sequence);
        let Some(sequence) = sequence else {
            ungrouped.insert(entry.id, entry);
            continue;
        };
        let group_index = *group_by_sequence.entry(sequence).or_insert_with(|| {
            sequence_list.push(SequenceQuery {
                query: sequence,
                dictionary: main_dictionary.to_string(),
            });
            groups.push(DictionaryEntryGroup::default());
            groups.len() - 1
        });
        groups[group_index].insert(entry);
    }

    if !sequence_list.is_empty() {
        let secondary_search_dictionary_map =
            get_secondary_search_dictionary_map(enabled_dictionary_map);
        add_related_dictionary_entries(
            db,
            &mut groups,
            &mut ungrouped,
            &sequence_list,
            enabled_dictionary_map,
        )
        .await?;
        for group in groups.iter_mut() {
            sort_entries_by_id(group);
        }
        if !ungrouped.is_empty() || !secondary_search_dictionary_map.is_empty() {
            add_secondary_related_dictionary_entries(
                db,
                &mut groups,
                &mut ungrouped,
                enabled_dictionary_map,
                &secondary_search_dictionary_map,
            )
            .await?;
        }
    }

    log::debug!(
        "merged {} sequence groups, {} ungrouped entries",
        groups.len(),
        ungrouped.len()
    );

    let mut merged: Vec<TermDictionaryEntry> = groups
        .into_iter()
        .map(|group| create_grouped_dictionary_entry(group.dictionary_entries, true))
        .collect();
    merged.extend(group_dictionary_entries_by_headword(ungrouped.into_values()));
    Ok(merged)
}

async fn add_related_dictionary_entries<D: DictionaryDatabase + ?Sized>(
    db: &D,
    groups: &mut [DictionaryEntryGroup],
    ungrouped: &mut IndexMap<i64, TermDictionaryEntry>,
    sequence_list: &[SequenceQuery],
    enabled_dictionary_map: &TermEnabledDictionaryMap,
) -> Result<(), DatabaseError> {
    let records = db.find_terms_by_sequence_bulk(sequence_list).await?;
    for record in &records {
        let Some(group) = groups.get_mut(record.index) else {
            continue;
        };
        if group.ids.contains(&record.id) {
            continue;
        }
        group.insert(create_related_entry(
            record,
            &record.term,
            enabled_dictionary_map,
        ));
        ungrouped.shift_remove(&record.id);
    }
    Ok(())
}

#[derive(Debug, Default)]
struct SecondaryTarget {
    groups: Vec<usize>,
    search_secondary: bool,
}

async fn add_secondary_related_dictionary_entries<D: DictionaryDatabase + ?Sized>(
    db: &D,
    groups: &mut [DictionaryEntryGroup],
    ungrouped: &mut IndexMap<i64, TermDictionaryEntry>,
    enabled_dictionary_map: &TermEnabledDictionaryMap,
    secondary_search_dictionary_map: &TermEnabledDictionaryMap,
) -> Result<(), DatabaseError> {
    let mut term_list: Vec<TermExactQueryRequest> = vec![];
    let mut target_list: Vec<(String, String)> = vec![];
    let mut targets: IndexMap<(String, String), SecondaryTarget> = IndexMap::new();

    for (group_index, group) in groups.iter().enumerate() {
        for entry in &group.dictionary_entries {
            let Some(key) = headword_key(entry) else {
                continue;
            };
            let target = targets.entry(key.clone()).or_default();
            target.groups.push(group_index);
            if !entry.is_primary && !target.search_secondary {
                target.search_secondary = true;
                term_list.push(TermExactQueryRequest {
                    term: key.0.clone(),
                    reading: key.1.clone(),
                });
                target_list.push(key);
            }
        }
    }

    // attach unsequenced entries to a sequenced group with the same headword
    let ids: Vec<i64> = ungrouped.keys().copied().collect();
    for id in ids {
        let Some(target) = ungrouped
            .get(&id)
            .and_then(headword_key)
            .and_then(|key| targets.get(&key))
        else {
            continue;
        };
        let Some(&group_index) = target
            .groups
            .iter()
            .find(|&&group_index| !groups[group_index].ids.contains(&id))
        else {
            continue;
        };
        if let Some(entry) = ungrouped.shift_remove(&id) {
            groups[group_index].insert(entry);
        }
    }

    if term_list.is_empty() || secondary_search_dictionary_map.is_empty() {
        return Ok(());
    }

    let mut records = db
        .find_terms_exact_bulk(&term_list, secondary_search_dictionary_map)
        .await?;
    records.sort_by_key(|record| record.index);

    for record in &records {
        let (Some(request), Some(key)) = (term_list.get(record.index), target_list.get(record.index))
        else {
            continue;
        };
        let Some(target) = targets.get(key) else {
            continue;
        };
        for &group_index in &target.groups {
            let group = &mut groups[group_index];
            if group.ids.contains(&record.id) {
                continue;
            }
            group.insert(create_related_entry(
                record,
                &request.term,
                enabled_dictionary_map,
            ));
            ungrouped.shift_remove(&record.id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{Batch, MemoryDatabase},
        translation::FindTermDictionary,
    };
    use indexmap::IndexSet;
    use pretty_assertions::assert_eq;

    fn dictionary_map() -> TermEnabledDictionaryMap {
        let mut map = TermEnabledDictionaryMap::new();
        map.insert(
            "JMdict".to_string(),
            FindTermDictionary {
                index: 0,
                priority: 0,
                allow_secondary_searches: false,
            },
        );
        map.insert(
            "Kirei".to_string(),
            FindTermDictionary {
                index: 1,
                priority: 0,
                allow_secondary_searches: true,
            },
        );
        map
    }

    fn record(id: i64, term: &str, reading: &str, glossary: &str) -> TermEntry {
        TermEntry {
            index: 0,
            id,
            term: term.to_string(),
            reading: reading.to_string(),
            definition_tags: vec!["n".to_string()],
            term_tags: vec![],
            rules: vec![],
            definitions: vec![glossary.into()],
            score: 0,
            dictionary: "JMdict".to_string(),
            sequence: -1,
        }
    }

    fn primary(record: &TermEntry, reasons: Vec<String>) -> TermDictionaryEntry {
        create_term_dictionary_entry_from_database_entry(
            record,
            &record.term,
            &record.term,
            &record.term,
            reasons,
            true,
            &dictionary_map(),
        )
    }

    #[test]
    fn database_record_to_entry() {
        let mut raw = record(7, "猫", "", "cat");
        raw.sequence = -30;
        raw.term_tags = vec!["P".to_string()];
        let entry = create_term_dictionary_entry_from_database_entry(
            &raw,
            "猫が",
            "猫が",
            "猫",
            vec![],
            true,
            &dictionary_map(),
        );
        assert_eq!(entry.id, 7);
        assert_eq!(entry.headwords[0].reading, "猫");
        assert_eq!(entry.definitions[0].sequence, -1);
        assert_eq!(entry.source_term_exact_match_count, 1);
        assert_eq!(entry.max_transformed_text_length, 2);
        assert_eq!(entry.headwords[0].tag_groups[0].tag_names, vec!["P".to_string()]);
        assert_eq!(entry.definitions[0].headword_indices, vec![0]);
    }

    #[test]
    fn headword_grouping_keys_are_unique() {
        let entries = vec![
            primary(&record(1, "橋", "はし", "bridge"), vec![]),
            primary(&record(2, "箸", "はし", "chopsticks"), vec![]),
            primary(&record(3, "橋", "はし", "bridge (2)"), vec![]),
            primary(&record(4, "橋", "はし", "bridge (3)"), vec!["past".to_string()]),
        ];
        let grouped = group_dictionary_entries_by_headword(entries);
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].headwords.len(), 1);
        assert_eq!(grouped[0].definitions.len(), 2);
        assert_eq!(grouped[0].id, -1);
        assert_eq!(grouped[2].inflections, vec!["past".to_string()]);

        let keys: IndexSet<_> = grouped
            .iter()
            .map(|entry| {
                (
                    entry.headwords[0].term.clone(),
                    entry.headwords[0].reading.clone(),
                    entry.inflections.clone(),
                )
            })
            .collect();
        assert_eq!(keys.len(), grouped.len());
    }

    #[test]
    fn grouped_entry_takes_shortest_primary_inflections() {
        let longer = primary(
            &record(1, "食べる", "たべる", "eat"),
            vec!["-tai".to_string(), "negative".to_string()],
        );
        let shorter = primary(&record(2, "食べる", "たべる", "consume"), vec!["past".to_string()]);
        let mut related = primary(&record(3, "食べる", "たべる", "live on"), vec![]);
        related.is_primary = false;

        let merged = create_grouped_dictionary_entry(vec![longer, shorter, related], false);
        assert_eq!(merged.inflections, vec!["past".to_string()]);
        assert!(merged.is_primary);
        assert_eq!(merged.source_term_exact_match_count, 2);
    }

    #[test]
    fn duplicate_definitions_merge() {
        let mut first = record(1, "生", "なま", "raw");
        first.sequence = 42;
        let mut second = record(2, "生", "せい", "raw");
        second.sequence = 42;
        second.definition_tags = vec!["adj-no".to_string(), "n".to_string()];

        let merged =
            create_grouped_dictionary_entry(vec![primary(&first, vec![]), primary(&second, vec![])], true);
        assert_eq!(merged.headwords.len(), 2);
        assert_eq!(merged.definitions.len(), 1);
        assert_eq!(merged.definitions[0].headword_indices, vec![0, 1]);
        assert_eq!(
            merged.definitions[0].tag_groups[0].tag_names,
            vec!["n".to_string(), "adj-no".to_string()]
        );
    }

    #[test]
    fn sources_merge_and_upgrade_primary() {
        let mut sources = vec![TermSource {
            original_text: "a".into(),
            transformed_text: "a".into(),
            deinflected_text: "a".into(),
            is_primary: false,
        }];
        let mut upgrade = sources[0].clone();
        upgrade.is_primary = true;
        let other = TermSource {
            original_text: "b".into(),
            ..upgrade.clone()
        };
        add_unique_sources(&mut sources, &[upgrade, other]);
        assert_eq!(sources.len(), 2);
        assert!(sources[0].is_primary);
    }

    #[test]
    fn headword_indices_stay_sorted_and_unique() {
        let mut indices = vec![];
        for index in [3, 1, 3, 2, 0, 1] {
            add_unique_headword_index(&mut indices, index);
        }
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn secondary_map_filters() {
        let map = get_secondary_search_dictionary_map(&dictionary_map());
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Kirei"]);
    }

    #[tokio::test]
    async fn related_records_join_a_group_once() {
        let mut raw = record(1, "生", "なま", "raw");
        raw.sequence = 42;
        let mut life = record(2, "生", "せい", "life");
        life.sequence = 42;
        // same id as `life`, served again by the secondary search
        let student = TermEntry {
            dictionary: "Kirei".to_string(),
            ..record(2, "生", "せい", "student")
        };
        let kirei = TermEntry {
            dictionary: "Kirei".to_string(),
            ..record(3, "生", "せい", "life (kirei)")
        };
        let db = MemoryDatabase::default()
            .with_term(raw.clone())
            .with_term(life)
            .with_term(student)
            .with_term(kirei);

        let merged =
            get_related_dictionary_entries(&db, vec![primary(&raw, vec![])], "JMdict", &dictionary_map())
                .await
                .unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, -1);
        assert_eq!(
            merged[0]
                .definitions
                .iter()
                .map(|definition| definition.entries.clone())
                .collect::<Vec<_>>(),
            vec![
                vec![TermGlossary::from("raw")],
                vec![TermGlossary::from("life")],
                vec![TermGlossary::from("life (kirei)")],
            ]
        );
        assert_eq!(
            db.batches(),
            vec![
                Batch::TermsBySequence(vec![SequenceQuery {
                    query: 42,
                    dictionary: "JMdict".to_string(),
                }]),
                Batch::TermsExact(vec![TermExactQueryRequest {
                    term: "生".to_string(),
                    reading: "せい".to_string(),
                }]),
            ]
        );
    }
}
