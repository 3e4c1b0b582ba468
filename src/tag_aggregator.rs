use icu::collator::CollatorBorrowed;
use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::{
    dictionary::{Tag, TagTarget, TermDictionaryEntry},
    dictionary_database::{DatabaseTag, DictionaryDatabase, TagQuery},
    errors::DatabaseError,
    sorting::sort_tags,
};

/// Tag lookups already answered by the database, per dictionary.
///
/// A cached `None` means the database has no such tag.
#[derive(Debug, Default)]
pub struct TagCache {
    dictionaries: Mutex<IndexMap<String, IndexMap<String, Option<DatabaseTag>>>>,
}

impl TagCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` on a cache miss.
    pub fn get(&self, dictionary: &str, query: &str) -> Option<Option<DatabaseTag>> {
        self.dictionaries
            .lock()
            .get(dictionary)
            .and_then(|cache| cache.get(query).cloned())
    }

    pub fn insert(&self, dictionary: &str, query: &str, tag: Option<DatabaseTag>) {
        self.dictionaries
            .lock()
            .entry(dictionary.to_string())
            .or_default()
            .insert(query.to_string(), tag);
    }

    /// Number of cached lookups across every dictionary.
    pub fn len(&self) -> usize {
        self.dictionaries.lock().values().map(|cache| cache.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.dictionaries.lock().clear();
    }
}

/// The part of a tag name used to look it up, i.e. `"n:1"` is looked up as `"n"`.
pub fn get_name_base(name: &str) -> &str {
    match name.find(':') {
        Some(index) => &name[..index],
        None => name,
    }
}

pub fn create_tag(database_tag: Option<&DatabaseTag>, name: &str, dictionary: &str) -> Tag {
    let (category, notes, order, score) = match database_tag {
        Some(tag) => (tag.category.as_str(), tag.notes.as_str(), tag.order, tag.score),
        None => ("", "", 0, 0),
    };
    Tag {
        name: name.to_string(),
        category: match category.is_empty() {
            true => "default".to_string(),
            false => category.to_string(),
        },
        order,
        score,
        content: match notes.is_empty() {
            true => vec![],
            false => vec![notes.to_string()],
        },
        dictionaries: vec![dictionary.to_string()],
        redundant: false,
    }
}

/// Collects every headword, definition and pitch that has unresolved tag groups.
pub fn term_tag_targets(entries: &mut [TermDictionaryEntry]) -> Vec<&mut dyn TagTarget> {
    let mut targets: Vec<&mut dyn TagTarget> = vec![];
    for entry in entries.iter_mut() {
        let TermDictionaryEntry {
            headwords,
            definitions,
            pronunciations,
            ..
        } = entry;
        targets.extend(
            headwords
                .iter_mut()
                .map(|headword| headword as &mut dyn TagTarget),
        );
        targets.extend(
            definitions
                .iter_mut()
                .map(|definition| definition as &mut dyn TagTarget),
        );
        targets.extend(
            pronunciations
                .iter_mut()
                .flat_map(|pronunciation| pronunciation.pitches.iter_mut())
                .map(|pitch| pitch as &mut dyn TagTarget),
        );
    }
    targets.retain_mut(|target| !target.tag_groups_mut().is_empty());
    targets
}

struct TagTargetItem {
    query: String,
    dictionary: String,
    tag_name: String,
    database_tag: Option<DatabaseTag>,
    targets: Vec<usize>,
}

/// Resolves tag groups into [Tag]s for the translator, backed by a [TagCache].
pub struct TagAggregator<'a, D: DictionaryDatabase + ?Sized> {
    db: &'a D,
    cache: &'a TagCache,
    string_comparer: &'a CollatorBorrowed<'static>,
}

impl<'a, D: DictionaryDatabase + ?Sized> TagAggregator<'a, D> {
    pub fn new(
        db: &'a D,
        cache: &'a TagCache,
        string_comparer: &'a CollatorBorrowed<'static>,
    ) -> Self {
        Self {
            db,
            cache,
            string_comparer,
        }
    }

    /// Expands then groups the tags of every target.
    pub async fn expand_and_group(
        &self,
        targets: &mut [&mut dyn TagTarget],
    ) -> Result<(), DatabaseError> {
        self.expand_tag_groups(targets).await?;
        self.group_tags(targets);
        Ok(())
    }

    /// Replaces each target's tag groups with resolved tags.
    ///
    /// Every distinct `(dictionary, tag name)` is resolved once. Cache misses
    /// go to the database in a single batch.
    pub async fn expand_tag_groups(
        &self,
        targets: &mut [&mut dyn TagTarget],
    ) -> Result<(), DatabaseError> {
        let mut items: Vec<TagTargetItem> = vec![];
        let mut item_map: IndexMap<String, IndexMap<String, usize>> = IndexMap::new();

        for (target_index, target) in targets.iter_mut().enumerate() {
            let tag_groups = std::mem::take(target.tag_groups_mut());
            for group in tag_groups {
                let dictionary_items = item_map.entry(group.dictionary.clone()).or_default();
                for tag_name in group.tag_names {
                    let item_index = *dictionary_items.entry(tag_name.clone()).or_insert_with(|| {
                        items.push(TagTargetItem {
                            query: get_name_base(&tag_name).to_string(),
                            dictionary: group.dictionary.clone(),
                            tag_name,
                            database_tag: None,
                            targets: vec![],
                        });
                        items.len() - 1
                    });
                    items[item_index].targets.push(target_index);
                }
            }
        }

        let mut non_cached: Vec<usize> = vec![];
        for dictionary_items in item_map.values() {
            for &item_index in dictionary_items.values() {
                let item = &mut items[item_index];
                match self.cache.get(&item.dictionary, &item.query) {
                    Some(database_tag) => item.database_tag = database_tag,
                    None => non_cached.push(item_index),
                }
            }
        }
        log::trace!(
            "tag expansion: {} items, {} cache misses",
            items.len(),
            non_cached.len()
        );

        if !non_cached.is_empty() {
            let queries: Vec<TagQuery> = non_cached
                .iter()
                .map(|&item_index| TagQuery {
                    query: items[item_index].query.clone(),
                    dictionary: items[item_index].dictionary.clone(),
                })
                .collect();
            let mut database_tags = self.db.find_tag_meta_bulk(&queries).await?.into_iter();
            for item_index in non_cached {
                let item = &mut items[item_index];
                item.database_tag = database_tags.next().flatten();
                self.cache
                    .insert(&item.dictionary, &item.query, item.database_tag.clone());
            }
        }

        for item in &items {
            for &target_index in &item.targets {
                targets[target_index].tags_mut().push(create_tag(
                    item.database_tag.as_ref(),
                    &item.tag_name,
                    &item.dictionary,
                ));
            }
        }
        Ok(())
    }

    /// Collapses tags sharing a name and category, then sorts them.
    pub fn group_tags(&self, targets: &mut [&mut dyn TagTarget]) {
        for target in targets.iter_mut() {
            let tags = target.tags_mut();
            if tags.len() <= 1 {
                continue;
            }
            merge_similar_tags(tags);
            sort_tags(self.string_comparer, tags);
        }
    }
}

pub fn merge_similar_tags(tags: &mut Vec<Tag>) {
    let mut i = 0;
    while i < tags.len() {
        let mut j = i + 1;
        while j < tags.len() {
            if tags[j].name != tags[i].name || tags[j].category != tags[i].category {
                j += 1;
                continue;
            }
            let other = tags.remove(j);
            let tag = &mut tags[i];
            tag.order = tag.order.min(other.order);
            tag.score = tag.score.max(other.score);
            tag.dictionaries.extend(other.dictionaries);
            for content in other.content {
                if !tag.content.contains(&content) {
                    tag.content.push(content);
                }
            }
        }
        i += 1;
    }
}

/// Flags the part-of-speech tags that repeat the previous definition
/// of the same dictionary.
pub fn flag_redundant_definition_tags(entry: &mut TermDictionaryEntry) {
    let mut last_dictionary: Option<&str> = None;
    let mut last_part_of_speech: Option<Vec<String>> = None;

    for definition in entry.definitions.iter_mut() {
        let mut part_of_speech: Vec<String> = definition
            .tags
            .iter()
            .filter(|tag| tag.category == "partOfSpeech")
            .map(|tag| tag.name.clone())
            .collect();
        part_of_speech.sort();

        if last_dictionary != Some(definition.dictionary.as_str()) {
            last_dictionary = Some(definition.dictionary.as_str());
            last_part_of_speech = None;
        }

        if last_part_of_speech.as_ref() == Some(&part_of_speech) {
            for tag in definition.tags.iter_mut() {
                if tag.category == "partOfSpeech" {
                    tag.redundant = true;
                }
            }
        } else {
            last_part_of_speech = Some(part_of_speech);
        }
    }
}
