/// Tracks how many characters of the source text each character of a
/// transformed text was produced from.
///
/// Lengths and indices are counted in `char`s. The mapping stays `None`
/// until a transformation changes the length of the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSourceMap {
    source: String,
    mapping: Option<Vec<usize>>,
}

impl TextSourceMap {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            mapping: None,
        }
    }

    pub fn mapping(&self) -> Option<&[usize]> {
        self.mapping.as_deref()
    }

    /// Number of source characters consumed by the first `final_length`
    /// characters of the transformed text.
    pub fn get_source_length(&self, final_length: usize) -> usize {
        match &self.mapping {
            None => final_length,
            Some(mapping) => mapping.iter().take(final_length).sum(),
        }
    }

    /// The source text prefix that produced the first `final_length`
    /// characters of the transformed text.
    pub fn source_prefix(&self, final_length: usize) -> String {
        let length = self.get_source_length(final_length);
        self.source.chars().take(length).collect()
    }

    /// Folds the `count` entries following `index` into `index`.
    pub fn combine(&mut self, index: usize, count: usize) {
        if count == 0 {
            return;
        }
        let mapping = self.mapping_mut();
        if index >= mapping.len() {
            return;
        }
        let end = (index + 1 + count).min(mapping.len());
        let folded: usize = mapping.drain(index + 1..end).sum();
        mapping[index] += folded;
    }

    /// Inserts `items` before `index`.
    pub fn insert(&mut self, index: usize, items: &[usize]) {
        let mapping = self.mapping_mut();
        let index = index.min(mapping.len());
        mapping.splice(index..index, items.iter().copied());
    }

    fn mapping_mut(&mut self) -> &mut Vec<usize> {
        let source = &self.source;
        self.mapping
            .get_or_insert_with(|| vec![1; source.chars().count()])
    }
}
