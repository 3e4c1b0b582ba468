//! Dictionary lookup engine for Japanese text in the style of Yomichan.
//!
//! A [Translator] turns a piece of text into ranked term entries (or kanji
//! entries), reading records through any [DictionaryDatabase] implementation.
//!
//! # Examples
//! ```ignore
//! use yomichan_translator::{FindTermsMode, ProfileOptions, ReasonDeinflector, Translator};
//!
//! let translator = Translator::new(db, ReasonDeinflector::from_json(REASONS)?)?;
//! let options = profile.find_terms_options(None)?;
//! let result = translator.find_terms(FindTermsMode::Group, "食べた", &options).await?;
//! ```
pub mod deinflector;
pub mod dictionary;
pub mod dictionary_database;
pub mod errors;
pub mod language;
pub mod regex_util;
pub mod settings;
pub mod sorting;
pub mod tag_aggregator;
pub mod term_grouping;
pub mod text_source_map;
pub mod text_variants;
pub mod translation;
pub mod translation_internal;
pub mod translator;

#[cfg(test)]
mod test_utils;

pub use deinflector::{Deinflection, Deinflector, ReasonDeinflector};
pub use dictionary::{KanjiDictionaryEntry, TermDictionaryEntry};
pub use dictionary_database::DictionaryDatabase;
pub use errors::{DatabaseError, DeinflectorError, TranslatorError};
pub use settings::ProfileOptions;
pub use tag_aggregator::TagCache;
pub use translation::{
    FindKanjiOptions, FindTermsMode, FindTermsOptions, FindTermsResult, FindTermsWildcard,
};
pub use translator::Translator;
