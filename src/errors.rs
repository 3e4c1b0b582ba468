use std::error::Error;
use thiserror::Error;

/// All possible `yomichan_translator` [Error] paths
#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("(-)[<translator::db>] -> {0}")]
    Database(#[from] DatabaseError),
    #[error("(-)[<translator::deinflector>] -> {0}")]
    Deinflector(#[from] DeinflectorError),
    #[error("invalid text replacement pattern `{pattern}`\nreason: {reason}")]
    InvalidTextReplacement {
        pattern: String,
        reason: Box<fancy_regex::Error>,
    },
    #[error("failed to load the string collator: {0}")]
    Collator(String),
}

/// Errors raised by a [crate::dictionary_database::DictionaryDatabase] implementation.
///
/// The translator never recovers from these; a failed batch fails the whole lookup.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("query err: {0}")]
    Query(String),
    #[error("db err: {0}")]
    Backend(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum DeinflectorError {
    #[error("failed to deserialize deinflection reasons: {0}")]
    Json(#[from] serde_json::Error),
}
