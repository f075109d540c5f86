//! Error types for the search core.

use thiserror::Error;

/// Result type alias using the core's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a corpus snapshot.
///
/// Conditions such as unknown query terms, empty queries or zero-norm
/// vectors are not errors; they produce empty results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The corpus cannot produce IDF weights (no documents, inconsistent
    /// document frequencies or non-positional document ids).
    #[error("invalid corpus: {reason}")]
    InvalidCorpus { reason: String },
}

impl Error {
    pub(crate) fn invalid_corpus(reason: impl Into<String>) -> Self {
        Error::InvalidCorpus { reason: reason.into() }
    }
}
