//! In-memory TF-IDF vector space search.
//!
//! Documents are tokenized, assigned dense token ids, weighted with sublinear
//! TF and smoothed IDF, normalized to unit length and answered by cosine
//! similarity over an inverted-index candidate set. See [`CorpusSnapshot`] for
//! the end-to-end entry point.

pub mod config;
pub mod error;
pub mod idf;
pub mod index;
pub mod indexer;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod snapshot;
pub mod sparse;
pub mod tokenizer;
pub mod vocab;

use serde::{Deserialize, Serialize};

pub use config::{BuildOptions, Parallelism};
pub use error::{Error, Result};
pub use idf::IdfVector;
pub use index::InvertedIndex;
pub use indexer::{CorpusIndex, DocumentFrequency};
pub use query::ProcessedQuery;
pub use snapshot::{CorpusSnapshot, SnapshotHandle};
pub use sparse::{SparseVector, TermFrequencyVector, TfIdfVector};
pub use vocab::{TokenAllocator, Vocabulary};

pub type TokenId = u32;
pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Position of the document in the corpus it was loaded into.
    pub id: DocId,
    pub text: String,
    pub category: Option<String>,
    /// Identifier carried by the source record, for presentation only.
    pub source_id: Option<u64>,
}

impl Document {
    pub fn new(id: DocId, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), category: None, source_id: None }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_source_id(mut self, source_id: u64) -> Self {
        self.source_id = Some(source_id);
        self
    }
}

/// Similarity of one candidate document to a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub doc_id: DocId,
    pub value: f64,
}
