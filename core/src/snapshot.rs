//! Immutable, fully built corpus artifacts and the handle that swaps them.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use crate::idf::compute_idf;
use crate::indexer::{index_documents, index_documents_parallel};
use crate::normalize::{normalize_all, normalize_all_parallel};
use crate::query::process_query;
use crate::rank::rank;
use crate::{
    BuildOptions, CorpusIndex, DocId, Document, DocumentFrequency, Error, IdfVector, InvertedIndex,
    ProcessedQuery, Result, Score, TermFrequencyVector, TfIdfVector, Vocabulary,
};

/// Every artifact derived from one version of a corpus.
///
/// Nothing here changes after [`CorpusSnapshot::build`] returns; a changed
/// corpus means building a new snapshot.
#[derive(Debug, Clone)]
pub struct CorpusSnapshot {
    documents: Vec<Document>,
    vocabulary: Vocabulary,
    term_frequencies: Vec<TermFrequencyVector>,
    document_frequency: DocumentFrequency,
    idf: IdfVector,
    vectors: Vec<TfIdfVector>,
    index: InvertedIndex,
}

impl CorpusSnapshot {
    pub fn build(documents: Vec<Document>) -> Result<Self> {
        Self::build_with(documents, &BuildOptions::default())
    }

    /// Index, weight and normalize `documents`.
    ///
    /// Each document's `id` must equal its position. Fails with
    /// [`Error::InvalidCorpus`] for an empty corpus.
    pub fn build_with(documents: Vec<Document>, options: &BuildOptions) -> Result<Self> {
        let start = Instant::now();
        if let Some((pos, doc)) = documents
            .iter()
            .enumerate()
            .find(|(pos, doc)| doc.id as usize != *pos)
        {
            return Err(Error::invalid_corpus(format!(
                "document at position {pos} has id {}",
                doc.id
            )));
        }
        let parallel = options.parallelism.enabled_for(documents.len());

        let CorpusIndex { vocabulary, term_frequencies, document_frequency } = if parallel {
            index_documents_parallel(&documents)
        } else {
            index_documents(&documents)
        };
        let idf = compute_idf(&document_frequency, documents.len())?;
        let vectors = if parallel {
            normalize_all_parallel(&term_frequencies, &idf)
        } else {
            normalize_all(&term_frequencies, &idf)
        };
        let index = InvertedIndex::build(&term_frequencies);

        tracing::info!(
            num_docs = documents.len(),
            num_terms = vocabulary.len(),
            num_postings = index.num_postings(),
            parallel,
            took_ms = start.elapsed().as_millis() as u64,
            "corpus snapshot built"
        );
        Ok(Self { documents, vocabulary, term_frequencies, document_frequency, idf, vectors, index })
    }

    /// Rank the documents sharing a token with `query`, best first.
    pub fn search(&self, query: &str) -> Vec<Score> {
        let ProcessedQuery { vector, candidates } = self.process_query(query);
        rank(&vector, &self.vectors, &candidates)
    }

    pub fn search_top_k(&self, query: &str, k: usize) -> Vec<Score> {
        let mut scores = self.search(query);
        scores.truncate(k);
        scores
    }

    pub fn process_query(&self, query: &str) -> ProcessedQuery {
        process_query(query, &self.vocabulary, &self.idf, &self.index)
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.documents.get(id as usize)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn term_frequencies(&self) -> &[TermFrequencyVector] {
        &self.term_frequencies
    }

    pub fn document_frequency(&self) -> &DocumentFrequency {
        &self.document_frequency
    }

    pub fn idf(&self) -> &IdfVector {
        &self.idf
    }

    pub fn vectors(&self) -> &[TfIdfVector] {
        &self.vectors
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }
}

/// Shared pointer to the current snapshot.
///
/// Readers clone the `Arc` and keep querying it even while a replacement is
/// published; a replacement is always complete before it becomes visible.
#[derive(Debug)]
pub struct SnapshotHandle {
    current: RwLock<Arc<CorpusSnapshot>>,
}

impl SnapshotHandle {
    pub fn new(snapshot: CorpusSnapshot) -> Self {
        Self { current: RwLock::new(Arc::new(snapshot)) }
    }

    pub fn current(&self) -> Arc<CorpusSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Publish `next`, returning the snapshot it replaces.
    pub fn swap(&self, next: Arc<CorpusSnapshot>) -> Arc<CorpusSnapshot> {
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Build a snapshot from `documents` and publish it.
    ///
    /// On error the current snapshot stays in place.
    pub fn rebuild(&self, documents: Vec<Document>, options: &BuildOptions) -> Result<Arc<CorpusSnapshot>> {
        let snapshot = Arc::new(CorpusSnapshot::build_with(documents, options)?);
        let previous = self.swap(Arc::clone(&snapshot));
        tracing::info!(num_docs = snapshot.len(), previous_docs = previous.len(), "corpus snapshot swapped");
        Ok(snapshot)
    }
}
