use std::collections::BTreeSet;

use crate::normalize::normalize;
use crate::tokenizer::tokenize;
use crate::{DocId, IdfVector, InvertedIndex, TermFrequencyVector, TfIdfVector, Vocabulary};

/// A query projected into the corpus vector space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedQuery {
    pub vector: TfIdfVector,
    /// Documents sharing at least one token with the query.
    pub candidates: BTreeSet<DocId>,
}

impl ProcessedQuery {
    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }
}

/// Tokenize `text` like a document and build its normalized vector and
/// candidate set. Terms outside `vocabulary` are ignored.
pub fn process_query(
    text: &str,
    vocabulary: &Vocabulary,
    idf: &IdfVector,
    index: &InvertedIndex,
) -> ProcessedQuery {
    let mut tf = TermFrequencyVector::new();
    let mut candidates = BTreeSet::new();
    for term in tokenize(text) {
        let Some(token) = vocabulary.get(&term) else { continue };
        tf.increment(token);
        if let Some(docs) = index.postings(token) {
            candidates.extend(docs.iter().copied());
        }
    }
    ProcessedQuery { vector: normalize(&tf, idf), candidates }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idf::compute_idf;
    use crate::indexer::index_documents;
    use crate::Document;

    #[test]
    fn unknown_terms_are_dropped() {
        let docs = vec![Document::new(0, "red fish"), Document::new(1, "blue fish"), Document::new(2, "cat")];
        let corpus = index_documents(&docs);
        let idf = compute_idf(&corpus.document_frequency, docs.len()).unwrap();
        let index = InvertedIndex::build(&corpus.term_frequencies);

        let q = process_query("RED whale", &corpus.vocabulary, &idf, &index);
        assert_eq!(q.vector.len(), 1);
        assert_eq!(q.candidates.into_iter().collect::<Vec<_>>(), vec![0]);

        let q = process_query("fish fish cat", &corpus.vocabulary, &idf, &index);
        assert_eq!(q.candidates.into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);

        let q = process_query("nonexistent term", &corpus.vocabulary, &idf, &index);
        assert!(q.is_empty());
        assert!(q.candidates.is_empty());
    }
}
