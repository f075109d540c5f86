use std::collections::{BTreeSet, HashMap};

use crate::{DocId, TermFrequencyVector, TokenId};

/// Token id to the set of documents containing it.
///
/// Built once from the raw term-frequency vectors of a corpus; only presence
/// matters, not weight.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<TokenId, BTreeSet<DocId>>,
}

impl InvertedIndex {
    pub fn build(term_frequencies: &[TermFrequencyVector]) -> Self {
        let mut postings: HashMap<TokenId, BTreeSet<DocId>> = HashMap::new();
        for (doc_id, tf) in term_frequencies.iter().enumerate() {
            for token in tf.tokens() {
                postings.entry(token).or_default().insert(doc_id as DocId);
            }
        }
        Self { postings }
    }

    pub fn postings(&self, token: TokenId) -> Option<&BTreeSet<DocId>> {
        self.postings.get(&token)
    }

    /// Number of tokens with a posting set.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total number of (token, document) pairs.
    pub fn num_postings(&self) -> usize {
        self.postings.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postings_list_containing_documents() {
        let tfs: Vec<TermFrequencyVector> = vec![
            [(0, 2), (1, 1)].into_iter().collect(),
            [(1, 3)].into_iter().collect(),
            TermFrequencyVector::new(),
            [(0, 1), (2, 1)].into_iter().collect(),
        ];
        let index = InvertedIndex::build(&tfs);
        assert_eq!(index.len(), 3);
        assert_eq!(index.num_postings(), 5);
        assert_eq!(index.postings(0).unwrap().iter().copied().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(index.postings(1).unwrap().iter().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert!(index.postings(9).is_none());
    }
}
