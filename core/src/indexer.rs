//! Single pass over a corpus producing the vocabulary, per-document term
//! frequencies and document frequencies.

use rayon::prelude::*;

use crate::tokenizer::tokenize;
use crate::{Document, TermFrequencyVector, TokenAllocator, TokenId, Vocabulary};

/// Number of distinct documents each token occurs in, indexed by token id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentFrequency {
    counts: Vec<u32>,
}

impl DocumentFrequency {
    pub fn get(&self, token: TokenId) -> Option<u32> {
        self.counts.get(token as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(token, &df)| (token as TokenId, df))
    }
}

impl From<Vec<u32>> for DocumentFrequency {
    fn from(counts: Vec<u32>) -> Self {
        Self { counts }
    }
}

/// Everything the single indexing pass produces.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    pub vocabulary: Vocabulary,
    /// One vector per document, aligned with document position.
    pub term_frequencies: Vec<TermFrequencyVector>,
    pub document_frequency: DocumentFrequency,
}

impl CorpusIndex {
    pub fn num_docs(&self) -> usize {
        self.term_frequencies.len()
    }
}

/// Index `documents` sequentially.
pub fn index_documents(documents: &[Document]) -> CorpusIndex {
    build(documents.iter().map(|doc| tokenize(&doc.text)))
}

/// Index `documents`, tokenizing them on the rayon pool.
///
/// Id allocation still happens in one ordered pass afterwards, so the result
/// is identical to [`index_documents`].
pub fn index_documents_parallel(documents: &[Document]) -> CorpusIndex {
    let tokenized: Vec<Vec<String>> = documents.par_iter().map(|doc| tokenize(&doc.text)).collect();
    build(tokenized)
}

fn build<I, T, S>(token_streams: I) -> CorpusIndex
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut vocabulary = Vocabulary::new();
    let mut allocator = TokenAllocator::new(&mut vocabulary);
    let (term_frequencies, document_frequency) = accumulate(token_streams, &mut allocator);
    tracing::debug!(
        num_docs = term_frequencies.len(),
        num_terms = vocabulary.len(),
        "indexed corpus"
    );
    CorpusIndex { vocabulary, term_frequencies, document_frequency }
}

/// Count the tokens of every document, allocating ids through `allocator`.
///
/// Each entry of `token_streams` is one document's token sequence, in
/// document order.
pub fn accumulate<I, T, S>(
    token_streams: I,
    allocator: &mut TokenAllocator<'_>,
) -> (Vec<TermFrequencyVector>, DocumentFrequency)
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut term_frequencies = Vec::new();
    let mut df: Vec<u32> = Vec::new();
    for tokens in token_streams {
        let mut tf = TermFrequencyVector::new();
        for token in tokens {
            tf.increment(allocator.resolve_or_allocate(token.as_ref()));
        }
        df.resize(allocator.len(), 0);
        // once per distinct token in this document
        for token in tf.tokens() {
            df[token as usize] += 1;
        }
        term_frequencies.push(tf);
    }
    df.resize(allocator.len(), 0);
    (term_frequencies, DocumentFrequency::from(df))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<Document> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Document::new(i as u32, *text))
            .collect()
    }

    #[test]
    fn counts_terms_and_documents() {
        let corpus = docs(&["A B A C", "E", "A B C D"]);
        let index = index_documents(&corpus);

        let id = |t: &str| index.vocabulary.get(t).unwrap();
        assert_eq!(
            ["a", "b", "c", "e", "d"].map(id),
            [0, 1, 2, 3, 4],
            "ids follow first occurrence"
        );
        assert_eq!(index.term_frequencies[0].get(id("a")), Some(2));
        assert_eq!(index.term_frequencies[0].get(id("e")), None);
        assert_eq!(index.term_frequencies[1].total(), 1);

        let df: Vec<_> = index.document_frequency.iter().collect();
        assert_eq!(df, vec![(0, 2), (1, 2), (2, 2), (3, 1), (4, 1)]);
    }

    #[test]
    fn empty_documents_keep_their_slot() {
        let corpus = docs(&["x", "   ", "x y"]);
        let index = index_documents(&corpus);
        assert_eq!(index.num_docs(), 3);
        assert!(index.term_frequencies[1].is_empty());
        assert_eq!(index.document_frequency.get(0), Some(2));
    }

    #[test]
    fn parallel_matches_sequential() {
        let corpus = docs(&["the cat sat", "The dog sat down", "cat and dog", ""]);
        let seq = index_documents(&corpus);
        let par = index_documents_parallel(&corpus);
        assert_eq!(
            seq.vocabulary.iter().collect::<Vec<_>>(),
            par.vocabulary.iter().collect::<Vec<_>>()
        );
        assert_eq!(seq.term_frequencies, par.term_frequencies);
        assert_eq!(seq.document_frequency, par.document_frequency);
    }
}
