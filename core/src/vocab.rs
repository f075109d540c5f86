use std::collections::HashMap;

use crate::TokenId;

/// Mapping between normalized terms and dense token ids.
///
/// Ids are handed out in first-seen order and only through a
/// [`TokenAllocator`]; once indexing is done the vocabulary is shared
/// read-only and lookups never add terms.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ids: HashMap<String, TokenId>,
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: &str) -> Option<TokenId> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, token: TokenId) -> Option<&str> {
        self.terms.get(token as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in token-id order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &str)> + '_ {
        self.terms
            .iter()
            .enumerate()
            .map(|(id, term)| (id as TokenId, term.as_str()))
    }
}

/// Single writer of a [`Vocabulary`].
///
/// Holding the vocabulary mutably for the whole indexing pass keeps the id
/// space sequential; concurrent workers must hand their tokens to one
/// allocator in document order instead of allocating on their own.
#[derive(Debug)]
pub struct TokenAllocator<'a> {
    vocab: &'a mut Vocabulary,
}

impl<'a> TokenAllocator<'a> {
    pub fn new(vocab: &'a mut Vocabulary) -> Self {
        Self { vocab }
    }

    /// Return the id of `term`, allocating the next sequential id if the term
    /// has not been seen yet.
    pub fn resolve_or_allocate(&mut self, term: &str) -> TokenId {
        if let Some(id) = self.vocab.get(term) {
            return id;
        }
        let id = self.vocab.terms.len() as TokenId;
        self.vocab.ids.insert(term.to_owned(), id);
        self.vocab.terms.push(term.to_owned());
        id
    }

    /// Number of ids allocated so far.
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }
}
