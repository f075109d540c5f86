//! Sparse token-id keyed vectors.
//!
//! Entries are kept in token-id order so that iteration, and therefore
//! floating point summation, is reproducible.

use std::collections::BTreeMap;

use crate::TokenId;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector<V> {
    entries: BTreeMap<TokenId, V>,
}

/// Raw occurrence counts of the tokens of one document or query.
pub type TermFrequencyVector = SparseVector<u32>;

/// L2-normalized TF-IDF weights.
pub type TfIdfVector = SparseVector<f64>;

impl<V: Copy> SparseVector<V> {
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Number of stored (non-zero) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, token: TokenId) -> Option<V> {
        self.entries.get(&token).copied()
    }

    pub fn contains(&self, token: TokenId) -> bool {
        self.entries.contains_key(&token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, V)> + '_ {
        self.entries.iter().map(|(&token, &value)| (token, value))
    }

    pub fn tokens(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.entries.keys().copied()
    }
}

/// Zero entries are dropped so the vector stays sparse.
impl<V> FromIterator<(TokenId, V)> for SparseVector<V>
where
    V: Copy + Default + PartialEq,
{
    fn from_iter<I: IntoIterator<Item = (TokenId, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .filter(|(_, value)| *value != V::default())
            .collect();
        Self { entries }
    }
}

impl TermFrequencyVector {
    /// Count one more occurrence of `token`.
    pub fn increment(&mut self, token: TokenId) {
        *self.entries.entry(token).or_insert(0) += 1;
    }

    /// Sum of all counts, i.e. the number of tokens the vector was built from.
    pub fn total(&self) -> u64 {
        self.entries.values().map(|&count| u64::from(count)).sum()
    }
}

impl TfIdfVector {
    pub fn norm(&self) -> f64 {
        self.entries.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Sparse dot product; walks the shorter vector and probes the longer one.
    pub fn dot(&self, other: &TfIdfVector) -> f64 {
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small
            .entries
            .iter()
            .filter_map(|(token, w)| large.entries.get(token).map(|v| w * v))
            .sum()
    }

    pub(crate) fn from_sorted_weights(entries: BTreeMap<TokenId, f64>) -> Self {
        Self { entries }
    }
}
