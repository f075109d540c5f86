use crate::{DocumentFrequency, Error, Result, TokenId};

/// Smoothed inverse document frequency of every token, indexed by token id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IdfVector {
    weights: Vec<f64>,
}

impl IdfVector {
    pub fn get(&self, token: TokenId) -> Option<f64> {
        self.weights.get(token as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, f64)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(|(token, &w)| (token as TokenId, w))
    }
}

/// `1 + ln(N / (1 + df))`
///
/// Positive and finite for every `1 <= df <= N`, including tokens present in
/// every document.
#[inline]
pub fn smoothed_idf(df: u32, total_docs: usize) -> f64 {
    1.0 + (total_docs as f64 / (1.0 + f64::from(df))).ln()
}

/// Compute the IDF weight of every token in `df`.
///
/// Fails with [`Error::InvalidCorpus`] when the corpus is empty or a count
/// lies outside `1..=total_docs`.
pub fn compute_idf(df: &DocumentFrequency, total_docs: usize) -> Result<IdfVector> {
    if total_docs == 0 {
        return Err(Error::invalid_corpus("corpus contains no documents"));
    }
    let weights = df
        .iter()
        .map(|(token, count)| {
            if count == 0 || count as usize > total_docs {
                return Err(Error::invalid_corpus(format!(
                    "token {token} has document frequency {count} in a corpus of {total_docs} documents"
                )));
            }
            Ok(smoothed_idf(count, total_docs))
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok(IdfVector { weights })
}
