use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{IdfVector, TermFrequencyVector, TfIdfVector};

/// Sublinear term weight `1 + ln(raw)`; `raw` is at least 1 in a sparse vector.
#[inline]
pub fn sublinear_tf(raw: u32) -> f64 {
    1.0 + f64::from(raw).ln()
}

/// Weight `tf` by `idf` and scale it to unit Euclidean length.
///
/// An empty input gives an empty vector. Tokens without an IDF weight are
/// left out.
pub fn normalize(tf: &TermFrequencyVector, idf: &IdfVector) -> TfIdfVector {
    let mut weights = BTreeMap::new();
    let mut sum_sq = 0.0;
    for (token, raw) in tf.iter() {
        if raw == 0 {
            continue;
        }
        let Some(idf_w) = idf.get(token) else { continue };
        let w = sublinear_tf(raw) * idf_w;
        sum_sq += w * w;
        weights.insert(token, w);
    }
    let norm = sum_sq.sqrt();
    if norm > 0.0 {
        for w in weights.values_mut() {
            *w /= norm;
        }
    } else {
        weights.clear();
    }
    TfIdfVector::from_sorted_weights(weights)
}

pub fn normalize_all(tfs: &[TermFrequencyVector], idf: &IdfVector) -> Vec<TfIdfVector> {
    tfs.iter().map(|tf| normalize(tf, idf)).collect()
}

pub fn normalize_all_parallel(tfs: &[TermFrequencyVector], idf: &IdfVector) -> Vec<TfIdfVector> {
    tfs.par_iter().map(|tf| normalize(tf, idf)).collect()
}
