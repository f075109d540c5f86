use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::{DocId, Score, TfIdfVector};

/// Cosine similarity of two unit-length vectors.
#[inline]
pub fn cosine_similarity(query: &TfIdfVector, doc: &TfIdfVector) -> f64 {
    query.dot(doc)
}

/// Candidate set covering every document of a corpus of `num_docs`.
pub fn all_documents(num_docs: usize) -> BTreeSet<DocId> {
    (0..num_docs as DocId).collect()
}

/// Score every candidate against `query`, best first.
///
/// Equal scores are ordered by ascending document id. An empty query vector
/// scores every candidate 0; candidate ids outside `documents` are skipped.
pub fn rank(query: &TfIdfVector, documents: &[TfIdfVector], candidates: &BTreeSet<DocId>) -> Vec<Score> {
    let mut scores: Vec<Score> = candidates
        .iter()
        .filter_map(|&doc_id| {
            let doc = documents.get(doc_id as usize)?;
            Some(Score { doc_id, value: cosine_similarity(query, doc) })
        })
        .collect();
    scores.sort_by(by_score_desc);
    scores
}

fn by_score_desc(a: &Score, b: &Score) -> Ordering {
    b.value.total_cmp(&a.value).then_with(|| a.doc_id.cmp(&b.doc_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(entries: &[(u32, f64)]) -> TfIdfVector {
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        entries.iter().map(|&(t, w)| (t, w / norm)).collect()
    }

    #[test]
    fn sorts_descending_with_id_tiebreak() {
        let docs = vec![unit(&[(0, 1.0), (1, 1.0)]), unit(&[(0, 1.0)]), unit(&[(0, 1.0), (1, 1.0)]), unit(&[(2, 1.0)])];
        let query = unit(&[(0, 1.0)]);
        let scores = rank(&query, &docs, &all_documents(docs.len()));
        let order: Vec<DocId> = scores.iter().map(|s| s.doc_id).collect();
        assert_eq!(order, vec![1, 0, 2, 3]);
        assert!((scores[0].value - 1.0).abs() < 1e-12);
        assert_eq!(scores[1].value, scores[2].value);
        assert_eq!(scores[3].value, 0.0);
    }

    #[test]
    fn only_candidates_are_scored() {
        let docs = vec![unit(&[(0, 1.0)]), unit(&[(0, 1.0)])];
        let query = unit(&[(0, 1.0)]);
        let candidates: BTreeSet<DocId> = [1, 7].into_iter().collect();
        let scores = rank(&query, &docs, &candidates);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].doc_id, 1);
    }

    #[test]
    fn empty_query_scores_candidates_zero() {
        let docs = vec![unit(&[(0, 1.0)]), unit(&[(1, 1.0)])];
        let scores = rank(&TfIdfVector::new(), &docs, &all_documents(2));
        assert_eq!(scores, vec![Score { doc_id: 0, value: 0.0 }, Score { doc_id: 1, value: 0.0 }]);
        assert!(rank(&TfIdfVector::new(), &docs, &BTreeSet::new()).is_empty());
    }
}
