use search_core::idf::smoothed_idf;
use search_core::rank::{all_documents, rank};
use search_core::{CorpusSnapshot, Document, Error};

fn snapshot(texts: &[&str]) -> CorpusSnapshot {
    let docs = texts
        .iter()
        .enumerate()
        .map(|(i, text)| Document::new(i as u32, *text))
        .collect();
    CorpusSnapshot::build(docs).unwrap()
}

#[test]
fn fruit_query_ranks_matching_documents() {
    let snap = snapshot(&["apple orange banana", "banana apple", "computer science and data"]);

    let idf = |term: &str| snap.idf().get(snap.vocabulary().get(term).unwrap()).unwrap();
    assert!((idf("apple") - 1.0).abs() < 1e-12);
    assert!((idf("banana") - 1.0).abs() < 1e-12);
    assert!((idf("orange") - 1.405_465_108_108_164_4).abs() < 1e-12);

    let scores = snap.search("apple banana");
    assert_eq!(scores.len(), 2, "doc2 shares no token with the query");
    assert_eq!(scores[0].doc_id, 1);
    assert!((scores[0].value - 1.0).abs() < 1e-9);
    assert_eq!(scores[1].doc_id, 0);
    assert!((scores[1].value - 0.709_297_266_606_273_7).abs() < 1e-9);
}

#[test]
fn out_of_vocabulary_query_returns_nothing() {
    let snap = snapshot(&["apple orange banana", "banana apple", "computer science and data"]);
    assert!(snap.search("nonexistent term").is_empty());
    assert!(snap.search("").is_empty());
    assert!(snap.search("   ").is_empty());
}

#[test]
fn single_document_corpus() {
    let snap = snapshot(&["one lonely lonely document"]);
    let expected = 1.0 + 0.5f64.ln();
    for (_, w) in snap.idf().iter() {
        assert!((w - expected).abs() < 1e-12);
    }
    assert_eq!(smoothed_idf(1, 1), expected);
    assert!((snap.vectors()[0].norm() - 1.0).abs() < 1e-9);
    assert!((snap.search("one lonely lonely document")[0].value - 1.0).abs() < 1e-9);
}

#[test]
fn empty_corpus_is_invalid() {
    assert!(matches!(CorpusSnapshot::build(Vec::new()), Err(Error::InvalidCorpus { .. })));
}

#[test]
fn document_is_its_own_best_match() {
    let texts = [
        "rust ownership and borrowing rules",
        "garbage collection in managed runtimes",
        "borrowing a book from the library",
        "ownership of a house and land",
    ];
    let snap = snapshot(&texts);
    for (i, text) in texts.iter().enumerate() {
        let scores = snap.search(text);
        assert_eq!(scores[0].doc_id, i as u32, "query {text:?}");
        assert!((scores[0].value - 1.0).abs() < 1e-9);
    }
}

#[test]
fn candidate_restriction_matches_full_scan() {
    let snap = snapshot(&["a b c", "b c d", "d e", "f", "a a a"]);
    let q = snap.process_query("a d");
    let restricted = rank(&q.vector, snap.vectors(), &q.candidates);
    let full: Vec<_> = rank(&q.vector, snap.vectors(), &all_documents(snap.len()))
        .into_iter()
        .filter(|s| s.value > 0.0)
        .collect();
    assert_eq!(restricted, full);
}

#[test]
fn results_pair_back_with_documents() {
    let docs = vec![
        Document::new(0, "Space shuttle orbit").with_category("sci.space").with_source_id(41),
        Document::new(1, "hockey playoffs tonight").with_category("rec.sport.hockey").with_source_id(7),
    ];
    let snap = CorpusSnapshot::build(docs).unwrap();
    let top = snap.search("space shuttle orbit")[0];
    let doc = snap.document(top.doc_id).unwrap();
    assert_eq!(doc.category.as_deref(), Some("sci.space"));
    assert_eq!(doc.source_id, Some(41));
}
