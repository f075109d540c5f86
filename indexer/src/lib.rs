//! Corpus ingestion for the search core.
pub mod ingest;

pub use ingest::load_corpus;
