use anyhow::{bail, Context, Result};
use search_core::{DocId, Document};
use serde::Deserialize;
use walkdir::WalkDir;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: u64,
    text: String,
    #[serde(default)]
    category: Option<String>,
}

/// One `doc_id,category,text` row; the header row names the columns.
#[derive(Debug, Deserialize)]
struct CsvRow {
    doc_id: String,
    #[serde(default)]
    category: String,
    text: String,
}

/// Where a record came from, for error messages.
#[derive(Debug, Clone)]
struct Origin {
    file: PathBuf,
    record: usize,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} record {}", self.file.display(), self.record)
    }
}

/// Load documents from a `.json`, `.jsonl` or `.csv` file or a directory of them.
///
/// Documents get dense ids in ingestion order; the record's own `id` is kept
/// as [`Document::source_id`] and must be unique across the input.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let input_path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && corpus_extension(p).is_some() {
                files.push(p.to_path_buf());
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        bail!("input path {} does not exist", input_path.display());
    }

    let mut loader = Loader::default();
    for file in files {
        match corpus_extension(&file) {
            Some("jsonl") => loader.read_jsonl(&file)?,
            Some("csv") => loader.read_csv(&file)?,
            _ => loader.read_json(&file)?,
        }
    }
    tracing::info!(num_docs = loader.docs.len(), path = %input_path.display(), "loaded corpus");
    Ok(loader.docs)
}

fn corpus_extension(path: &Path) -> Option<&'static str> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Some("json"),
        Some("jsonl") => Some("jsonl"),
        Some("csv") => Some("csv"),
        _ => None,
    }
}

#[derive(Default)]
struct Loader {
    docs: Vec<Document>,
    seen: HashMap<u64, Origin>,
}

impl Loader {
    fn read_jsonl(&mut self, file: &Path) -> Result<()> {
        let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
        let reader = BufReader::new(f);
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("reading {}", file.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let origin = Origin { file: file.to_path_buf(), record: lineno + 1 };
            let doc: InputDoc =
                serde_json::from_str(&line).with_context(|| format!("malformed document at {origin}"))?;
            self.ingest(doc, origin)?;
        }
        Ok(())
    }

    fn read_json(&mut self, file: &Path) -> Result<()> {
        let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
        let reader = BufReader::new(f);
        let json: serde_json::Value =
            serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
        let values = match json {
            serde_json::Value::Array(arr) => arr,
            obj @ serde_json::Value::Object(_) => vec![obj],
            _ => bail!("{} holds neither a document nor an array of documents", file.display()),
        };
        for (i, v) in values.into_iter().enumerate() {
            let origin = Origin { file: file.to_path_buf(), record: i + 1 };
            let doc: InputDoc =
                serde_json::from_value(v).with_context(|| format!("malformed document at {origin}"))?;
            self.ingest(doc, origin)?;
        }
        Ok(())
    }

    fn read_csv(&mut self, file: &Path) -> Result<()> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Fields)
            .from_path(file)
            .with_context(|| format!("opening {}", file.display()))?;
        // rows count from 1 after the header
        for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
            let origin = Origin { file: file.to_path_buf(), record: i + 1 };
            let row = row.with_context(|| format!("malformed row at {origin}"))?;
            let id: u64 = row
                .doc_id
                .parse()
                .with_context(|| format!("invalid doc_id at row {} of {}", origin.record, file.display()))?;
            let doc = InputDoc {
                id,
                text: row.text,
                category: Some(row.category).filter(|c| !c.is_empty()),
            };
            self.ingest(doc, origin)?;
        }
        Ok(())
    }

    fn ingest(&mut self, doc: InputDoc, origin: Origin) -> Result<()> {
        if let Some(first) = self.seen.get(&doc.id) {
            bail!("duplicate document id {} at {origin} (first seen at {first})", doc.id);
        }
        self.seen.insert(doc.id, origin);

        let doc_id = self.docs.len() as DocId;
        let mut out = Document::new(doc_id, doc.text).with_source_id(doc.id);
        out.category = doc.category;
        self.docs.push(out);
        Ok(())
    }
}
