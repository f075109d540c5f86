use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use indexer::load_corpus;
use search_core::config::DEFAULT_TOP_K;
use search_core::{BuildOptions, CorpusSnapshot, Parallelism};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from JSON/JSONL input and rank documents for each query
    Search {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Query text; repeat for several queries
        #[arg(long = "query", short, required = true)]
        queries: Vec<String>,
        /// Number of results printed per query
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
        #[arg(long, value_enum, default_value_t = ParallelArg::Auto)]
        parallel: ParallelArg,
    },
    /// Build the index and print corpus statistics
    Stats {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        #[arg(long, value_enum, default_value_t = ParallelArg::Auto)]
        parallel: ParallelArg,
    },
}

/// Run per-document indexing work on the rayon pool
#[derive(Clone, Copy, ValueEnum)]
enum ParallelArg {
    Off,
    On,
    Auto,
}

impl From<ParallelArg> for Parallelism {
    fn from(arg: ParallelArg) -> Self {
        match arg {
            ParallelArg::Off => Parallelism::Off,
            ParallelArg::On => Parallelism::On,
            ParallelArg::Auto => Parallelism::Auto,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { input, queries, top_k, parallel } => {
            let snapshot = build_snapshot(&input, parallel)?;
            for query in &queries {
                print_results(&snapshot, query, top_k);
            }
            Ok(())
        }
        Commands::Stats { input, parallel } => {
            let snapshot = build_snapshot(&input, parallel)?;
            println!("documents: {}", snapshot.len());
            println!("vocabulary: {}", snapshot.vocabulary().len());
            println!("indexed tokens: {}", snapshot.index().len());
            println!("postings: {}", snapshot.index().num_postings());
            Ok(())
        }
    }
}

fn build_snapshot(input: &str, parallel: ParallelArg) -> Result<CorpusSnapshot> {
    let docs = load_corpus(input)?;
    let options = BuildOptions::with_parallelism(parallel.into());
    Ok(CorpusSnapshot::build_with(docs, &options)?)
}

fn print_results(snapshot: &CorpusSnapshot, query: &str, top_k: usize) {
    let scores = snapshot.search_top_k(query, top_k);
    tracing::info!(query, hits = scores.len(), "ranked query");
    if scores.is_empty() {
        println!("No results for {query:?}");
        return;
    }
    println!("Results for {query:?}");
    for (i, score) in scores.iter().enumerate() {
        let Some(doc) = snapshot.document(score.doc_id) else { continue };
        let shown_id = doc.source_id.unwrap_or(u64::from(doc.id));
        println!(
            "Rank {}: Doc {} (score: {:.4}) : {} : {}",
            i + 1,
            shown_id,
            score.value,
            doc.text,
            doc.category.as_deref().unwrap_or("")
        );
    }
}
