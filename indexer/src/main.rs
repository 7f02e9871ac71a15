use aiseek_core::loader::load_documents;
use aiseek_core::seed::seed_documents;
use aiseek_core::{DocumentStore, IndexSnapshot, InvertedIndex, QueryEngine};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "aiseek-indexer")]
#[command(about = "Build the in-memory AISeek index and inspect or query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Extra documents: a JSON/JSONL file or a directory of them
    #[arg(long)]
    input: Option<String>,
    /// Leave out the built-in seed documents
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and print corpus statistics as JSON
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// How many of the most widespread terms to list
        #[arg(long, default_value_t = 10)]
        top_terms: usize,
    },
    /// Build the index and run one query against it
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Query text
        #[arg(long, short)]
        q: String,
        /// Print the whole ranked candidate list instead of the top results
        #[arg(long, default_value_t = false)]
        all: bool,
    },
}

#[derive(Serialize)]
struct Stats {
    num_docs: usize,
    num_terms: usize,
    top_terms: Vec<TermStat>,
}

#[derive(Serialize)]
struct TermStat {
    term: String,
    doc_freq: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { corpus, top_terms } => {
            let snap = IndexSnapshot::new(load_corpus(&corpus)?);
            let stats = Stats {
                num_docs: snap.index.num_docs(),
                num_terms: snap.index.vocabulary_size(),
                top_terms: most_widespread(&snap.index, top_terms),
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Query { corpus, q, all } => {
            let snap = IndexSnapshot::new(load_corpus(&corpus)?);
            let engine = QueryEngine::default().without_cache();
            if all {
                let expanded = engine.expand(&q);
                println!("expanded: {expanded}");
                for hit in engine.rank(&snap.index, &expanded) {
                    let url = snap.store.get(hit.doc_id).map(|d| d.url.as_str()).unwrap_or_default();
                    println!("{:>8.4}  {:>5}  {url}", hit.score, hit.doc_id);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.search(&snap, &q))?);
            }
        }
    }
    Ok(())
}

fn load_corpus(args: &CorpusArgs) -> Result<DocumentStore> {
    let mut store = DocumentStore::new();
    if !args.no_seed {
        store.extend(seed_documents());
    }
    if let Some(input) = &args.input {
        let added = store.extend(load_documents(input)?);
        tracing::info!(input = %input, added, "loaded documents");
    }
    tracing::info!(num_docs = store.len(), "corpus ready");
    Ok(store)
}

fn most_widespread(index: &InvertedIndex, n: usize) -> Vec<TermStat> {
    let mut terms: Vec<TermStat> = index
        .terms()
        .map(|t| TermStat { term: t.to_string(), doc_freq: index.document_frequency(t) })
        .collect();
    terms.sort_by(|a, b| b.doc_freq.cmp(&a.doc_freq).then_with(|| a.term.cmp(&b.term)));
    terms.truncate(n);
    terms
}
