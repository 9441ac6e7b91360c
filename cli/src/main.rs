use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use wordindex_core::source::{load_corpus, SourceOptions};
use wordindex_core::tokenizer::parse_query_terms;
use wordindex_core::{IndexStats, InvertedIndex};

mod render;
mod repl;

use render::{write_exact, write_matches, Format};

#[derive(Parser)]
#[command(name = "wordindex")]
#[command(
    about = "Index the text files in a directory and search them by word, word set or pattern",
    long_about = None
)]
struct Cli {
    /// Directory whose files are indexed (not recursive)
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,
    /// Extension of the files to index
    #[arg(long, global = true, default_value = "txt")]
    ext: String,
    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Show at most this many documents
    #[arg(long, global = true)]
    limit: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print corpus statistics
    Stats,
    /// Documents containing a single word
    Exact { term: String },
    /// Documents containing every given word
    All {
        /// Words, as separate arguments or one comma-separated list
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Documents with a word fully matching a regular expression
    Pattern {
        pattern: String,
        /// Treat the pattern as a shell wildcard (* and ?)
        #[arg(long, default_value_t = false)]
        wildcard: bool,
    },
    /// Interactive query loop on stdin
    Repl,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let index = load_index(&cli.dir, &cli.ext)?;
    let format = if cli.json { Format::Json } else { Format::Text };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Stats => {
            let stats = IndexStats::from_index(&index);
            if cli.json {
                serde_json::to_writer_pretty(&mut out, &stats)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{stats}")?;
            }
        }
        Commands::Exact { term } => {
            write_exact(&mut out, index.lookup_exact(&term), cli.limit, format)?
        }
        Commands::All { terms } => {
            let terms: Vec<String> = terms.iter().flat_map(|t| parse_query_terms(t)).collect();
            write_matches(&mut out, index.lookup_all(&terms), cli.limit, format)?
        }
        Commands::Pattern { pattern, wildcard } => {
            let found = if wildcard {
                index.lookup_wildcard(&pattern)
            } else {
                index.lookup_pattern(&pattern)
            };
            write_matches(&mut out, found?, cli.limit, format)?
        }
        Commands::Repl => {
            let stdin = io::stdin();
            repl::run(&index, stdin.lock(), &mut out, cli.limit)?
        }
    }
    Ok(())
}

fn load_index(dir: &Path, ext: &str) -> Result<InvertedIndex> {
    let options = SourceOptions::with_extension(ext);
    let corpus = load_corpus(dir, &options)
        .with_context(|| format!("loading documents from {}", dir.display()))?;
    let index = InvertedIndex::build(corpus);
    tracing::info!(documents = index.num_documents(), terms = index.num_terms(), "index built");
    Ok(index)
}
