use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use kwsearch_core::{build_from_files, normalize, SearchIndex};
use tracing_subscriber::{fmt, EnvFilter};

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a keyword index over a document set and run OR searches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Sources {
    /// File listing the document files to index, one name per line
    #[arg(long)]
    docs: PathBuf,
    /// File listing the noise words to skip, one word per line
    #[arg(long)]
    noise: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every keyword with its postings list
    Dump {
        #[command(flatten)]
        sources: Sources,
        /// Emit the index as JSON instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Search for documents containing either keyword; reads keyword pairs from stdin when none are given
    Search {
        #[command(flatten)]
        sources: Sources,
        kw1: Option<String>,
        kw2: Option<String>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump { sources, json } => {
            let index = build_from_files(&sources.docs, &sources.noise)?;
            dump(&index, json)
        }
        Commands::Search { sources, kw1, kw2 } => {
            let index = build_from_files(&sources.docs, &sources.noise)?;
            match kw1 {
                Some(kw1) => {
                    print_results(&index, &kw1, kw2.as_deref().unwrap_or(""));
                    Ok(())
                }
                None => repl(&index),
            }
        }
    }
}

fn dump(index: &SearchIndex, json: bool) -> Result<()> {
    if json {
        let sorted: BTreeMap<&str, _> = index.iter().collect();
        println!("{}", serde_json::to_string_pretty(&sorted)?);
        return Ok(());
    }
    for kw in index.sorted_keywords() {
        if let Some(postings) = index.postings(kw) {
            println!("{kw}  {postings}");
        }
    }
    Ok(())
}

/// Query keywords go through the same normalization as document tokens.
fn query_keyword(raw: &str) -> String {
    normalize(raw).unwrap_or_default()
}

fn print_results(index: &SearchIndex, raw1: &str, raw2: &str) {
    let (kw1, kw2) = (query_keyword(raw1), query_keyword(raw2));
    match index.top5_search(&kw1, &kw2) {
        Some(docs) if !docs.is_empty() => {
            for (rank, doc) in docs.iter().enumerate() {
                println!("{:>2}. {doc}", rank + 1);
            }
        }
        _ => println!("no match"),
    }
}

fn repl(index: &SearchIndex) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    write!(out, "keywords (kw1 kw2, or quit)> ")?;
    out.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        match words.next() {
            Some("quit") => break,
            Some(kw1) => print_results(index, kw1, words.next().unwrap_or("")),
            None => {}
        }
        write!(out, "keywords (kw1 kw2, or quit)> ")?;
        out.flush()?;
    }
    tracing::info!("search session ended");
    Ok(())
}
