mod commands;
mod render;
mod repl;

use anyhow::Result;
use clap::Parser;
use fetcher::{load_sonnets, SONNETS_URL};
use sonnet_core::persist::{into_documents, load_config};
use sonnet_core::Searcher;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sonnets")]
#[command(about = "Interactive search over Shakespeare's sonnets", long_about = None)]
struct Args {
    /// Settings file (highlight, search mode, highlight color)
    #[arg(long, default_value = "./config.json")]
    config: PathBuf,
    /// Sonnet cache file; downloaded when missing
    #[arg(long, default_value = "./sonnets.json")]
    cache: PathBuf,
    /// Corpus source URL
    #[arg(long, default_value = SONNETS_URL)]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    println!("{}", render::BANNER);
    let config = load_config(&args.config)?;

    let start = Instant::now();
    let sonnets = load_sonnets(&args.cache, &args.url).await?;
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    println!("Loading sonnets took: {elapsed:.3} [ms]");
    println!("Loaded {} sonnets.", sonnets.len());

    let searcher = Searcher::new(into_documents(sonnets))?;
    tracing::info!(terms = searcher.index().num_terms(), "index ready");

    let mut session = repl::Session::new(searcher, config, args.config);
    repl::run(&mut session)
}
