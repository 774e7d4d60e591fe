use anyhow::Result;
use clap::Parser;
use fetcher::{build_client, refresh_cache, DEFAULT_USER_AGENT, SONNETS_URL};
use sonnet_core::persist::load_sonnet_cache;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "fetcher")]
#[command(about = "Download the sonnet corpus into the local cache file")]
struct Cli {
    /// Cache file to write
    #[arg(long, default_value = "./sonnets.json")]
    cache: PathBuf,
    /// Source URL (PoetryDB)
    #[arg(long, default_value = SONNETS_URL)]
    url: String,
    /// Download even if the cache already exists
    #[arg(long, default_value_t = false)]
    force: bool,
    /// Request timeout seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    /// User-Agent string
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    if args.cache.is_file() && !args.force {
        let sonnets = load_sonnet_cache(&args.cache)?;
        eprintln!("fetcher: cache {} already holds {} sonnets (use --force to refresh)", args.cache.display(), sonnets.len());
        return Ok(());
    }

    let client = build_client(args.timeout_secs, &args.user_agent)?;
    let sonnets = refresh_cache(&client, &args.cache, &args.url).await?;
    eprintln!("done: fetched={} -> {}", sonnets.len(), args.cache.display());
    Ok(())
}
