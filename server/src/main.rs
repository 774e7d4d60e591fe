use anyhow::Result;
use axum::Router;
use clap::Parser;
use fetcher::{load_sonnets, SONNETS_URL};
use server::build_app;
use sonnet_core::SearchMode;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Sonnet cache file; downloaded when missing
    #[arg(long, default_value = "./sonnets.json")]
    cache: PathBuf,
    /// Corpus source URL
    #[arg(long, default_value = SONNETS_URL)]
    url: String,
    /// Search mode used when a request does not name one (AND or OR)
    #[arg(long, default_value = "AND")]
    mode: SearchMode,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let sonnets = load_sonnets(&args.cache, &args.url).await?;
    let app: Router = build_app(sonnets, args.mode)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
