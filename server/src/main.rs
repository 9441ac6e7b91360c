use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use tokio::net::TcpListener;
use wordindex_core::source::SourceOptions;
use wordindex_server::build_app;

#[derive(Parser)]
struct Args {
    /// Directory whose files are indexed
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    /// Extension of the files to index
    #[arg(long, default_value = "txt")]
    ext: String,
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
    let app: Router = build_app(args.dir, SourceOptions::with_extension(args.ext))?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
