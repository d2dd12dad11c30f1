//! SourceFetch server
//!
//! URL fetching and structured text extraction over a single JSON endpoint.

use std::sync::Arc;

use clap::Parser;
use tower_http::trace::TraceLayer;

use sourcefetch::handlers::{extract_router, AppState};
use sourcefetch::pipeline::Extractor;

/// SourceFetch extraction server
#[derive(Parser, Debug)]
#[command(name = "sourcefetch")]
#[command(version)]
#[command(about = "SourceFetch — URL fetching and structured text extraction")]
#[command(long_about = r#"SourceFetch — URL fetching and structured text extraction

Fetches a web page and produces a bounded, Markdown-flavored text document
plus structured metadata (title, description, Open Graph fields), served
over a single JSON endpoint.

ENDPOINTS:
  POST /fetch-url   {"url": "https://..."} -> {content, url, title, description}
  GET  /health      service health check

EXAMPLES:
  # Start server on default port
  sourcefetch

  # Start with custom port and verbose logging
  sourcefetch --port 3010 --verbose
"#)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let extractor = Extractor::with_defaults()?;
    let state = Arc::new(AppState::new(extractor));
    let app = extract_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("SourceFetch server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
