mod service;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use rscr::{
    config::{CrawlConfig, DbConfig},
    crawl::Crawler,
};

/// Serve the review crawler behind `GET /reviews/new`.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(flatten)]
    crawl: CrawlConfig,

    #[command(flatten)]
    db: DbConfig,

    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Listen on this Unix socket instead of a TCP port.
    #[arg(long)]
    sock: Option<PathBuf>,

    /// Create the review table on startup, if it does not exist yet.
    #[arg(long)]
    init_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::{Router, routing::get, serve};
    use tokio::net::{TcpListener, UnixListener};
    use tower_http::cors::CorsLayer;

    pretty_env_logger::init_timed();

    let args = Args::parse();

    let pool = rscr::db::connect(&args.db).await?;
    if args.init_schema {
        rscr::db::init_schema(&*pool.get().await?).await?;
    }

    let state = Arc::new(service::AppState {
        crawler: Crawler::new(args.crawl),
        pool,
        running: tokio::sync::Mutex::new(()),
    });

    let app: Router = Router::new()
        .route("/reviews/new", get(service::new_reviews))
        .route("/reviews/preview", get(service::preview))
        .layer(CorsLayer::very_permissive().allow_private_network(true))
        .with_state(state);

    if let Some(sock) = args.sock {
        match std::fs::remove_file(&sock) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => return Err(err.into()),
            _ => {}
        }
        tracing::info!(target: "server", "listening on {}", sock.display());
        serve(UnixListener::bind(sock)?, app).await?;
    } else {
        let listener = TcpListener::bind(("0.0.0.0", args.port)).await?;
        tracing::info!(target: "server", "listening on {}", listener.local_addr()?);
        serve(listener, app).await?;
    }

    Ok(())
}
