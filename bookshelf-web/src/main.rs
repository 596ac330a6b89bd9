//! bookshelf-web - personal book-tracking web application
//!
//! Users register, log in, search an external book catalog, and file books
//! into one of three reading-status buckets.

use anyhow::Result;
use bookshelf_common::config::AppConfig;
use clap::Parser;
use tracing::info;

use bookshelf_web::services::catalog::CatalogClient;
use bookshelf_web::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "bookshelf-web", about = "Personal book-tracking web application")]
struct Cli {
    /// Data directory holding bookshelf.db (overrides env and config file)
    #[arg(long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Bookshelf (bookshelf-web) v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.data_dir.as_deref())?;
    config.ensure_data_dir_exists()?;

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    let pool = bookshelf_common::db::init_database(&db_path).await?;

    let catalog = CatalogClient::new(&config.catalog_base_url)?;
    info!("Catalog API base URL: {}", config.catalog_base_url);

    let state = AppState::new(pool, catalog, config.session_ttl_hours);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("bookshelf-web listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
