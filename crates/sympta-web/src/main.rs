//! Sympta Web Server
//!
//! Run with: cargo run -p sympta-web

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sympta_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dataset_path = PathBuf::from(
        std::env::var("SYMPTA_DATASET").unwrap_or_else(|_| "data/symptom_disease.csv".into()),
    );
    let db_path =
        PathBuf::from(std::env::var("SYMPTA_DB").unwrap_or_else(|_| "sympta.db".into()));
    let addr: SocketAddr = std::env::var("SYMPTA_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3001".into())
        .parse()
        .context("SYMPTA_ADDR is not a valid socket address")?;

    // A missing dataset is fatal: the server never starts without a
    // complete knowledge base.
    let kb = sympta_core::load_knowledge_base(&dataset_path)
        .with_context(|| format!("failed to load dataset {}", dataset_path.display()))?;
    info!(diseases = kb.len(), "knowledge base ready");

    let db = sympta_db::open_database(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    let state = AppState::new(kb, db, dataset_path);
    let app = sympta_web::router::build_router(state);

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
