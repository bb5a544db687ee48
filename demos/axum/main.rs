mod cors;
mod routes;

use std::error::Error;
use std::net::SocketAddr;

use axum::{Router, routing::get};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let layer = cors::build_layer()?;

    let app = Router::new()
        .route("/greet", get(routes::greet).post(routes::echo))
        .route("/internal/health", get(routes::health))
        .layer(layer);

    let addr: SocketAddr = "127.0.0.1:5001".parse()?;
    tracing::info!(%addr, "axum example listening");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
