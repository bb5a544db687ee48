mod routes;

use std::error::Error;
use std::net::SocketAddr;

use bunner_cors_middleware::{CorsConfig, CorsLayer, CorsOptions};
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tower::Layer;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"{
    "allow_origins": ["http://app.example.com"],
    "allow_methods": ["GET", "PUT"],
    "allow_headers": ["Content-Type"],
    "expose_headers": ["X-Example-Trace"],
    "max_age_secs": 300
}"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config: CorsConfig = serde_json::from_str(CONFIG)?;
    let layer = CorsLayer::from_options(CorsOptions::try_from(config)?)?;

    let addr: SocketAddr = "127.0.0.1:5003".parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "hyper example listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        let service = TowerToHyperService::new(layer.layer(tower::service_fn(routes::route)));

        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                tracing::warn!(%peer, error = %err, "connection error");
            }
        });
    }
}
