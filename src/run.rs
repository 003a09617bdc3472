//! ENS gateway HTTP entrypoint.
//!
//! Mirrors `facilitator/src/run.rs`: rustls crypto provider install, `.env`
//! loading, config load, pool/state construction, CORS + trace layers,
//! graceful shutdown via [`crate::sig_down::SigDown`].

use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::Method;
use dotenvy::dotenv;
use ens_directory::{Directory, PgDirectory};
use tower_http::cors;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http;
use crate::sig_down::SigDown;
use crate::state::AppState;

/// Deployment-level deadline for graceful shutdown. Past this point, the
/// process force-exits with a non-zero code rather than waiting on
/// in-flight connections indefinitely.
const GRACEFUL_SHUTDOWN_PERIOD: Duration = Duration::from_secs(20);

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    rustls::crypto::CryptoProvider::install_default(rustls::crypto::ring::default_provider())
        .expect("failed to initialize rustls crypto provider");

    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = GatewayConfig::load()?;

    let directory = PgDirectory::connect(config.database_url()).await?;
    let directory: Arc<dyn Directory> = Arc::new(directory);
    let state = AppState::new(&config, directory);

    let http_endpoints: Router<AppState> = Router::new().merge(http::routes());
    let http_endpoints = http_endpoints
        .layer(TraceLayer::new_for_http())
        .layer(
            cors::CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_headers(cors::Any),
        )
        .with_state(state);

    let addr = SocketAddr::new(config.host(), config.port());
    tracing::info!("Starting server at http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!("failed to bind to {addr}: {e}"))?;

    let sig_down = SigDown::try_new()?;
    let cancellation_token = sig_down.cancellation_token();
    let serve_cancellation_token = cancellation_token.clone();

    let server = tokio::spawn(async move {
        axum::serve(listener, http_endpoints)
            .with_graceful_shutdown(async move { serve_cancellation_token.cancelled().await })
            .await
    });

    cancellation_token.cancelled().await;
    tracing::info!("shutdown signal received, draining in-flight connections");

    match tokio::time::timeout(GRACEFUL_SHUTDOWN_PERIOD, server).await {
        Ok(Ok(Ok(()))) => Ok(()),
        Ok(Ok(Err(e))) => Err(Box::new(e) as Box<dyn std::error::Error>),
        Ok(Err(join_error)) => Err(Box::new(join_error) as Box<dyn std::error::Error>),
        Err(_) => {
            tracing::error!("graceful shutdown period exceeded, forcefully shutting down");
            process::exit(1);
        }
    }
}
