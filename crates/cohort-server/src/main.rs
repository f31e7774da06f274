//! Cohort Server — application entry point.

use tracing_subscriber::EnvFilter;

use cohort_server::{AppState, ServerConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cohort=info".parse().unwrap()))
        .json()
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::new();
    let app = cohort_server::router(state);

    tracing::info!(addr = %config.bind_addr, "Starting Cohort server");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("bind server address");
    axum::serve(listener, app).await.expect("server error");
}
