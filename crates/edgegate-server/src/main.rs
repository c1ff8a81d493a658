use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use edgegate_server::app_state::AppState;
use edgegate_server::args::ServerArgs;
use edgegate_server::backend::HttpBackend;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ServerArgs::parse();
    let config = Arc::new(args.gateway_config());

    let backend = HttpBackend::new(config.clone()).expect("Failed to build HTTP client");

    tracing::info!(
        backend = %config.backend_base_url,
        timeout_secs = config.backend_timeout.as_secs(),
        "Forwarding tool calls"
    );

    let state = AppState {
        backend: Arc::new(backend),
        config,
    };

    let app = edgegate_server::router::create_router(state);

    let addr = args.bind_addr();
    tracing::info!("edgegate listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server error");
}
