use axum::debug_handler;
use axum::{Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use intervals_strain_client::config::Config;
use intervals_strain_client::{IntervalsClient, http_client::ReqwestIntervalsClient};
use intervals_strain_mcp::StrainMcpHandler;

struct AppState {
    metrics: PrometheusHandle,
}

#[debug_handler]
async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[debug_handler]
async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state.metrics.render();
    ([("content-type", "text/plain; version=0.0.4")], body)
}

fn bind_address(raw: Option<String>) -> SocketAddr {
    raw.and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)))
}


#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let filter = intervals_strain_mcp::logging::init();
    tracing::info!(%filter, "intervals_strain_mcp:http: log filter");

    let handle = PrometheusBuilder::new().install_recorder()?;

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "missing credentials; aborting startup");
            std::process::exit(1);
        }
    };
    let client: Arc<dyn IntervalsClient> = Arc::new(ReqwestIntervalsClient::from_config(&config));
    let state = Arc::new(AppState { metrics: handle });

    let handler = StrainMcpHandler::new(client);
    let factory = move || -> Result<_, std::io::Error> { Ok(handler.clone()) };
    let session = Arc::new(
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default(),
    );
    let mcp_service = rmcp::transport::streamable_http_server::tower::StreamableHttpService::new(
        factory,
        session,
        rmcp::transport::streamable_http_server::tower::StreamableHttpServerConfig::default(),
    );

    let app = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .nest_service("/mcp", mcp_service)
        .with_state(state);

    let addr = bind_address(std::env::var("ADDRESS").ok());
    info!(%addr, "starting HTTP server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    let server = axum::serve(listener, app.into_make_service());
    if let Err(e) = server
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
        })
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
