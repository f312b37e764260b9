//! CPQ BOM Export Service
//!
//! Exports bills of materials of configured products from the CPQ platform as
//! flat, leveled spreadsheet reports.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    serve, Router,
};
use cpq_utils::{init_logging, log_info, log_warn, AppConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod cpq_client;
mod handlers;
mod metrics;
mod middleware;
mod routes;
mod service;
mod source;

use cpq_client::CpqClient;
use handlers::{health_check, metrics_handler};
use metrics::ExportMetrics;
use middleware::request_id_middleware;
use service::ExportService;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    log_info!("Starting CPQ BOM Export Service");

    if !config.cpq.has_credentials() {
        log_warn!("CPQ credentials are not configured; upstream exports will fail until they are set");
    }

    let client = CpqClient::new(config.cpq.clone())?;
    let service = ExportService::new(Arc::new(client), config.cpq.max_concurrent_fetches);
    let state = AppState {
        service: Arc::new(service),
        metrics: Arc::new(ExportMetrics::new()?),
        config: config.clone(),
    };

    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    log_info!("BOM Export Service listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn create_app(state: AppState) -> Router {
    let config = &state.config;

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", routes::create_api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout_seconds)))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ExportService>,
    pub metrics: Arc<ExportMetrics>,
    pub config: AppConfig,
}
