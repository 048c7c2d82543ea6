use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    db::Database,
    handlers::{self, AppState},
    metrics,
};

/// Start the budgeting API server
///
/// This function:
/// 1. Initializes metrics
/// 2. Opens the database and runs migrations
/// 3. Creates the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config) -> Result<()> {
    info!("Initializing Prometheus metrics...");
    let metrics_handle = Arc::new(metrics::init_metrics());

    let db = Arc::new(Database::new(&config.database).await?);
    let state = AppState {
        db,
        save_timeout: Duration::from_secs(config.database.save_timeout_seconds),
    };

    let app = create_router(state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting presupuesto API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState, metrics_handle: Arc<PrometheusHandle>) -> Router {
    let api = Router::new()
        .route(
            "/api/materiales/catalogos",
            get(handlers::catalog::get_catalogos),
        )
        .route(
            "/api/materiales",
            get(handlers::materials::list).post(handlers::materials::create),
        )
        .route(
            "/api/materiales/:id",
            put(handlers::materials::update).delete(handlers::materials::remove),
        )
        .route("/api/materiales/calcular", post(handlers::budget::calcular))
        .route(
            "/api/materiales/guardar-presupuesto",
            post(handlers::budget::guardar_presupuesto),
        )
        .route("/ping", get(handlers::health::ping))
        .with_state(state);

    Router::new()
        .route("/metrics", get(handlers::metrics_handler::metrics))
        .with_state(metrics_handle)
        .merge(api)
        // Request bodies are small JSON documents; 1MB is generous
        .layer(DefaultBodyLimit::max(1024 * 1024))
        // The browser frontend is served from another origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
