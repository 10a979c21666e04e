use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};
use wardline::router::init_router;
use wardline::state::AppState;
use wardline_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use wardline_core::errors::enable_diagnostics;
use wardline_db::{PgStore, init_db_pool, run_migrations};
use wardline_observability::{init_logging, init_metrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    let _log_guard = init_logging(&server_config.log_level, server_config.log_dir.as_deref())?;
    enable_diagnostics(server_config.app_env.is_development());

    let jwt_config = JwtConfig::from_env();
    if jwt_config.uses_default_secret() {
        warn!("JWT_SECRET is not set, using the development secret");
    }

    let metrics = if server_config.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;

    let state = AppState::new(Arc::new(PgStore::new(pool)), jwt_config, CorsConfig::from_env())
        .with_metrics(metrics);
    let app = init_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Server running");
    info!("Swagger UI available at http://localhost:{}/swagger-ui", server_config.port);
    info!("Scalar UI available at http://localhost:{}/scalar", server_config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
    }
}
