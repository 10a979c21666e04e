use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::status_class;

fn default_filter(log_level: &str) -> String {
    format!("wardline={log_level},tower_http=warn,sqlx=warn,{log_level}")
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `log_level` applies to this
/// workspace's crates. With `log_dir`, JSON lines are also written to a
/// daily rotated file. Keep the returned guard alive for the life of the
/// process or buffered file output is lost.
pub fn init_logging(log_level: &str, log_dir: Option<&str>) -> anyhow::Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(log_level)))
        .context("Invalid log filter")?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .context("Logging already initialized")?;
        return Ok(None);
    };

    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create log directory {dir}"))?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, "wardline.json");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let json_layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::try_new(default_filter(log_level)).context("Invalid log filter")?);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .context("Logging already initialized")?;

    info!(log_dir = dir, "File logging enabled");
    Ok(Some(guard))
}

/// Logs one line per request with its outcome and latency.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let request_id = uuid::Uuid::new_v4();

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    match status_class(status) {
        "5xx" => error!(%request_id, %method, %path, status, latency_ms, "Server error"),
        "4xx" => warn!(%request_id, %method, %path, status, latency_ms, "Client error"),
        _ => info!(%request_id, %method, %path, status, latency_ms, "Request completed"),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    #[test]
    fn default_filter_scopes_level_to_workspace() {
        assert_eq!(
            default_filter("debug"),
            "wardline=debug,tower_http=warn,sqlx=warn,debug"
        );
        assert!(EnvFilter::try_new(default_filter("info")).is_ok());
    }

    #[tokio::test]
    async fn middleware_passes_response_through() {
        let app = Router::new()
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .layer(middleware::from_fn(logging_middleware));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/teapot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }
}
