use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;
use wardline_observability::{logging_middleware, metrics_middleware, metrics_router};

use crate::docs::ApiDoc;
use crate::modules::auth::router::init_auth_router;
use crate::modules::doctors::router::init_doctors_router;
use crate::modules::health::router::init_health_router;
use crate::modules::hospital_admins::router::init_hospital_admins_router;
use crate::modules::hospitals::router::init_hospitals_router;
use crate::modules::patients::router::init_patients_router;
use crate::modules::prescriptions::router::init_prescriptions_router;
use crate::state::AppState;

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", init_auth_router())
        .nest("/hospitals", init_hospitals_router())
        .nest("/doctors", init_doctors_router())
        .nest("/patients", init_patients_router())
        .nest("/prescriptions", init_prescriptions_router())
        .nest("/hospital-admins", init_hospital_admins_router());

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .nest("/api", api);

    if let Some(handle) = state.metrics.clone() {
        router = router.merge(metrics_router(handle));
    }

    router
        .layer(middleware::from_fn(metrics_middleware))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
