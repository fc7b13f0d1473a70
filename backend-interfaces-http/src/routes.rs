use axum::Router;

use backend_application::AppState;

use crate::handlers::{key_handlers, ops_handlers, query_handlers, report_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", axum::routing::get(ops_handlers::health_live))
        .route("/healthz", axum::routing::get(ops_handlers::health_live))
        .route("/readyz", axum::routing::get(ops_handlers::health_ready))
        .route(
            "/reportKill",
            axum::routing::post(report_handlers::report_kill),
        )
        .route("/kills", axum::routing::get(query_handlers::list_kills))
        .route(
            "/reportDeath",
            axum::routing::post(report_handlers::report_death),
        )
        .route("/deaths", axum::routing::get(query_handlers::list_deaths))
        .route("/keys", axum::routing::post(key_handlers::create_key))
        .route(
            "/keys/validate",
            axum::routing::get(key_handlers::validate_key),
        )
        .route(
            "/metrics",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
