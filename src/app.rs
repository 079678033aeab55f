use axum::{
    extract::State,
    http::{StatusCode, Uri},
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::{
    app_state::AppState, middleware::request_log::request_logging_middleware,
    modules::appointments::routes::appointment_routes,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/appointments", appointment_routes())
        .fallback(not_found)
        .layer(from_fn(request_logging_middleware))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Appointments Backend says hello!\n"
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    let body = Json(json!({ "error": format!("Path not found: {}", uri.path()) }));
    (StatusCode::NOT_FOUND, body)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
        }
    }))
}
