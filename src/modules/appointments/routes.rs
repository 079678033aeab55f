use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    create_appointment, list_appointments, read_appointment, update_appointment_status,
};
use crate::app_state::AppState;

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_appointment).get(list_appointments))
        .route("/:id", get(read_appointment))
        .route("/:id/status", put(update_appointment_status))
}
