use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use super::service;
use crate::app_state::AppState;
use crate::db::{NewAppointment, UpdateAppointmentStatus};
use crate::error::{AppError, AppResult};
use crate::scheduling::parse_date;

/// Request/response envelope used across the API: `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub date: Option<String>,
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Json(body): Json<DataEnvelope<NewAppointment>>,
) -> AppResult<impl IntoResponse> {
    body.data
        .validate()
        .map_err(|err| AppError::Validation(err.to_string()))?;

    let appointment = service::create_appointment(&state, &body.data).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": appointment }))))
}

pub async fn list_appointments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let date = match params.date {
        Some(ref raw) => parse_date(raw)?,
        // Default to today in the business's local time.
        None => OffsetDateTime::now_utc()
            .to_offset(state.env.booking.business_utc_offset)
            .date(),
    };

    let appointments = service::list_appointments(&state, date).await?;
    Ok(Json(json!({ "data": appointments })))
}

pub async fn read_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let appointment = service::read_appointment(&state, id).await?;
    Ok(Json(json!({ "data": appointment })))
}

pub async fn update_appointment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DataEnvelope<UpdateAppointmentStatus>>,
) -> AppResult<impl IntoResponse> {
    let appointment = service::update_appointment_status(&state, id, body.data.status).await?;
    Ok(Json(json!({ "data": appointment })))
}
