use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Booked,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "booked",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Appointment {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub appointment_date: Date,
    pub start_time: Time,
    pub duration_minutes: i32,
    pub people: i32,
    pub status: AppointmentStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Incoming booking request. Date and time stay as strings here; the slot
/// normalizer owns their parsing and structural validation.
#[derive(Debug, Deserialize, Validate)]
pub struct NewAppointment {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "mobile_number is required"))]
    pub mobile_number: String,
    pub date: String,
    pub start_time: String,
    #[validate(range(min = 1, message = "duration_minutes must be at least 1 minute"))]
    pub duration_minutes: i32,
    #[validate(range(min = 1, message = "people must be at least 1"))]
    pub people: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentStatus {
    pub status: AppointmentStatus,
}
