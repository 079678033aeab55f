use sqlx::{PgPool, Postgres, Transaction};
use time::{Date, Time};
use uuid::Uuid;

use crate::db::models::{Appointment, AppointmentStatus, NewAppointment};

const APPOINTMENT_COLUMNS: &str = "id, first_name, last_name, mobile_number, appointment_date, \
     start_time, duration_minutes, people, status, created_at, updated_at";

pub struct AppointmentRepository;

impl AppointmentRepository {
    /// Reads the booked appointments for one date and row-locks them for the
    /// rest of the transaction, so the conflict check and the insert form a
    /// single critical section.
    pub async fn find_booked_on_date_for_update(
        tx: &mut Transaction<'_, Postgres>,
        date: Date,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS}
             FROM appointments
             WHERE appointment_date = $1 AND status = 'booked'
             ORDER BY start_time
             FOR UPDATE"
        ))
        .bind(date)
        .fetch_all(&mut **tx)
        .await
    }

    pub async fn insert_booked(
        tx: &mut Transaction<'_, Postgres>,
        new_appointment: &NewAppointment,
        date: Date,
        start_time: Time,
    ) -> Result<Appointment, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "INSERT INTO appointments
                 (first_name, last_name, mobile_number, appointment_date,
                  start_time, duration_minutes, people, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'booked')
             RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(&new_appointment.first_name)
        .bind(&new_appointment.last_name)
        .bind(&new_appointment.mobile_number)
        .bind(date)
        .bind(start_time)
        .bind(new_appointment.duration_minutes)
        .bind(new_appointment.people)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// The day's schedule as shown to staff: everything that still holds or
    /// held a slot, so cancelled rows are left out.
    pub async fn list_on_date(pool: &PgPool, date: Date) -> Result<Vec<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS}
             FROM appointments
             WHERE appointment_date = $1 AND status <> 'cancelled'
             ORDER BY start_time"
        ))
        .bind(date)
        .fetch_all(pool)
        .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        sqlx::query_as::<_, Appointment>(&format!(
            "UPDATE appointments
             SET status = $1::appointment_status, updated_at = NOW()
             WHERE id = $2
             RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
