use time::{Date, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::{
    Appointment, AppointmentRepository, AppointmentStatus, DatabaseError, NewAppointment,
};
use crate::error::{AppError, AppResult};
use crate::scheduling::{
    has_conflict, normalize_slot, BookedInterval, EligibilityEvaluator, Rejection,
};

/// Runs the full booking workflow: normalize, evaluate eligibility, then
/// check conflicts and insert inside one transaction. A unique-violation at
/// commit time means a concurrent request won the slot between our lock and
/// theirs; the whole evaluation is re-run once before giving up.
pub async fn create_appointment(
    state: &AppState,
    new_appointment: &NewAppointment,
) -> AppResult<Appointment> {
    match try_book(state, new_appointment).await {
        Err(AppError::Database(DatabaseError::UniqueViolation)) => {
            debug!("concurrent booking detected at commit time; re-evaluating once");
            match try_book(state, new_appointment).await {
                Err(AppError::Database(DatabaseError::UniqueViolation)) => {
                    Err(Rejection::SlotUnavailable.into())
                }
                other => other,
            }
        }
        other => other,
    }
}

async fn try_book(state: &AppState, new_appointment: &NewAppointment) -> AppResult<Appointment> {
    let offset = state.env.booking.business_utc_offset;
    let slot = normalize_slot(&new_appointment.date, &new_appointment.start_time, offset)?;

    let now = OffsetDateTime::now_utc().to_offset(offset);
    EligibilityEvaluator::new(&state.calendar, &state.blocked, &state.policy).evaluate(
        &slot,
        new_appointment.duration_minutes,
        now,
    )?;

    // Conflict check and insert share one transaction; the locked read keeps
    // a concurrent request on the same date waiting until we commit. The
    // transaction rolls back on drop for every early return below.
    let mut tx = state.db.begin().await.map_err(DatabaseError::from)?;

    let existing = AppointmentRepository::find_booked_on_date_for_update(&mut tx, slot.date)
        .await
        .map_err(DatabaseError::from)?;
    let booked: Vec<BookedInterval> = existing
        .iter()
        .map(|appointment| BookedInterval {
            start_minutes: crate::scheduling::minutes_since_midnight(appointment.start_time),
            duration_minutes: appointment.duration_minutes,
        })
        .collect();
    if has_conflict(&booked, slot.start_minutes, new_appointment.duration_minutes) {
        return Err(Rejection::SlotUnavailable.into());
    }

    let appointment = AppointmentRepository::insert_booked(
        &mut tx,
        new_appointment,
        slot.date,
        slot.start_time,
    )
    .await
    .map_err(DatabaseError::from)?;

    tx.commit().await.map_err(DatabaseError::from)?;

    debug!(
        id = %appointment.id,
        date = %appointment.appointment_date,
        weekday = %slot.weekday,
        end_time = %slot.end_time(new_appointment.duration_minutes),
        "appointment booked"
    );
    Ok(appointment)
}

pub async fn list_appointments(state: &AppState, date: Date) -> AppResult<Vec<Appointment>> {
    AppointmentRepository::list_on_date(&state.db, date)
        .await
        .map_err(DatabaseError::from)
        .map_err(AppError::from)
}

pub async fn read_appointment(state: &AppState, id: Uuid) -> AppResult<Appointment> {
    AppointmentRepository::find_by_id(&state.db, id)
        .await
        .map_err(DatabaseError::from)?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {id} not found")))
}

/// Administrative transition: booked appointments may become completed or
/// cancelled; anything else is final. Cancelling frees the slot, since the
/// conflict check only looks at booked rows.
pub async fn update_appointment_status(
    state: &AppState,
    id: Uuid,
    status: AppointmentStatus,
) -> AppResult<Appointment> {
    let current = read_appointment(state, id).await?;
    if current.status != AppointmentStatus::Booked {
        return Err(AppError::Validation(format!(
            "a {} appointment cannot be updated",
            current.status.as_str()
        )));
    }
    if status == AppointmentStatus::Booked {
        return Err(AppError::Validation(
            "status must be completed or cancelled".to_string(),
        ));
    }

    AppointmentRepository::update_status(&state.db, id, status)
        .await
        .map_err(DatabaseError::from)?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {id} not found")))
}
