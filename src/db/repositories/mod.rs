mod appointment_repository;
mod calendar_repository;

pub use appointment_repository::AppointmentRepository;
pub use calendar_repository::CalendarRepository;
