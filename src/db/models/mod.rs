mod appointment;
mod calendar;

pub use appointment::*;
pub use calendar::*;
