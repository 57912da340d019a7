//! Application state for the web layer.

use std::sync::Arc;

use crate::schedule::ScheduleTable;
use crate::store::BookingRepository;
use crate::validate::Validator;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Booking storage
    pub bookings: Arc<dyn BookingRepository>,

    /// Route timetable used to pre-fill times
    pub schedules: Arc<ScheduleTable>,

    /// Payload validator
    pub validator: Validator,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        bookings: impl BookingRepository + 'static,
        schedules: ScheduleTable,
        validator: Validator,
    ) -> Self {
        Self {
            bookings: Arc::new(bookings),
            schedules: Arc::new(schedules),
            validator,
        }
    }
}
