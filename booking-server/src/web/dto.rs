//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Booking, RouteName};
use crate::schedule::Schedule;

/// Query for the schedule lookup.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleRequest {
    /// Route identifier, e.g. "Kamarbandha -> Guwahati"
    pub route: Option<String>,
}

/// Default times for a route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    /// Canonical route identifier
    pub route: String,

    /// Route with an arrow glyph, for display
    pub route_display: String,

    /// Departure time, 24-hour "HH:MM"
    pub departure: String,

    /// Arrival time, 24-hour "HH:MM"
    pub arrival: String,

    /// Departure time, e.g. "6:30 AM"
    pub departure_display: String,

    /// Arrival time, e.g. "12:00 PM"
    pub arrival_display: String,

    /// Whether a timetable rule matched (false means the default pair)
    pub matched: bool,
}

impl ScheduleResponse {
    pub fn new(route: &RouteName, schedule: Schedule, matched: bool) -> Self {
        Self {
            route: route.as_str().to_string(),
            route_display: route.display(),
            departure: schedule.departure.to_string(),
            arrival: schedule.arrival.to_string(),
            departure_display: schedule.departure.to_12_hour(),
            arrival_display: schedule.arrival.to_12_hour(),
            matched,
        }
    }
}

/// Query for the booking list.
#[derive(Debug, Default, Deserialize)]
pub struct ListBookingsRequest {
    /// Free-text search over name, phone and id
    pub q: Option<String>,

    /// Status name, or "All"
    pub status: Option<String>,
}

/// Booking list response.
#[derive(Debug, Serialize)]
pub struct ListBookingsResponse {
    pub bookings: Vec<Booking>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Normalised email
    pub email: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
