//! Domain types for the booking desk.
//!
//! Bookings, route identifiers and clock times. Types with a textual form
//! validate it at construction, so code that receives them can trust it.

mod booking;
mod route;
mod time;

pub use booking::{
    Booking, BookingId, BookingPatch, BookingStatus, InvalidStatus, NewBooking, Passenger,
    parse_fare,
};
pub use route::{ROUTE_SEPARATOR, RouteName};
pub use time::{ClockTime, TimeError, to_display_time};
