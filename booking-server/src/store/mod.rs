//! Booking storage.
//!
//! Handlers talk to a [`BookingRepository`]; the concrete store is chosen
//! once at startup and shared through the application state.

mod error;
mod filter;
mod memory;

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, BookingPatch, NewBooking};

pub use error::StoreError;
pub use filter::{BookingFilter, BookingSummary};
pub use memory::InMemoryBookings;

/// Storage for bookings. Bookings are never deleted, only cancelled.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a new booking under a fresh id.
    async fn create(&self, booking: NewBooking) -> Booking;

    async fn get(&self, id: &BookingId) -> Option<Booking>;

    /// Apply a partial edit and return the updated booking.
    async fn update(&self, id: &BookingId, patch: BookingPatch) -> Result<Booking, StoreError>;

    /// Mark a booking cancelled and return it.
    async fn cancel(&self, id: &BookingId) -> Result<Booking, StoreError>;

    /// Bookings matching the filter, newest first.
    async fn list(&self, filter: &BookingFilter) -> Vec<Booking>;

    async fn summary(&self) -> BookingSummary;
}
