//! Booking store error types.

use crate::domain::BookingId;

/// Errors from a booking repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No booking has this id
    #[error("booking {0} not found")]
    NotFound(BookingId),
}
