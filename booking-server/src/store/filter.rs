//! Booking list filters and dashboard totals.

use serde::Serialize;

use crate::domain::{Booking, BookingStatus};

/// Criteria for listing bookings. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Free text matched against passenger name and id (case-insensitive)
    /// and phone (verbatim).
    pub query: Option<String>,

    /// Only bookings in this status.
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        let status_ok = self.status.is_none_or(|s| booking.status == s);
        status_ok && self.matches_query(booking)
    }

    fn matches_query(&self, booking: &Booking) -> bool {
        let Some(query) = self.query.as_deref().map(str::trim) else {
            return true;
        };
        if query.is_empty() {
            return true;
        }

        let needle = query.to_lowercase();
        booking.main_passenger_name.to_lowercase().contains(&needle)
            || booking.phone.contains(query)
            || booking.id.as_str().to_lowercase().contains(&needle)
    }
}

/// Totals shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub total_bookings: usize,
    /// Bookings that are not cancelled.
    pub active_bookings: usize,
    pub pending_bookings: usize,
    pub cancelled_bookings: usize,
    /// Sum of `totalFare` over active bookings.
    pub total_revenue: f64,
}

impl BookingSummary {
    pub fn from_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        bookings
            .into_iter()
            .fold(Self::default(), |mut summary, booking| {
                summary.total_bookings += 1;
                match booking.status {
                    BookingStatus::Cancelled => summary.cancelled_bookings += 1,
                    BookingStatus::Pending => summary.pending_bookings += 1,
                    BookingStatus::Confirmed => {}
                }
                if booking.is_active() {
                    summary.active_bookings += 1;
                    summary.total_revenue += booking.total_fare;
                }
                summary
            })
    }
}
