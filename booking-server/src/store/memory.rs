//! In-memory booking store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{Booking, BookingId, BookingPatch, NewBooking};

use super::{BookingFilter, BookingRepository, BookingSummary, StoreError};

/// First sequence number handed out.
const FIRST_SEQUENCE: u64 = 1001;

struct Inner {
    /// Newest first.
    bookings: Vec<Booking>,
    next_sequence: u64,
}

/// Thread-safe in-memory store.
///
/// Contents are lost on restart.
pub struct InMemoryBookings {
    inner: RwLock<Inner>,
}

impl InMemoryBookings {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                bookings: Vec::new(),
                next_sequence: FIRST_SEQUENCE,
            }),
        }
    }

    /// Number of stored bookings, cancelled ones included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.bookings.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.bookings.is_empty()
    }

    /// Run `f` on the booking with this id under the write lock.
    async fn modify(
        &self,
        id: &BookingId,
        f: impl FnOnce(&mut Booking),
    ) -> Result<Booking, StoreError> {
        let mut guard = self.inner.write().await;
        let booking = guard
            .bookings
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        f(booking);
        Ok(booking.clone())
    }
}

impl Default for InMemoryBookings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn create(&self, booking: NewBooking) -> Booking {
        let mut guard = self.inner.write().await;
        let id = BookingId::from_sequence(guard.next_sequence);
        guard.next_sequence += 1;

        let booking = Booking::from_new(id, booking);
        info!(id = %booking.id, route = %booking.route, "booking created");
        guard.bookings.insert(0, booking.clone());
        booking
    }

    async fn get(&self, id: &BookingId) -> Option<Booking> {
        let guard = self.inner.read().await;
        guard.bookings.iter().find(|b| &b.id == id).cloned()
    }

    async fn update(&self, id: &BookingId, patch: BookingPatch) -> Result<Booking, StoreError> {
        let booking = self.modify(id, |b| b.apply(patch)).await?;
        info!(id = %booking.id, status = %booking.status, "booking updated");
        Ok(booking)
    }

    async fn cancel(&self, id: &BookingId) -> Result<Booking, StoreError> {
        let booking = self.modify(id, Booking::cancel).await?;
        info!(id = %booking.id, "booking cancelled");
        Ok(booking)
    }

    async fn list(&self, filter: &BookingFilter) -> Vec<Booking> {
        let guard = self.inner.read().await;
        let matches: Vec<Booking> = guard
            .bookings
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        debug!(?filter, count = matches.len(), "listed bookings");
        matches
    }

    async fn summary(&self) -> BookingSummary {
        let guard = self.inner.read().await;
        BookingSummary::from_bookings(&guard.bookings)
    }
}
