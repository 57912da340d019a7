//! Web layer for the booking desk.
//!
//! Provides HTTP endpoints for bookings, schedule lookup and login checks.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
