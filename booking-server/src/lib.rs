//! Booking desk server for a regional bus operator.
//!
//! Validates booking and login payloads, resolves default timetables
//! for routes, and keeps bookings in memory behind a small HTTP API.

pub mod config;
pub mod domain;
pub mod schedule;
pub mod store;
pub mod validate;
pub mod web;
