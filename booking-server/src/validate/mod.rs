//! Payload validation for bookings and staff logins.
//!
//! Validation runs over raw JSON, before deserialization, so a caller gets
//! every problem with a payload in a single round trip.

mod email;
mod phone;
mod rules;

pub use email::{is_email, normalize_email};
pub use phone::{PhonePattern, UnknownPhonePattern};
pub use rules::{
    LoginCredentials, Mode, ValidationErrors, Validator, Violation, validate_booking,
    validate_login,
};
