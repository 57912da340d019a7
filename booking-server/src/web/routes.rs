//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::{Booking, BookingId, BookingPatch, BookingStatus, NewBooking, RouteName};
use crate::store::{BookingFilter, BookingSummary, StoreError};
use crate::validate::{Mode, ValidationErrors, Violation};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/routes/schedule", get(resolve_schedule))
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/summary", get(booking_summary))
        .route("/bookings/:id", get(get_booking).patch(update_booking))
        .route("/bookings/:id/cancel", post(cancel_booking))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Validate a staff login payload.
///
/// Sessions are not issued here; a valid payload echoes the normalised email.
async fn login(State(state): State<AppState>, body: Bytes) -> Result<Json<LoginResponse>, AppError> {
    let payload = parse_json(&body)?;
    let credentials = state
        .validator
        .validate_login(&payload)
        .map_err(AppError::invalid)?;

    info!(email = %credentials.email, "login payload accepted");
    Ok(Json(LoginResponse {
        email: credentials.email,
    }))
}

/// Default departure/arrival times for a route.
async fn resolve_schedule(
    State(state): State<AppState>,
    Query(req): Query<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let route = match req.route.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => RouteName::canonical(raw),
        _ => {
            return Err(AppError::BadRequest {
                message: "Query parameter `route` is required".to_string(),
            });
        }
    };

    let response = match state.schedules.matching_pattern(route.as_str()) {
        Some((_, schedule)) => ScheduleResponse::new(&route, schedule, true),
        None => ScheduleResponse::new(&route, state.schedules.fallback(), false),
    };
    Ok(Json(response))
}

/// List bookings, optionally filtered by search text and status.
async fn list_bookings(
    State(state): State<AppState>,
    Query(req): Query<ListBookingsRequest>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let status = match req.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(s.parse::<BookingStatus>().map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?),
    };

    let filter = BookingFilter {
        query: req.q,
        status,
    };
    let bookings = state.bookings.list(&filter).await;

    Ok(Json(ListBookingsResponse { bookings }))
}

/// Dashboard totals.
async fn booking_summary(State(state): State<AppState>) -> Json<BookingSummary> {
    Json(state.bookings.summary().await)
}

/// Create a booking.
async fn create_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let payload = parse_json(&body)?;
    check(state.validator.validate_booking(&payload, Mode::Create))?;

    let mut new: NewBooking = from_payload(payload)?;
    new = new.trimmed();
    new.route = RouteName::canonical(&new.route).into_string();

    let booking = state.bookings.create(new).await;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Fetch one booking.
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = BookingId::new(id);
    match state.bookings.get(&id).await {
        Some(booking) => Ok(Json(booking)),
        None => Err(StoreError::NotFound(id).into()),
    }
}

/// Apply a partial edit.
async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Booking>, AppError> {
    let payload = parse_json(&body)?;
    check(state.validator.validate_booking(&payload, Mode::Update))?;

    let mut patch: BookingPatch = from_payload(payload)?;
    patch = patch.trimmed();
    patch.route = patch
        .route
        .map(|r| RouteName::canonical(&r).into_string());

    let booking = state.bookings.update(&BookingId::new(id), patch).await?;
    Ok(Json(booking))
}

/// Cancel a booking. Cancelling twice is harmless.
async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.bookings.cancel(&BookingId::new(id)).await?;
    Ok(Json(booking))
}

/// Parse a JSON body, logging it on failure.
fn parse_json(body: &Bytes) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "JSON parse error");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Deserialize an already-validated payload.
fn from_payload<T: DeserializeOwned>(payload: Value) -> Result<T, AppError> {
    serde_json::from_value(payload).map_err(|e| AppError::BadRequest {
        message: format!("Invalid booking: {e}"),
    })
}

fn check(violations: Vec<Violation>) -> Result<(), AppError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::invalid(violations))
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Invalid(ValidationErrors),
    NotFound { message: String },
}

impl AppError {
    fn invalid(violations: Vec<Violation>) -> Self {
        AppError::Invalid(ValidationErrors::from(violations))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Invalid(errors) => {
                warn!(%errors, "rejected payload");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            AppError::BadRequest { message } => {
                warn!(status = 400, %message, "bad request");
                let body = Json(ErrorResponse { error: message });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::NotFound { message } => {
                warn!(status = 404, %message, "not found");
                let body = Json(ErrorResponse { error: message });
                (StatusCode::NOT_FOUND, body).into_response()
            }
        }
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
