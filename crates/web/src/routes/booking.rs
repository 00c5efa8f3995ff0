//! Doorstep service booking handlers (customer group).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use ride_revive_core::{BikeId, BookingId, RoleVariant, resolve_role};

use crate::backend::{Bike, Booking, BookingRequest};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireCustomer;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

/// Earliest hour a doorstep visit can start.
const BOOKING_OPEN_HOUR: u32 = 8;
/// Hour after which no visit can start (8 PM).
const BOOKING_CLOSE_HOUR: u32 = 20;

// =============================================================================
// Templates
// =============================================================================

/// Serviceable bikes listing template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/bikes.html")]
pub struct BikesTemplate {
    pub role: RoleVariant,
    pub bikes: Vec<Bike>,
}

/// Booking form template for one bike.
#[derive(Template, WebTemplate)]
#[template(path = "customer/book.html")]
pub struct BookTemplate {
    pub role: RoleVariant,
    pub bike: Bike,
    pub error: Option<String>,
}

/// Own-bookings listing template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/bookings.html")]
pub struct BookingsTemplate {
    pub role: RoleVariant,
    pub bookings: Vec<Booking>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Forms
// =============================================================================

/// Booking form data.
#[derive(Debug, Deserialize)]
pub struct BookingForm {
    pub bike_number: String,
    pub booking_date: String,
    pub booking_time: String,
    pub booking_address: String,
    pub service_description: Option<String>,
}

/// Validate the booking form the way the page promises.
///
/// Dates come from an `<input type="date">` (ISO), times from an
/// `<input type="time">`; visits can start between 08:00 and 20:00.
fn validate_booking(form: &BookingForm) -> std::result::Result<(), &'static str> {
    if form.bike_number.trim().is_empty() {
        return Err("Bike number is required");
    }
    if form.booking_address.trim().is_empty() {
        return Err("Service address is required");
    }
    if chrono::NaiveDate::parse_from_str(form.booking_date.trim(), "%Y-%m-%d").is_err() {
        return Err("A valid booking date is required");
    }
    let Ok(time) = chrono::NaiveTime::parse_from_str(form.booking_time.trim(), "%H:%M") else {
        return Err("A valid booking time is required");
    };
    let hour = chrono::Timelike::hour(&time);
    if !(BOOKING_OPEN_HOUR..BOOKING_CLOSE_HOUR).contains(&hour) {
        return Err("Visits can start between 8 AM and 8 PM");
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// The serviceable bike catalog.
pub async fn bikes(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
) -> Result<BikesTemplate> {
    let bikes = state.backend().list_bikes(Some(&auth.token)).await?;

    Ok(BikesTemplate {
        role: resolve_role(Some(&auth.principal)),
        bikes,
    })
}

/// Booking form for one bike.
pub async fn book_page(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    Path(bike_id): Path<BikeId>,
    Query(query): Query<MessageQuery>,
) -> Result<BookTemplate> {
    let bike = state.backend().get_bike(&bike_id, Some(&auth.token)).await?;

    Ok(BookTemplate {
        role: resolve_role(Some(&auth.principal)),
        bike,
        error: query.error,
    })
}

/// Create a booking for one bike.
pub async fn create_booking(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    Path(bike_id): Path<BikeId>,
    Form(form): Form<BookingForm>,
) -> Response {
    let book_path = format!("/book/{bike_id}");

    if let Err(message) = validate_booking(&form) {
        return redirect_with_error(&book_path, message).into_response();
    }

    let bike = match state.backend().get_bike(&bike_id, Some(&auth.token)).await {
        Ok(bike) => bike,
        Err(e) => {
            tracing::warn!("Could not load bike for booking: {}", e);
            return redirect_with_error("/bikes", "That bike is no longer available")
                .into_response();
        }
    };

    let bike_name = match &bike.bike_model {
        Some(model) => format!("{} {model}", bike.bike_name),
        None => bike.bike_name.clone(),
    };

    let request = BookingRequest {
        bike_name,
        bike_number: form.bike_number.trim().to_owned(),
        booking_date: form.booking_date.trim().to_owned(),
        booking_time: form.booking_time.trim().to_owned(),
        booking_address: form.booking_address.trim().to_owned(),
        service_description: form
            .service_description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        total: bike.bike_price.map(|p| p.amount),
    };

    add_breadcrumb(
        "booking",
        "Submitted booking request",
        Some(&[("bike_id", bike_id.as_str())]),
    );

    match state.backend().create_booking(&request, &auth.token).await {
        Ok(ack) => {
            let message = ack
                .message
                .unwrap_or_else(|| "Booking placed - we'll be at your doorstep".to_owned());
            redirect_with_success("/bookings", &message).into_response()
        }
        Err(e) => {
            tracing::warn!("Booking creation failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not place the booking");
            redirect_with_error(&book_path, message).into_response()
        }
    }
}

/// The customer's own bookings.
pub async fn bookings(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    Query(query): Query<MessageQuery>,
) -> Result<BookingsTemplate> {
    let bookings = state
        .backend()
        .user_bookings(&auth.principal.id, &auth.token)
        .await?;

    Ok(BookingsTemplate {
        role: resolve_role(Some(&auth.principal)),
        bookings,
        error: query.error,
        success: query.success,
    })
}

/// Cancel a pending booking.
pub async fn cancel(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    Path(booking_id): Path<BookingId>,
) -> Response {
    match state.backend().cancel_booking(&booking_id, &auth.token).await {
        Ok(ack) => {
            let message = ack.message.unwrap_or_else(|| "Booking canceled".to_owned());
            redirect_with_success("/bookings", &message).into_response()
        }
        Err(e) => {
            tracing::warn!("Booking cancellation failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not cancel the booking");
            redirect_with_error("/bookings", message).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(date: &str, time: &str) -> BookingForm {
        BookingForm {
            bike_number: "BA 2 PA 1234".to_owned(),
            booking_date: date.to_owned(),
            booking_time: time.to_owned(),
            booking_address: "Patan, Lalitpur".to_owned(),
            service_description: None,
        }
    }

    #[test]
    fn test_valid_booking_passes() {
        assert!(validate_booking(&form("2026-08-12", "10:30")).is_ok());
    }

    #[test]
    fn test_time_window_is_enforced() {
        // 8 AM is the first valid start, 8 PM is past the last
        assert!(validate_booking(&form("2026-08-12", "08:00")).is_ok());
        assert!(validate_booking(&form("2026-08-12", "19:59")).is_ok());
        assert!(validate_booking(&form("2026-08-12", "07:59")).is_err());
        assert!(validate_booking(&form("2026-08-12", "20:00")).is_err());
    }

    #[test]
    fn test_garbage_date_and_time_are_rejected() {
        assert!(validate_booking(&form("next tuesday", "10:30")).is_err());
        assert!(validate_booking(&form("2026-08-12", "half past")).is_err());
    }

    #[test]
    fn test_blank_required_fields_are_rejected() {
        let mut f = form("2026-08-12", "10:30");
        f.bike_number = "  ".to_owned();
        assert!(validate_booking(&f).is_err());

        let mut f = form("2026-08-12", "10:30");
        f.booking_address = String::new();
        assert!(validate_booking(&f).is_err());
    }
}
