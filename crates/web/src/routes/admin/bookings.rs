//! Booking oversight handlers (administrator group).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use ride_revive_core::{BookingId, RoleVariant, UserId, resolve_role};

use crate::backend::{AccountSummary, AssignMechanicRequest, Booking};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdministrator;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

/// Bookings oversight template: every booking plus the mechanics that can
/// be assigned to them.
#[derive(Template, WebTemplate)]
#[template(path = "admin/bookings.html")]
pub struct BookingsTemplate {
    pub role: RoleVariant,
    pub bookings: Vec<Booking>,
    pub mechanics: Vec<AccountSummary>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Mechanic assignment form data.
#[derive(Debug, Deserialize)]
pub struct AssignForm {
    pub mechanic_id: UserId,
    pub mechanic_name: Option<String>,
}

/// All bookings, with the mechanic roster for the assignment dropdowns.
pub async fn index(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Query(query): Query<MessageQuery>,
) -> Result<BookingsTemplate> {
    let bookings = state.backend().list_bookings(&auth.token).await?;
    let mechanics = state.backend().list_mechanics(&auth.token).await?;

    Ok(BookingsTemplate {
        role: resolve_role(Some(&auth.principal)),
        bookings,
        mechanics,
        error: query.error,
        success: query.success,
    })
}

/// Assign a mechanic to a booking.
pub async fn assign(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(booking_id): Path<BookingId>,
    Form(form): Form<AssignForm>,
) -> Response {
    let request = AssignMechanicRequest {
        mechanic_id: form.mechanic_id,
        mechanic_name: form
            .mechanic_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
    };

    match state
        .backend()
        .assign_mechanic(&booking_id, &request, &auth.token)
        .await
    {
        Ok(_) => redirect_with_success("/admin/bookings", "Mechanic assigned").into_response(),
        Err(e) => {
            tracing::warn!("Mechanic assignment failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not assign the mechanic");
            redirect_with_error("/admin/bookings", message).into_response()
        }
    }
}

/// Delete a booking entirely.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(booking_id): Path<BookingId>,
) -> Response {
    match state.backend().delete_booking(&booking_id, &auth.token).await {
        Ok(_) => redirect_with_success("/admin/bookings", "Booking removed").into_response(),
        Err(e) => {
            tracing::warn!("Booking deletion failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not remove the booking");
            redirect_with_error("/admin/bookings", message).into_response()
        }
    }
}
