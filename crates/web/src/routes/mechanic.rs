//! Mechanic task and profile handlers (mechanic group).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use ride_revive_core::{BookingId, BookingStatus, Principal, RoleVariant, resolve_role};

use crate::backend::{Booking, BookingStatusRequest, UpdateProfileRequest};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireMechanic;
use crate::models::session::write_principal;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

/// Mechanic dashboard template: the assigned task queue.
#[derive(Template, WebTemplate)]
#[template(path = "mechanic/dashboard.html")]
pub struct DashboardTemplate {
    pub role: RoleVariant,
    pub full_name: String,
    pub bookings: Vec<Booking>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Mechanic profile template.
#[derive(Template, WebTemplate)]
#[template(path = "mechanic/profile.html")]
pub struct ProfileTemplate {
    pub role: RoleVariant,
    pub principal: Principal,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Mechanic profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

/// The assigned-bookings dashboard.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireMechanic(auth): RequireMechanic,
    Query(query): Query<MessageQuery>,
) -> Result<DashboardTemplate> {
    let bookings = state
        .backend()
        .assigned_bookings(&auth.principal.id, &auth.token)
        .await?;

    Ok(DashboardTemplate {
        role: resolve_role(Some(&auth.principal)),
        full_name: auth.principal.full_name,
        bookings,
        error: query.error,
        success: query.success,
    })
}

/// Mark an assigned booking as in progress.
pub async fn start_task(
    State(state): State<AppState>,
    RequireMechanic(auth): RequireMechanic,
    Path(booking_id): Path<BookingId>,
) -> Response {
    let request = BookingStatusRequest {
        booking_id,
        status: BookingStatus::InProgress,
    };

    match state
        .backend()
        .update_booking_status(&auth.principal.id, &request, &auth.token)
        .await
    {
        Ok(_) => redirect_with_success("/mechanic", "Marked in progress").into_response(),
        Err(e) => {
            tracing::warn!("Status update failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not update the task");
            redirect_with_error("/mechanic", message).into_response()
        }
    }
}

/// Mark an assigned booking as completed.
pub async fn complete_task(
    State(state): State<AppState>,
    RequireMechanic(auth): RequireMechanic,
    Path(booking_id): Path<BookingId>,
) -> Response {
    let request = BookingStatusRequest {
        booking_id,
        status: BookingStatus::Completed,
    };

    match state
        .backend()
        .complete_booking(&auth.principal.id, &request, &auth.token)
        .await
    {
        Ok(_) => redirect_with_success("/mechanic", "Service completed").into_response(),
        Err(e) => {
            tracing::warn!("Completion failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not complete the task");
            redirect_with_error("/mechanic", message).into_response()
        }
    }
}

/// The mechanic's profile form.
pub async fn profile_page(
    RequireMechanic(auth): RequireMechanic,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    ProfileTemplate {
        role: resolve_role(Some(&auth.principal)),
        principal: auth.principal,
        error: query.error,
        success: query.success,
    }
}

/// Update the mechanic's profile and refresh the session principal.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireMechanic(auth): RequireMechanic,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Response {
    if form.full_name.trim().is_empty() {
        return redirect_with_error("/mechanic/profile", "Full name is required").into_response();
    }

    let request = UpdateProfileRequest {
        full_name: form.full_name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        phone_number: form.phone_number.trim().to_owned(),
    };

    match state
        .backend()
        .update_mechanic_profile(&auth.principal.id, &request, &auth.token)
        .await
    {
        Ok(response) => {
            let refreshed = response.user.unwrap_or_else(|| {
                let mut principal = auth.principal.clone();
                principal.full_name = request.full_name.clone();
                principal.phone = request.phone_number.clone();
                principal
            });

            if let Err(e) = write_principal(&session, &refreshed, &auth.token).await {
                tracing::error!("Failed to refresh session after profile update: {}", e);
            }

            redirect_with_success("/mechanic/profile", "Profile updated").into_response()
        }
        Err(e) => {
            tracing::warn!("Mechanic profile update failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not update the profile");
            redirect_with_error("/mechanic/profile", message).into_response()
        }
    }
}
