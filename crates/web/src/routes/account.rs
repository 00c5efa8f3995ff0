//! Customer profile handlers (customer group).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use ride_revive_core::{Email, Principal, RoleVariant, resolve_role};

use crate::backend::{ChangePasswordRequest, UpdateProfileRequest};
use crate::error::clear_sentry_user;
use crate::filters;
use crate::middleware::RequireCustomer;
use crate::models::session::{clear_principal, write_principal};
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/profile.html")]
pub struct ProfileTemplate {
    pub role: RoleVariant,
    pub principal: Principal,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

/// Password change form data (signed-in flow).
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// The profile form, prefilled from the session principal.
pub async fn profile_page(
    RequireCustomer(auth): RequireCustomer,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    ProfileTemplate {
        role: resolve_role(Some(&auth.principal)),
        principal: auth.principal,
        error: query.error,
        success: query.success,
    }
}

/// Update the profile and refresh the session principal.
///
/// The backend echoes the updated user; when it does, that object replaces
/// the session entry so the nav shell shows the new name immediately.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Response {
    if form.full_name.trim().is_empty() {
        return redirect_with_error("/profile", "Full name is required").into_response();
    }
    if Email::parse(form.email.trim()).is_err() {
        return redirect_with_error("/profile", "Email is invalid").into_response();
    }

    let request = UpdateProfileRequest {
        full_name: form.full_name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        phone_number: form.phone_number.trim().to_owned(),
    };

    match state
        .backend()
        .update_profile(&auth.principal.id, &request, &auth.token)
        .await
    {
        Ok(response) => {
            let refreshed = response.user.unwrap_or_else(|| {
                // Older backend builds don't echo the user; patch locally.
                let mut principal = auth.principal.clone();
                principal.full_name = request.full_name.clone();
                principal.phone = request.phone_number.clone();
                principal
            });

            if let Err(e) = write_principal(&session, &refreshed, &auth.token).await {
                tracing::error!("Failed to refresh session after profile update: {}", e);
            }

            let message = response
                .message
                .unwrap_or_else(|| "Profile updated".to_owned());
            redirect_with_success("/profile", &message).into_response()
        }
        Err(e) => {
            tracing::warn!("Profile update failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not update the profile");
            redirect_with_error("/profile", message).into_response()
        }
    }
}

/// Change the password, then force a fresh sign-in.
pub async fn change_password(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    session: Session,
    Form(form): Form<PasswordForm>,
) -> Response {
    if form.new_password.len() < 6 {
        return redirect_with_error("/profile", "Password must be at least 6 characters")
            .into_response();
    }
    if form.new_password != form.confirm_password {
        return redirect_with_error("/profile", "Passwords don't match").into_response();
    }

    let request = ChangePasswordRequest {
        phone: None,
        otp: None,
        old_password: Some(form.old_password),
        new_password: form.new_password,
    };

    match state
        .backend()
        .change_password(&auth.principal.id, &request, Some(&auth.token))
        .await
    {
        Ok(_) => {
            // The old token is dead weight now; end the session cleanly.
            if let Err(e) = clear_principal(&session).await {
                tracing::error!("Failed to clear session after password change: {}", e);
            }
            clear_sentry_user();
            redirect_with_success("/login", "Password changed - please sign in again")
                .into_response()
        }
        Err(e) => {
            tracing::warn!("Password change failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not change the password");
            redirect_with_error("/profile", message).into_response()
        }
    }
}
