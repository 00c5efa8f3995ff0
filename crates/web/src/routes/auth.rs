//! Authentication route handlers.
//!
//! Login, registration, logout, and the OTP password-reset flow. All of the
//! real credential work happens on the backend; these handlers validate
//! form input, relay it, and persist the returned principal + token in the
//! session on success.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use ride_revive_core::{Email, RoleVariant, UserId, resolve_role};

use crate::backend::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::CurrentPrincipal;
use crate::models::session::{clear_principal, write_principal};
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

/// Forgot password form data (requests an OTP).
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    pub phone: String,
}

/// Reset password form data (OTP flow).
#[derive(Debug, Deserialize)]
pub struct ResetPasswordForm {
    pub phone: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub role: RoleVariant,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub role: RoleVariant,
    pub error: Option<String>,
}

// =============================================================================
// Login / Logout
// =============================================================================

/// Display the login page.
pub async fn login_page(
    current: CurrentPrincipal,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        role: current.role(),
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
///
/// On success the principal and bearer token are written to the session and
/// the user lands on their role's dashboard.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.email.trim().is_empty() || !form.email.contains('@') {
        return redirect_with_error("/login", "Valid email is required").into_response();
    }
    if form.password.trim().is_empty() {
        return redirect_with_error("/login", "Password is required").into_response();
    }

    let request = LoginRequest {
        email: form.email.trim().to_owned(),
        password: form.password,
    };

    match state.backend().login(&request).await {
        Ok(login) => {
            if let Err(e) = write_principal(&session, &login.user, &login.token).await {
                tracing::error!("Failed to persist session after login: {}", e);
                return redirect_with_error("/login", "Could not start a session").into_response();
            }

            set_sentry_user(&login.user.id, Some(login.user.email.as_str()));
            tracing::info!(user_id = %login.user.id, "login successful");

            let role = resolve_role(Some(&login.user));
            Redirect::to(role.landing_path()).into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            let message = e.backend_message().unwrap_or("Invalid email or password");
            redirect_with_error("/login", message).into_response()
        }
    }
}

/// Handle logout: remove the principal and token, back to the landing page.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_principal(&session).await {
        tracing::error!("Failed to clear session on logout: {}", e);
    }
    clear_sentry_user();
    Redirect::to("/").into_response()
}

// =============================================================================
// Registration
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    current: CurrentPrincipal,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    RegisterTemplate {
        role: current.role(),
        error: query.error,
    }
}

/// Validate a registration form, mirroring what the page enforces inline.
fn validate_registration(form: &RegisterForm) -> Result<(), &'static str> {
    if form.full_name.trim().is_empty() {
        return Err("Full name is required");
    }
    if Email::parse(form.email.trim()).is_err() {
        return Err("Email is invalid");
    }
    let digits: String = form.phone_number.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 10 {
        return Err("Please enter a valid 10-digit phone number");
    }
    if form.password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    if form.password != form.confirm_password {
        return Err("Passwords don't match");
    }
    Ok(())
}

/// Handle registration form submission.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if let Err(message) = validate_registration(&form) {
        return redirect_with_error("/register", message).into_response();
    }

    let request = RegisterRequest {
        full_name: form.full_name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        phone_number: form.phone_number.trim().to_owned(),
        password: form.password,
        confirm_password: form.confirm_password,
    };

    match state.backend().register(&request).await {
        Ok(ack) => {
            let message = ack
                .message
                .unwrap_or_else(|| "Account created, you can sign in now".to_owned());
            redirect_with_success("/login", &message).into_response()
        }
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            let message = e.backend_message().unwrap_or("Registration failed");
            redirect_with_error("/register", message).into_response()
        }
    }
}

// =============================================================================
// Password reset (OTP flow)
// =============================================================================

/// Request a password-reset OTP for a phone number.
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Response {
    if form.phone.trim().is_empty() {
        return redirect_with_error("/login", "Please enter a valid phone number").into_response();
    }

    let request = ForgotPasswordRequest {
        phone: form.phone.trim().to_owned(),
    };

    match state.backend().forgot_password(&request).await {
        Ok(ack) => {
            let message = ack.message.unwrap_or_else(|| "OTP sent".to_owned());
            redirect_with_success("/login", &message).into_response()
        }
        Err(e) => {
            tracing::warn!("Forgot-password request failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not send OTP");
            redirect_with_error("/login", message).into_response()
        }
    }
}

/// Complete the OTP password reset.
pub async fn reset_password(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Form(form): Form<ResetPasswordForm>,
) -> Response {
    if form.new_password != form.confirm_password {
        return redirect_with_error("/login", "Passwords do not match").into_response();
    }

    // The backend resolves OTP resets by phone + otp; the path id is only
    // meaningful for the signed-in change flow, which shares this endpoint.
    let user_id = current.0.map_or_else(|| UserId::new(""), |p| p.id);

    let request = ChangePasswordRequest {
        phone: Some(form.phone.trim().to_owned()),
        otp: Some(form.otp.trim().to_owned()),
        old_password: None,
        new_password: form.new_password,
    };

    match state
        .backend()
        .change_password(&user_id, &request, None)
        .await
    {
        Ok(ack) => {
            let message = ack.message.unwrap_or_else(|| "Password reset".to_owned());
            redirect_with_success("/login", &message).into_response()
        }
        Err(e) => {
            tracing::warn!("Password reset failed: {}", e);
            let message = e.backend_message().unwrap_or("Password reset failed");
            redirect_with_error("/login", message).into_response()
        }
    }
}
