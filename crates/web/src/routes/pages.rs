//! Static pages: about, contact (feedback), and the not-found view.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use ride_revive_core::RoleVariant;

use crate::backend::FeedbackRequest;
use crate::filters;
use crate::middleware::CurrentPrincipal;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub role: RoleVariant,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub role: RoleVariant,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Not-found view template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub role: RoleVariant,
}

/// Feedback form data.
#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// About page.
pub async fn about(current: CurrentPrincipal) -> impl IntoResponse {
    AboutTemplate {
        role: current.role(),
    }
}

/// Contact page with the feedback form.
pub async fn contact(
    current: CurrentPrincipal,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    ContactTemplate {
        role: current.role(),
        error: query.error,
        success: query.success,
    }
}

/// Submit feedback to the backend.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Form(form): Form<FeedbackForm>,
) -> Response {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return redirect_with_error("/contact", "Name and message are required").into_response();
    }

    let request = FeedbackRequest {
        name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        message: form.message.trim().to_owned(),
    };

    match state.backend().send_feedback(&request).await {
        Ok(ack) => {
            let message = ack
                .message
                .unwrap_or_else(|| "Thanks for the feedback!".to_owned());
            redirect_with_success("/contact", &message).into_response()
        }
        Err(e) => {
            tracing::warn!("Feedback submission failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not send feedback");
            redirect_with_error("/contact", message).into_response()
        }
    }
}

/// The not-found view.
///
/// Serves `/not-found` explicitly (the customer-group denial target) and
/// doubles as the router fallback for unknown paths.
pub async fn not_found(current: CurrentPrincipal) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            role: current.role(),
        },
    )
}
