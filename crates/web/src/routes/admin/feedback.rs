//! Feedback review handler (administrator group).

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use ride_revive_core::{RoleVariant, resolve_role};

use crate::backend::Feedback;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdministrator;
use crate::state::AppState;

/// Feedback listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/feedback.html")]
pub struct FeedbackTemplate {
    pub role: RoleVariant,
    pub feedbacks: Vec<Feedback>,
}

/// Every feedback entry customers have sent in.
pub async fn index(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
) -> Result<FeedbackTemplate> {
    let feedbacks = state.backend().list_feedback(&auth.token).await?;

    Ok(FeedbackTemplate {
        role: resolve_role(Some(&auth.principal)),
        feedbacks,
    })
}
