//! Administrator dashboard handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use ride_revive_core::{RoleVariant, resolve_role};

use crate::backend::DashboardStats;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdministrator;
use crate::state::AppState;

/// Dashboard template: aggregate business counters.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub role: RoleVariant,
    pub full_name: String,
    pub stats: DashboardStats,
}

/// The administrator dashboard.
pub async fn index(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
) -> Result<DashboardTemplate> {
    let stats = state.backend().dashboard_stats(&auth.token).await?;

    Ok(DashboardTemplate {
        role: resolve_role(Some(&auth.principal)),
        full_name: auth.principal.full_name,
        stats,
    })
}
