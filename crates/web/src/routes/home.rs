//! Landing page and customer dashboard handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;

use ride_revive_core::{RoleVariant, resolve_role};

use crate::backend::Bike;
use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentPrincipal, RequireCustomer};
use crate::state::AppState;

/// Landing page template (public).
#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub role: RoleVariant,
    pub bikes: Vec<Bike>,
}

/// Customer dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/home.html")]
pub struct CustomerHomeTemplate {
    pub role: RoleVariant,
    pub full_name: String,
    pub bikes: Vec<Bike>,
}

/// Public landing page with a few featured bikes.
///
/// The catalog is decoration here; if the backend is unreachable the page
/// still renders, just without the showcase.
pub async fn landing(State(state): State<AppState>, current: CurrentPrincipal) -> impl IntoResponse {
    let bikes = match state.backend().list_bikes(None).await {
        Ok(mut bikes) => {
            bikes.truncate(6);
            bikes
        }
        Err(e) => {
            tracing::warn!("Could not load featured bikes for landing page: {}", e);
            Vec::new()
        }
    };

    LandingTemplate {
        role: current.role(),
        bikes,
    }
}

/// Customer dashboard: greeting plus the serviceable bike catalog.
pub async fn customer_home(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
) -> Result<CustomerHomeTemplate> {
    let bikes = state.backend().list_bikes(Some(&auth.token)).await?;

    Ok(CustomerHomeTemplate {
        role: resolve_role(Some(&auth.principal)),
        full_name: auth.principal.full_name,
        bikes,
    })
}
