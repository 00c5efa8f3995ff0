//! Parts marketplace and bike search handlers (public).

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;

use ride_revive_core::RoleVariant;
use serde::Deserialize;

use crate::backend::{Bike, BikePart};
use crate::error::Result;
use crate::filters;
use crate::middleware::CurrentPrincipal;
use crate::routes::MessageQuery;
use crate::state::AppState;

/// Marketplace listing template.
#[derive(Template, WebTemplate)]
#[template(path = "marketplace.html")]
pub struct MarketplaceTemplate {
    pub role: RoleVariant,
    pub parts: Vec<BikePart>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Bike search template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub role: RoleVariant,
    pub query: String,
    pub bikes: Vec<Bike>,
}

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub bike_name: Option<String>,
}

/// Marketplace listing: every part the shop sells.
///
/// Public - guests can browse; adding to the cart is what requires a
/// customer account.
pub async fn index(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Query(query): Query<MessageQuery>,
) -> Result<MarketplaceTemplate> {
    let parts = state.backend().list_parts(None).await?;

    Ok(MarketplaceTemplate {
        role: current.role(),
        parts,
        error: query.error,
        success: query.success,
    })
}

/// Bike search by name.
///
/// An empty query renders the empty search page without a backend call.
pub async fn search(
    State(state): State<AppState>,
    current: CurrentPrincipal,
    Query(query): Query<SearchQuery>,
) -> Result<SearchTemplate> {
    let term = query.bike_name.unwrap_or_default();
    let bikes = if term.trim().is_empty() {
        Vec::new()
    } else {
        state.backend().bikes_by_name(term.trim(), None).await?
    };

    Ok(SearchTemplate {
        role: current.role(),
        query: term,
        bikes,
    })
}
