//! Account management handlers (administrator group).
//!
//! Customers and mechanics are the same account records on the backend;
//! promotion just flips the role tag, after which the account appears in
//! the mechanic roster and gains the mechanic view on next login.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

use ride_revive_core::{RoleVariant, UserId, resolve_role};

use crate::backend::AccountSummary;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdministrator;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

/// Customer accounts listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/customers.html")]
pub struct CustomersTemplate {
    pub role: RoleVariant,
    pub accounts: Vec<AccountSummary>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Mechanic roster template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/mechanics.html")]
pub struct MechanicsTemplate {
    pub role: RoleVariant,
    pub mechanics: Vec<AccountSummary>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Every registered account.
pub async fn customers(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Query(query): Query<MessageQuery>,
) -> Result<CustomersTemplate> {
    let accounts = state.backend().list_users(&auth.token).await?;

    Ok(CustomersTemplate {
        role: resolve_role(Some(&auth.principal)),
        accounts,
        error: query.error,
        success: query.success,
    })
}

/// Promote an account to the mechanic role.
pub async fn promote(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(user_id): Path<UserId>,
) -> Response {
    match state
        .backend()
        .promote_to_mechanic(&user_id, &auth.token)
        .await
    {
        Ok(_) => {
            redirect_with_success("/admin/customers", "Account promoted to mechanic")
                .into_response()
        }
        Err(e) => {
            tracing::warn!("Promotion failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not promote the account");
            redirect_with_error("/admin/customers", message).into_response()
        }
    }
}

/// The mechanic roster.
pub async fn mechanics(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Query(query): Query<MessageQuery>,
) -> Result<MechanicsTemplate> {
    let mechanics = state.backend().list_mechanics(&auth.token).await?;

    Ok(MechanicsTemplate {
        role: resolve_role(Some(&auth.principal)),
        mechanics,
        error: query.error,
        success: query.success,
    })
}

/// Remove a mechanic account.
pub async fn delete_mechanic(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(user_id): Path<UserId>,
) -> Response {
    match state.backend().delete_mechanic(&user_id, &auth.token).await {
        Ok(_) => redirect_with_success("/admin/mechanics", "Mechanic removed").into_response(),
        Err(e) => {
            tracing::warn!("Mechanic removal failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not remove the mechanic");
            redirect_with_error("/admin/mechanics", message).into_response()
        }
    }
}
