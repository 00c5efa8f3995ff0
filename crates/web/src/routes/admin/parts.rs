//! Marketplace parts management handlers (administrator group).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use ride_revive_core::{PartId, RoleVariant, resolve_role};

use crate::backend::{BikePart, PartForm};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdministrator;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

/// Parts listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/parts.html")]
pub struct PartsTemplate {
    pub role: RoleVariant,
    pub parts: Vec<BikePart>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Part create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/part_form.html")]
pub struct PartFormTemplate {
    pub role: RoleVariant,
    pub part: Option<BikePart>,
    pub error: Option<String>,
}

/// Part form data as posted.
#[derive(Debug, Deserialize)]
pub struct PartFormData {
    pub part_name: String,
    pub price: String,
    pub quantity: String,
    pub part_image_url: Option<String>,
    pub description: Option<String>,
}

/// Parse and validate the posted form into a backend request body.
fn parse_part_form(form: PartFormData) -> std::result::Result<PartForm, &'static str> {
    if form.part_name.trim().is_empty() {
        return Err("Part name is required");
    }
    let Ok(price) = form.price.trim().parse::<Decimal>() else {
        return Err("Price must be a number");
    };
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    let Ok(quantity) = form.quantity.trim().parse::<i64>() else {
        return Err("Stock quantity must be a whole number");
    };
    if quantity < 0 {
        return Err("Stock quantity cannot be negative");
    }

    Ok(PartForm {
        part_name: form.part_name.trim().to_owned(),
        price,
        quantity,
        part_image_url: form
            .part_image_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        description: form
            .description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
    })
}

/// Parts listing.
pub async fn index(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Query(query): Query<MessageQuery>,
) -> Result<PartsTemplate> {
    let parts = state.backend().list_parts(Some(&auth.token)).await?;

    Ok(PartsTemplate {
        role: resolve_role(Some(&auth.principal)),
        parts,
        error: query.error,
        success: query.success,
    })
}

/// Empty part form.
pub async fn new_page(
    RequireAdministrator(auth): RequireAdministrator,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    PartFormTemplate {
        role: resolve_role(Some(&auth.principal)),
        part: None,
        error: query.error,
    }
}

/// Prefilled part form.
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(part_id): Path<PartId>,
    Query(query): Query<MessageQuery>,
) -> Result<PartFormTemplate> {
    let part = state.backend().get_part(&part_id, Some(&auth.token)).await?;

    Ok(PartFormTemplate {
        role: resolve_role(Some(&auth.principal)),
        part: Some(part),
        error: query.error,
    })
}

/// Create a part.
pub async fn create(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Form(form): Form<PartFormData>,
) -> Response {
    let request = match parse_part_form(form) {
        Ok(request) => request,
        Err(message) => return redirect_with_error("/admin/parts/new", message).into_response(),
    };

    match state.backend().create_part(&request, &auth.token).await {
        Ok(_) => redirect_with_success("/admin/parts", "Part added").into_response(),
        Err(e) => {
            tracing::warn!("Part creation failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not add the part");
            redirect_with_error("/admin/parts/new", message).into_response()
        }
    }
}

/// Update a part.
pub async fn update(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(part_id): Path<PartId>,
    Form(form): Form<PartFormData>,
) -> Response {
    let edit_path = format!("/admin/parts/{part_id}/edit");

    let request = match parse_part_form(form) {
        Ok(request) => request,
        Err(message) => return redirect_with_error(&edit_path, message).into_response(),
    };

    match state
        .backend()
        .update_part(&part_id, &request, &auth.token)
        .await
    {
        Ok(_) => redirect_with_success("/admin/parts", "Part updated").into_response(),
        Err(e) => {
            tracing::warn!("Part update failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not update the part");
            redirect_with_error(&edit_path, message).into_response()
        }
    }
}

/// Delete a part.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(part_id): Path<PartId>,
) -> Response {
    match state.backend().delete_part(&part_id, &auth.token).await {
        Ok(_) => redirect_with_success("/admin/parts", "Part removed").into_response(),
        Err(e) => {
            tracing::warn!("Part deletion failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not remove the part");
            redirect_with_error("/admin/parts", message).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str, quantity: &str) -> PartFormData {
        PartFormData {
            part_name: "Brake pads".to_owned(),
            price: price.to_owned(),
            quantity: quantity.to_owned(),
            part_image_url: None,
            description: None,
        }
    }

    #[test]
    fn test_valid_form_parses() {
        let parsed = parse_part_form(form("1200", "14")).expect("valid form");
        assert_eq!(parsed.quantity, 14);
    }

    #[test]
    fn test_bad_numbers_are_rejected() {
        assert!(parse_part_form(form("free", "14")).is_err());
        assert!(parse_part_form(form("1200", "a few")).is_err());
        assert!(parse_part_form(form("1200", "-3")).is_err());
    }
}
