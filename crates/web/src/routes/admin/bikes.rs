//! Bike catalog management handlers (administrator group).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use ride_revive_core::{BikeId, RoleVariant, resolve_role};

use crate::backend::{Bike, BikeForm};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdministrator;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

/// Bike listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/bikes.html")]
pub struct BikesTemplate {
    pub role: RoleVariant,
    pub bikes: Vec<Bike>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Bike create/edit form template.
///
/// `bike` is `None` for the create form, `Some` when editing.
#[derive(Template, WebTemplate)]
#[template(path = "admin/bike_form.html")]
pub struct BikeFormTemplate {
    pub role: RoleVariant,
    pub bike: Option<Bike>,
    pub error: Option<String>,
}

/// Bike form data as posted (price arrives as text and is parsed here).
#[derive(Debug, Deserialize)]
pub struct BikeFormData {
    pub bike_name: String,
    pub bike_model: String,
    pub bike_price: String,
    pub bike_image_url: Option<String>,
    pub description: Option<String>,
}

/// Parse and validate the posted form into a backend request body.
fn parse_bike_form(form: BikeFormData) -> std::result::Result<BikeForm, &'static str> {
    if form.bike_name.trim().is_empty() {
        return Err("Bike name is required");
    }
    let Ok(price) = form.bike_price.trim().parse::<Decimal>() else {
        return Err("Price must be a number");
    };
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }

    Ok(BikeForm {
        bike_name: form.bike_name.trim().to_owned(),
        bike_model: form.bike_model.trim().to_owned(),
        bike_price: price,
        bike_image_url: form
            .bike_image_url
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

/// Bike catalog listing.
pub async fn index(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Query(query): Query<MessageQuery>,
) -> Result<BikesTemplate> {
    let bikes = state.backend().list_bikes(Some(&auth.token)).await?;

    Ok(BikesTemplate {
        role: resolve_role(Some(&auth.principal)),
        bikes,
        error: query.error,
        success: query.success,
    })
}

/// Empty bike form.
pub async fn new_page(
    RequireAdministrator(auth): RequireAdministrator,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    BikeFormTemplate {
        role: resolve_role(Some(&auth.principal)),
        bike: None,
        error: query.error,
    }
}

/// Prefilled bike form.
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(bike_id): Path<BikeId>,
    Query(query): Query<MessageQuery>,
) -> Result<BikeFormTemplate> {
    let bike = state.backend().get_bike(&bike_id, Some(&auth.token)).await?;

    Ok(BikeFormTemplate {
        role: resolve_role(Some(&auth.principal)),
        bike: Some(bike),
        error: query.error,
    })
}

/// Create a bike.
pub async fn create(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Form(form): Form<BikeFormData>,
) -> Response {
    let request = match parse_bike_form(form) {
        Ok(request) => request,
        Err(message) => return redirect_with_error("/admin/bikes/new", message).into_response(),
    };

    match state.backend().create_bike(&request, &auth.token).await {
        Ok(_) => redirect_with_success("/admin/bikes", "Bike added").into_response(),
        Err(e) => {
            tracing::warn!("Bike creation failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not add the bike");
            redirect_with_error("/admin/bikes/new", message).into_response()
        }
    }
}

/// Update a bike.
pub async fn update(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(bike_id): Path<BikeId>,
    Form(form): Form<BikeFormData>,
) -> Response {
    let edit_path = format!("/admin/bikes/{bike_id}/edit");

    let request = match parse_bike_form(form) {
        Ok(request) => request,
        Err(message) => return redirect_with_error(&edit_path, message).into_response(),
    };

    match state
        .backend()
        .update_bike(&bike_id, &request, &auth.token)
        .await
    {
        Ok(_) => redirect_with_success("/admin/bikes", "Bike updated").into_response(),
        Err(e) => {
            tracing::warn!("Bike update failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not update the bike");
            redirect_with_error(&edit_path, message).into_response()
        }
    }
}

/// Delete a bike.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdministrator(auth): RequireAdministrator,
    Path(bike_id): Path<BikeId>,
) -> Response {
    match state.backend().delete_bike(&bike_id, &auth.token).await {
        Ok(_) => redirect_with_success("/admin/bikes", "Bike removed").into_response(),
        Err(e) => {
            tracing::warn!("Bike deletion failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not remove the bike");
            redirect_with_error("/admin/bikes", message).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, price: &str) -> BikeFormData {
        BikeFormData {
            bike_name: name.to_owned(),
            bike_model: "Classic 350".to_owned(),
            bike_price: price.to_owned(),
            bike_image_url: None,
            description: Some("  ".to_owned()),
        }
    }

    #[test]
    fn test_valid_form_parses() {
        let parsed = parse_bike_form(form("Royal Enfield", "485000")).expect("valid form");
        assert_eq!(parsed.bike_name, "Royal Enfield");
        // Blank optional fields collapse to None
        assert!(parsed.description.is_none());
    }

    #[test]
    fn test_bad_price_is_rejected() {
        assert!(parse_bike_form(form("Royal Enfield", "lots")).is_err());
        assert!(parse_bike_form(form("Royal Enfield", "-5")).is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(parse_bike_form(form("  ", "485000")).is_err());
    }
}
