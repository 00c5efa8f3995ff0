//! Cart and checkout handlers (customer group).
//!
//! Line totals and stock checks are backend concerns; this tier renders
//! what it is given and relays mutations. Checkout is a redirect-based
//! gateway flow: initialize a payment, send the customer to the gateway,
//! and finish the order when the gateway bounces them back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use ride_revive_core::{CartItemId, PartId, PaymentMethod, RoleVariant, resolve_role};

use crate::backend::{
    AddToCartRequest, CartItem, PayCartRequest, PaymentInitRequest, UpdateCartRequest,
};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireCustomer;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "customer/cart.html")]
pub struct CartTemplate {
    pub role: RoleVariant,
    pub items: Vec<CartItem>,
    pub subtotal: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Forms & queries
// =============================================================================

/// Add-to-cart form data (posted from the marketplace).
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub part_id: PartId,
    #[serde(default = "default_add_quantity")]
    pub quantity: u32,
}

const fn default_add_quantity() -> u32 {
    1
}

/// Quantity update form data.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: u32,
}

/// Query parameters the payment gateway appends on its return redirect.
#[derive(Debug, Default, Deserialize)]
pub struct GatewayReturnQuery {
    pub pidx: Option<String>,
    pub status: Option<String>,
}

/// Sum the backend-computed line totals of unpaid items.
fn unpaid_subtotal(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .filter(|item| !item.is_payment_done)
        .filter_map(|item| item.total_price.map(|price| price.amount))
        .sum()
}

// =============================================================================
// Handlers
// =============================================================================

/// The cart page.
pub async fn show(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    Query(query): Query<MessageQuery>,
) -> Result<CartTemplate> {
    let items = state.backend().cart_items(&auth.token).await?;
    let subtotal = format!("Rs. {}", unpaid_subtotal(&items).round_dp(2));

    Ok(CartTemplate {
        role: resolve_role(Some(&auth.principal)),
        items,
        subtotal,
        error: query.error,
        success: query.success,
    })
}

/// Add a part to the cart, then return to the marketplace.
pub async fn add(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    Form(form): Form<AddForm>,
) -> Response {
    if form.quantity == 0 {
        return redirect_with_error("/marketplace", "Quantity must be at least 1").into_response();
    }

    let request = AddToCartRequest {
        part_id: form.part_id,
        quantity: form.quantity,
    };

    match state.backend().add_to_cart(&request, &auth.token).await {
        Ok(ack) => {
            let message = ack.message.unwrap_or_else(|| "Added to cart".to_owned());
            redirect_with_success("/marketplace", &message).into_response()
        }
        Err(e) => {
            tracing::warn!("Add to cart failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not add to cart");
            redirect_with_error("/marketplace", message).into_response()
        }
    }
}

/// Change the quantity of a cart line.
pub async fn update(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    Path(item_id): Path<CartItemId>,
    Form(form): Form<QuantityForm>,
) -> Response {
    if form.quantity == 0 {
        return redirect_with_error("/cart", "Quantity must be at least 1").into_response();
    }

    let request = UpdateCartRequest {
        quantity: form.quantity,
    };

    match state
        .backend()
        .update_cart_item(&item_id, &request, &auth.token)
        .await
    {
        Ok(_) => Redirect::to("/cart").into_response(),
        Err(e) => {
            tracing::warn!("Cart update failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not update the cart");
            redirect_with_error("/cart", message).into_response()
        }
    }
}

/// Remove a cart line.
pub async fn remove(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    Path(item_id): Path<CartItemId>,
) -> Response {
    match state.backend().remove_cart_item(&item_id, &auth.token).await {
        Ok(_) => Redirect::to("/cart").into_response(),
        Err(e) => {
            tracing::warn!("Cart removal failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not remove the item");
            redirect_with_error("/cart", message).into_response()
        }
    }
}

/// Initialize a gateway payment for the unpaid cart lines.
///
/// On success the customer is redirected to the gateway's hosted page;
/// the gateway sends them back to `/cart/confirm`.
pub async fn checkout(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
) -> Response {
    let items = match state.backend().cart_items(&auth.token).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Could not load cart for checkout: {}", e);
            return redirect_with_error("/cart", "Could not load your cart").into_response();
        }
    };

    let subtotal = unpaid_subtotal(&items);
    if subtotal <= Decimal::ZERO {
        return redirect_with_error("/cart", "Your cart is empty").into_response();
    }

    let base_url = state.config().base_url.trim_end_matches('/');
    let request = PaymentInitRequest {
        // The gateway settles in paisa
        amount: subtotal * Decimal::from(100),
        return_url: format!("{base_url}/cart/confirm"),
        website_url: base_url.to_owned(),
        purchase_order_id: Uuid::new_v4().to_string(),
        purchase_order_name: "Ride Revive parts order".to_owned(),
    };

    add_breadcrumb(
        "checkout",
        "Initialized gateway payment",
        Some(&[("order_id", &request.purchase_order_id)]),
    );

    match state.backend().initialize_payment(&request, &auth.token).await {
        Ok(init) => Redirect::to(&init.payment_url).into_response(),
        Err(e) => {
            tracing::warn!("Payment initialization failed: {}", e);
            let message = e.backend_message().unwrap_or("Could not start the payment");
            redirect_with_error("/cart", message).into_response()
        }
    }
}

/// Gateway return URL: finish the order if the payment went through.
pub async fn confirm(
    State(state): State<AppState>,
    RequireCustomer(auth): RequireCustomer,
    Query(query): Query<GatewayReturnQuery>,
) -> Response {
    if query.status.as_deref() != Some("Completed") {
        tracing::warn!(status = ?query.status, pidx = ?query.pidx, "gateway returned without completion");
        return redirect_with_error("/cart", "Payment was not completed").into_response();
    }

    let request = PayCartRequest {
        payment_method: PaymentMethod::Khalti,
    };

    match state.backend().pay_cart(&request, &auth.token).await {
        Ok(ack) => {
            let message = ack
                .message
                .unwrap_or_else(|| "Payment received - order placed".to_owned());
            redirect_with_success("/cart", &message).into_response()
        }
        Err(e) => {
            tracing::error!("Order completion failed after gateway success: {}", e);
            let message = e
                .backend_message()
                .unwrap_or("Payment received but the order could not be finalized");
            redirect_with_error("/cart", message).into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(total: Option<i64>, paid: bool) -> CartItem {
        serde_json::from_value(serde_json::json!({
            "id": "c1",
            "quantity": 1,
            "totalPrice": total,
            "isPaymentDone": paid,
        }))
        .unwrap()
    }

    #[test]
    fn test_subtotal_sums_unpaid_lines_only() {
        let items = vec![item(Some(1200), false), item(Some(800), true), item(Some(500), false)];
        assert_eq!(unpaid_subtotal(&items), Decimal::from(1700));
    }

    #[test]
    fn test_subtotal_skips_lines_without_totals() {
        let items = vec![item(None, false), item(Some(250), false)];
        assert_eq!(unpaid_subtotal(&items), Decimal::from(250));
    }

    #[test]
    fn test_subtotal_of_empty_cart_is_zero() {
        assert_eq!(unpaid_subtotal(&[]), Decimal::ZERO);
    }
}
