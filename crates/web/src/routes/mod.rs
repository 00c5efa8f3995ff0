//! HTTP route handlers for the web tier.
//!
//! # Route Structure
//!
//! ```text
//! # Public
//! GET  /                        - Landing page
//! GET  /marketplace             - Parts marketplace
//! GET  /search                  - Bike search
//! GET  /about                   - About page
//! GET  /contact                 - Contact page
//! POST /contact                 - Submit feedback
//! GET  /not-found               - Not-found view (also the fallback)
//!
//! # Auth (rate limited)
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! GET  /register                - Register page
//! POST /register                - Register action
//! POST /logout                  - Logout action
//! POST /forgot-password         - Request a reset OTP
//! POST /reset-password          - Reset password with OTP
//!
//! # Customer group (denied -> /not-found)
//! GET  /home                    - Customer dashboard
//! GET  /bikes                   - Serviceable bikes
//! GET  /book/{bike_id}          - Booking form
//! POST /book/{bike_id}          - Create booking
//! GET  /bookings                - Own bookings
//! POST /bookings/{id}/cancel    - Cancel a pending booking
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add part to cart
//! POST /cart/{id}/update        - Change line quantity
//! POST /cart/{id}/remove        - Remove line
//! POST /cart/checkout           - Initialize gateway payment
//! GET  /cart/confirm            - Gateway return URL
//! GET  /profile                 - Profile form
//! POST /profile                 - Update profile
//! POST /profile/password        - Change password
//!
//! # Mechanic group (denied -> /login)
//! GET  /mechanic                - Assigned tasks
//! POST /mechanic/tasks/{id}/status   - Mark task in progress
//! POST /mechanic/tasks/{id}/complete - Mark task completed
//! GET  /mechanic/profile        - Mechanic profile form
//! POST /mechanic/profile        - Update mechanic profile
//!
//! # Administrator group (denied -> /login)
//! See [`admin`] for the /admin subtree.
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod booking;
pub mod cart;
pub mod home;
pub mod marketplace;
pub mod mechanic;
pub mod pages;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::middleware::{auth_rate_limiter, form_rate_limiter};
use crate::state::AppState;

/// Query parameters for flash notice display.
///
/// The server-rendered stand-in for transient toasts: a failed action
/// redirects back with `?error=`, a completed one with `?success=`.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Redirect to `path` with a flash error message.
pub(crate) fn redirect_with_error(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(message)))
}

/// Redirect to `path` with a flash success message.
pub(crate) fn redirect_with_success(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?success={}", urlencoding::encode(message)))
}

/// Create the auth routes router (rate limited).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .layer(auth_rate_limiter())
}

/// Create the customer-group router (rate limited for form posts).
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(home::customer_home))
        .route("/bikes", get(booking::bikes))
        .route(
            "/book/{bike_id}",
            get(booking::book_page).post(booking::create_booking),
        )
        .route("/bookings", get(booking::bookings))
        .route("/bookings/{id}/cancel", post(booking::cancel))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/{id}/update", post(cart::update))
        .route("/cart/{id}/remove", post(cart::remove))
        .route("/cart/checkout", post(cart::checkout))
        .route("/cart/confirm", get(cart::confirm))
        .route(
            "/profile",
            get(account::profile_page).post(account::update_profile),
        )
        .route("/profile/password", post(account::change_password))
        .layer(form_rate_limiter())
}

/// Create the mechanic-group router.
pub fn mechanic_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(mechanic::dashboard))
        .route("/tasks/{id}/status", post(mechanic::start_task))
        .route("/tasks/{id}/complete", post(mechanic::complete_task))
        .route(
            "/profile",
            get(mechanic::profile_page).post(mechanic::update_profile),
        )
}

/// Create all routes for the web tier.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public pages
        .route("/", get(home::landing))
        .route("/marketplace", get(marketplace::index))
        .route("/search", get(marketplace::search))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact).post(pages::submit_feedback))
        .route("/not-found", get(pages::not_found))
        // Auth
        .merge(auth_routes())
        // Customer group
        .merge(customer_routes())
        // Mechanic group
        .nest("/mechanic", mechanic_routes())
        // Administrator group
        .nest("/admin", admin::routes())
        // Unknown paths render the not-found view
        .fallback(pages::not_found)
}
