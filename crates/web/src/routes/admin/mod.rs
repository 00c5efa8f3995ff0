//! Administrator route handlers (administrator group).
//!
//! # Route Structure (nested under /admin)
//!
//! ```text
//! GET  /                       - Dashboard totals
//! GET  /bikes                  - Bike catalog listing
//! GET  /bikes/new              - New bike form
//! POST /bikes                  - Create bike
//! GET  /bikes/{id}/edit        - Edit bike form
//! POST /bikes/{id}             - Update bike
//! POST /bikes/{id}/delete      - Delete bike
//! GET  /parts                  - Parts listing
//! GET  /parts/new              - New part form
//! POST /parts                  - Create part
//! GET  /parts/{id}/edit        - Edit part form
//! POST /parts/{id}             - Update part
//! POST /parts/{id}/delete      - Delete part
//! GET  /bookings               - All bookings
//! POST /bookings/{id}/assign   - Assign a mechanic
//! POST /bookings/{id}/delete   - Delete a booking
//! GET  /customers              - Registered accounts
//! POST /customers/{id}/promote - Promote account to mechanic
//! GET  /mechanics              - Mechanic accounts
//! POST /mechanics/{id}/delete  - Remove a mechanic
//! GET  /feedback               - Feedback entries
//! ```

pub mod accounts;
pub mod bikes;
pub mod bookings;
pub mod dashboard;
pub mod feedback;
pub mod parts;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the administrator subtree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/bikes", get(bikes::index).post(bikes::create))
        .route("/bikes/new", get(bikes::new_page))
        .route("/bikes/{id}/edit", get(bikes::edit_page))
        .route("/bikes/{id}", post(bikes::update))
        .route("/bikes/{id}/delete", post(bikes::delete))
        .route("/parts", get(parts::index).post(parts::create))
        .route("/parts/new", get(parts::new_page))
        .route("/parts/{id}/edit", get(parts::edit_page))
        .route("/parts/{id}", post(parts::update))
        .route("/parts/{id}/delete", post(parts::delete))
        .route("/bookings", get(bookings::index))
        .route("/bookings/{id}/assign", post(bookings::assign))
        .route("/bookings/{id}/delete", post(bookings::delete))
        .route("/customers", get(accounts::customers))
        .route("/customers/{id}/promote", post(accounts::promote))
        .route("/mechanics", get(accounts::mechanics))
        .route("/mechanics/{id}/delete", post(accounts::delete_mechanic))
        .route("/feedback", get(feedback::index))
}
