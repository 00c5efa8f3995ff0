//! Wire types for the business backend API.
//!
//! Everything here mirrors the backend's JSON as observed, camelCase field
//! names included. Fields the UI does not strictly need are optional with
//! defaults so a lenient decode never takes a page down. Envelope structs
//! (`*Payload`) exist because the backend wraps some collections and not
//! others.

use ride_revive_core::{
    BikeId, BookingId, BookingStatus, CartItemId, Email, FeedbackId, PartId, PaymentMethod, Price,
    Principal, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Generic envelopes
// =============================================================================

/// Generic acknowledgement envelope: `{ success, message }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    /// Present on most, but not all, endpoints.
    #[serde(default)]
    pub success: Option<bool>,
    /// Human-readable outcome, forwarded into flash notices.
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the backend returns on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Authentication
// =============================================================================

/// Login request: `POST /api/user/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response: the bearer token plus the full user object.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub user: Principal,
}

/// Registration request: `POST /api/user/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

/// Forgot-password request (sends an OTP to the phone).
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub phone: String,
}

/// Password change / reset request: `POST /api/user/changepassword/{id}`.
///
/// The backend uses one endpoint for both flows: OTP resets carry `phone`
/// and `otp`, signed-in changes carry `oldPassword`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    pub new_password: String,
}

/// Profile update request: `PUT /api/user/updateprofile/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

/// Profile update response; echoes the refreshed user when it succeeds.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<Principal>,
}

/// Single-user payload: `GET /api/user/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub user: Principal,
}

/// Account row in admin listings (customers, mechanics).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    #[serde(alias = "id", alias = "_id")]
    pub user_id: UserId,
    pub full_name: String,
    pub email: Email,
    #[serde(alias = "phone")]
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub role: Option<String>,
}

/// Users listing payload: `GET /api/user`.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersPayload {
    #[serde(alias = "data")]
    pub users: Vec<AccountSummary>,
}

/// Mechanics listing payload: `GET /api/mechanics`.
#[derive(Debug, Clone, Deserialize)]
pub struct MechanicsPayload {
    #[serde(alias = "data", alias = "users")]
    pub mechanics: Vec<AccountSummary>,
}

// =============================================================================
// Catalog
// =============================================================================

/// A serviceable bike model in the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bike {
    #[serde(alias = "_id")]
    pub id: BikeId,
    pub bike_name: String,
    #[serde(default)]
    pub bike_model: Option<String>,
    #[serde(default)]
    pub bike_price: Option<Price>,
    #[serde(default)]
    pub bike_image_url: Option<String>,
    #[serde(default, alias = "bikeDescription")]
    pub description: Option<String>,
}

/// Bikes listing payload: `GET /api/bikeProducts/all`.
#[derive(Debug, Clone, Deserialize)]
pub struct BikesPayload {
    pub bikes: Vec<Bike>,
}

/// Single-bike payload: `GET /api/bikeProducts/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BikePayload {
    pub bike: Bike,
}

/// Create/update body for a bike: `POST /api/bikeProducts/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BikeForm {
    pub bike_name: String,
    pub bike_model: String,
    pub bike_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bike_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A spare part listed on the marketplace.
///
/// `GET /api/bikeParts` returns these as a bare array, no envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikePart {
    #[serde(alias = "_id")]
    pub id: PartId,
    pub part_name: String,
    #[serde(default)]
    pub price: Option<Price>,
    /// Units in stock.
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default, alias = "partImage")]
    pub part_image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default, alias = "flatCompatibleBikes")]
    pub compatible_bikes: Vec<String>,
}

/// Create/update body for a part: `POST /api/bikeParts/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartForm {
    pub part_name: String,
    pub price: Decimal,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Cart & payment
// =============================================================================

/// One line in the customer's cart. Line totals come from the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(alias = "_id")]
    pub id: CartItemId,
    #[serde(default)]
    pub bike_part_details: Option<BikePart>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub total_price: Option<Price>,
    #[serde(default)]
    pub is_payment_done: bool,
    #[serde(default)]
    pub date_added: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

/// Cart listing payload: `GET /api/cart/user`.
#[derive(Debug, Clone, Deserialize)]
pub struct CartPayload {
    #[serde(default)]
    pub success: Option<bool>,
    pub carts: Vec<CartItem>,
}

/// Add-to-cart request: `POST /api/cart/add`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub part_id: PartId,
    pub quantity: u32,
}

/// Quantity update request: `PUT /api/cart/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCartRequest {
    pub quantity: u32,
}

/// Order creation request: `PUT /api/cart/pay`, issued after the gateway
/// confirms payment (or directly for cash-on-service).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayCartRequest {
    pub payment_method: PaymentMethod,
}

/// Gateway initialization request: `POST /api/payment/makepayment`.
///
/// The backend relays this to the Khalti wallet, which is why the fields
/// are snake_case - they pass through to the gateway unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentInitRequest {
    /// Amount in paisa (the gateway's smallest unit).
    pub amount: Decimal,
    pub return_url: String,
    pub website_url: String,
    pub purchase_order_id: String,
    pub purchase_order_name: String,
}

/// Gateway initialization response: where to send the customer.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentInitResponse {
    /// Redirect target hosted by the gateway.
    pub payment_url: String,
    /// Gateway transaction identifier.
    #[serde(default)]
    pub pidx: Option<String>,
}

// =============================================================================
// Bookings
// =============================================================================

/// Customer reference embedded in a booking.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUser {
    #[serde(default, alias = "_id", alias = "userId")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "phoneNumber")]
    pub phone: Option<String>,
}

/// A doorstep service booking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: BookingId,
    #[serde(default)]
    pub bike_number: Option<String>,
    #[serde(default)]
    pub bike_details: Option<String>,
    #[serde(default)]
    pub booking_date: Option<String>,
    #[serde(default)]
    pub booking_time: Option<String>,
    #[serde(default)]
    pub booking_address: Option<String>,
    #[serde(default)]
    pub service_description: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub total: Option<Price>,
    #[serde(default)]
    pub user_details: Option<BookingUser>,
    #[serde(default)]
    pub mechanic_id: Option<UserId>,
    #[serde(default)]
    pub mechanic_name: Option<String>,
}

/// Bookings listing payload: `GET /api/booking/getall[/{userId}]`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingsPayload {
    #[serde(alias = "data")]
    pub bookings: Vec<Booking>,
}

/// Booking creation request: `POST /api/booking/add`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub bike_name: String,
    pub bike_number: String,
    pub booking_date: String,
    pub booking_time: String,
    pub booking_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

/// Mechanic assignment request: `PUT /api/mechanics/{bookingId}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignMechanicRequest {
    pub mechanic_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanic_name: Option<String>,
}

/// Status transition request issued by a mechanic.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusRequest {
    pub booking_id: BookingId,
    pub status: BookingStatus,
}

// =============================================================================
// Feedback & dashboard
// =============================================================================

/// Feedback submission: `POST /api/feedback/add`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A feedback entry as listed for administrators.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default, alias = "_id")]
    pub id: Option<FeedbackId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Feedback listing payload: `GET /api/feedback/all`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackPayload {
    #[serde(alias = "data", alias = "feedback")]
    pub feedbacks: Vec<Feedback>,
}

/// Admin dashboard counters: `GET /api/dashboard/total-counts`.
///
/// Wire names are the backend's, misspelling included.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default, rename = "costumer")]
    pub customers: u64,
    #[serde(default, rename = "mechanic")]
    pub mechanics: u64,
    #[serde(default)]
    pub bookings: u64,
    #[serde(default, rename = "Bike")]
    pub bikes: u64,
    #[serde(default, rename = "bikeParts")]
    pub bike_parts: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_parts_array() {
        let json = r#"[{
            "id": "p1",
            "partName": "Brake pads",
            "price": 1200,
            "quantity": 14,
            "partImage": "https://cdn.example.com/pads.jpg"
        }]"#;
        let parts: Vec<BikePart> = serde_json::from_str(json).unwrap();
        assert_eq!(parts.len(), 1);
        let part = parts.first().unwrap();
        assert_eq!(part.part_name, "Brake pads");
        assert_eq!(part.part_image_url.as_deref(), Some("https://cdn.example.com/pads.jpg"));
    }

    #[test]
    fn test_decode_cart_envelope() {
        let json = r#"{
            "success": true,
            "carts": [{
                "id": "c1",
                "quantity": 2,
                "totalPrice": 2400,
                "isPaymentDone": false,
                "bikePartDetails": { "id": "p1", "partName": "Brake pads" }
            }]
        }"#;
        let payload: CartPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.carts.len(), 1);
        let item = payload.carts.first().unwrap();
        assert_eq!(item.quantity, 2);
        assert!(!item.is_payment_done);
        assert_eq!(
            item.bike_part_details.as_ref().unwrap().part_name,
            "Brake pads"
        );
    }

    #[test]
    fn test_decode_booking_with_mongo_ids() {
        let json = r#"{
            "_id": "b1",
            "bikeNumber": "BA 2 PA 1234",
            "bookingDate": "2026-08-12",
            "bookingTime": "10:30",
            "bookingAddress": "Patan, Lalitpur",
            "status": "in-progress",
            "total": 1500,
            "userDetails": { "fullName": "Anish Shrestha", "phoneNumber": "9812345678" }
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id.as_str(), "b1");
        assert_eq!(booking.status, BookingStatus::InProgress);
        assert_eq!(
            booking.user_details.unwrap().full_name.as_deref(),
            Some("Anish Shrestha")
        );
    }

    #[test]
    fn test_decode_dashboard_stats_wire_names() {
        let json = r#"{"costumer": 42, "mechanic": 5, "bookings": 120, "Bike": 18, "bikeParts": 77}"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.customers, 42);
        assert_eq!(stats.mechanics, 5);
        assert_eq!(stats.bike_parts, 77);
    }
}
