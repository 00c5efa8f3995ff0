//! Backend REST client implementation.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use ride_revive_core::{BikeId, BookingId, CartItemId, PartId, UserId};

use crate::config::BackendConfig;

use super::ApiError;
use super::types::{
    AddToCartRequest, ApiErrorBody, ApiMessage, AssignMechanicRequest, Bike, BikeForm, BikePart,
    BikePayload, BikesPayload, Booking, BookingRequest, BookingStatusRequest, BookingsPayload,
    CartItem, CartPayload, ChangePasswordRequest, DashboardStats, Feedback, FeedbackPayload,
    FeedbackRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, MechanicsPayload,
    PartForm, PayCartRequest, PaymentInitRequest, PaymentInitResponse, ProfileResponse,
    RegisterRequest, UpdateCartRequest, UpdateProfileRequest, UserPayload, UsersPayload,
    AccountSummary,
};

// =============================================================================
// BackendClient
// =============================================================================

/// Client for the business backend REST API.
///
/// Cheap to clone (`Arc` inner). Every authenticated call takes the bearer
/// token explicitly; the client itself holds no identity, mirroring the
/// fact that the token lives in the caller's session.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: Client,
    /// Base URL with any trailing slash removed, so paths can be appended.
    api_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (TLS initialization failure).
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let api_url = config.api_url.as_str().trim_end_matches('/').to_owned();

        Ok(Self {
            inner: Arc::new(BackendClientInner { client, api_url }),
        })
    }

    /// Build a request for `path` (must start with `/`), attaching the
    /// bearer token when one is supplied.
    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{path}", self.inner.api_url);
        let builder = self.inner.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON response.
    ///
    /// Non-2xx responses are decoded as the backend's `{ message }` error
    /// body where possible, so callers can surface the backend's wording.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("request failed with status {status}"));
            debug!(status = %status, message = %message, "backend rejected request");
            return Err(ApiError::Rejected { status, message });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path, token)).await
    }

    async fn send_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(method, path, token).json(body)).await
    }

    async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(self.request(method, path, token)).await
    }

    // =========================================================================
    // Accounts & authentication
    // =========================================================================

    /// Authenticate with email and password.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.send_body(Method::POST, "/api/user/login", None, request)
            .await
    }

    /// Register a new customer account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiMessage, ApiError> {
        self.send_body(Method::POST, "/api/user/register", None, request)
            .await
    }

    /// Request a password-reset OTP for the given phone number.
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(Method::POST, "/api/user/forgot_password", None, request)
            .await
    }

    /// Change or reset a password.
    ///
    /// One backend endpoint serves both flows; see [`ChangePasswordRequest`].
    pub async fn change_password(
        &self,
        user_id: &UserId,
        request: &ChangePasswordRequest,
        token: Option<&str>,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(
            Method::POST,
            &format!("/api/user/changepassword/{user_id}"),
            token,
            request,
        )
        .await
    }

    /// Update the signed-in user's profile; returns the refreshed user.
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        request: &UpdateProfileRequest,
        token: &str,
    ) -> Result<ProfileResponse, ApiError> {
        self.send_body(
            Method::PUT,
            &format!("/api/user/updateprofile/{user_id}"),
            Some(token),
            request,
        )
        .await
    }

    /// Fetch the current user object.
    pub async fn get_user(&self, user_id: &UserId, token: &str) -> Result<UserPayload, ApiError> {
        self.get_json(&format!("/api/user/{user_id}"), Some(token))
            .await
    }

    /// List every registered account (administrator only).
    pub async fn list_users(&self, token: &str) -> Result<Vec<AccountSummary>, ApiError> {
        let payload: UsersPayload = self.get_json("/api/user", Some(token)).await?;
        Ok(payload.users)
    }

    /// Promote a customer account to the mechanic role (administrator only).
    pub async fn promote_to_mechanic(
        &self,
        user_id: &UserId,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_empty(
            Method::PUT,
            &format!("/api/user/updateuserroletomechanic/{user_id}"),
            Some(token),
        )
        .await
    }

    // =========================================================================
    // Bike catalog
    // =========================================================================

    /// List every serviceable bike model.
    pub async fn list_bikes(&self, token: Option<&str>) -> Result<Vec<Bike>, ApiError> {
        let payload: BikesPayload = self.get_json("/api/bikeProducts/all", token).await?;
        Ok(payload.bikes)
    }

    /// Search bikes by name.
    pub async fn bikes_by_name(
        &self,
        bike_name: &str,
        token: Option<&str>,
    ) -> Result<Vec<Bike>, ApiError> {
        let encoded = urlencoding::encode(bike_name);
        let payload: BikesPayload = self
            .get_json(&format!("/api/bikeProducts/bikeName/{encoded}"), token)
            .await?;
        Ok(payload.bikes)
    }

    /// Fetch a single bike.
    pub async fn get_bike(&self, bike_id: &BikeId, token: Option<&str>) -> Result<Bike, ApiError> {
        let payload: BikePayload = self
            .get_json(&format!("/api/bikeProducts/{bike_id}"), token)
            .await?;
        Ok(payload.bike)
    }

    /// Create a bike (administrator only).
    pub async fn create_bike(&self, form: &BikeForm, token: &str) -> Result<ApiMessage, ApiError> {
        self.send_body(Method::POST, "/api/bikeProducts/create", Some(token), form)
            .await
    }

    /// Update a bike (administrator only).
    pub async fn update_bike(
        &self,
        bike_id: &BikeId,
        form: &BikeForm,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(
            Method::PUT,
            &format!("/api/bikeProducts/{bike_id}"),
            Some(token),
            form,
        )
        .await
    }

    /// Delete a bike (administrator only).
    pub async fn delete_bike(&self, bike_id: &BikeId, token: &str) -> Result<ApiMessage, ApiError> {
        self.send_empty(
            Method::DELETE,
            &format!("/api/bikeProducts/{bike_id}"),
            Some(token),
        )
        .await
    }

    // =========================================================================
    // Parts marketplace
    // =========================================================================

    /// List marketplace parts. Public; returns a bare array.
    pub async fn list_parts(&self, token: Option<&str>) -> Result<Vec<BikePart>, ApiError> {
        self.get_json("/api/bikeParts", token).await
    }

    /// Fetch a single part.
    pub async fn get_part(&self, part_id: &PartId, token: Option<&str>) -> Result<BikePart, ApiError> {
        self.get_json(&format!("/api/bikeParts/{part_id}"), token)
            .await
    }

    /// Create a part (administrator only).
    pub async fn create_part(&self, form: &PartForm, token: &str) -> Result<ApiMessage, ApiError> {
        self.send_body(Method::POST, "/api/bikeParts/create", Some(token), form)
            .await
    }

    /// Update a part (administrator only).
    pub async fn update_part(
        &self,
        part_id: &PartId,
        form: &PartForm,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(
            Method::PUT,
            &format!("/api/bikeParts/{part_id}"),
            Some(token),
            form,
        )
        .await
    }

    /// Delete a part (administrator only).
    pub async fn delete_part(&self, part_id: &PartId, token: &str) -> Result<ApiMessage, ApiError> {
        self.send_empty(
            Method::DELETE,
            &format!("/api/bikeParts/{part_id}"),
            Some(token),
        )
        .await
    }

    // =========================================================================
    // Cart & payment
    // =========================================================================

    /// The signed-in customer's cart. Line totals are backend-computed.
    pub async fn cart_items(&self, token: &str) -> Result<Vec<CartItem>, ApiError> {
        let payload: CartPayload = self.get_json("/api/cart/user", Some(token)).await?;
        Ok(payload.carts)
    }

    /// Add a part to the cart.
    pub async fn add_to_cart(
        &self,
        request: &AddToCartRequest,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(Method::POST, "/api/cart/add", Some(token), request)
            .await
    }

    /// Change the quantity of a cart line.
    pub async fn update_cart_item(
        &self,
        item_id: &CartItemId,
        request: &UpdateCartRequest,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(
            Method::PUT,
            &format!("/api/cart/{item_id}"),
            Some(token),
            request,
        )
        .await
    }

    /// Remove one cart line.
    pub async fn remove_cart_item(
        &self,
        item_id: &CartItemId,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_empty(Method::DELETE, &format!("/api/cart/{item_id}"), Some(token))
            .await
    }

    /// Empty the customer's cart.
    pub async fn clear_cart(&self, user_id: &UserId, token: &str) -> Result<ApiMessage, ApiError> {
        self.send_empty(
            Method::DELETE,
            &format!("/api/cart/delete/{user_id}"),
            Some(token),
        )
        .await
    }

    /// Convert the paid cart into an order.
    pub async fn pay_cart(
        &self,
        request: &PayCartRequest,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(Method::PUT, "/api/cart/pay", Some(token), request)
            .await
    }

    /// Initialize a gateway payment; returns the redirect URL.
    pub async fn initialize_payment(
        &self,
        request: &PaymentInitRequest,
        token: &str,
    ) -> Result<PaymentInitResponse, ApiError> {
        self.send_body(Method::POST, "/api/payment/makepayment", Some(token), request)
            .await
    }

    // =========================================================================
    // Bookings
    // =========================================================================

    /// Create a doorstep service booking.
    pub async fn create_booking(
        &self,
        request: &BookingRequest,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(Method::POST, "/api/booking/add", Some(token), request)
            .await
    }

    /// All bookings (administrator only).
    pub async fn list_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError> {
        let payload: BookingsPayload = self.get_json("/api/booking/getall", Some(token)).await?;
        Ok(payload.bookings)
    }

    /// Bookings belonging to one customer.
    pub async fn user_bookings(
        &self,
        user_id: &UserId,
        token: &str,
    ) -> Result<Vec<Booking>, ApiError> {
        let payload: BookingsPayload = self
            .get_json(&format!("/api/booking/getall/{user_id}"), Some(token))
            .await?;
        Ok(payload.bookings)
    }

    /// Cancel a pending booking.
    pub async fn cancel_booking(
        &self,
        booking_id: &BookingId,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_empty(
            Method::POST,
            &format!("/api/booking/cancel/{booking_id}"),
            Some(token),
        )
        .await
    }

    /// Delete a booking entirely (administrator only).
    pub async fn delete_booking(
        &self,
        booking_id: &BookingId,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_empty(
            Method::DELETE,
            &format!("/api/booking/delete/{booking_id}"),
            Some(token),
        )
        .await
    }

    // =========================================================================
    // Mechanics
    // =========================================================================

    /// List mechanic accounts (administrator only).
    pub async fn list_mechanics(&self, token: &str) -> Result<Vec<AccountSummary>, ApiError> {
        let payload: MechanicsPayload = self.get_json("/api/mechanics", Some(token)).await?;
        Ok(payload.mechanics)
    }

    /// Bookings assigned to the signed-in mechanic.
    pub async fn assigned_bookings(
        &self,
        mechanic_user_id: &UserId,
        token: &str,
    ) -> Result<Vec<Booking>, ApiError> {
        let payload: BookingsPayload = self
            .get_json(&format!("/api/mechanics/assigned/{mechanic_user_id}"), Some(token))
            .await?;
        Ok(payload.bookings)
    }

    /// Assign a mechanic to a booking (administrator only).
    pub async fn assign_mechanic(
        &self,
        booking_id: &BookingId,
        request: &AssignMechanicRequest,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(
            Method::PUT,
            &format!("/api/mechanics/{booking_id}"),
            Some(token),
            request,
        )
        .await
    }

    /// Mark an assigned booking as in progress.
    pub async fn update_booking_status(
        &self,
        mechanic_user_id: &UserId,
        request: &BookingStatusRequest,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(
            Method::PUT,
            &format!("/api/mechanics/update-status/{mechanic_user_id}"),
            Some(token),
            request,
        )
        .await
    }

    /// Mark an assigned booking as completed.
    pub async fn complete_booking(
        &self,
        mechanic_user_id: &UserId,
        request: &BookingStatusRequest,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_body(
            Method::PUT,
            &format!("/api/mechanics/mark-complete/{mechanic_user_id}"),
            Some(token),
            request,
        )
        .await
    }

    /// Update a mechanic's own profile.
    pub async fn update_mechanic_profile(
        &self,
        mechanic_user_id: &UserId,
        request: &UpdateProfileRequest,
        token: &str,
    ) -> Result<ProfileResponse, ApiError> {
        self.send_body(
            Method::PUT,
            &format!("/api/mechanics/updateprofile/{mechanic_user_id}"),
            Some(token),
            request,
        )
        .await
    }

    /// Remove a mechanic account (administrator only).
    pub async fn delete_mechanic(
        &self,
        mechanic_user_id: &UserId,
        token: &str,
    ) -> Result<ApiMessage, ApiError> {
        self.send_empty(
            Method::DELETE,
            &format!("/api/mechanic/delete/{mechanic_user_id}"),
            Some(token),
        )
        .await
    }

    // =========================================================================
    // Feedback & dashboard
    // =========================================================================

    /// Submit feedback from the contact page.
    pub async fn send_feedback(&self, request: &FeedbackRequest) -> Result<ApiMessage, ApiError> {
        self.send_body(Method::POST, "/api/feedback/add", None, request)
            .await
    }

    /// List feedback entries (administrator only).
    pub async fn list_feedback(&self, token: &str) -> Result<Vec<Feedback>, ApiError> {
        let payload: FeedbackPayload = self.get_json("/api/feedback/all", Some(token)).await?;
        Ok(payload.feedbacks)
    }

    /// Aggregate dashboard counters (administrator only).
    pub async fn dashboard_stats(&self, token: &str) -> Result<DashboardStats, ApiError> {
        self.get_json("/api/dashboard/total-counts", Some(token))
            .await
    }
}
