//! End-to-end test harness for the Ride Revive web tier.
//!
//! Each test spawns two servers on ephemeral ports:
//! - a **stub backend** that speaks just enough of the business API for the
//!   pages under test (login, catalog, cart, bookings, dashboard), and
//! - the **real application router**, configured to talk to that stub.
//!
//! Tests then drive the app over HTTP with a cookie-holding `reqwest`
//! client, exactly the way a browser would. Redirects are not followed so
//! assertions can inspect `Location` headers directly.
//!
//! The stub backend derives the returned identity from the login email:
//! `admin@...` gets the administrator flag, `mechanic@...` the mechanic
//! role tag, anything else is a regular customer.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

use ride_revive_web::config::{BackendConfig, WebConfig};
use ride_revive_web::state::AppState;

/// A running app + stub backend pair.
pub struct TestHarness {
    /// Base URL of the application under test.
    pub app_url: String,
    /// Base URL of the stub backend (useful for debugging).
    pub backend_url: String,
    /// Cookie-holding client with redirects disabled.
    pub client: reqwest::Client,
}

impl TestHarness {
    /// Spawn the stub backend and the application, wired together.
    pub async fn spawn() -> Self {
        let backend_url = spawn_server(stub_backend()).await;

        let config = WebConfig {
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
            base_url: "http://ride-revive.test".to_string(),
            session_secret: SecretString::from("kR9#mW2$xV7!qL4@nB8^zD3&tF6*hJ1%"),
            backend: BackendConfig {
                api_url: Url::parse(&backend_url).expect("valid backend url"),
                timeout: Duration::from_secs(5),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let state = AppState::new(config).expect("app state");
        let app_url = spawn_server(ride_revive_web::app(state)).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("reqwest client");

        Self {
            app_url,
            backend_url,
            client,
        }
    }

    /// Absolute URL for an app path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.app_url)
    }

    /// Log in through the real form endpoint; the session cookie lands in
    /// the client's jar. Returns the redirect target.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .client
            .post(self.url("/login"))
            .form(&[("email", email), ("password", "correct-horse")])
            .send()
            .await
            .expect("login request");

        assert!(
            response.status().is_redirection(),
            "login should redirect, got {}",
            response.status()
        );
        location_of(&response)
    }

    /// GET a path and return the response.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location_of(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Bind an ephemeral port and serve the router on it.
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("server");
    });

    format!("http://{addr}")
}

/// Build the user object the stub backend issues for an email.
fn stub_user(email: &str) -> Value {
    let (is_admin, role) = if email.starts_with("admin@") {
        (true, Value::Null)
    } else if email.starts_with("mechanic@") {
        (false, json!("Mechanic"))
    } else {
        (false, json!("User"))
    };

    json!({
        "id": "665f1c2ab7e4aa0001",
        "fullName": "Test Rider",
        "email": email,
        "phone": "9812345678",
        "isAdmin": is_admin,
        "role": role,
    })
}

/// A minimal stand-in for the business backend.
fn stub_backend() -> Router {
    Router::new()
        .route(
            "/api/user/login",
            post(|Json(body): Json<Value>| async move {
                let email = body["email"].as_str().unwrap_or_default().to_owned();
                if body["password"].as_str() == Some("correct-horse") {
                    Json(json!({
                        "message": "Login successful!",
                        "token": format!("test-token-for-{email}"),
                        "user": stub_user(&email),
                    }))
                    .into_response()
                } else {
                    (
                        axum::http::StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Invalid email or password" })),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/api/user/register",
            post(|| async { Json(json!({ "success": true, "message": "Account created" })) }),
        )
        .route(
            "/api/bikeProducts/all",
            get(|| async {
                Json(json!({ "bikes": [{
                    "id": "bike-1",
                    "bikeName": "Pulsar",
                    "bikeModel": "NS200",
                    "bikePrice": 2500,
                }] }))
            }),
        )
        .route(
            "/api/bikeProducts/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({ "bike": {
                    "id": id,
                    "bikeName": "Pulsar",
                    "bikeModel": "NS200",
                    "bikePrice": 2500,
                } }))
            }),
        )
        .route(
            "/api/bikeParts",
            get(|| async {
                Json(json!([{
                    "id": "part-1",
                    "partName": "Brake pads",
                    "price": 1200,
                    "quantity": 14,
                }]))
            }),
        )
        .route(
            "/api/cart/user",
            get(|| async { Json(json!({ "success": true, "carts": [] })) }),
        )
        .route(
            "/api/booking/getall/{id}",
            get(|| async { Json(json!({ "bookings": [] })) }),
        )
        .route(
            "/api/booking/add",
            post(|| async { Json(json!({ "success": true, "message": "Booking placed" })) }),
        )
        .route(
            "/api/mechanics/assigned/{id}",
            get(|| async {
                Json(json!({ "bookings": [{
                    "id": "booking-1",
                    "bikeNumber": "BA 2 PA 1234",
                    "bookingDate": "2026-08-12",
                    "bookingTime": "10:30",
                    "bookingAddress": "Patan, Lalitpur",
                    "status": "pending",
                    "userDetails": { "fullName": "Anish Shrestha", "phoneNumber": "9812345678" },
                }] }))
            }),
        )
        .route(
            "/api/mechanics/update-status/{id}",
            put(|| async { Json(json!({ "success": true })) }),
        )
        .route(
            "/api/dashboard/total-counts",
            get(|| async {
                Json(json!({
                    "costumer": 42,
                    "mechanic": 5,
                    "bookings": 120,
                    "Bike": 18,
                    "bikeParts": 77,
                }))
            }),
        )
}
