//! End-to-end authentication and session lifecycle tests.

use reqwest::StatusCode;
use ride_revive_integration_tests::{TestHarness, location_of};

#[tokio::test]
async fn health_endpoint_responds() {
    let harness = TestHarness::spawn().await;

    let response = harness.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn public_pages_render_for_guests() {
    let harness = TestHarness::spawn().await;

    let response = harness.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    // The marketplace shows the stub's part to anonymous visitors
    let response = harness.get("/marketplace").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Brake pads"));
    assert!(body.contains("Sign in"), "guests see the guest nav");
}

#[tokio::test]
async fn login_with_bad_credentials_flashes_the_backend_message() {
    let harness = TestHarness::spawn().await;

    let response = harness
        .client
        .post(harness.url("/login"))
        .form(&[("email", "anish@example.com"), ("password", "wrong")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location_of(&response);
    assert!(location.starts_with("/login?error="));
    assert!(location.contains("Invalid%20email%20or%20password"));
}

#[tokio::test]
async fn login_redirects_by_resolved_role() {
    let harness = TestHarness::spawn().await;
    assert_eq!(harness.login("admin@riderevive.com").await, "/admin");

    let harness = TestHarness::spawn().await;
    assert_eq!(harness.login("mechanic@riderevive.com").await, "/mechanic");

    let harness = TestHarness::spawn().await;
    assert_eq!(harness.login("anish@example.com").await, "/home");
}

#[tokio::test]
async fn logout_clears_the_session() {
    let harness = TestHarness::spawn().await;
    harness.login("anish@example.com").await;

    // Signed in: customer page renders
    let response = harness.get("/home").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Sign out
    let response = harness
        .client
        .post(harness.url("/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/");

    // Back to guest: the customer group turns us away again
    let response = harness.get("/home").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/not-found");
}

#[tokio::test]
async fn registration_lands_on_login_with_a_success_notice() {
    let harness = TestHarness::spawn().await;

    let response = harness
        .client
        .post(harness.url("/register"))
        .form(&[
            ("full_name", "Anish Shrestha"),
            ("email", "anish@example.com"),
            ("phone_number", "9812345678"),
            ("password", "hunter22"),
            ("confirm_password", "hunter22"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location_of(&response).starts_with("/login?success="));
}

#[tokio::test]
async fn registration_validation_rejects_bad_phone_numbers() {
    let harness = TestHarness::spawn().await;

    let response = harness
        .client
        .post(harness.url("/register"))
        .form(&[
            ("full_name", "Anish Shrestha"),
            ("email", "anish@example.com"),
            ("phone_number", "12345"),
            ("password", "hunter22"),
            ("confirm_password", "hunter22"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location_of(&response).starts_with("/register?error="));
}

#[tokio::test]
async fn unknown_paths_render_the_not_found_view() {
    let harness = TestHarness::spawn().await;

    let response = harness.get("/definitely/not/a/page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("404"));
}

#[tokio::test]
async fn nav_shell_follows_the_resolved_role() {
    let harness = TestHarness::spawn().await;
    harness.login("admin@riderevive.com").await;

    // The admin nav shows admin links and no customer cart
    let body = harness.get("/marketplace").await.text().await.unwrap();
    assert!(body.contains("/admin/bookings"));
    assert!(!body.contains("/cart\""));
}
