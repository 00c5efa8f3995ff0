//! End-to-end route guard scenarios.
//!
//! Each test logs in through the real login form (or doesn't), then
//! navigates to representative pages of the three protected groups and
//! asserts render-vs-redirect, including the per-group redirect targets:
//! denied customer pages land on the not-found view, denied mechanic and
//! administrator pages land on login.

use reqwest::StatusCode;
use ride_revive_integration_tests::{TestHarness, location_of};

#[tokio::test]
async fn administrator_renders_admin_and_is_turned_away_elsewhere() {
    let harness = TestHarness::spawn().await;

    let landing = harness.login("admin@riderevive.com").await;
    assert_eq!(landing, "/admin");

    // Administrator-only route renders
    let response = harness.get("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Overview"));
    assert!(body.contains("42"), "dashboard should show the customer count");

    // Mechanic-only route redirects to login
    let response = harness.get("/mechanic").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/login");

    // Customer-only route redirects to not-found
    let response = harness.get("/bookings").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/not-found");
}

#[tokio::test]
async fn mechanic_renders_tasks_and_is_turned_away_elsewhere() {
    let harness = TestHarness::spawn().await;

    let landing = harness.login("mechanic@riderevive.com").await;
    assert_eq!(landing, "/mechanic");

    // Mechanic-only route renders with the assigned task
    let response = harness.get("/mechanic").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("BA 2 PA 1234"));

    // Customer-only route redirects to not-found
    let response = harness.get("/bookings").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/not-found");

    // Administrator-only route redirects to login
    let response = harness.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/login");
}

#[tokio::test]
async fn customer_renders_customer_pages_and_is_turned_away_elsewhere() {
    let harness = TestHarness::spawn().await;

    let landing = harness.login("anish@example.com").await;
    assert_eq!(landing, "/home");

    // Customer-only routes render
    let response = harness.get("/home").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Test Rider"));

    let response = harness.get("/cart").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Staff routes redirect to login
    let response = harness.get("/mechanic").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/login");

    let response = harness.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/login");
}

#[tokio::test]
async fn guest_is_redirected_from_every_protected_group() {
    let harness = TestHarness::spawn().await;

    // Customer group: not-found
    for path in ["/home", "/bookings", "/cart", "/profile"] {
        let response = harness.get(path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location_of(&response), "/not-found", "{path}");
    }

    // Staff groups: login
    for path in ["/mechanic", "/admin", "/admin/bikes"] {
        let response = harness.get(path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location_of(&response), "/login", "{path}");
    }
}

#[tokio::test]
async fn guard_decisions_are_per_navigation_not_cached() {
    let harness = TestHarness::spawn().await;

    // Guest is denied, then logs in, then the same URL renders.
    let response = harness.get("/home").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    harness.login("anish@example.com").await;

    let response = harness.get("/home").await;
    assert_eq!(response.status(), StatusCode::OK);
}
