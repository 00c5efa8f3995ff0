//! Route guards for role-scoped page groups.
//!
//! Three protected groups exist: customer pages, mechanic pages, and
//! administrator pages. On every navigation a guard re-reads the principal
//! from the session, resolves its [`RoleVariant`], and either renders the
//! requested page or redirects. The redirect target is per-group policy,
//! kept in one table so the asymmetry is visible:
//!
//! | Group         | Required role | Denied -> |
//! |---------------|---------------|-----------|
//! | Customer      | Customer      | not-found |
//! | Mechanic      | Mechanic      | login     |
//! | Administrator | Administrator | login     |
//!
//! The guards are a navigation convenience, not a security boundary; the
//! backend independently authorizes every API call via the bearer token.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn bookings(
//!     RequireCustomer(auth): RequireCustomer,
//! ) -> impl IntoResponse {
//!     // auth.principal is the signed-in customer, auth.token its bearer token
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use ride_revive_core::{Principal, RoleVariant, resolve_role};

use crate::models::session::{read_principal, read_token};

/// Well-known redirect targets used by the guard policy table.
pub mod redirects {
    /// Where denied customer-group navigation lands.
    pub const NOT_FOUND: &str = "/not-found";
    /// Where denied mechanic/administrator-group navigation lands.
    pub const LOGIN: &str = "/login";
}

/// The three protected route groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    /// Customer-only pages (bookings, cart, profile).
    Customer,
    /// Mechanic-only pages (assigned tasks).
    Mechanic,
    /// Administrator-only pages (catalog and account management).
    Administrator,
}

impl RouteGroup {
    /// The role a principal must resolve to for this group.
    #[must_use]
    pub const fn required_role(self) -> RoleVariant {
        match self {
            Self::Customer => RoleVariant::Customer,
            Self::Mechanic => RoleVariant::Mechanic,
            Self::Administrator => RoleVariant::Administrator,
        }
    }

    /// Where a denied navigation attempt is sent.
    ///
    /// The customer group lands on not-found while the staff groups land on
    /// login. The asymmetry is inherited product behavior; it lives here as
    /// explicit policy rather than scattered branches.
    #[must_use]
    pub const fn redirect_target(self) -> &'static str {
        match self {
            Self::Customer => redirects::NOT_FOUND,
            Self::Mechanic | Self::Administrator => redirects::LOGIN,
        }
    }
}

/// The identity a guard hands to the handler once access is granted.
///
/// Bundles the principal with its bearer token so handlers can call the
/// backend without a second session read.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The signed-in identity.
    pub principal: Principal,
    /// Bearer token for backend API calls.
    pub token: String,
}

/// A denied navigation attempt: redirects per the group policy table.
///
/// Terminal for this attempt - nothing else is rendered until the user
/// navigates again.
#[derive(Debug)]
pub struct GuardDenied {
    target: &'static str,
}

impl IntoResponse for GuardDenied {
    fn into_response(self) -> Response {
        Redirect::to(self.target).into_response()
    }
}

/// Evaluate one navigation attempt against a route group.
///
/// Reads the principal fresh from the session (no caching across
/// navigations), resolves its role, and grants only on an exact match.
/// A principal without its companion token is treated as absent - the
/// session holds identities whole or not at all.
async fn evaluate(parts: &Parts, group: RouteGroup) -> Result<AuthSession, GuardDenied> {
    let denied = GuardDenied {
        target: group.redirect_target(),
    };

    let Some(session) = parts.extensions.get::<Session>() else {
        return Err(denied);
    };

    let principal = read_principal(session).await;
    if resolve_role(principal.as_ref()) != group.required_role() {
        return Err(denied);
    }

    match (principal, read_token(session).await) {
        (Some(principal), Some(token)) => Ok(AuthSession { principal, token }),
        _ => Err(denied),
    }
}

/// Extractor gating customer-only pages.
pub struct RequireCustomer(pub AuthSession);

impl<S> FromRequestParts<S> for RequireCustomer
where
    S: Send + Sync,
{
    type Rejection = GuardDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        evaluate(parts, RouteGroup::Customer).await.map(Self)
    }
}

/// Extractor gating mechanic-only pages.
pub struct RequireMechanic(pub AuthSession);

impl<S> FromRequestParts<S> for RequireMechanic
where
    S: Send + Sync,
{
    type Rejection = GuardDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        evaluate(parts, RouteGroup::Mechanic).await.map(Self)
    }
}

/// Extractor gating administrator-only pages.
pub struct RequireAdministrator(pub AuthSession);

impl<S> FromRequestParts<S> for RequireAdministrator
where
    S: Send + Sync,
{
    type Rejection = GuardDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        evaluate(parts, RouteGroup::Administrator).await.map(Self)
    }
}

/// Extractor that reads the principal without gating anything.
///
/// Used by the navigation shell and public pages, which render for every
/// role. Never rejects.
pub struct CurrentPrincipal(pub Option<Principal>);

impl CurrentPrincipal {
    /// Resolve the role variant for the carried principal.
    #[must_use]
    pub fn role(&self) -> RoleVariant {
        resolve_role(self.0.as_ref())
    }
}

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = match parts.extensions.get::<Session>() {
            Some(session) => read_principal(session).await,
            None => None,
        };

        Ok(Self(principal))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use ride_revive_core::{Email, UserId};
    use tower_sessions::MemoryStore;

    use crate::models::session::write_principal;

    use super::*;

    fn principal(is_admin: bool, role: Option<&str>) -> Principal {
        Principal {
            id: UserId::new("665f1c2ab7e4"),
            full_name: "Test Rider".to_owned(),
            email: Email::parse("rider@example.com").unwrap(),
            phone: "9812345678".to_owned(),
            is_admin,
            role: role.map(str::to_owned),
        }
    }

    async fn parts_with_identity(identity: Option<Principal>) -> Parts {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        if let Some(p) = &identity {
            write_principal(&session, p, "token-abc").await.unwrap();
        }

        let mut request = Request::builder().uri("/").body(()).unwrap();
        request.extensions_mut().insert(session);
        let (parts, ()) = request.into_parts();
        parts
    }

    #[tokio::test]
    async fn test_admin_granted_on_admin_group_only() {
        let parts = parts_with_identity(Some(principal(true, None))).await;

        assert!(evaluate(&parts, RouteGroup::Administrator).await.is_ok());
        assert!(evaluate(&parts, RouteGroup::Mechanic).await.is_err());
        assert!(evaluate(&parts, RouteGroup::Customer).await.is_err());
    }

    #[tokio::test]
    async fn test_mechanic_granted_on_mechanic_group_only() {
        let parts = parts_with_identity(Some(principal(false, Some("Mechanic")))).await;

        assert!(evaluate(&parts, RouteGroup::Mechanic).await.is_ok());
        assert!(evaluate(&parts, RouteGroup::Administrator).await.is_err());
        assert!(evaluate(&parts, RouteGroup::Customer).await.is_err());
    }

    #[tokio::test]
    async fn test_customer_granted_on_customer_group_only() {
        let parts = parts_with_identity(Some(principal(false, Some("User")))).await;

        assert!(evaluate(&parts, RouteGroup::Customer).await.is_ok());
        assert!(evaluate(&parts, RouteGroup::Mechanic).await.is_err());
        assert!(evaluate(&parts, RouteGroup::Administrator).await.is_err());
    }

    #[tokio::test]
    async fn test_guest_denied_everywhere() {
        let parts = parts_with_identity(None).await;

        for group in [
            RouteGroup::Customer,
            RouteGroup::Mechanic,
            RouteGroup::Administrator,
        ] {
            assert!(evaluate(&parts, group).await.is_err());
        }
    }

    #[tokio::test]
    async fn test_denied_redirect_targets_follow_policy_table() {
        let parts = parts_with_identity(None).await;

        let denied = evaluate(&parts, RouteGroup::Customer).await.unwrap_err();
        assert_eq!(denied.target, redirects::NOT_FOUND);

        let denied = evaluate(&parts, RouteGroup::Mechanic).await.unwrap_err();
        assert_eq!(denied.target, redirects::LOGIN);

        let denied = evaluate(&parts, RouteGroup::Administrator).await.unwrap_err();
        assert_eq!(denied.target, redirects::LOGIN);
    }

    #[tokio::test]
    async fn test_granted_auth_session_carries_token() {
        let parts = parts_with_identity(Some(principal(true, None))).await;

        let auth = evaluate(&parts, RouteGroup::Administrator).await.unwrap();
        assert_eq!(auth.token, "token-abc");
        assert!(auth.principal.is_admin);
    }

    #[tokio::test]
    async fn test_current_principal_never_rejects() {
        let mut parts = parts_with_identity(None).await;
        let current = CurrentPrincipal::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(current.0.is_none());
        assert_eq!(current.role(), RoleVariant::Guest);
    }
}
