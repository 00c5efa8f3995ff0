//! HTTP middleware stack for the web tier.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, in-memory store)
//! 5. Security headers (CSP, frame options, etc.)
//! 6. Rate limiting (governor, auth endpoints only)
//!
//! Route guards ([`guard`]) are extractors rather than layers; each
//! protected handler names its group's guard.

pub mod guard;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use guard::{
    AuthSession, CurrentPrincipal, RequireAdministrator, RequireCustomer, RequireMechanic,
    RouteGroup,
};
pub use rate_limit::{auth_rate_limiter, form_rate_limiter};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
