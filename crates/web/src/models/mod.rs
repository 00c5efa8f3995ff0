//! Session-facing models for the web tier.
//!
//! Domain types shared with the backend live in `ride-revive-core`; this
//! module owns only what the web tier itself persists - the session layout.

pub mod session;

pub use session::keys as session_keys;
pub use session::{clear_principal, read_principal, read_token, write_principal};
