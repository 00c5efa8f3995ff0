//! Core types for Ride Revive.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod principal;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use principal::Principal;
pub use role::{RoleVariant, resolve_role};
pub use status::*;
