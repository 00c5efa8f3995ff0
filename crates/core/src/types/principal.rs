//! The authenticated identity.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;

/// The authenticated identity, as issued by the backend at login.
///
/// A principal is either wholly absent (an anonymous guest) or fully
/// populated; partial identities are not modeled. The serialized form is
/// exactly the backend's `user` object (camelCase on the wire), so the
/// value can round-trip between the login response, the session store, and
/// profile updates without translation.
///
/// The bearer token is deliberately *not* part of this struct; it is held
/// under its own session entry (see the web crate's session accessor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Backend identifier for the account.
    pub id: UserId,
    /// Display name shown in the navigation shell and profile forms.
    pub full_name: String,
    /// Account email address.
    pub email: Email,
    /// Contact phone number (used for OTP password resets).
    ///
    /// Registration sends `phoneNumber`; the login response says `phone`.
    #[serde(alias = "phoneNumber")]
    pub phone: String,
    /// Administrator flag. Takes precedence over any role tag.
    #[serde(default)]
    pub is_admin: bool,
    /// Role tag assigned by the backend (`"User"`, `"Mechanic"`).
    ///
    /// Absent, empty, or unrecognized tags are all treated as a regular
    /// customer by [`resolve_role`](super::role::resolve_role).
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_user_object() {
        let json = r#"{
            "id": "665f1c2ab7e4",
            "fullName": "Anish Shrestha",
            "email": "anish@example.com",
            "phone": "9812345678",
            "isAdmin": false,
            "role": "User"
        }"#;

        let principal: Principal = serde_json::from_str(json).unwrap();
        assert_eq!(principal.id.as_str(), "665f1c2ab7e4");
        assert_eq!(principal.full_name, "Anish Shrestha");
        assert!(!principal.is_admin);
        assert_eq!(principal.role.as_deref(), Some("User"));
    }

    #[test]
    fn test_missing_flags_default_to_guest_safe_values() {
        // Older backend responses omit isAdmin and role entirely.
        let json = r#"{
            "id": "665f1c2ab7e4",
            "fullName": "Anish Shrestha",
            "email": "anish@example.com",
            "phone": "9812345678"
        }"#;

        let principal: Principal = serde_json::from_str(json).unwrap();
        assert!(!principal.is_admin);
        assert_eq!(principal.role, None);
    }

    #[test]
    fn test_partial_identity_is_rejected() {
        // A principal is all-or-nothing; identity fields are required.
        let json = r#"{"isAdmin": true, "role": "Mechanic"}"#;
        assert!(serde_json::from_str::<Principal>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let principal = Principal {
            id: UserId::new("1"),
            full_name: "A".to_owned(),
            email: Email::parse("a@b.c").unwrap(),
            phone: "9800000000".to_owned(),
            is_admin: true,
            role: None,
        };
        let json = serde_json::to_string(&principal).unwrap();
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"isAdmin\":true"));
    }
}
