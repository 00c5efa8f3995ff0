//! Session store accessor for the authenticated principal.
//!
//! The session holds exactly two entries: the serialized principal under
//! `user` and the bearer token under `token`, kept separate so the token
//! can be attached to backend requests without re-serializing the identity.
//!
//! Reads are deliberately forgiving: a present-but-malformed entry is
//! treated as an absent identity rather than an error, so corrupted session
//! state can never take down the navigation shell. Writes overwrite, and
//! clearing removes both entries.

use ride_revive_core::Principal;
use tower_sessions::Session;

/// Session keys for authentication data.
pub mod keys {
    /// Key for the JSON-serialized principal.
    pub const USER: &str = "user";

    /// Key for the bearer token, stored separately from the principal.
    pub const TOKEN: &str = "token";
}

/// Read the current principal from the session.
///
/// Returns `None` when the entry is missing *or* fails to deserialize;
/// malformed state collapses to "guest" instead of propagating an error.
pub async fn read_principal(session: &Session) -> Option<Principal> {
    session.get(keys::USER).await.ok().flatten()
}

/// Read the bearer token from the session.
pub async fn read_token(session: &Session) -> Option<String> {
    session.get(keys::TOKEN).await.ok().flatten()
}

/// Persist the principal and its bearer token, overwriting previous entries.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn write_principal(
    session: &Session,
    principal: &Principal,
    token: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::USER, principal).await?;
    session.insert(keys::TOKEN, token).await
}

/// Remove the principal and token entries (logout).
///
/// Subsequent [`read_principal`] calls return `None`.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_principal(session: &Session) -> Result<(), tower_sessions::session::Error> {
    // Remove as raw JSON values so even a corrupted entry can be cleared.
    session.remove::<serde_json::Value>(keys::USER).await?;
    session.remove::<serde_json::Value>(keys::TOKEN).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use ride_revive_core::{Email, UserId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn test_principal() -> Principal {
        Principal {
            id: UserId::new("665f1c2ab7e4"),
            full_name: "Anish Shrestha".to_owned(),
            email: Email::parse("anish@example.com").unwrap(),
            phone: "9812345678".to_owned(),
            is_admin: false,
            role: Some("User".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_roundtrip() {
        let session = test_session();
        let principal = test_principal();

        write_principal(&session, &principal, "token-abc").await.unwrap();

        assert_eq!(read_principal(&session).await, Some(principal));
        assert_eq!(read_token(&session).await.as_deref(), Some("token-abc"));
    }

    #[tokio::test]
    async fn test_read_when_empty_is_absent() {
        let session = test_session();
        assert_eq!(read_principal(&session).await, None);
        assert_eq!(read_token(&session).await, None);
    }

    #[tokio::test]
    async fn test_read_after_clear_is_absent() {
        let session = test_session();
        write_principal(&session, &test_principal(), "token-abc").await.unwrap();

        clear_principal(&session).await.unwrap();

        assert_eq!(read_principal(&session).await, None);
        assert_eq!(read_token(&session).await, None);
    }

    #[tokio::test]
    async fn test_malformed_user_entry_reads_as_absent() {
        let session = test_session();

        // Not a principal at all - a bare string and then a number.
        session.insert(keys::USER, "{definitely-not-json}").await.unwrap();
        assert_eq!(read_principal(&session).await, None);

        session.insert(keys::USER, 42_i64).await.unwrap();
        assert_eq!(read_principal(&session).await, None);
    }

    #[tokio::test]
    async fn test_partial_user_entry_reads_as_absent() {
        let session = test_session();

        // Structurally JSON, but missing required identity fields.
        session
            .insert(keys::USER, serde_json::json!({ "isAdmin": true }))
            .await
            .unwrap();

        assert_eq!(read_principal(&session).await, None);
    }

    #[tokio::test]
    async fn test_clear_survives_malformed_entries() {
        let session = test_session();
        session.insert(keys::USER, 42_i64).await.unwrap();

        clear_principal(&session).await.unwrap();

        assert_eq!(read_principal(&session).await, None);
    }

    #[tokio::test]
    async fn test_write_twice_is_idempotent() {
        let session = test_session();
        let principal = test_principal();

        write_principal(&session, &principal, "token-abc").await.unwrap();
        let first = read_principal(&session).await;

        write_principal(&session, &principal, "token-abc").await.unwrap();
        let second = read_principal(&session).await;

        assert_eq!(first, Some(principal.clone()));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_identity() {
        let session = test_session();
        let first = test_principal();
        let mut second = test_principal();
        second.full_name = "Nirmal Karki".to_owned();
        second.role = Some("Mechanic".to_owned());

        write_principal(&session, &first, "token-1").await.unwrap();
        write_principal(&session, &second, "token-2").await.unwrap();

        assert_eq!(read_principal(&session).await, Some(second));
        assert_eq!(read_token(&session).await.as_deref(), Some("token-2"));
    }
}
