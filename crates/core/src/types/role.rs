//! Role resolution: mapping a principal to the view variant it sees.

use serde::{Deserialize, Serialize};

use super::principal::Principal;

/// Role tag the backend assigns to mechanics.
const MECHANIC_ROLE_TAG: &str = "Mechanic";

/// The four mutually exclusive view variants of the application.
///
/// A `RoleVariant` is always derived from the current principal via
/// [`resolve_role`]; it is never stored, so it can go stale only until the
/// next navigation re-reads the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleVariant {
    /// No principal present.
    Guest,
    /// Signed-in customer (the default for any authenticated account).
    Customer,
    /// Account tagged as a mechanic.
    Mechanic,
    /// Account with the administrator flag set.
    Administrator,
}

impl RoleVariant {
    /// Whether this variant is the anonymous guest.
    #[must_use]
    pub const fn is_guest(self) -> bool {
        matches!(self, Self::Guest)
    }

    /// Whether this variant is a signed-in customer.
    #[must_use]
    pub const fn is_customer(self) -> bool {
        matches!(self, Self::Customer)
    }

    /// Whether this variant is a mechanic.
    #[must_use]
    pub const fn is_mechanic(self) -> bool {
        matches!(self, Self::Mechanic)
    }

    /// Whether this variant is an administrator.
    #[must_use]
    pub const fn is_administrator(self) -> bool {
        matches!(self, Self::Administrator)
    }

    /// Landing page for the variant after a successful login.
    #[must_use]
    pub const fn landing_path(self) -> &'static str {
        match self {
            Self::Guest => "/",
            Self::Customer => "/home",
            Self::Mechanic => "/mechanic",
            Self::Administrator => "/admin",
        }
    }
}

impl std::fmt::Display for RoleVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::Customer => write!(f, "customer"),
            Self::Mechanic => write!(f, "mechanic"),
            Self::Administrator => write!(f, "administrator"),
        }
    }
}

/// Resolve the view variant for a principal (or its absence).
///
/// This is the single place role checks live; consumers branch on the
/// returned variant and never inspect `is_admin`/`role` directly.
///
/// Resolution order:
/// 1. No principal: [`RoleVariant::Guest`].
/// 2. `is_admin`: [`RoleVariant::Administrator`] - the administrator flag
///    wins over any role tag that might also be present.
/// 3. Role tag `"Mechanic"`: [`RoleVariant::Mechanic`].
/// 4. Anything else (including absent or empty tags): [`RoleVariant::Customer`].
///
/// Pure and total: no I/O, deterministic, and defined for every input.
#[must_use]
pub fn resolve_role(principal: Option<&Principal>) -> RoleVariant {
    let Some(principal) = principal else {
        return RoleVariant::Guest;
    };

    if principal.is_admin {
        RoleVariant::Administrator
    } else if principal.role.as_deref() == Some(MECHANIC_ROLE_TAG) {
        RoleVariant::Mechanic
    } else {
        RoleVariant::Customer
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::email::Email;
    use crate::types::id::UserId;

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

    #[test]
    fn test_absent_principal_is_guest() {
        assert_eq!(resolve_role(None), RoleVariant::Guest);
    }

    #[test]
    fn test_admin_flag_wins_regardless_of_role_tag() {
        for role in [None, Some("User"), Some("Mechanic"), Some("")] {
            let p = principal(true, role);
            assert_eq!(
                resolve_role(Some(&p)),
                RoleVariant::Administrator,
                "role tag {role:?} must not override the admin flag"
            );
        }
    }

    #[test]
    fn test_mechanic_tag_resolves_to_mechanic() {
        let p = principal(false, Some("Mechanic"));
        assert_eq!(resolve_role(Some(&p)), RoleVariant::Mechanic);
    }

    #[test]
    fn test_everything_else_resolves_to_customer() {
        for role in [None, Some("User"), Some(""), Some("mechanic"), Some("Admin")] {
            let p = principal(false, role);
            assert_eq!(
                resolve_role(Some(&p)),
                RoleVariant::Customer,
                "role tag {role:?} should fall through to Customer"
            );
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let p = principal(false, Some("Mechanic"));
        let first = resolve_role(Some(&p));
        let second = resolve_role(Some(&p));
        assert_eq!(first, second);
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(RoleVariant::Administrator.landing_path(), "/admin");
        assert_eq!(RoleVariant::Mechanic.landing_path(), "/mechanic");
        assert_eq!(RoleVariant::Customer.landing_path(), "/home");
        assert_eq!(RoleVariant::Guest.landing_path(), "/");
    }
}
