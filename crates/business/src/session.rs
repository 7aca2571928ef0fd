//! Logged-in session and the authorization policy.
//!
//! A [`Session`] is an immutable value created only by a successful
//! authentication. The managers themselves perform no role checks; the
//! presentation layer asks the session before invoking a gated operation.

use crate::accounts::AccountManager;
use crate::error::{BusinessError, BusinessResult};
use aptman_core::{ParkingSpot, Role};

/// Case-insensitive name equality, lowercasing both sides so non-ASCII
/// names fold too. Same rule the record keys use.
fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// One logged-in user: username and role, fixed for the session lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    role: Role,
}

impl Session {
    /// Authenticate against the account manager and open a session.
    pub fn log_in(
        accounts: &AccountManager,
        username: &str,
        password: &str,
    ) -> BusinessResult<Self> {
        let role = accounts.authenticate(username, password)?;
        Ok(Self {
            username: username.to_string(),
            role,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Gate for admin-only operations (managing inventory and accounts).
    pub fn require_admin(&self, operation: &'static str) -> BusinessResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(BusinessError::PermissionDenied {
                role: self.role,
                operation,
            })
        }
    }

    /// Gate for operations reserved to regular tenants (booking a unit).
    pub fn require_regular(&self, operation: &'static str) -> BusinessResult<()> {
        if self.role == Role::Regular {
            Ok(())
        } else {
            Err(BusinessError::PermissionDenied {
                role: self.role,
                operation,
            })
        }
    }

    /// Resolve the tenant name a reservation will be held under.
    ///
    /// An admin may reserve on behalf of anyone; a regular tenant only
    /// under their own name (names compared case-insensitively).
    pub fn reservation_name(&self, requested: Option<&str>) -> BusinessResult<String> {
        match requested {
            None => Ok(self.username.clone()),
            Some(name) if self.is_admin() || names_match(name, &self.username) => {
                Ok(name.to_string())
            }
            Some(_) => Err(BusinessError::PermissionDenied {
                role: self.role,
                operation: "reserve a spot for another tenant",
            }),
        }
    }

    /// Whether this session may cancel the reservation held on `spot`.
    /// Admins may cancel any; a regular tenant only their own.
    pub fn may_cancel(&self, spot: &ParkingSpot) -> bool {
        self.is_admin()
            || spot
                .reserved_by
                .as_deref()
                .is_some_and(|by| names_match(by, &self.username))
    }

    /// Gate form of [`may_cancel`](Self::may_cancel).
    pub fn require_cancel_rights(&self, spot: &ParkingSpot) -> BusinessResult<()> {
        if self.may_cancel(spot) {
            Ok(())
        } else {
            Err(BusinessError::PermissionDenied {
                role: self.role,
                operation: "cancel another tenant's reservation",
            })
        }
    }

    /// An account may never delete itself.
    pub fn require_not_self(&self, username: &str) -> BusinessResult<()> {
        if names_match(username, &self.username) {
            Err(BusinessError::SelfDeletion)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sessions() -> (tempfile::TempDir, Session, Session) {
        let dir = tempdir().unwrap();
        let accounts = AccountManager::open(dir.path());
        let admin = Session::log_in(&accounts, "admin", "adminpass").unwrap();
        let regular = Session::log_in(&accounts, "user", "password").unwrap();
        (dir, admin, regular)
    }

    #[test]
    fn test_log_in_carries_role() {
        let (_dir, admin, regular) = sessions();
        assert_eq!(admin.role(), Role::Admin);
        assert!(admin.is_admin());
        assert_eq!(regular.role(), Role::Regular);
        assert_eq!(regular.username(), "user");
    }

    #[test]
    fn test_log_in_rejects_bad_credentials() {
        let dir = tempdir().unwrap();
        let accounts = AccountManager::open(dir.path());
        let err = Session::log_in(&accounts, "admin", "wrong").unwrap_err();
        assert!(matches!(err, BusinessError::InvalidCredentials));
    }

    #[test]
    fn test_admin_gates() {
        let (_dir, admin, regular) = sessions();
        assert!(admin.require_admin("add apartments").is_ok());
        let err = regular.require_admin("add apartments").unwrap_err();
        assert!(matches!(err, BusinessError::PermissionDenied { .. }));

        assert!(regular.require_regular("book an apartment").is_ok());
        assert!(admin.require_regular("book an apartment").is_err());
    }

    #[test]
    fn test_reservation_name_policy() {
        let (_dir, admin, regular) = sessions();
        assert_eq!(regular.reservation_name(None).unwrap(), "user");
        // Own name in any case is fine.
        assert_eq!(regular.reservation_name(Some("USER")).unwrap(), "USER");
        assert!(regular.reservation_name(Some("somebody else")).is_err());

        assert_eq!(
            admin.reservation_name(Some("Alice Smith")).unwrap(),
            "Alice Smith"
        );
    }

    #[test]
    fn test_cancel_rights() {
        let (_dir, admin, regular) = sessions();
        let own = ParkingSpot::reserved_for("P01", "User", "2025-01-01");
        let other = ParkingSpot::reserved_for("P02", "Alice Smith", "2025-01-01");

        assert!(regular.may_cancel(&own));
        assert!(!regular.may_cancel(&other));
        assert!(regular.require_cancel_rights(&other).is_err());

        assert!(admin.may_cancel(&own));
        assert!(admin.may_cancel(&other));
    }

    #[test]
    fn test_name_comparison_folds_non_ascii() {
        assert!(names_match("Ömer", "ömer"));
        assert!(names_match("Ömer", "ÖMER"));
        assert!(!names_match("Ömer", "omer"));
    }

    #[test]
    fn test_self_deletion_guard() {
        let (_dir, admin, _regular) = sessions();
        let err = admin.require_not_self("ADMIN").unwrap_err();
        assert!(matches!(err, BusinessError::SelfDeletion));
        assert!(admin.require_not_self("user").is_ok());
    }
}
