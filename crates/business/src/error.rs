//! Business layer errors.

use aptman_core::Role;
use rust_decimal::Decimal;
use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Validation errors ===
    #[error("{entity} identifier cannot be empty")]
    EmptyIdentifier { entity: &'static str },

    #[error("Tenant name cannot be empty")]
    EmptyTenantName,

    #[error("Rent cannot be negative: {0}")]
    NegativeRent(Decimal),

    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: &'static str, key: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    // === State errors ===
    #[error("Apartment {0} is already occupied")]
    AlreadyOccupied(String),

    #[error("Spot {spot} is already reserved by {by}")]
    AlreadyReserved { spot: String, by: String },

    #[error("Spot {0} is not currently reserved")]
    NotReserved(String),

    #[error("Spot {0} has reservation fields inconsistent with its reserved flag")]
    InconsistentReservation(String),

    // === Authentication / authorization ===
    /// Deliberately identical for unknown username and wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Permission denied: {role} may not {operation}")]
    PermissionDenied {
        role: Role,
        operation: &'static str,
    },

    #[error("You cannot delete your own account")]
    SelfDeletion,

    // === Wrapped errors ===
    #[error("Storage error: {0}")]
    Store(#[from] aptman_persistence::StoreError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

impl BusinessError {
    /// Create an AlreadyExists error
    pub fn already_exists(entity: &'static str, key: &str) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.to_string(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(entity: &'static str, key: &str) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Whether this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = BusinessError::already_exists("apartment", "101");
        assert_eq!(err.to_string(), "apartment already exists: 101");

        let err = BusinessError::not_found("parking spot", "P09");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "parking spot not found: P09");

        let err = BusinessError::NegativeRent(dec!(-5));
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn test_credentials_error_is_uniform() {
        // Both failure causes must render the exact same message.
        assert_eq!(
            BusinessError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }
}
