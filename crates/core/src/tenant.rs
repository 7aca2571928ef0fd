//! Tenant login accounts and their role.
//!
//! Passwords are stored in plain text for compatibility with the existing
//! store format. This is a known weakness of the format, not a design
//! endorsement; see DESIGN.md.

use crate::record::StoreRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level attached to a tenant account.
///
/// `Admin` manages inventory and accounts; `Regular` is limited to booking
/// and to reservations held under their own name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Regular,
}

impl Role {
    /// Store/display code for the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Regular => "regular",
        }
    }

    /// Parse from a store code, case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "regular" => Some(Role::Regular),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One login account.
///
/// `username` is the unique identifier (matched case-insensitively) and is
/// immutable once the record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantAccount {
    pub username: String,
    /// Plain text; compared with exact (case-sensitive) equality on login.
    pub password: String,
    pub role: Role,
}

impl TenantAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }
}

impl fmt::Display for TenantAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never prints the password.
        write!(f, "{} ({})", self.username, self.role)
    }
}

impl StoreRecord for TenantAccount {
    const STORE_FILE: &'static str = "users.dat";

    fn key(&self) -> &str {
        &self.username
    }

    fn to_line(&self) -> String {
        // No escaping: a comma inside any field corrupts the line. Accepted
        // limitation of the store format.
        format!("{},{},{}", self.username, self.password, self.role)
    }

    fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 3 {
            return None;
        }
        let role = Role::from_str(parts[2])?;
        Some(Self {
            username: parts[0].to_string(),
            password: parts[1].to_string(),
            role,
        })
    }
}
