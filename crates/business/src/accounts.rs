//! Account manager - login credentials and roles.

use crate::error::{BusinessError, BusinessResult};
use aptman_core::{Role, StoreRecord, TenantAccount};
use aptman_persistence::FlatFileStore;
use std::path::Path;

/// Owns the in-memory account collection and its backing store.
///
/// Same contract as the other managers; additionally the sole gate into the
/// application via [`authenticate`](Self::authenticate).
pub struct AccountManager {
    store: FlatFileStore<TenantAccount>,
    accounts: Vec<TenantAccount>,
}

impl AccountManager {
    /// Open the manager over `data_dir`, seeding the default accounts when
    /// the store is missing or empty.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Self {
        let store = FlatFileStore::new(data_dir);
        let mut accounts = match store.load() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load account store, starting empty");
                Vec::new()
            }
        };
        if accounts.is_empty() {
            accounts = Self::seed();
        }
        Self { store, accounts }
    }

    fn seed() -> Vec<TenantAccount> {
        vec![
            TenantAccount::new("admin", "adminpass", Role::Admin),
            TenantAccount::new("user", "password", Role::Regular),
            TenantAccount::new("manager", "manage123", Role::Regular),
        ]
    }

    /// Add a new account; the username must be unused (any case).
    pub fn add(&mut self, account: TenantAccount) -> BusinessResult<()> {
        if account.username.trim().is_empty() {
            return Err(BusinessError::EmptyIdentifier { entity: "account" });
        }
        if self.find_by_username(&account.username).is_some() {
            return Err(BusinessError::already_exists("account", &account.username));
        }
        self.accounts.push(account);
        Ok(())
    }

    /// First account whose username matches, ignoring case.
    pub fn find_by_username(&self, username: &str) -> Option<TenantAccount> {
        self.accounts
            .iter()
            .find(|a| a.key_matches(username))
            .cloned()
    }

    /// Overwrite password and role of the stored record; the stored
    /// username keeps its original casing. Never inserts.
    pub fn update(&mut self, updated: TenantAccount) -> BusinessResult<()> {
        let existing = self
            .accounts
            .iter_mut()
            .find(|a| a.key_matches(&updated.username))
            .ok_or_else(|| BusinessError::not_found("account", &updated.username))?;
        existing.password = updated.password;
        existing.role = updated.role;
        Ok(())
    }

    /// Remove the account with the given username (any case).
    pub fn delete(&mut self, username: &str) -> BusinessResult<()> {
        let idx = self
            .accounts
            .iter()
            .position(|a| a.key_matches(username))
            .ok_or_else(|| BusinessError::not_found("account", username))?;
        self.accounts.remove(idx);
        Ok(())
    }

    /// Defensive copy of the collection, in insertion/load order.
    pub fn list_all(&self) -> Vec<TenantAccount> {
        self.accounts.clone()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Verify credentials and return the stored role.
    ///
    /// Username matching ignores case; the password comparison is exact.
    /// Unknown username and wrong password produce the same error, so a
    /// caller cannot tell which one failed.
    pub fn authenticate(&self, username: &str, password: &str) -> BusinessResult<Role> {
        self.accounts
            .iter()
            .find(|a| a.key_matches(username))
            .filter(|a| a.password == password)
            .map(|a| a.role)
            .ok_or(BusinessError::InvalidCredentials)
    }

    /// Persist the full collection, overwriting the backing file.
    pub fn save(&self) -> BusinessResult<()> {
        self.store.save(&self.accounts).map_err(|err| {
            tracing::error!(error = %err, "failed to save account store");
            err.into()
        })
    }
}
