//! Command handlers, one module per record collection.

pub mod account;
pub mod apartment;
pub mod parking;

use aptman_business::{AccountManager, ApartmentManager, ParkingManager, Session};
use std::path::Path;

/// The three record managers, opened over one data directory.
pub struct Managers {
    pub apartments: ApartmentManager,
    pub accounts: AccountManager,
    pub parking: ParkingManager,
}

impl Managers {
    pub fn open(data_dir: &Path) -> Self {
        Self {
            apartments: ApartmentManager::open(data_dir),
            accounts: AccountManager::open(data_dir),
            parking: ParkingManager::open(data_dir),
        }
    }

    /// Save every collection this session may persist. The account store is
    /// written only for an admin session. A failed save is reported and the
    /// in-memory state stays intact; it never aborts the exit path.
    pub fn save_all(&self, session: &Session) {
        if let Err(err) = self.apartments.save() {
            eprintln!("Warning: could not save apartments: {}", err);
        }
        if let Err(err) = self.parking.save() {
            eprintln!("Warning: could not save parking spots: {}", err);
        }
        if session.is_admin() {
            if let Err(err) = self.accounts.save() {
                eprintln!("Warning: could not save accounts: {}", err);
            }
        }
    }
}
