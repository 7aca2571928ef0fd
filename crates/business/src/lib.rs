//! # Aptman Business
//!
//! Business logic layer: one manager per record collection, plus the
//! session/authorization layer the presentation code drives them through.
//!
//! Each manager exclusively owns its in-memory collection, loads it once at
//! construction (seeding defaults when the store is empty), and persists
//! only on an explicit `save`. All operations are synchronous and complete
//! before returning; nothing here spawns background work.

pub mod accounts;
pub mod apartments;
pub mod error;
pub mod parking;
pub mod session;

pub use accounts::AccountManager;
pub use apartments::ApartmentManager;
pub use error::{BusinessError, BusinessResult};
pub use parking::ParkingManager;
pub use session::Session;
