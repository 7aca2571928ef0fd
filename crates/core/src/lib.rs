//! # Aptman Core
//!
//! Record types for the apartment management system:
//! - [`Apartment`] - apartment inventory and occupancy
//! - [`TenantAccount`] / [`Role`] - login credentials and role
//! - [`ParkingSpot`] - parking inventory and reservation state
//!
//! Each record type implements [`StoreRecord`], the line codec used by the
//! flat-file stores in `aptman-persistence`. This crate performs no I/O.

pub mod apartment;
pub mod parking;
pub mod record;
pub mod tenant;

pub use apartment::Apartment;
pub use parking::ParkingSpot;
pub use record::StoreRecord;
pub use tenant::{Role, TenantAccount};
