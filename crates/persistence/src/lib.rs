//! # Aptman Persistence
//!
//! Flat-file stores for the record collections. One file per record type,
//! newline-delimited, one CSV-like line per record.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aptman_core::Apartment;
//! use aptman_persistence::FlatFileStore;
//!
//! let store: FlatFileStore<Apartment> = FlatFileStore::new("data");
//! let apartments = store.load()?;
//! store.save(&apartments)?;
//! ```
//!
//! Loads tolerate malformed lines (they are skipped with a warning); saves
//! rewrite the whole file.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::FlatFileStore;
