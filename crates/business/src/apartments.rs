//! Apartment manager - inventory and occupancy.

use crate::error::{BusinessError, BusinessResult};
use aptman_core::{Apartment, StoreRecord};
use aptman_persistence::FlatFileStore;
use rust_decimal::Decimal;
use std::path::Path;

/// Owns the in-memory apartment collection and its backing store.
///
/// The collection is loaded once at construction and persisted only on an
/// explicit [`save`](Self::save). Lookups return clones; callers submit a
/// full replacement record through [`update`](Self::update) instead of
/// mutating stored records directly.
pub struct ApartmentManager {
    store: FlatFileStore<Apartment>,
    apartments: Vec<Apartment>,
}

impl ApartmentManager {
    /// Open the manager over `data_dir`.
    ///
    /// A missing or unreadable store degrades to an empty collection (the
    /// failure is logged, never returned); an empty collection is replaced
    /// by the seed data.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Self {
        let store = FlatFileStore::new(data_dir);
        let mut apartments = match store.load() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load apartment store, starting empty");
                Vec::new()
            }
        };
        if apartments.is_empty() {
            apartments = Self::seed();
        }
        Self { store, apartments }
    }

    fn seed() -> Vec<Apartment> {
        vec![Apartment::new(
            "101",
            "Steph Curry",
            Decimal::new(2_000_000, 2),
            true,
            "Arriving soon.",
        )]
    }

    fn validate(apartment: &Apartment) -> BusinessResult<()> {
        if apartment.number.trim().is_empty() {
            return Err(BusinessError::EmptyIdentifier { entity: "apartment" });
        }
        if apartment.rent < Decimal::ZERO {
            return Err(BusinessError::NegativeRent(apartment.rent));
        }
        Ok(())
    }

    /// Add a new apartment; the unit number must be unused (any case).
    pub fn add(&mut self, apartment: Apartment) -> BusinessResult<()> {
        Self::validate(&apartment)?;
        if self.find_by_number(&apartment.number).is_some() {
            return Err(BusinessError::already_exists("apartment", &apartment.number));
        }
        self.apartments.push(apartment);
        Ok(())
    }

    /// First apartment whose number matches `number`, ignoring case.
    pub fn find_by_number(&self, number: &str) -> Option<Apartment> {
        self.apartments
            .iter()
            .find(|a| a.key_matches(number))
            .cloned()
    }

    /// Overwrite every mutable field of the stored record with the fields
    /// of `updated`. The stored unit number keeps its original casing;
    /// update never inserts.
    pub fn update(&mut self, updated: Apartment) -> BusinessResult<()> {
        Self::validate(&updated)?;
        let existing = self
            .apartments
            .iter_mut()
            .find(|a| a.key_matches(&updated.number))
            .ok_or_else(|| BusinessError::not_found("apartment", &updated.number))?;
        existing.tenant_name = updated.tenant_name;
        existing.rent = updated.rent;
        existing.occupied = updated.occupied;
        existing.document_content = updated.document_content;
        Ok(())
    }

    /// Remove the apartment with the given number (any case).
    pub fn delete(&mut self, number: &str) -> BusinessResult<()> {
        let idx = self
            .apartments
            .iter()
            .position(|a| a.key_matches(number))
            .ok_or_else(|| BusinessError::not_found("apartment", number))?;
        self.apartments.remove(idx);
        Ok(())
    }

    /// Book a vacant apartment for `tenant_name`: sets the tenant and marks
    /// the unit occupied.
    pub fn book(&mut self, number: &str, tenant_name: &str) -> BusinessResult<()> {
        let tenant_name = tenant_name.trim();
        if tenant_name.is_empty() {
            return Err(BusinessError::EmptyTenantName);
        }
        let apartment = self
            .apartments
            .iter_mut()
            .find(|a| a.key_matches(number))
            .ok_or_else(|| BusinessError::not_found("apartment", number))?;
        if apartment.occupied {
            return Err(BusinessError::AlreadyOccupied(apartment.number.clone()));
        }
        apartment.tenant_name = tenant_name.to_string();
        apartment.occupied = true;
        Ok(())
    }

    /// Defensive copy of the collection, in insertion/load order.
    pub fn list_all(&self) -> Vec<Apartment> {
        self.apartments.clone()
    }

    pub fn len(&self) -> usize {
        self.apartments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apartments.is_empty()
    }

    /// Persist the full collection, overwriting the backing file.
    pub fn save(&self) -> BusinessResult<()> {
        self.store.save(&self.apartments).map_err(|err| {
            tracing::error!(error = %err, "failed to save apartment store");
            err.into()
        })
    }
}
