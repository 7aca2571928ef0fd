//! Parking manager - inventory and reservation state.
//!
//! The only state machine here is the two-state reserved/vacant flag on a
//! spot. `reserve` and `cancel` are the only transitions and both maintain
//! the invariant that the two reservation fields exist exactly when
//! `reserved` is true; `add` and `update` reject any record that arrives
//! with the invariant already broken.

use crate::error::{BusinessError, BusinessResult};
use aptman_core::{ParkingSpot, StoreRecord};
use aptman_persistence::FlatFileStore;
use chrono::{Days, Local};
use std::path::Path;

/// Owns the in-memory parking spot collection and its backing store.
pub struct ParkingManager {
    store: FlatFileStore<ParkingSpot>,
    spots: Vec<ParkingSpot>,
}

impl ParkingManager {
    /// Open the manager over `data_dir`, seeding five default spots when
    /// the store is missing or empty (two pre-reserved, for illustration).
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Self {
        let store = FlatFileStore::new(data_dir);
        let mut spots = match store.load() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load parking store, starting empty");
                Vec::new()
            }
        };
        if spots.is_empty() {
            spots = Self::seed();
        }
        Self { store, spots }
    }

    fn seed() -> Vec<ParkingSpot> {
        let today = Local::now().date_naive();
        let in_two_days = today + Days::new(2);
        vec![
            ParkingSpot::vacant("P01"),
            ParkingSpot::reserved_for("P02", "Alice Smith", today.to_string()),
            ParkingSpot::vacant("P03"),
            ParkingSpot::reserved_for("P04", "Bob Johnson", in_two_days.to_string()),
            ParkingSpot::vacant("P05"),
        ]
    }

    fn validate(spot: &ParkingSpot) -> BusinessResult<()> {
        if spot.spot_number.trim().is_empty() {
            return Err(BusinessError::EmptyIdentifier {
                entity: "parking spot",
            });
        }
        // A spot must never be stored half-reserved: the reservation
        // fields exist exactly when the reserved flag is set.
        if !spot.is_consistent() {
            return Err(BusinessError::InconsistentReservation(
                spot.spot_number.clone(),
            ));
        }
        Ok(())
    }

    /// Add a new spot; the spot number must be unused (any case).
    pub fn add(&mut self, spot: ParkingSpot) -> BusinessResult<()> {
        Self::validate(&spot)?;
        if self.find_by_number(&spot.spot_number).is_some() {
            return Err(BusinessError::already_exists("parking spot", &spot.spot_number));
        }
        self.spots.push(spot);
        Ok(())
    }

    /// First spot whose number matches, ignoring case.
    pub fn find_by_number(&self, spot_number: &str) -> Option<ParkingSpot> {
        self.spots
            .iter()
            .find(|s| s.key_matches(spot_number))
            .cloned()
    }

    /// Overwrite every mutable field of the stored record; the stored spot
    /// number keeps its original casing. Never inserts.
    pub fn update(&mut self, updated: ParkingSpot) -> BusinessResult<()> {
        Self::validate(&updated)?;
        let existing = self
            .spots
            .iter_mut()
            .find(|s| s.key_matches(&updated.spot_number))
            .ok_or_else(|| BusinessError::not_found("parking spot", &updated.spot_number))?;
        existing.reserved = updated.reserved;
        existing.reserved_by = updated.reserved_by;
        existing.reservation_date = updated.reservation_date;
        Ok(())
    }

    /// Remove the spot with the given number (any case).
    pub fn delete(&mut self, spot_number: &str) -> BusinessResult<()> {
        let idx = self
            .spots
            .iter()
            .position(|s| s.key_matches(spot_number))
            .ok_or_else(|| BusinessError::not_found("parking spot", spot_number))?;
        self.spots.remove(idx);
        Ok(())
    }

    /// Reserve a vacant spot for `tenant_name` on `date`.
    ///
    /// The caller is responsible for having validated `date` as a
    /// well-formed `YYYY-MM-DD` calendar date; the manager only enforces
    /// the reservation invariant.
    pub fn reserve(&mut self, spot_number: &str, tenant_name: &str, date: &str) -> BusinessResult<()> {
        let spot = self
            .spots
            .iter_mut()
            .find(|s| s.key_matches(spot_number))
            .ok_or_else(|| BusinessError::not_found("parking spot", spot_number))?;
        if spot.reserved {
            return Err(BusinessError::AlreadyReserved {
                spot: spot.spot_number.clone(),
                by: spot.reserved_by.clone().unwrap_or_default(),
            });
        }
        spot.reserved = true;
        spot.reserved_by = Some(tenant_name.to_string());
        spot.reservation_date = Some(date.to_string());
        Ok(())
    }

    /// Cancel an existing reservation, clearing all three fields.
    pub fn cancel(&mut self, spot_number: &str) -> BusinessResult<()> {
        let spot = self
            .spots
            .iter_mut()
            .find(|s| s.key_matches(spot_number))
            .ok_or_else(|| BusinessError::not_found("parking spot", spot_number))?;
        if !spot.reserved {
            return Err(BusinessError::NotReserved(spot.spot_number.clone()));
        }
        spot.reserved = false;
        spot.reserved_by = None;
        spot.reservation_date = None;
        Ok(())
    }

    /// Defensive copy of the collection, in insertion/load order.
    pub fn list_all(&self) -> Vec<ParkingSpot> {
        self.spots.clone()
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Persist the full collection, overwriting the backing file.
    pub fn save(&self) -> BusinessResult<()> {
        self.store.save(&self.spots).map_err(|err| {
            tracing::error!(error = %err, "failed to save parking store");
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn manager() -> (tempfile::TempDir, ParkingManager) {
        let dir = tempdir().unwrap();
        let manager = ParkingManager::open(dir.path());
        (dir, manager)
    }

    fn assert_all_consistent(manager: &ParkingManager) {
        for spot in manager.list_all() {
            assert!(spot.is_consistent(), "inconsistent spot: {:?}", spot);
        }
    }

    #[test]
    fn test_seeds_five_spots() {
        let (_dir, manager) = manager();
        assert_eq!(manager.len(), 5);
        assert!(!manager.find_by_number("P01").unwrap().reserved);
        let p02 = manager.find_by_number("P02").unwrap();
        assert!(p02.reserved);
        assert_eq!(p02.reserved_by.as_deref(), Some("Alice Smith"));
        let p04 = manager.find_by_number("P04").unwrap();
        assert_eq!(p04.reserved_by.as_deref(), Some("Bob Johnson"));
        assert_all_consistent(&manager);
    }

    #[test]
    fn test_reserve_then_cancel_scenario() {
        let (_dir, mut manager) = manager();

        manager.reserve("P01", "Alice", "2025-03-01").unwrap();
        let spot = manager.find_by_number("p01").unwrap();
        assert!(spot.reserved);
        assert_eq!(spot.reserved_by.as_deref(), Some("Alice"));
        assert_eq!(spot.reservation_date.as_deref(), Some("2025-03-01"));

        let err = manager.reserve("P01", "Bob", "2025-04-01").unwrap_err();
        assert!(matches!(err, BusinessError::AlreadyReserved { .. }));
        // The original reservation is untouched.
        assert_eq!(
            manager.find_by_number("P01").unwrap().reserved_by.as_deref(),
            Some("Alice")
        );

        manager.cancel("P01").unwrap();
        let spot = manager.find_by_number("P01").unwrap();
        assert!(!spot.reserved);
        assert_eq!(spot.reserved_by, None);
        assert_eq!(spot.reservation_date, None);

        let err = manager.cancel("P01").unwrap_err();
        assert!(matches!(err, BusinessError::NotReserved(_)));
        assert_all_consistent(&manager);
    }

    #[test]
    fn test_reserve_missing_spot() {
        let (_dir, mut manager) = manager();
        let err = manager.reserve("P99", "Alice", "2025-01-01").unwrap_err();
        assert!(err.is_not_found());
        assert!(manager.cancel("P99").unwrap_err().is_not_found());
    }

    #[test]
    fn test_invariant_holds_after_any_sequence() {
        let (_dir, mut manager) = manager();
        let _ = manager.reserve("P03", "Carol", "2025-06-01");
        let _ = manager.reserve("P03", "Dave", "2025-06-02");
        let _ = manager.cancel("P02");
        let _ = manager.cancel("P02");
        let _ = manager.reserve("P02", "Erin", "2025-06-03");
        let _ = manager.cancel("P03");
        assert_all_consistent(&manager);
    }

    #[test]
    fn test_add_and_delete() {
        let (_dir, mut manager) = manager();
        manager.add(ParkingSpot::vacant("P06")).unwrap();
        assert_eq!(manager.len(), 6);

        let err = manager.add(ParkingSpot::vacant("p06")).unwrap_err();
        assert!(matches!(err, BusinessError::AlreadyExists { .. }));

        manager.delete("P06").unwrap();
        assert_eq!(manager.len(), 5);
        assert!(manager.delete("P06").unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_rejects_half_reserved_spot() {
        let (_dir, mut manager) = manager();
        let err = manager
            .add(ParkingSpot::new("P07", true, Some("Alice".to_string()), None))
            .unwrap_err();
        assert!(matches!(err, BusinessError::InconsistentReservation(_)));
        assert_eq!(manager.len(), 5);
        assert_all_consistent(&manager);
    }

    #[test]
    fn test_update_overwrites_reservation_fields() {
        let (_dir, mut manager) = manager();
        manager
            .update(ParkingSpot::reserved_for("p01", "Carol", "2025-05-01"))
            .unwrap();
        let spot = manager.find_by_number("P01").unwrap();
        // Stored casing of the identifier is kept.
        assert_eq!(spot.spot_number, "P01");
        assert!(spot.reserved);
        assert_eq!(spot.reserved_by.as_deref(), Some("Carol"));
        assert_eq!(spot.reservation_date.as_deref(), Some("2025-05-01"));
        assert_eq!(manager.len(), 5);

        assert!(manager.update(ParkingSpot::vacant("P99")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_rejects_half_reserved_spot() {
        let (_dir, mut manager) = manager();
        // Flag set without holder/date.
        let err = manager
            .update(ParkingSpot::new("P01", true, None, None))
            .unwrap_err();
        assert!(matches!(err, BusinessError::InconsistentReservation(_)));
        assert!(manager.find_by_number("P01").unwrap().is_consistent());

        // Holder set without the flag.
        let err = manager
            .update(ParkingSpot::new("P03", false, Some("Bob".to_string()), None))
            .unwrap_err();
        assert!(matches!(err, BusinessError::InconsistentReservation(_)));
        assert_all_consistent(&manager);
    }

    #[test]
    fn test_save_then_reopen_round_trip() {
        let dir = tempdir().unwrap();
        let mut manager = ParkingManager::open(dir.path());
        manager.reserve("P01", "Alice", "2025-03-01").unwrap();
        manager.save().unwrap();

        let reopened = ParkingManager::open(dir.path());
        assert_eq!(reopened.list_all(), manager.list_all());
        assert_all_consistent(&reopened);
    }
}
