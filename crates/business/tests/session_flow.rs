//! End-to-end flow over a shared data directory: log in, mutate through
//! the managers under the session policy, save, and reopen.

use aptman_business::{
    AccountManager, ApartmentManager, BusinessError, ParkingManager, Session,
};
use aptman_core::{Apartment, Role, TenantAccount};
use rust_decimal_macros::dec;
use tempfile::tempdir;

#[test]
fn admin_session_manages_inventory_and_survives_reopen() {
    let dir = tempdir().unwrap();

    let mut apartments = ApartmentManager::open(dir.path());
    let mut accounts = AccountManager::open(dir.path());
    let mut parking = ParkingManager::open(dir.path());

    let admin = Session::log_in(&accounts, "admin", "adminpass").unwrap();
    assert_eq!(admin.role(), Role::Admin);

    admin.require_admin("add apartments").unwrap();
    apartments
        .add(Apartment::new("202", "O'Neil Corp", dec!(20000.00), true, "Line1\nLine2"))
        .unwrap();

    admin.require_admin("manage accounts").unwrap();
    accounts
        .add(TenantAccount::new("dave", "davepass", Role::Regular))
        .unwrap();

    let holder = admin.reservation_name(Some("Alice Smith")).unwrap();
    parking.reserve("P01", &holder, "2025-03-01").unwrap();

    // Explicit save of all three collections, as on logout.
    apartments.save().unwrap();
    accounts.save().unwrap();
    parking.save().unwrap();

    // A fresh set of managers sees identical collections.
    let apartments2 = ApartmentManager::open(dir.path());
    let accounts2 = AccountManager::open(dir.path());
    let parking2 = ParkingManager::open(dir.path());

    assert_eq!(apartments2.list_all(), apartments.list_all());
    assert_eq!(accounts2.list_all(), accounts.list_all());
    assert_eq!(parking2.list_all(), parking.list_all());

    // Multi-line document content survived the trip intact.
    let apt = apartments2.find_by_number("202").unwrap();
    assert_eq!(apt.document_content, "Line1\nLine2");
    assert_eq!(apt.document_content.lines().count(), 2);

    // The new account can log in against the reopened store.
    assert!(Session::log_in(&accounts2, "dave", "davepass").is_ok());
}

#[test]
fn regular_session_is_limited_to_own_actions() {
    let dir = tempdir().unwrap();

    let mut apartments = ApartmentManager::open(dir.path());
    let accounts = AccountManager::open(dir.path());
    let mut parking = ParkingManager::open(dir.path());

    let session = Session::log_in(&accounts, "user", "password").unwrap();

    // Inventory management is gated off.
    assert!(matches!(
        session.require_admin("add apartments").unwrap_err(),
        BusinessError::PermissionDenied { .. }
    ));

    // Booking a vacant unit under their own name works. The manager itself
    // performs no role checks, so the fixture can insert directly.
    apartments
        .add(Apartment::new("303", "", dec!(900), false, ""))
        .unwrap();
    session.require_regular("book an apartment").unwrap();
    apartments.book("303", session.username()).unwrap();
    let apt = apartments.find_by_number("303").unwrap();
    assert_eq!(apt.tenant_name, "user");
    assert!(apt.occupied);

    // Reservations only under their own name.
    assert!(session.reservation_name(Some("Alice Smith")).is_err());
    let holder = session.reservation_name(None).unwrap();
    parking.reserve("P01", &holder, "2025-03-01").unwrap();

    // May cancel their own reservation but not somebody else's.
    let own = parking.find_by_number("P01").unwrap();
    session.require_cancel_rights(&own).unwrap();
    parking.cancel("P01").unwrap();

    let other = parking.find_by_number("P02").unwrap();
    assert!(session.require_cancel_rights(&other).is_err());

    // Self-deletion is blocked regardless of role.
    assert!(matches!(
        session.require_not_self("USER").unwrap_err(),
        BusinessError::SelfDeletion
    ));
}
