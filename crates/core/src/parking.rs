//! Parking spot record and its store line codec.
//!
//! A spot is either vacant or reserved. The two reservation fields exist
//! exactly when `reserved` is true; the store writes them as empty strings
//! for a vacant spot and reads empty back as absent.

use crate::record::StoreRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parking spot.
///
/// `spot_number` is the unique identifier (matched case-insensitively) and
/// is immutable once the record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub spot_number: String,
    pub reserved: bool,
    /// Tenant name holding the reservation; `None` while vacant.
    pub reserved_by: Option<String>,
    /// Reservation date in `YYYY-MM-DD` form; `None` while vacant.
    pub reservation_date: Option<String>,
}

impl ParkingSpot {
    pub fn new(
        spot_number: impl Into<String>,
        reserved: bool,
        reserved_by: Option<String>,
        reservation_date: Option<String>,
    ) -> Self {
        Self {
            spot_number: spot_number.into(),
            reserved,
            reserved_by,
            reservation_date,
        }
    }

    /// A spot with no reservation.
    pub fn vacant(spot_number: impl Into<String>) -> Self {
        Self::new(spot_number, false, None, None)
    }

    /// A spot created already reserved.
    pub fn reserved_for(
        spot_number: impl Into<String>,
        tenant_name: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self::new(
            spot_number,
            true,
            Some(tenant_name.into()),
            Some(date.into()),
        )
    }

    /// Reservation invariant: `reserved == false` iff both reservation
    /// fields are absent.
    pub fn is_consistent(&self) -> bool {
        if self.reserved {
            self.reserved_by.is_some() && self.reservation_date.is_some()
        } else {
            self.reserved_by.is_none() && self.reservation_date.is_none()
        }
    }
}

impl fmt::Display for ParkingSpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reserved_by, &self.reservation_date) {
            (Some(by), Some(date)) if self.reserved => {
                write!(f, "Spot {}: reserved by {} for {}", self.spot_number, by, date)
            }
            _ => write!(f, "Spot {}: vacant", self.spot_number),
        }
    }
}

impl StoreRecord for ParkingSpot {
    const STORE_FILE: &'static str = "parking_lots.dat";

    fn key(&self) -> &str {
        &self.spot_number
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.spot_number,
            self.reserved,
            self.reserved_by.as_deref().unwrap_or(""),
            self.reservation_date.as_deref().unwrap_or("")
        )
    }

    fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 4 {
            return None;
        }
        let reserved = match parts[1] {
            "true" => true,
            "false" => false,
            _ => return None,
        };
        let non_empty = |s: &str| {
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };
        Some(Self {
            spot_number: parts[0].to_string(),
            reserved,
            reserved_by: non_empty(parts[2]),
            reservation_date: non_empty(parts[3]),
        })
    }
}
