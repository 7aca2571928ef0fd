//! Apartment record and its store line codec.
//!
//! An apartment line is `number,tenant,rent,occupied,document`. Only the
//! first four commas split the line, so the free-form document content may
//! itself contain commas. Embedded newlines in the document are escaped as
//! a literal `\n` (carriage returns are stripped) so one record stays one
//! line on disk.

use crate::record::StoreRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One apartment unit.
///
/// `number` is the unique identifier (matched case-insensitively) and is
/// immutable once the record exists; every other field may change through
/// an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    /// Unit number, e.g. "101".
    pub number: String,
    /// Current tenant; blank when the unit has no assigned tenant.
    pub tenant_name: String,
    /// Monthly rent, non-negative.
    pub rent: Decimal,
    /// Whether the unit is currently let.
    pub occupied: bool,
    /// Free-form lease notes, may be empty.
    pub document_content: String,
}

impl Apartment {
    pub fn new(
        number: impl Into<String>,
        tenant_name: impl Into<String>,
        rent: Decimal,
        occupied: bool,
        document_content: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            tenant_name: tenant_name.into(),
            rent,
            occupied,
            document_content: document_content.into(),
        }
    }

    /// Whether any lease notes are attached.
    pub fn has_document(&self) -> bool {
        !self.document_content.trim().is_empty()
    }

    /// "Occupied" / "Available" label used by listings.
    pub fn status_label(&self) -> &'static str {
        if self.occupied {
            "Occupied"
        } else {
            "Available"
        }
    }
}

impl fmt::Display for Apartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Apt No: {} | Tenant: {} | Rent: ${} | Status: {} | Content: {}",
            self.number,
            self.tenant_name,
            self.rent,
            self.status_label(),
            if self.has_document() { "Yes" } else { "No" }
        )
    }
}

impl StoreRecord for Apartment {
    const STORE_FILE: &'static str = "apartments.dat";

    fn key(&self) -> &str {
        &self.number
    }

    fn to_line(&self) -> String {
        let safe_document = self.document_content.replace('\r', "").replace('\n', "\\n");
        format!(
            "{},{},{},{},{}",
            self.number, self.tenant_name, self.rent, self.occupied, safe_document
        )
    }

    fn parse_line(line: &str) -> Option<Self> {
        // Max 5 fields: the document content keeps its commas.
        let parts: Vec<&str> = line.splitn(5, ',').collect();
        if parts.len() != 5 {
            return None;
        }
        let rent = parts[2].parse::<Decimal>().ok()?;
        let occupied = match parts[3] {
            "true" => true,
            "false" => false,
            _ => return None,
        };
        Some(Self {
            number: parts[0].to_string(),
            tenant_name: parts[1].to_string(),
            rent,
            occupied,
            document_content: parts[4].replace("\\n", "\n"),
        })
    }
}
