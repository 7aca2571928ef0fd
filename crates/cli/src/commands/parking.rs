//! Parking subcommands.
//!
//! Date validation happens here, before the manager is called: the manager
//! trusts the caller to have checked the `YYYY-MM-DD` form.

use crate::{OutputFormat, ParkingAction};
use anyhow::{Context, Result};
use aptman_business::{BusinessError, Session};
use aptman_core::ParkingSpot;
use chrono::{Local, NaiveDate};

use super::Managers;

fn validate_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid reservation date '{}', expected YYYY-MM-DD", date))?;
    Ok(())
}

pub fn handle(session: &Session, managers: &mut Managers, action: ParkingAction) -> Result<()> {
    match action {
        ParkingAction::Add {
            spot_number,
            reserved_by,
            date,
        } => {
            session.require_admin("add parking spots")?;
            let spot = match (reserved_by, date) {
                (Some(tenant), Some(date)) => {
                    validate_date(&date)?;
                    ParkingSpot::reserved_for(spot_number.clone(), tenant, date)
                }
                _ => ParkingSpot::vacant(spot_number.clone()),
            };
            managers.parking.add(spot)?;
            println!("Parking spot {} added.", spot_number);
        }

        ParkingAction::Delete { spot_number } => {
            session.require_admin("delete parking spots")?;
            managers.parking.delete(&spot_number)?;
            println!("Parking spot {} deleted.", spot_number);
        }

        ParkingAction::Reserve {
            spot_number,
            date,
            r#for,
        } => {
            let date = match date {
                Some(date) => {
                    validate_date(&date)?;
                    date
                }
                None => Local::now().date_naive().to_string(),
            };
            let holder = session.reservation_name(r#for.as_deref())?;
            managers.parking.reserve(&spot_number, &holder, &date)?;
            println!("Spot {} reserved by {} for {}.", spot_number, holder, date);
        }

        ParkingAction::Cancel { spot_number } => {
            let spot = managers
                .parking
                .find_by_number(&spot_number)
                .ok_or_else(|| BusinessError::not_found("parking spot", &spot_number))?;
            session.require_cancel_rights(&spot)?;
            managers.parking.cancel(&spot_number)?;
            println!("Reservation for spot {} cancelled.", spot_number);
        }

        ParkingAction::List { format } => {
            let spots = managers.parking.list_all();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&spots)?);
                }
                OutputFormat::Table => {
                    println!(
                        "{:<10} {:<9} {:<20} {:<12}",
                        "Spot No", "Reserved", "Reserved By", "Date"
                    );
                    for spot in &spots {
                        println!(
                            "{:<10} {:<9} {:<20} {:<12}",
                            spot.spot_number,
                            if spot.reserved { "Yes" } else { "No" },
                            spot.reserved_by.as_deref().unwrap_or("N/A"),
                            spot.reservation_date.as_deref().unwrap_or("N/A")
                        );
                    }
                    println!("Total: {} spots", spots.len());
                }
            }
        }
    }

    Ok(())
}
