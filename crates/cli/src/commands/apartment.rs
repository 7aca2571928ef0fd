//! Apartment subcommands.

use crate::{ApartmentAction, OutputFormat};
use anyhow::Result;
use aptman_business::{BusinessError, Session};
use aptman_core::Apartment;

use super::Managers;

pub fn handle(session: &Session, managers: &mut Managers, action: ApartmentAction) -> Result<()> {
    match action {
        ApartmentAction::Add {
            number,
            tenant,
            rent,
            occupied,
            document,
        } => {
            session.require_admin("add apartments")?;
            let apartment = Apartment::new(
                number.clone(),
                tenant,
                rent,
                occupied,
                document.unwrap_or_default(),
            );
            managers.apartments.add(apartment)?;
            println!("Apartment {} added.", number);
        }

        ApartmentAction::Update {
            number,
            tenant,
            rent,
            occupied,
            document,
        } => {
            session.require_admin("update apartments")?;
            // Build the full replacement record: omitted fields keep the
            // stored value.
            let current = managers
                .apartments
                .find_by_number(&number)
                .ok_or_else(|| BusinessError::not_found("apartment", &number))?;
            let replacement = Apartment::new(
                current.number.clone(),
                tenant.unwrap_or(current.tenant_name),
                rent.unwrap_or(current.rent),
                occupied.unwrap_or(current.occupied),
                document.unwrap_or(current.document_content),
            );
            managers.apartments.update(replacement)?;
            println!("Apartment {} updated.", current.number);
        }

        ApartmentAction::Delete { number } => {
            session.require_admin("delete apartments")?;
            managers.apartments.delete(&number)?;
            println!("Apartment {} deleted.", number);
        }

        ApartmentAction::Show { number } => {
            let apartment = managers
                .apartments
                .find_by_number(&number)
                .ok_or_else(|| BusinessError::not_found("apartment", &number))?;
            println!("{}", apartment);
            if apartment.has_document() {
                println!("--- Document ---");
                println!("{}", apartment.document_content);
            }
        }

        ApartmentAction::List { format } => {
            let apartments = managers.apartments.list_all();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&apartments)?);
                }
                OutputFormat::Table => {
                    println!(
                        "{:<10} {:<20} {:>12} {:<10} {:<8}",
                        "Apt No", "Tenant", "Rent", "Status", "Document"
                    );
                    for apt in &apartments {
                        println!(
                            "{:<10} {:<20} {:>12} {:<10} {:<8}",
                            apt.number,
                            apt.tenant_name,
                            apt.rent.to_string(),
                            apt.status_label(),
                            if apt.has_document() { "Yes" } else { "No" }
                        );
                    }
                    println!("Total: {} apartments", apartments.len());
                }
            }
        }

        ApartmentAction::Book { number } => {
            session.require_regular("book an apartment")?;
            managers.apartments.book(&number, session.username())?;
            println!("Apartment {} booked by {}.", number, session.username());
        }
    }

    Ok(())
}
