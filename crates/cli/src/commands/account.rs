//! Account subcommands. The whole group is admin-gated, mirroring the
//! account management surface being available to administrators only.

use crate::{AccountAction, OutputFormat};
use anyhow::Result;
use aptman_business::{BusinessError, Session};
use aptman_core::{Role, TenantAccount};
use serde::Serialize;

use super::Managers;

/// Listing row without the password field.
#[derive(Serialize)]
struct AccountRow<'a> {
    username: &'a str,
    role: Role,
}

pub fn handle(session: &Session, managers: &mut Managers, action: AccountAction) -> Result<()> {
    session.require_admin("manage accounts")?;

    match action {
        AccountAction::Add {
            username,
            password,
            role,
        } => {
            let account = TenantAccount::new(username.clone(), password, role.to_core_role());
            managers.accounts.add(account)?;
            println!("Account {} added.", username);
        }

        AccountAction::Update {
            username,
            password,
            role,
        } => {
            // Full replacement record; an omitted password keeps the stored
            // one, an omitted role keeps the stored role.
            let current = managers
                .accounts
                .find_by_username(&username)
                .ok_or_else(|| BusinessError::not_found("account", &username))?;
            let replacement = TenantAccount::new(
                current.username.clone(),
                password.unwrap_or(current.password),
                role.map(|r| r.to_core_role()).unwrap_or(current.role),
            );
            managers.accounts.update(replacement)?;
            println!("Account {} updated.", current.username);
        }

        AccountAction::Delete { username } => {
            session.require_not_self(&username)?;
            managers.accounts.delete(&username)?;
            println!("Account {} deleted.", username);
        }

        AccountAction::List { format } => {
            let accounts = managers.accounts.list_all();
            let rows: Vec<AccountRow> = accounts
                .iter()
                .map(|a| AccountRow {
                    username: &a.username,
                    role: a.role,
                })
                .collect();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                }
                OutputFormat::Table => {
                    println!("{:<20} {:<8}", "Username", "Role");
                    for row in &rows {
                        println!("{:<20} {:<8}", row.username, row.role);
                    }
                    println!("Total: {} accounts", rows.len());
                }
            }
        }
    }

    Ok(())
}
