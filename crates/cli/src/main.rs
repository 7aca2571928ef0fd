//! Aptman CLI - apartment, account and parking management from the command line
//!
//! One invocation is one logged-in session: credentials open the session,
//! the command runs against the record managers, and the stores are saved
//! on the way out (skip with `--no-save`).
//!
//! Usage:
//! ```bash
//! aptman --user admin --password adminpass apartment add 102 --rent 1500
//! aptman --user admin --password adminpass apartment list
//! aptman --user user --password password apartment book 102
//! aptman --user user --password password parking reserve P01 --date 2025-03-01
//! aptman --user admin --password adminpass account add carol s3cret --role regular
//! ```

use anyhow::{Context, Result};
use aptman_business::Session;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;

use commands::{account, apartment, parking, Managers};

/// Aptman - record management for a small residential building
#[derive(Parser)]
#[command(name = "aptman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding the record stores
    #[arg(long, default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Username to log in as
    #[arg(long, short, global = true)]
    pub user: Option<String>,

    /// Password for the account
    #[arg(long, short, global = true)]
    pub password: Option<String>,

    /// Discard in-memory changes instead of saving the stores on exit
    #[arg(long, global = true)]
    pub no_save: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apartment inventory and occupancy
    Apartment {
        #[command(subcommand)]
        action: ApartmentAction,
    },

    /// Tenant accounts (admin only)
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Parking spots and reservations
    Parking {
        #[command(subcommand)]
        action: ParkingAction,
    },
}

#[derive(Subcommand)]
pub enum ApartmentAction {
    /// Add a new apartment (admin)
    Add {
        /// Unit number (e.g. 101)
        number: String,
        /// Tenant name; blank means vacant
        #[arg(long, default_value = "")]
        tenant: String,
        /// Monthly rent
        #[arg(long)]
        rent: Decimal,
        /// Whether the unit is currently let
        #[arg(long)]
        occupied: bool,
        /// Lease notes
        #[arg(long)]
        document: Option<String>,
    },
    /// Update an existing apartment; omitted fields keep their value (admin)
    Update {
        /// Unit number of the apartment to update
        number: String,
        #[arg(long)]
        tenant: Option<String>,
        #[arg(long)]
        rent: Option<Decimal>,
        /// true or false
        #[arg(long)]
        occupied: Option<bool>,
        #[arg(long)]
        document: Option<String>,
    },
    /// Delete an apartment (admin)
    Delete {
        number: String,
    },
    /// Show one apartment including its lease notes
    Show {
        number: String,
    },
    /// List all apartments
    List {
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Book a vacant apartment under your own name (regular tenants)
    Book {
        number: String,
    },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Add a new account
    Add {
        username: String,
        password: String,
        #[arg(long, default_value = "regular")]
        role: RoleArg,
    },
    /// Update an account; an omitted password keeps the stored one
    Update {
        username: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<RoleArg>,
    },
    /// Delete an account (not your own)
    Delete {
        username: String,
    },
    /// List all accounts (passwords are never shown)
    List {
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum ParkingAction {
    /// Add a new parking spot (admin)
    Add {
        /// Spot number (e.g. P06)
        spot_number: String,
        /// Create the spot already reserved for this tenant
        #[arg(long, requires = "date")]
        reserved_by: Option<String>,
        /// Reservation date (YYYY-MM-DD), required with --reserved-by
        #[arg(long, requires = "reserved_by")]
        date: Option<String>,
    },
    /// Delete a parking spot (admin)
    Delete {
        spot_number: String,
    },
    /// Reserve a vacant spot
    Reserve {
        spot_number: String,
        /// Reservation date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Tenant to hold the reservation (admins only; defaults to you)
        #[arg(long, value_name = "TENANT")]
        r#for: Option<String>,
    },
    /// Cancel a reservation (your own, or any as admin)
    Cancel {
        spot_number: String,
    },
    /// List all parking spots
    List {
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Admin,
    Regular,
}

impl RoleArg {
    pub fn to_core_role(self) -> aptman_core::Role {
        match self {
            RoleArg::Admin => aptman_core::Role::Admin,
            RoleArg::Regular => aptman_core::Role::Regular,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let user = cli
        .user
        .as_deref()
        .context("missing --user: every command runs inside a logged-in session")?;
    let password = cli
        .password
        .as_deref()
        .context("missing --password: every command runs inside a logged-in session")?;

    let mut managers = Managers::open(&cli.data_dir);
    let session = Session::log_in(&managers.accounts, user, password)?;
    tracing::debug!(user = session.username(), role = %session.role(), "session opened");

    match cli.command {
        Commands::Apartment { action } => apartment::handle(&session, &mut managers, action)?,
        Commands::Account { action } => account::handle(&session, &mut managers, action)?,
        Commands::Parking { action } => parking::handle(&session, &mut managers, action)?,
    }

    if cli.no_save {
        tracing::debug!("exiting without saving, changes discarded");
    } else {
        managers.save_all(&session);
    }

    Ok(())
}
