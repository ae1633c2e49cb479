//! Kitchen CLI - account management for the kitchen ordering system.
//!
//! # Usage
//!
//! ```bash
//! # Register a customer and activate it
//! kitchen register -e greg.ton@example.com -f Greg -l Gregton -a "46 Greg Ave" -p Password1
//! kitchen activate <CODE>
//!
//! # Log in
//! kitchen login -e greg.ton@example.com -p Password1
//!
//! # Create a kitchen staff account
//! kitchen admin create -e staff@example.com -r kitchen_staff
//! ```
//!
//! # Commands
//!
//! - `register` / `activate` / `login` - Customer self-service
//! - `reset-password request|confirm` - Password reset
//! - `ban` / `unban` / `list` - Account administration
//! - `admin create` - Create kitchen staff and manager accounts
//!
//! Accounts persist in a JSON snapshot (`--store`, `KITCHEN_STORE_PATH`).
//! Emails are written to the log rather than sent.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use kitchen_accounts::{AccountManager, AccountsConfig, LogMailer};
use kitchen_core::Role;

use commands::{CliError, Manager};

mod commands;
mod snapshot;

#[derive(Parser)]
#[command(name = "kitchen")]
#[command(author, version, about = "Kitchen account management")]
struct Cli {
    /// Path to the JSON account snapshot
    #[arg(
        long,
        global = true,
        env = "KITCHEN_STORE_PATH",
        default_value = "kitchen-accounts.json"
    )]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a customer account
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        first_name: String,

        #[arg(short, long)]
        last_name: String,

        /// Home address, e.g. "46 Greg Ave"
        #[arg(short = 'a', long)]
        home_address: String,

        #[arg(short, long, env = "KITCHEN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Activate an account with the code from its verification email
    Activate { code: String },
    /// Check credentials
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "KITCHEN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Reset a forgotten password
    ResetPassword {
        #[command(subcommand)]
        action: ResetAction,
    },
    /// Ban an account
    Ban {
        #[arg(short, long)]
        email: String,
    },
    /// Lift a ban
    Unban {
        #[arg(short, long)]
        email: String,
    },
    /// List accounts
    List {
        /// Role to view accounts as (`customer`, `kitchen_staff`, `kitchen_manager`)
        #[arg(long, default_value = "kitchen_staff")]
        as_role: Role,
    },
    /// Manage kitchen staff accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ResetAction {
    /// Send a password reset email
    Request {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password with the code from the reset email
    Confirm {
        code: String,

        #[arg(short, long, env = "KITCHEN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a kitchen staff or manager account
    Create {
        #[arg(short, long)]
        email: String,

        /// Role (`kitchen_staff`, `kitchen_manager`)
        #[arg(short, long, default_value = "kitchen_staff")]
        role: Role,

        /// Role the operator acts as
        #[arg(long, default_value = "kitchen_manager")]
        as_role: Role,
    },
}

impl Commands {
    /// Whether the command can change stored accounts.
    const fn mutates(&self) -> bool {
        !matches!(self, Self::Login { .. } | Self::List { .. })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = AccountsConfig::from_env()?;
    let store = snapshot::load(&cli.store)?;
    let mut manager: Manager = AccountManager::new(store, LogMailer, config);

    let mutates = cli.command.mutates();
    dispatch(&mut manager, cli.command)?;

    if mutates {
        snapshot::save(&cli.store, manager.store())?;
    }
    Ok(())
}

fn dispatch(manager: &mut Manager, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Register {
            email,
            first_name,
            last_name,
            home_address,
            password,
        } => commands::account::register(
            manager,
            &email,
            &first_name,
            &last_name,
            &home_address,
            &SecretString::from(password),
        ),
        Commands::Activate { code } => commands::account::activate(manager, &code),
        Commands::Login { email, password } => {
            commands::account::login(manager, &email, &SecretString::from(password))
        }
        Commands::ResetPassword { action } => match action {
            ResetAction::Request { email } => {
                commands::account::request_password_reset(manager, &email)
            }
            ResetAction::Confirm { code, password } => commands::account::confirm_password_reset(
                manager,
                &code,
                &SecretString::from(password),
            ),
        },
        Commands::Ban { email } => commands::admin::set_banned(manager, &email, true),
        Commands::Unban { email } => commands::admin::set_banned(manager, &email, false),
        Commands::List { as_role } => {
            commands::admin::list(manager, as_role);
            Ok(())
        }
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                role,
                as_role,
            } => commands::admin::create(manager, as_role, &email, role),
        },
    }
}
