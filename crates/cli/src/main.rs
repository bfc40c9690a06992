//! ShopSphere CLI - Session store migrations, fixture seeding, and user management.
//!
//! # Usage
//!
//! ```bash
//! # Create the session store schema
//! shopsphere migrate
//!
//! # Write the sample fixtures into the data directory
//! shopsphere seed
//!
//! # Create a user account
//! shopsphere user create -e admin@example.com -n "Admin Name" -r admin -p "a strong password"
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the tower-sessions schema in the `SQLite` store
//! - `seed` - Write sample products/users/orders/settings fixtures
//! - `user create` - Append a user to the `users.json` fixture

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopsphere")]
#[command(author, version, about = "ShopSphere CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the session store schema
    Migrate,
    /// Write sample fixtures into the data directory
    Seed {
        /// Overwrite existing fixture files
        #[arg(long)]
        force: bool,
    },
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user account
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`user`, `admin`, `superadmin`)
        #[arg(short, long, default_value = "user")]
        role: String,

        /// Password (hashed with Argon2id before storage)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { force } => commands::seed::run(force)?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                role,
                password,
            } => {
                commands::user::create(&email, &name, &role, &password)?;
            }
        },
    }
    Ok(())
}
