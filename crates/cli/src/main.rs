//! Brunela CLI - the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! brunela catalog list --tag premium --max 3000
//! brunela catalog show sabor4
//!
//! # Work with the active cart
//! brunela cart add sabor1
//! brunela cart set sabor1 3
//! brunela cart show
//!
//! # Price (and optionally add) a personalized cookie
//! brunela customize --shape heart --cream caramel --topping nuts --add
//!
//! # Accounts
//! brunela account register -n "Ana Gómez" -e ana@example.com -u ana -p secreto
//! brunela account login ana -p secreto
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, filter and show products
//! - `cart` - Show and change the active shopper's cart
//! - `customize` - Price a personalized cookie
//! - `account` - Register, login, logout, whoami
//! - `whatsapp` - Print an enquiry link for a product
//!
//! Storage location and shipping policy come from `BRUNELA_*` environment
//! variables (see `brunela_storefront::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brunela_storefront::config::StorefrontConfig;
use brunela_storefront::{AppError, Storefront};

mod commands;

#[derive(Parser)]
#[command(name = "brunela")]
#[command(author, version, about = "Brunela cookie storefront")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Manage the active cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Price a personalized cookie
    Customize(commands::customize::CustomizeArgs),
    /// Manage local accounts
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Print a WhatsApp enquiry link for a product
    Whatsapp {
        /// Product id, e.g. `sabor3` or `bolso-brunela`
        id: String,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "brunela_storefront=info,brunela_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        commands::output::failure(&e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(data_file = %config.data_file.display(), "opening storage");
    let shop = Storefront::open(config);
    let out = commands::output::Output::new(cli.json);

    match cli.command {
        Commands::Catalog { action } => commands::catalog::run(&shop, action, out)?,
        Commands::Cart { action } => commands::cart::run(&shop, action, out)?,
        Commands::Customize(args) => commands::customize::run(&shop, args, out)?,
        Commands::Account { action } => commands::account::run(&shop, action, out)?,
        Commands::Whatsapp { id } => {
            let url = shop.whatsapp_link(&id)?;
            out.line(url.as_str());
        }
    }
    Ok(())
}
