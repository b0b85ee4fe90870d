//! Storefront CLI - browse the catalog, manage the cart, check out.
//!
//! Each invocation is one page load: state is rehydrated from the store,
//! one command runs, and the result is written back.
//!
//! # Usage
//!
//! ```bash
//! storefront catalog
//! storefront add 1
//! storefront qty 1 -1
//! storefront cart
//! storefront checkout begin
//! storefront checkout freight 18200-000
//! storefront checkout finalize
//! ```
//!
//! # Environment
//!
//! - `RUST_LOG` - log filter (default `info,storefront=debug,sqlx=warn`)
//! - `STOREFRONT_DB_PATH`, `STOREFRONT_PRICING_URL`, `STOREFRONT_CATALOG_URL`
//!   and friends override the config file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod format;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Lava-louças industriais: catálogo, carrinho e checkout")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite store file (overrides config and environment)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Catalog,
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        id: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: u32,
    },
    /// Change a product's quantity by a delta (e.g. 2 or -1)
    Qty {
        /// Product id
        id: u32,
        /// Quantity change
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Show the cart
    Cart,
    /// Empty the cart
    Clear,
    /// Checkout steps
    Checkout {
        #[command(subcommand)]
        step: CheckoutStep,
    },
}

#[derive(Subcommand)]
enum CheckoutStep {
    /// Freeze the cart total and start checkout
    Begin,
    /// Quote freight for a postal code or city
    Freight {
        /// Postal code or city name
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Quote freight for a distance in km
    Distance {
        /// Distance, `,` or `.` as decimal separator
        km: String,
    },
    /// Show the checkout in progress
    Show,
    /// Place the order
    Finalize,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        eprintln!("Erro: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let page = commands::Page::open(cli.config, cli.db).await?;

    match cli.command {
        Commands::Catalog => commands::catalog::list(&page).await?,
        Commands::Add { id } => commands::cart::add(&page, id).await?,
        Commands::Remove { id } => commands::cart::remove(&page, id).await?,
        Commands::Qty { id, delta } => commands::cart::set_quantity(&page, id, delta).await?,
        Commands::Cart => commands::cart::show(&page).await?,
        Commands::Clear => commands::cart::clear(&page).await?,
        Commands::Checkout { step } => match step {
            CheckoutStep::Begin => commands::checkout::begin(&page).await?,
            CheckoutStep::Freight { query } => {
                commands::checkout::freight(&page, &query.join(" ")).await?
            }
            CheckoutStep::Distance { km } => commands::checkout::distance(&page, &km).await?,
            CheckoutStep::Show => commands::checkout::show(&page).await?,
            CheckoutStep::Finalize => commands::checkout::finalize(&page).await?,
        },
    }

    page.close().await;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so command output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_delta_parses() {
        let cli = Cli::try_parse_from(["storefront", "qty", "1", "-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Qty { id: 1, delta: -1 }));
    }

    #[test]
    fn test_multi_word_freight_query() {
        let cli =
            Cli::try_parse_from(["storefront", "checkout", "freight", "Santo", "André"]).unwrap();
        let Commands::Checkout {
            step: CheckoutStep::Freight { query },
        } = cli.command
        else {
            panic!("expected checkout freight");
        };
        assert_eq!(query.join(" "), "Santo André");
    }
}
