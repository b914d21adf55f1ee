//! Menu cart CLI - inspect and change the device's catalog snapshot and cart.
//!
//! # Usage
//!
//! ```bash
//! # Fetch the catalog and cache the snapshot
//! menu-cart catalog fetch
//!
//! # List products, optionally one category
//! menu-cart catalog show --category breakfast
//!
//! # Work with the cart
//! menu-cart cart add 1
//! menu-cart cart decrement 1
//! menu-cart cart show
//! ```
//!
//! The data directory defaults to `MENU_CART_DATA_DIR` and can be overridden
//! with `--data-dir`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use menu_cart_core::ProductId;

mod commands;

use commands::cart::CartChange;

#[derive(Parser)]
#[command(name = "menu-cart")]
#[command(author, version, about = "Menu cart CLI tools")]
struct Cli {
    /// Device storage directory (defaults to `MENU_CART_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the catalog snapshot
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Work with the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Fetch the catalog and save the snapshot
    Fetch,
    /// List the products in the snapshot
    Show {
        /// Only list this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List lines, item count and total
    Show,
    /// Add a product from the snapshot
    Add { id: String },
    /// Raise a line's amount by one
    Increment { id: String },
    /// Lower a line's amount by one, removing it at zero
    Decrement { id: String },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

impl CartAction {
    /// The mutation this action performs, or `None` for `show`.
    fn into_change(self) -> Option<CartChange> {
        Some(match self {
            Self::Show => return None,
            Self::Add { id } => CartChange::Add(ProductId::new(id)),
            Self::Increment { id } => CartChange::Increment(ProductId::new(id)),
            Self::Decrement { id } => CartChange::Decrement(ProductId::new(id)),
            Self::Remove { id } => CartChange::Remove(ProductId::new(id)),
            Self::Clear => CartChange::Clear,
        })
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = cli
        .data_dir
        .unwrap_or_else(menu_cart_storefront::config::data_dir_from_env);
    let mut out = std::io::stdout();

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Fetch => {
                let count = commands::catalog::fetch(&data_dir).await?;
                writeln!(out, "fetched {count} products")?;
            }
            CatalogAction::Show { category } => {
                commands::catalog::show(&data_dir, category.as_deref(), &mut out)?;
            }
        },
        Commands::Cart { action } => match action.into_change() {
            Some(change) => commands::cart::apply(&data_dir, &change, &mut out)?,
            None => commands::cart::show(&data_dir, &mut out)?,
        },
    }
    Ok(())
}
