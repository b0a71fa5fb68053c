//! Bookshelf CLI - Command line driver for the bookshelf storefront.
//!
//! Commands:
//! - `bookshelf catalog` - List books and format prices
//! - `bookshelf cart` - Add, remove and inspect cart lines
//! - `bookshelf checkout` - Walk the checkout steps
//! - `bookshelf pay` - Open a hosted payment session
//! - `bookshelf reconcile` - Check a returned payment session
//! - `bookshelf blog` - Read and manage blog posts
//! - `bookshelf config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BlogArgs, CartArgs, CheckoutArgs, ConfigArgs, ReconcileArgs};

/// Bookshelf CLI - Shop the catalog and manage the author blog
#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books and their formats
    Catalog,

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Walk through the checkout steps
    Checkout(CheckoutArgs),

    /// Create a hosted payment session for the cart
    Pay,

    /// Check the outcome of a payment session
    Reconcile(ReconcileArgs),

    /// Read and manage blog posts
    Blog(BlogArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "bookshelf=debug" } else { "bookshelf=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog => commands::catalog::run(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Pay => commands::pay::run(&ctx).await,
        Commands::Reconcile(args) => commands::reconcile::run(args, &ctx).await,
        Commands::Blog(args) => commands::blog::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
