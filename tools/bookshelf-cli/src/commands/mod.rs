//! CLI command implementations.

pub mod blog;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod pay;
pub mod reconcile;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add one copy of a book format.
    Add {
        /// Book ID (see `bookshelf catalog`).
        book: String,
        /// Format: hardcover, paperback, ebook or kindle.
        format: String,
    },
    /// Remove a line.
    Remove {
        /// Format ID, e.g. `book1-paperback`.
        format_id: String,
    },
    /// Set the quantity of a line. Zero or less removes it.
    Qty {
        /// Format ID, e.g. `book1-paperback`.
        format_id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
}

/// Address fields shared by the contact and billing steps.
#[derive(Args, Default)]
pub struct AddressArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    /// Street address.
    #[arg(long)]
    pub address: Option<String>,
    /// Apartment, suite, etc.
    #[arg(long)]
    pub apt: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[command(subcommand)]
    pub command: Option<CheckoutCommand>,
}

#[derive(Subcommand)]
pub enum CheckoutCommand {
    /// Show the checkout state and totals (default).
    Show,
    /// Update contact and shipping details.
    Contact(AddressArgs),
    /// Choose a delivery method.
    Delivery {
        /// standard, express or overnight.
        method: String,
    },
    /// Billing address choice.
    Billing {
        /// Bill to a separate address instead of the shipping one.
        #[arg(long)]
        separate: bool,

        #[command(flatten)]
        address: AddressArgs,
    },
    /// Set the customer email.
    Email {
        email: String,
    },
    /// Validate the current step and move forward.
    Next,
    /// Move back one step.
    Back,
    /// Jump to a step (1-4) without validation.
    Step {
        number: u8,
    },
    /// Discard all checkout details.
    Reset,
}

/// Arguments for the reconcile command.
#[derive(Args)]
pub struct ReconcileArgs {
    /// Session ID from the return URL.
    pub session_id: Option<String>,
}

/// Arguments for the blog command.
#[derive(Args)]
pub struct BlogArgs {
    #[command(subcommand)]
    pub command: BlogCommand,
}

/// Post fields for create and update.
#[derive(Args)]
pub struct PostArgs {
    #[arg(long)]
    pub title: Option<String>,
    /// HTML content.
    #[arg(long)]
    pub content: Option<String>,
    /// Read HTML content from a file.
    #[arg(long, conflicts_with = "content")]
    pub content_file: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub excerpt: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    /// Tag (repeatable).
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Subcommand)]
pub enum BlogCommand {
    /// List posts, newest first.
    List,
    /// Show a post.
    Get {
        /// Post ID.
        id: String,
    },
    /// Create a post.
    Create {
        #[command(flatten)]
        post: PostArgs,
        /// Admin token (defaults to the configured environment variable).
        #[arg(long)]
        token: Option<String>,
    },
    /// Update a post.
    Update {
        /// Post ID.
        id: String,
        #[command(flatten)]
        post: PostArgs,
        /// Admin token (defaults to the configured environment variable).
        #[arg(long)]
        token: Option<String>,
    },
    /// Delete a post.
    Delete {
        /// Post ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
        /// Admin token (defaults to the configured environment variable).
        #[arg(long)]
        token: Option<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
