//! CLI execution context.

use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};
use secrecy::SecretString;

use bookshelf_blog::{AdminSecret, AdminToken, StoredBlog};
use bookshelf_cache::FileStorage;
use bookshelf_commerce::prelude::*;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<String>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Books for sale.
    pub catalog: Catalog,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config_path, config) = match config_path {
            Some(path) => (Some(path.to_string()), CliConfig::load(path)?),
            None => match CliConfig::find(&cwd) {
                Some((path, config)) => (Some(path), config),
                None => (None, CliConfig::default()),
            },
        };

        match &config_path {
            Some(path) => output.debug(&format!("Using config: {}", path)),
            None => output.debug("No config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            catalog: Catalog::default(),
        })
    }

    /// Directory the local state is kept in.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    fn storage(&self) -> Result<FileStorage> {
        let dir = self.storage_dir();
        FileStorage::open(&dir)
            .with_context(|| format!("Failed to open storage directory: {}", dir.display()))
    }

    /// Open the persisted cart.
    pub fn cart(&self) -> Result<CartStore<FileStorage>> {
        Ok(CartStore::open_with_key(
            self.storage()?,
            self.config.storage.cart_key.clone(),
        ))
    }

    /// Open the persisted checkout.
    pub fn checkout(&self) -> Result<CheckoutStateMachine<FileStorage>> {
        Ok(CheckoutStateMachine::open_with_key(
            self.storage()?,
            self.config.storage.checkout_key.clone(),
        ))
    }

    /// Build the orchestrator against the configured payment provider.
    pub fn orchestrator(&self) -> Result<CheckoutOrchestrator<StripeSessionService>> {
        let payment = &self.config.payment;
        let secret_key = read_secret(&payment.secret_key_env).ok_or_else(|| {
            anyhow!(
                "Payment provider key not set. Export {} or add it to .env",
                payment.secret_key_env
            )
        })?;

        let service = StripeSessionService::new(payment.stripe_config(secret_key))
            .context("Failed to create payment client")?;
        Ok(CheckoutOrchestrator::new(
            service,
            payment.site_origin.clone(),
        ))
    }

    /// Open the blog store, guarded by the configured admin secret.
    pub fn blog(&self) -> Result<StoredBlog<FileStorage>> {
        let env = &self.config.blog.admin_token_env;
        let secret = AdminSecret::from_optional(std::env::var(env).ok());
        if !secret.is_enabled() {
            self.output
                .debug(&format!("{} is not set; blog writes are disabled", env));
        }
        Ok(StoredBlog::with_key(
            self.storage()?,
            self.config.storage.blog_key.clone(),
            secret,
        ))
    }

    /// Token presented for blog writes: the explicit one, else the
    /// configured environment variable.
    pub fn admin_token(&self, explicit: Option<String>) -> Result<AdminToken> {
        let env = &self.config.blog.admin_token_env;
        explicit
            .or_else(|| std::env::var(env).ok())
            .filter(|t| !t.trim().is_empty())
            .map(AdminToken::new)
            .ok_or_else(|| anyhow!("No admin token given. Pass --token or set {}", env))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

fn read_secret(var: &str) -> Option<SecretString> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}
