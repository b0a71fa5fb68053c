//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", path),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let storage = &ctx.config.storage;
    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("cart_key", &storage.cart_key);
    ctx.output.kv("checkout_key", &storage.checkout_key);
    ctx.output.kv("blog_key", &storage.blog_key);

    let payment = &ctx.config.payment;
    ctx.output.info("");
    ctx.output.info("[payment]");
    ctx.output.kv("api_base", &payment.api_base);
    ctx.output.kv("site_origin", &payment.site_origin);
    ctx.output.kv("timeout_secs", &payment.timeout_secs.to_string());
    ctx.output
        .kv("allowed_countries", &payment.allowed_countries.join(", "));
    ctx.output.kv(
        "secret_key_env",
        &env_status(&payment.secret_key_env),
    );

    ctx.output.info("");
    ctx.output.info("[blog]");
    ctx.output.kv(
        "admin_token_env",
        &env_status(&ctx.config.blog.admin_token_env),
    );

    Ok(())
}

/// Name of a secret-holding variable and whether it is set. Never the value.
fn env_status(var: &str) -> String {
    let set = std::env::var(var).map(|v| !v.trim().is_empty()).unwrap_or(false);
    format!("{} ({})", var, if set { "set" } else { "not set" })
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("bookshelf.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
