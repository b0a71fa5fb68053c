//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use bookshelf_commerce::cart::CART_STORAGE_KEY;
use bookshelf_commerce::checkout::CHECKOUT_STORAGE_KEY;
use bookshelf_commerce::payment::{StripeConfig, DEFAULT_STRIPE_API_BASE};

/// File names searched for, in order, when no `--config` is given.
pub const CONFIG_NAMES: [&str; 3] = ["bookshelf.toml", ".bookshelf.toml", "bookshelf.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Local state storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Payment provider settings.
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Blog settings.
    #[serde(default)]
    pub blog: BlogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Find a config file in `start` or any parent directory.
    pub fn find(start: &Path) -> Option<(String, Self)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    let path = config_path.to_str()?.to_string();
                    match Self::load(&path) {
                        Ok(config) => return Some((path, config)),
                        Err(e) => tracing::warn!(path = %path, error = %e, "skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }
}

/// Where cart, checkout and blog state live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage directory, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    #[serde(default = "default_checkout_key")]
    pub checkout_key: String,

    #[serde(default = "default_blog_key")]
    pub blog_key: String,
}

fn default_storage_dir() -> String {
    ".bookshelf".to_string()
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

fn default_checkout_key() -> String {
    CHECKOUT_STORAGE_KEY.to_string()
}

fn default_blog_key() -> String {
    bookshelf_blog::default_key()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            cart_key: default_cart_key(),
            checkout_key: default_checkout_key(),
            blog_key: default_blog_key(),
        }
    }
}

/// Payment provider configuration. The secret key itself is read from
/// the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable holding the secret API key.
    #[serde(default = "default_secret_key_env")]
    pub secret_key_env: String,

    /// Public site origin for return and image URLs.
    #[serde(default = "default_site_origin")]
    pub site_origin: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Countries shipping addresses may be collected for.
    #[serde(default = "default_allowed_countries")]
    pub allowed_countries: Vec<String>,
}

fn default_api_base() -> String {
    DEFAULT_STRIPE_API_BASE.to_string()
}

fn default_secret_key_env() -> String {
    "STRIPE_SECRET_KEY".to_string()
}

fn default_site_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_allowed_countries() -> Vec<String> {
    ["US", "CA", "GB", "AU"].map(String::from).to_vec()
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            secret_key_env: default_secret_key_env(),
            site_origin: default_site_origin(),
            timeout_secs: default_timeout_secs(),
            allowed_countries: default_allowed_countries(),
        }
    }
}

impl PaymentConfig {
    /// Build the provider settings around a secret key.
    pub fn stripe_config(&self, secret_key: SecretString) -> StripeConfig {
        let mut config = StripeConfig::new(secret_key, self.site_origin.clone());
        config.api_base = self.api_base.clone();
        config.allowed_countries = self.allowed_countries.clone();
        config.timeout = Duration::from_secs(self.timeout_secs);
        config
    }
}

/// Blog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Environment variable holding the admin token.
    #[serde(default = "default_admin_token_env")]
    pub admin_token_env: String,
}

fn default_admin_token_env() -> String {
    "BLOG_ADMIN_TOKEN".to_string()
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            admin_token_env: default_admin_token_env(),
        }
    }
}

/// Generate a default bookshelf.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Bookshelf storefront configuration

[storage]
dir = "{dir}"
cart_key = "{cart_key}"
checkout_key = "{checkout_key}"
blog_key = "{blog_key}"

[payment]
api_base = "{api_base}"
# The secret key is read from this environment variable (or .env).
secret_key_env = "STRIPE_SECRET_KEY"
site_origin = "http://localhost:3000"
timeout_secs = 30
allowed_countries = ["US", "CA", "GB", "AU"]

[blog]
# Writes are disabled unless this environment variable is set.
admin_token_env = "BLOG_ADMIN_TOKEN"
"#,
        dir = default_storage_dir(),
        cart_key = default_cart_key(),
        checkout_key = default_checkout_key(),
        blog_key = default_blog_key(),
        api_base = default_api_base(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.storage.dir, ".bookshelf");
        assert_eq!(config.storage.cart_key, "cart-state");
        assert_eq!(config.storage.checkout_key, "checkoutState");
        assert_eq!(config.storage.blog_key, "blog:posts");
        assert_eq!(config.payment.api_base, "https://api.stripe.com");
        assert_eq!(config.payment.timeout_secs, 30);
        assert_eq!(config.blog.admin_token_env, "BLOG_ADMIN_TOKEN");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
[payment]
site_origin = "https://books.example.com"
"#,
        )
        .unwrap();
        assert_eq!(config.payment.site_origin, "https://books.example.com");
        assert_eq!(config.payment.secret_key_env, "STRIPE_SECRET_KEY");
        assert_eq!(config.payment.allowed_countries, vec!["US", "CA", "GB", "AU"]);
        assert_eq!(config.storage.cart_key, "cart-state");
    }

    #[test]
    fn test_stripe_config_from_payment_section() {
        let payment = PaymentConfig {
            api_base: "http://127.0.0.1:12111".to_string(),
            timeout_secs: 5,
            allowed_countries: vec!["US".to_string()],
            ..Default::default()
        };
        let stripe = payment.stripe_config(SecretString::from("sk_test_123".to_string()));
        assert_eq!(stripe.api_base, "http://127.0.0.1:12111");
        assert_eq!(stripe.timeout, Duration::from_secs(5));
        assert_eq!(stripe.allowed_countries, vec!["US"]);
        assert_eq!(
            stripe.return_url(),
            "http://localhost:3000/checkout/return?session_id={CHECKOUT_SESSION_ID}"
        );
    }
}
