//! Stripe Checkout Sessions client.

use crate::ids::SessionId;
use crate::money::{Currency, Money, STORE_CURRENCY};
use crate::payment::{
    CreatedSession, PaymentServiceError, PaymentSession, PaymentSessionService, PaymentStatus,
    SessionRequest,
};
use async_trait::async_trait;
use bookshelf_data::{FetchClient, FetchError, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// Default Stripe API endpoint.
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

const SESSIONS_PATH: &str = "/v1/checkout/sessions";

const SESSION_OBJECT: &str = "checkout.session";

/// Settings for [`StripeSessionService`].
#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub api_base: String,
    pub secret_key: SecretString,
    /// Site origin the return URL is built from.
    pub site_origin: String,
    /// ISO country codes shipping may be collected for.
    pub allowed_countries: Vec<String>,
    pub timeout: Duration,
}

impl StripeConfig {
    pub fn new(secret_key: SecretString, site_origin: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_STRIPE_API_BASE.to_string(),
            secret_key,
            site_origin: site_origin.into(),
            allowed_countries: ["US", "CA", "GB", "AU"].map(String::from).to_vec(),
            timeout: bookshelf_data::DEFAULT_TIMEOUT,
        }
    }

    /// Where the hosted page sends the shopper when done.
    pub fn return_url(&self) -> String {
        format!(
            "{}/checkout/return?session_id={{CHECKOUT_SESSION_ID}}",
            self.site_origin.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    #[serde(default)]
    object: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    amount_total: Option<i64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    customer_details: Option<StripeCustomerDetails>,
}

#[derive(Debug, Deserialize)]
struct StripeCustomerDetails {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// [`PaymentSessionService`] backed by Stripe embedded Checkout.
#[derive(Debug, Clone)]
pub struct StripeSessionService {
    client: FetchClient,
    config: StripeConfig,
}

impl StripeSessionService {
    pub fn new(config: StripeConfig) -> Result<Self, FetchError> {
        let client = FetchClient::new()?
            .with_base_url(config.api_base.clone())
            .with_timeout(config.timeout);
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Form body for `POST /v1/checkout/sessions`.
    pub fn form_fields(&self, request: &SessionRequest) -> Vec<(String, String)> {
        let currency = request.currency.code().to_lowercase();
        let mut fields = vec![
            ("ui_mode".to_string(), "embedded".to_string()),
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("return_url".to_string(), self.config.return_url()),
        ];

        for (i, country) in self.config.allowed_countries.iter().enumerate() {
            fields.push((
                format!("shipping_address_collection[allowed_countries][{i}]"),
                country.clone(),
            ));
        }

        for (i, item) in request.line_items.iter().enumerate() {
            let prefix = format!("line_items[{i}]");
            fields.push((format!("{prefix}[price_data][currency]"), currency.clone()));
            fields.push((
                format!("{prefix}[price_data][product_data][name]"),
                item.name.clone(),
            ));
            fields.push((
                format!("{prefix}[price_data][product_data][description]"),
                item.description.clone(),
            ));
            if let Some(image) = &item.image_url {
                fields.push((
                    format!("{prefix}[price_data][product_data][images][0]"),
                    image.clone(),
                ));
            }
            fields.push((
                format!("{prefix}[price_data][unit_amount]"),
                item.unit_amount.amount_cents.to_string(),
            ));
            fields.push((format!("{prefix}[quantity]"), item.quantity.to_string()));
        }

        for (key, value) in request.metadata.entries() {
            fields.push((format!("metadata[{key}]"), value));
        }

        if let Some(email) = &request.customer_email {
            fields.push(("customer_email".to_string(), email.clone()));
        }

        fields
    }
}

fn transport(err: FetchError) -> PaymentServiceError {
    PaymentServiceError::Transport(err.to_string())
}

fn rejected(response: &Response) -> PaymentServiceError {
    PaymentServiceError::Rejected {
        status: response.status,
        message: response.error_message(),
    }
}

/// Path of a single session, or `None` when the id could escape the
/// sessions collection. Provider ids are ASCII letters, digits and `_`.
fn session_path(id: &SessionId) -> Option<String> {
    let id = id.as_str();
    let valid = !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    valid.then(|| format!("{SESSIONS_PATH}/{id}"))
}

fn map_status(session: &StripeCheckoutSession) -> PaymentStatus {
    if session.payment_status.as_deref() == Some("paid") {
        PaymentStatus::Paid
    } else if session.status.as_deref() == Some("expired") {
        PaymentStatus::Failed
    } else {
        PaymentStatus::Pending
    }
}

#[async_trait]
impl PaymentSessionService for StripeSessionService {
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<CreatedSession, PaymentServiceError> {
        let response = self
            .client
            .post(SESSIONS_PATH)
            .bearer_auth(self.config.secret_key.expose_secret())
            .form(&self.form_fields(request))
            .send()
            .await
            .map_err(transport)?;

        if !response.is_success() {
            return Err(rejected(&response));
        }

        let session: StripeCheckoutSession = response.json().map_err(transport)?;
        let client_handle = session.client_secret.ok_or_else(|| {
            PaymentServiceError::Transport("session response has no client_secret".to_string())
        })?;

        Ok(CreatedSession {
            session_id: SessionId::new(session.id),
            client_handle,
        })
    }

    async fn get_session(&self, id: &SessionId) -> Result<PaymentSession, PaymentServiceError> {
        let path = session_path(id)
            .ok_or_else(|| PaymentServiceError::NotFound(format!("invalid session id: '{id}'")))?;

        let response = self
            .client
            .get(path)
            .bearer_auth(self.config.secret_key.expose_secret())
            .send()
            .await
            .map_err(transport)?;

        if response.is_not_found() {
            return Err(PaymentServiceError::NotFound(response.error_message()));
        }
        if !response.is_success() {
            return Err(rejected(&response));
        }

        let session: StripeCheckoutSession = response.json().map_err(transport)?;
        if session.object.as_deref() != Some(SESSION_OBJECT) {
            return Err(PaymentServiceError::NotFound(format!(
                "'{id}' is not a checkout session"
            )));
        }
        let status = map_status(&session);
        let currency = session
            .currency
            .as_deref()
            .and_then(Currency::from_code)
            .unwrap_or(STORE_CURRENCY);
        let (customer_email, customer_name) = session
            .customer_details
            .map(|c| (c.email, c.name))
            .unwrap_or_default();

        Ok(PaymentSession {
            id: SessionId::new(session.id),
            status,
            total_amount: Money::new(session.amount_total.unwrap_or(0), currency),
            customer_email,
            customer_name,
        })
    }
}
