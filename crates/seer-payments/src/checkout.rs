//! Stripe Checkout Integration
//!
//! Implements the "Stripe Checkout (Hosted)" approach: one external API call
//! creates a payment-mode session for a single fixed-price line item, and the
//! caller redirects the browser to the returned URL.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionPaymentMethodTypes,
};

use crate::error::{PaymentError, Result};

/// Request to create a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Provider-side price identifier for the single line item
    pub price_id: String,

    /// URL to redirect after successful payment
    pub success_url: String,

    /// URL to redirect if checkout is cancelled
    pub cancel_url: String,
}

/// Result of creating a checkout session
///
/// Opaque provider handle; this service only uses `checkout_url`, once, for
/// an HTTP 303 redirect.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider session ID
    pub id: String,

    /// URL to redirect the user to
    pub checkout_url: String,
}

/// Strategy trait for checkout creation
///
/// The route handlers work exclusively through this interface, so tests can
/// substitute a stub that never leaves the process.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session and return its redirect URL
    async fn create_checkout(&self, request: CheckoutRequest) -> Result<CheckoutSession>;
}

/// Stripe-backed checkout provider
pub struct StripeCheckout {
    client: Client,
    timeout_secs: u64,
}

impl StripeCheckout {
    /// Create a new Stripe checkout provider
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;
        let timeout_secs = std::env::var("CHECKOUT_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or_else(default_timeout_secs);

        Ok(Self {
            client: Client::new(&secret_key),
            timeout_secs,
        })
    }

    /// Override the checkout timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[async_trait]
impl CheckoutProvider for StripeCheckout {
    async fn create_checkout(&self, request: CheckoutRequest) -> Result<CheckoutSession> {
        let mut params = CreateCheckoutSession::new();
        params.success_url = Some(&request.success_url);
        params.cancel_url = Some(&request.cancel_url);
        params.mode = Some(CheckoutSessionMode::Payment);
        params.payment_method_types = Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]);
        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(request.price_id.clone()),
            quantity: Some(1),
            ..Default::default()
        }]);

        let create = StripeCheckoutSession::create(&self.client, params);
        let session = tokio::time::timeout(Duration::from_secs(self.timeout_secs), create)
            .await
            .map_err(|_| PaymentError::Timeout(self.timeout_secs))?
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let checkout_url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        tracing::debug!(session_id = %session.id, "checkout session created");
        Ok(CheckoutSession {
            id: session.id.to_string(),
            checkout_url,
        })
    }
}
