//! Application Configuration
//!
//! One explicit configuration object, built from the environment at process
//! start and passed into components. Credentials never live in module-level
//! globals.

use anyhow::Context;
use seer_core::Tier;

/// Server configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Listen port
    pub port: u16,

    /// Session signing secret
    pub secret_key: String,

    /// Fixed price identifier for the premium reading (None disables payments)
    pub stripe_price_id: Option<String>,

    /// Model identifier for free readings
    pub free_model: String,

    /// Model identifier for premium readings
    pub premium_model: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let secret_key = std::env::var("SECRET_KEY").context("SECRET_KEY not set")?;
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT is not a valid port number")?,
            Err(_) => 5000,
        };
        let stripe_price_id = std::env::var("STRIPE_PRICE_ID").ok();
        let free_model =
            std::env::var("FREE_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        let premium_model =
            std::env::var("PREMIUM_MODEL").unwrap_or_else(|_| "gpt-4o".into());

        Ok(Self {
            port,
            secret_key,
            stripe_price_id,
            free_model,
            premium_model,
        })
    }

    /// Model identifier used for a tier
    pub fn model_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Free => &self.free_model,
            Tier::Premium => &self.premium_model,
        }
    }
}
