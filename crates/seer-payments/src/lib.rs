//! # seer-payments
//!
//! Hosted checkout redirection for the seer reading service.
//!
//! ## Stripe Checkout (Hosted)
//!
//! **Flow:** Your site → Redirect to Stripe's hosted page → Redirect back
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────────┐
//! │  Your Site  │────▶│  Stripe Hosted  │────▶│    Your Site     │
//! │   (/buy)    │     │  Checkout Page  │     │ (/premium_result)│
//! └─────────────┘     └─────────────────┘     └──────────────────┘
//! ```
//!
//! Stripe handles the payment UI and PCI compliance entirely; this crate only
//! creates the session and hands back its redirect URL. The checkout session
//! itself is an opaque provider handle; nothing in it is interpreted or
//! stored here.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seer_payments::{CheckoutProvider, CheckoutRequest, StripeCheckout};
//!
//! let checkout = StripeCheckout::from_env()?;
//!
//! let session = checkout.create_checkout(CheckoutRequest {
//!     price_id: "price_xxx".into(),
//!     success_url: "https://yoursite.com/premium_result".into(),
//!     cancel_url: "https://yoursite.com/result".into(),
//! }).await?;
//!
//! // Redirect user to: session.checkout_url
//! ```

mod checkout;
mod error;

pub use checkout::{CheckoutProvider, CheckoutRequest, CheckoutSession, StripeCheckout};
pub use error::{PaymentError, Result};
