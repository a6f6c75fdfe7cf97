//! Application State

use std::sync::Arc;

use seer_core::CompletionProvider;
use seer_payments::CheckoutProvider;

use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Completion provider (OpenAI, or a stub in tests)
    pub provider: Arc<dyn CompletionProvider>,

    /// Checkout provider (None if payments are not configured)
    pub checkout: Option<Arc<dyn CheckoutProvider>>,

    /// Server configuration
    pub config: Arc<AppConfig>,
}
