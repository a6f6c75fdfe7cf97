//! Request Error Handling
//!
//! External-service failures surface to the user as an error page; they never
//! tear down the process or leak into other requests. Missing form fields and
//! missing session data are not errors; handlers resolve those with a
//! redirect to an earlier step.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use seer_core::SeerError;
use seer_export::ExportError;
use seer_payments::PaymentError;
use thiserror::Error;

use crate::templates::ErrorPage;

/// Errors a route handler can surface
#[derive(Error, Debug)]
pub enum AppError {
    /// Completion service failed
    #[error("completion failed: {0}")]
    Completion(#[from] SeerError),

    /// Checkout creation failed
    #[error("checkout creation failed: {0}")]
    Checkout(#[from] PaymentError),

    /// PDF export failed
    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    /// Session backend failed
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Template rendering failed
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// Payments are not configured on this server
    #[error("payments not configured")]
    PaymentsDisabled,

    /// Request carried no Host header
    #[error("missing Host header")]
    MissingHost,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Completion(_) | AppError::Checkout(_) => StatusCode::BAD_GATEWAY,
            AppError::PaymentsDisabled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::MissingHost => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            AppError::Completion(e) => e.user_message(),
            AppError::Checkout(e) => e.user_message().into(),
            AppError::Export(e) => e.user_message().into(),
            AppError::Session(_) => "Your session could not be read. Please start over.".into(),
            AppError::Template(_) => "Something went wrong rendering the page.".into(),
            AppError::PaymentsDisabled => "Payments are not configured on this server.".into(),
            AppError::MissingHost => "Bad request.".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self);

        let status = self.status();
        let message = self.user_message();

        match (ErrorPage { message: message.clone() }).render() {
            Ok(html) => (status, Html(html)).into_response(),
            // Degrade to plain text if the error page itself fails
            Err(e) => {
                tracing::error!("error page render failed: {}", e);
                (status, message).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_failures_map_to_bad_gateway() {
        let err = AppError::Completion(SeerError::Completion("boom".into()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = AppError::Checkout(PaymentError::Stripe("boom".into()));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_export_failure_is_internal() {
        let err = AppError::Export(ExportError::EmptyOutput);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
