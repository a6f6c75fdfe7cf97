//! HTTP Handlers
//!
//! One handler per route; free and premium readings share the same pipeline,
//! parameterized by tier.

use axum::{
    Form, Json,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use seer_core::{GeneratedResult, GenerationOptions, Message, Submission, Tier};
use seer_payments::CheckoutRequest;
use seer_export::ReadingDocument;

use crate::error::AppError;
use crate::session::ReadingSession;
use crate::state::AppState;
use crate::templates::{FormPage, ResultPage, render_page};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub completion_connected: bool,
    pub payments_configured: bool,
}

/// Raw form fields; any missing or blank field redirects back to the form
#[derive(Debug, Deserialize)]
pub struct ReadingForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

impl ReadingForm {
    fn into_submission(self) -> Option<Submission> {
        let submission = Submission::new(
            self.name?.trim().to_string(),
            self.birthdate?.trim().to_string(),
            self.question?.trim().to_string(),
        );
        submission.is_complete().then_some(submission)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let completion_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        completion_connected,
        payments_configured: state.checkout.is_some(),
    })
}

/// Submission form
pub async fn index() -> Result<Response, AppError> {
    Ok(render_page(&FormPage)?.into_response())
}

/// Free reading: store the submission, generate, render
pub async fn free_result(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    Form(form): Form<ReadingForm>,
) -> Result<Response, AppError> {
    let Some(submission) = form.into_submission() else {
        return Ok(Redirect::to("/").into_response());
    };

    // Stored before the completion call so the paid flow can pick it up
    // after the checkout redirect round-trip. A new submission invalidates
    // any premium reading cached for the previous one.
    let reading = ReadingSession::new(session);
    reading.set_submission(&submission).await?;
    reading.clear_premium_result().await?;

    let result = generate_reading(&state, &submission, Tier::Free).await?;
    Ok(render_page(&ResultPage::new(&result))?.into_response())
}

/// The checkout cancel target returns the browser here with GET
pub async fn result_cancelled() -> Redirect {
    Redirect::to("/")
}

/// Create a checkout session and send the browser to the hosted page
pub async fn buy(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    let checkout = state.checkout.as_ref().ok_or(AppError::PaymentsDisabled)?;
    let price_id = state
        .config
        .stripe_price_id
        .clone()
        .ok_or(AppError::PaymentsDisabled)?;

    let base = base_url(&headers)?;
    let session = checkout
        .create_checkout(CheckoutRequest {
            price_id,
            success_url: format!("{base}/premium_result"),
            cancel_url: format!("{base}/result"),
        })
        .await?;

    tracing::info!(session_id = %session.id, "checkout session created");
    Ok(Redirect::to(&session.checkout_url))
}

/// Premium reading: requires a submission in the session, caches the result
///
/// A re-render (page refresh, or returning from /download) serves the cached
/// reading instead of paying for another completion call.
pub async fn premium_result(
    State(state): State<AppState>,
    session: tower_sessions::Session,
) -> Result<Response, AppError> {
    let reading = ReadingSession::new(session);
    let Some(submission) = reading.submission().await? else {
        return Ok(Redirect::to("/").into_response());
    };

    if let Some(cached) = reading.premium_result().await? {
        return Ok(render_page(&ResultPage::new(&cached))?.into_response());
    }

    let result = generate_reading(&state, &submission, Tier::Premium).await?;
    reading.set_premium_result(&result).await?;

    Ok(render_page(&ResultPage::new(&result))?.into_response())
}

/// PDF download of the cached premium reading
pub async fn download(session: tower_sessions::Session) -> Result<Response, AppError> {
    let reading = ReadingSession::new(session);
    let Some(result) = reading.premium_result().await? else {
        return Ok(Redirect::to("/premium_result").into_response());
    };
    let Some(submission) = reading.submission().await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let pdf = ReadingDocument::new(
        submission.name,
        submission.birthdate,
        submission.question,
        result.text,
    )
    .render()?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"premium_reading.pdf\"",
        ),
    ];
    Ok((headers, pdf).into_response())
}

// ============================================================================
// Helpers
// ============================================================================

/// Run one submission through the completion pipeline at the given tier
async fn generate_reading(
    state: &AppState,
    submission: &Submission,
    tier: Tier,
) -> Result<GeneratedResult, AppError> {
    let messages = vec![
        Message::system(seer_core::system_prompt(tier)),
        Message::user(seer_core::build_prompt(submission, tier)),
    ];
    let options = GenerationOptions::for_model(state.config.model_for(tier));

    let completion = state.provider.complete(&messages, &options).await?;
    tracing::info!(tier = %tier, model = %completion.model, "reading generated");

    Ok(GeneratedResult::new(completion.content, tier))
}

/// Base URL of this deployment, reconstructed from the request
fn base_url(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingHost)?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    Ok(format!("{scheme}://{host}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use seer_core::provider::{Completion, CompletionProvider};
    use seer_payments::{CheckoutProvider, CheckoutSession};

    use crate::config::AppConfig;

    const STUB_READING: &str = "The cards are kind to you this month.";
    const STUB_CHECKOUT_URL: &str = "https://checkout.stripe.example/cs_test_123";

    struct EchoProvider {
        calls: AtomicUsize,
    }

    impl EchoProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        async fn health_check(&self) -> seer_core::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> seer_core::Result<Completion> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Completion {
                content: STUB_READING.into(),
                model: options.model.clone(),
                usage: None,
                finish_reason: None,
            })
        }
    }

    struct FixedCheckout;

    #[async_trait]
    impl CheckoutProvider for FixedCheckout {
        async fn create_checkout(
            &self,
            _request: CheckoutRequest,
        ) -> seer_payments::Result<CheckoutSession> {
            Ok(CheckoutSession {
                id: "cs_test_123".into(),
                checkout_url: STUB_CHECKOUT_URL.into(),
            })
        }
    }

    fn test_app() -> (Router, Arc<EchoProvider>) {
        let provider = Arc::new(EchoProvider::new());
        let checkout: Arc<dyn CheckoutProvider> = Arc::new(FixedCheckout);

        let state = AppState {
            provider: provider.clone(),
            checkout: Some(checkout),
            config: Arc::new(AppConfig {
                port: 5000,
                secret_key: "test-secret".into(),
                stripe_price_id: Some("price_123".into()),
                free_model: "gpt-4o-mini".into(),
                premium_model: "gpt-4o".into(),
            }),
        };

        (
            crate::router(state, crate::session_key("test-secret")),
            provider,
        )
    }

    fn submit_form() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/result")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "name=Alice&birthdate=1990-01-01&question=career%3F",
            ))
            .unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn session_cookie(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie set")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &axum::response::Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("redirect location")
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_free_result_renders_stub_reading() {
        let (app, provider) = test_app();

        let response = app.oneshot(submit_form()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains(STUB_READING));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_form_field_redirects_to_form() {
        let (app, provider) = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/result")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Alice&birthdate=&question=career%3F"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_premium_result_with_empty_session_redirects_to_form() {
        let (app, _provider) = test_app();

        let response = app.oneshot(get("/premium_result", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn test_download_without_premium_result_redirects() {
        let (app, _provider) = test_app();

        let response = app.oneshot(get("/download", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/premium_result");
    }

    #[tokio::test]
    async fn test_premium_flow_caches_result_for_download() {
        let (app, provider) = test_app();

        // Free submission populates the session
        let response = app.clone().oneshot(submit_form()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);
        assert_eq!(provider.calls(), 1);

        // Premium generation uses the carried-over submission
        let response = app
            .clone()
            .oneshot(get("/premium_result", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(provider.calls(), 2);
        let body = body_string(response).await;
        assert!(body.contains(STUB_READING));

        // Download serves the cached text without another completion call
        let response = app
            .clone()
            .oneshot(get("/download", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(provider.calls(), 2);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_premium_rerender_serves_cached_reading() {
        let (app, provider) = test_app();

        let response = app.clone().oneshot(submit_form()).await.unwrap();
        let cookie = session_cookie(&response);

        let response = app
            .clone()
            .oneshot(get("/premium_result", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(provider.calls(), 2);

        // Refreshing the page must not trigger another completion call
        let response = app
            .clone()
            .oneshot(get("/premium_result", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_new_submission_invalidates_cached_premium_reading() {
        let (app, provider) = test_app();

        let response = app.clone().oneshot(submit_form()).await.unwrap();
        let cookie = session_cookie(&response);
        app.clone()
            .oneshot(get("/premium_result", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(provider.calls(), 2);

        // A second submission replaces the stored triple and drops the cache
        let mut resubmit = submit_form();
        resubmit
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        app.clone().oneshot(resubmit).await.unwrap();
        assert_eq!(provider.calls(), 3);

        // Download has nothing cached, so it bounces to regeneration
        let response = app
            .clone()
            .oneshot(get("/download", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/premium_result");
    }

    #[tokio::test]
    async fn test_buy_redirects_to_checkout_url() {
        let (app, _provider) = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/buy")
            .header(header::HOST, "localhost:5000")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), STUB_CHECKOUT_URL);
    }

    #[tokio::test]
    async fn test_completion_failure_renders_error_page() {
        struct FailingProvider;

        #[async_trait]
        impl CompletionProvider for FailingProvider {
            async fn health_check(&self) -> seer_core::Result<bool> {
                Ok(false)
            }

            async fn complete(
                &self,
                _messages: &[Message],
                _options: &GenerationOptions,
            ) -> seer_core::Result<Completion> {
                Err(seer_core::SeerError::Unavailable("connection refused".into()))
            }
        }

        let state = AppState {
            provider: Arc::new(FailingProvider),
            checkout: None,
            config: Arc::new(AppConfig {
                port: 5000,
                secret_key: "test-secret".into(),
                stripe_price_id: None,
                free_model: "gpt-4o-mini".into(),
                premium_model: "gpt-4o".into(),
            }),
        };
        let app = crate::router(state, crate::session_key("test-secret"));

        let response = app.oneshot(submit_form()).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_string(response).await;
        assert!(body.contains("currently unavailable"));
    }
}
