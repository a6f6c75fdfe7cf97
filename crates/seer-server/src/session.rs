//! Typed Session Record
//!
//! The browser session carries the last submission and, after a premium
//! generation, the cached premium reading. Accessing them through named
//! accessors keeps "missing field" a typed condition instead of a key-lookup
//! failure, and gives the handlers one place for the carry-over semantics:
//! the submission survives the checkout redirect round-trip, and the cached
//! premium text lets /download avoid a second completion call.

use seer_core::{GeneratedResult, Submission};
use tower_sessions::Session;

use crate::error::AppError;

const SUBMISSION_KEY: &str = "submission";
const PREMIUM_RESULT_KEY: &str = "premium_result";

/// Typed view over the per-browser session
pub struct ReadingSession {
    inner: Session,
}

impl ReadingSession {
    pub fn new(session: Session) -> Self {
        Self { inner: session }
    }

    /// The last submitted form triple, if any
    pub async fn submission(&self) -> Result<Option<Submission>, AppError> {
        Ok(self.inner.get(SUBMISSION_KEY).await?)
    }

    /// Replace the stored submission (last write wins)
    pub async fn set_submission(&self, submission: &Submission) -> Result<(), AppError> {
        self.inner.insert(SUBMISSION_KEY, submission).await?;
        Ok(())
    }

    /// The cached premium reading, if one was generated this session
    pub async fn premium_result(&self) -> Result<Option<GeneratedResult>, AppError> {
        Ok(self.inner.get(PREMIUM_RESULT_KEY).await?)
    }

    /// Cache the premium reading so /download skips the completion call
    pub async fn set_premium_result(&self, result: &GeneratedResult) -> Result<(), AppError> {
        self.inner.insert(PREMIUM_RESULT_KEY, result).await?;
        Ok(())
    }

    /// Drop a cached premium reading that belongs to an older submission
    pub async fn clear_premium_result(&self) -> Result<(), AppError> {
        self.inner
            .remove::<GeneratedResult>(PREMIUM_RESULT_KEY)
            .await?;
        Ok(())
    }
}
