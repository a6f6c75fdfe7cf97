//! # seer-runtime
//!
//! Runtime completion providers for the seer reading service.
//!
//! ## Providers
//!
//! - **OpenAI** (default): hosted chat-completions API over HTTPS
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seer_runtime::OpenAiProvider;
//!
//! let provider = OpenAiProvider::from_env()?;
//! let completion = provider.complete(&messages, &options).await?;
//! ```

pub mod openai;

pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use seer_core::{
    CompletionProvider, GenerationOptions, Message, Result, Role, SeerError,
};
