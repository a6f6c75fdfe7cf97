//! # seer-core
//!
//! Core reading pipeline with a provider-agnostic completion abstraction and
//! the pure prompt templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Reading Pipeline                        │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │  Submission │──│ build_prompt │──│ CompletionProvider  │  │
//! │  │   + Tier    │  │  (pure fn)   │  │     (Strategy)      │  │
//! │  └─────────────┘  └──────────────┘  └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `CompletionProvider` trait enables swapping between the hosted API
//! and in-process stubs without changing handler logic.

pub mod error;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod reading;

pub use error::{Result, SeerError};
pub use message::{Message, Role};
pub use prompt::{build_prompt, system_prompt};
pub use provider::{Completion, CompletionProvider, GenerationOptions};
pub use reading::{GeneratedResult, Submission, Tier};
