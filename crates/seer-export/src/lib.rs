//! # seer-export
//!
//! PDF export of premium readings.
//!
//! The download path turns the stored submission plus the cached premium
//! reading into a fixed-layout, paginated PDF byte stream. There is no
//! intermediate file; the bytes go straight into the HTTP response.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seer_export::ReadingDocument;
//!
//! let pdf = ReadingDocument::new(name, birthdate, question, result_text)
//!     .render()?;
//! ```

mod error;
mod pdf;

pub use error::{ExportError, Result};
pub use pdf::ReadingDocument;
