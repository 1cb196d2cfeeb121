//! Formcheck Flow - the end-to-end form submission check.
//!
//! This crate drives a browser through the demo site's text-box form,
//! submits an [`ExpectedRecord`](formcheck_core::ExpectedRecord) and asserts
//! that every value is echoed back.
//!
//! # Architecture
//!
//! - **Check** ([`check`]): The linear navigate/fill/submit/verify procedure
//! - **Locators** ([`locators`]): The page's DOM contract
//! - **Extraction** ([`extract`]): Pluggable strategies turning echoed text into comparable values
//! - **Report** ([`report`]): Step and field-check record of a run
//! - **Errors** ([`error`]): Flow-level error types
//!
//! # Example
//!
//! ```rust,no_run
//! use formcheck_core::AppConfig;
//! use formcheck_flow::FormSubmissionCheck;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let check = FormSubmissionCheck::new(AppConfig::load_with_env()?)?;
//! let report = check.run().await?;
//!
//! println!("{} fields verified", report.checks.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod check;
pub mod error;
pub mod extract;
pub mod locators;
pub mod report;

// Re-export commonly used types
pub use check::FormSubmissionCheck;
pub use error::{FlowError, Result};
pub use extract::{extractor_for, LabelStripped, RawText, ValueExtractor};
pub use locators::PageLocators;
pub use report::{FieldCheck, RunReport, Step};
