//! Formcheck Core - Foundation crate for the formcheck end-to-end check.
//!
//! This crate provides the shared record types, error handling and
//! configuration management that the browser and flow crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - The expected record and the form fields it covers
//!
//! # Example
//!
//! ```rust
//! use formcheck_core::{AppConfig, FormField};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//!
//! assert_eq!(config.record.value(FormField::Name), "Michael Davis");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, BrowserConfig, ExtractorKind, ScrollConfig, VerifyConfig, WaitConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use types::{ExpectedRecord, FormField};
