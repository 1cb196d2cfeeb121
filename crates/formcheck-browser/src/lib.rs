//! Browser automation for the form submission check.
//!
//! [`BrowserActions`] is the seam between the check and a live browser;
//! [`BrowserEngine`] implements it over the Chrome DevTools Protocol.

pub mod actions;
pub mod engine;
pub mod error;
pub mod locator;
pub mod probe;

pub use actions::{wait_until_clickable, BrowserActions};
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use locator::Locator;
pub use probe::ElementState;
