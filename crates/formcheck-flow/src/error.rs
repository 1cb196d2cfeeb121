//! Error types for the form submission check.

use crate::report::Step;
use formcheck_browser::BrowserError;
use formcheck_core::{ConfigError, FormField};
use thiserror::Error;

/// Errors that end a check run.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Configuration could not be used
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A browser operation failed during a step
    #[error("{step} step failed: {source}")]
    Step {
        /// Step that was running
        step: Step,
        /// Underlying driver error
        #[source]
        source: BrowserError,
    },

    /// The page echoed a different value than was submitted
    #[error("{field} mismatch: expected '{expected}', got '{actual}'")]
    Mismatch {
        /// Field whose echo differed
        field: FormField,
        /// Value that was submitted
        expected: String,
        /// Value the page displayed
        actual: String,
    },

    /// Every step passed but the browser session could not be released
    #[error("browser teardown failed: {0}")]
    Teardown(#[source] BrowserError),
}

impl FlowError {
    /// Wrap a driver error with the step it happened in.
    pub fn at(step: Step) -> impl FnOnce(BrowserError) -> Self {
        move |source| Self::Step { step, source }
    }

    /// True when the run completed but an echoed value was wrong.
    #[must_use]
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }

    /// The step the error belongs to, if any.
    #[must_use]
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Config(_) => None,
            Self::Step { step, .. } => Some(*step),
            Self::Mismatch { .. } => Some(Step::Verify),
            Self::Teardown(_) => Some(Step::Teardown),
        }
    }
}

/// Result type for flow operations.
pub type Result<T> = std::result::Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_error_display() {
        let err = FlowError::at(Step::Submit)(BrowserError::not_found("#submit"));
        assert_eq!(
            err.to_string(),
            "submit step failed: element not found: #submit"
        );
        assert_eq!(err.step(), Some(Step::Submit));
        assert!(!err.is_assertion_failure());
    }

    #[test]
    fn test_mismatch_reports_both_values() {
        let err = FlowError::Mismatch {
            field: FormField::Email,
            expected: "michael.davis@gmail.com".to_string(),
            actual: "mdavis@example.com".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("michael.davis@gmail.com"));
        assert!(msg.contains("mdavis@example.com"));
        assert!(err.is_assertion_failure());
        assert_eq!(err.step(), Some(Step::Verify));
    }
}
