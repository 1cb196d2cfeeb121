//! Run report types.

use chrono::{DateTime, Utc};
use formcheck_core::FormField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One stage of the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Start the browser session
    Launch,
    /// Open the start page and scroll
    Navigate,
    /// Open the Elements card and its text-box item
    OpenSubsection,
    /// Type the record into the form
    Fill,
    /// Scroll and press submit
    Submit,
    /// Read back and compare the echoed values
    Verify,
    /// Release the browser session
    Teardown,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Launch => "launch",
            Self::Navigate => "navigate",
            Self::OpenSubsection => "open_subsection",
            Self::Fill => "fill",
            Self::Submit => "submit",
            Self::Verify => "verify",
            Self::Teardown => "teardown",
        })
    }
}

/// Comparison of one echoed value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldCheck {
    /// Field that was compared
    pub field: FormField,
    /// Value that was submitted
    pub expected: String,
    /// Extracted value the page displayed
    pub actual: String,
}

impl FieldCheck {
    /// Check if the echoed value equals the submitted one
    #[must_use]
    pub fn matches(&self) -> bool {
        self.expected == self.actual
    }
}

/// What a run did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the browser was released
    pub finished_at: Option<DateTime<Utc>>,
    /// Steps completed, in order
    pub steps: Vec<Step>,
    /// Field comparisons performed, in order
    pub checks: Vec<FieldCheck>,
}

impl RunReport {
    /// Start an empty report stamped with the current time.
    #[must_use]
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            steps: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Mark a step as completed.
    pub fn complete(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Stamp the finish time.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Check if every field was verified and matched
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.steps.contains(&Step::Verify)
            && self.checks.len() == FormField::ALL.len()
            && self.checks.iter().all(FieldCheck::matches)
    }

    /// Wall-clock duration, once finished.
    #[must_use]
    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(field: FormField, expected: &str, actual: &str) -> FieldCheck {
        FieldCheck {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    #[test]
    fn test_is_success() {
        let mut report = RunReport::start();
        report.complete(Step::Verify);
        for field in FormField::ALL {
            report.checks.push(check(field, "x", "x"));
        }
        assert!(report.is_success());

        report.checks[1].actual = "y".to_string();
        assert!(!report.is_success());
    }

    #[test]
    fn test_incomplete_run_is_not_success() {
        let mut report = RunReport::start();
        report.complete(Step::Navigate);
        assert!(!report.is_success());
    }

    #[test]
    fn test_duration() {
        let mut report = RunReport::start();
        assert!(report.duration_ms().is_none());
        report.finish();
        assert!(report.duration_ms().is_some_and(|ms| ms >= 0));
    }

    #[test]
    fn test_report_json() {
        let mut report = RunReport::start();
        report.complete(Step::OpenSubsection);
        report
            .checks
            .push(check(FormField::CurrentAddress, "a", "a"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][0], "open_subsection");
        assert_eq!(json["checks"][0]["field"], "current_address");
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::OpenSubsection.to_string(), "open_subsection");
        assert_eq!(Step::Teardown.to_string(), "teardown");
    }
}
