//! Mapping run failures to process exit codes.

use formcheck_flow::FlowError;
use std::process::ExitCode;

/// An echoed value differed from the submitted one.
pub const ASSERTION_FAILED: u8 = 1;
/// The run could not complete (config, launch, locate, wait, teardown).
pub const RUN_FAILED: u8 = 2;

/// Exit code for a failed run.
pub fn code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<FlowError>() {
        Some(flow) if flow.is_assertion_failure() => ASSERTION_FAILED,
        _ => RUN_FAILED,
    }
}

/// Short machine-readable tag for log lines.
pub fn tag_for(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<FlowError>() {
        Some(FlowError::Mismatch { .. }) => "ASSERTION_MISMATCH",
        Some(FlowError::Step { source, .. }) if source.is_locate_error() => "ELEMENT_NOT_FOUND",
        Some(FlowError::Step {
            source: formcheck_browser::BrowserError::WaitExpired { .. },
            ..
        }) => "WAIT_EXPIRED",
        Some(FlowError::Step { .. }) => "BROWSER_ERROR",
        Some(FlowError::Teardown(_)) => "TEARDOWN_FAILED",
        Some(FlowError::Config(_)) => "CONFIG_INVALID",
        None => "RUN_FAILED",
    }
}

/// Convert a failure into the process exit code.
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(code_for(err))
}
