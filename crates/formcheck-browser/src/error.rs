use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("element not found: {locator}")]
    ElementNotFound { locator: String },

    #[error("timed out after {timeout_ms}ms waiting for {locator} to become clickable")]
    WaitExpired { locator: String, timeout_ms: u64 },

    #[error("interaction with {locator} failed: {reason}")]
    Interaction { locator: String, reason: String },

    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error("failed to release browser session: {0}")]
    Close(String),

    #[error("browser session already closed")]
    SessionClosed,
}

impl BrowserError {
    pub fn not_found(locator: impl ToString) -> Self {
        Self::ElementNotFound {
            locator: locator.to_string(),
        }
    }

    /// True for the "required element is absent" family of failures.
    pub fn is_locate_error(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }
}
