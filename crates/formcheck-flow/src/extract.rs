//! Turning echoed element text into a comparable value.

use formcheck_core::{ExtractorKind, FormField};

/// Strategy mapping an element's rendered text to the value to compare.
pub trait ValueExtractor: Send + Sync {
    /// Extract the comparable value for `field` from `text`.
    fn extract(&self, field: FormField, text: &str) -> String;
}

/// Compares the text as rendered, minus surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawText;

impl ValueExtractor for RawText {
    fn extract(&self, _field: FormField, text: &str) -> String {
        text.trim().to_string()
    }
}

/// Drops the field's own `Label:` prefix, e.g. `Current Address :456 Elm Avenue`.
///
/// Another field's label is left in place, so it shows up as a mismatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelStripped;

impl ValueExtractor for LabelStripped {
    fn extract(&self, field: FormField, text: &str) -> String {
        strip_label(field.label(), text).to_string()
    }
}

/// Everything after a leading `label` and its `:`, trimmed.
///
/// Whitespace is allowed around the label and before the colon. Text that
/// does not start with `label:` is only trimmed.
#[must_use]
pub fn strip_label<'a>(label: &str, text: &'a str) -> &'a str {
    let text = text.trim();
    text.strip_prefix(label)
        .and_then(|rest| rest.trim_start().strip_prefix(':'))
        .map_or(text, str::trim)
}

/// Build the extractor selected in configuration.
#[must_use]
pub fn extractor_for(kind: ExtractorKind) -> Box<dyn ValueExtractor> {
    match kind {
        ExtractorKind::LabelStripped => Box::new(LabelStripped),
        ExtractorKind::RawText => Box::new(RawText),
    }
}
