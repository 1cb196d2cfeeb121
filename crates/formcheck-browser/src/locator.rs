//! Element locators.
//!
//! A [`Locator`] names exactly one element. It is resolved either as a CSS
//! selector or as an XPath expression, depending on the variant.

use serde::Serialize;
use std::fmt;

/// Opaque descriptor for one element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Element `id` attribute
    Id(String),
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
    /// First `tag` element whose own text contains `contains`
    Text { tag: String, contains: String },
}

/// A locator lowered to something the page can evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Query {
    #[serde(rename = "css")]
    Css(String),
    #[serde(rename = "xpath")]
    XPath(String),
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    pub fn text(tag: impl Into<String>, contains: impl Into<String>) -> Self {
        Self::Text {
            tag: tag.into(),
            contains: contains.into(),
        }
    }

    /// Lower to a document-rooted query.
    pub fn query(&self) -> Query {
        match self {
            Self::Id(id) => Query::Css(id_selector(id)),
            Self::Css(sel) => Query::Css(sel.clone()),
            Self::XPath(expr) => Query::XPath(expr.clone()),
            Self::Text { tag, contains } => Query::XPath(format!(
                "//{tag}[contains(text(),{})]",
                xpath_literal(contains)
            )),
        }
    }

    /// Lower to a query evaluated relative to a container element.
    ///
    /// CSS selectors are already relative under `querySelector`; absolute
    /// XPath expressions are rewritten to start at the context node.
    pub fn query_within(&self) -> Query {
        match self.query() {
            Query::XPath(expr) if expr.starts_with('/') => Query::XPath(format!(".{expr}")),
            other => other,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Css(sel) => f.write_str(sel),
            Self::XPath(expr) => f.write_str(expr),
            Self::Text { tag, contains } => write!(f, "<{tag}> containing '{contains}'"),
        }
    }
}

/// `#id` when the id is a plain CSS identifier, an attribute selector otherwise.
fn id_selector(id: &str) -> String {
    let plain = id
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if plain {
        format!("#{id}")
    } else {
        format!("[id=\"{}\"]", id.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// Quote a string as an XPath 1.0 literal.
///
/// XPath has no escape syntax, so text holding both quote kinds is
/// assembled with `concat()`.
pub fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        return format!("'{s}'");
    }
    if !s.contains('"') {
        return format!("\"{s}\"");
    }

    let parts: Vec<String> = s
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(",\"'\","))
}
