//! In-page scripts used to inspect elements.
//!
//! Every script is a self-contained expression returning a JSON string, so
//! the Rust side only ever deserializes a `String` out of the evaluation.

use crate::error::{BrowserError, Result};
use crate::locator::Query;
use serde::Deserialize;

/// How an element currently presents itself to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementState {
    Missing,
    Hidden,
    Disabled,
    Clickable,
}

impl ElementState {
    pub fn is_clickable(self) -> bool {
        self == Self::Clickable
    }
}

/// Result of a text probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TextProbe {
    ContainerMissing,
    Missing,
    Found { text: String },
}

const RESOLVE_FN: &str = r#"const resolve = (q, root) => q.kind === "css"
    ? root.querySelector(q.value)
    : document.evaluate(q.value, root, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;"#;

fn encode(query: &Query) -> String {
    // Serializing a two-variant enum of strings cannot fail
    serde_json::to_string(query).unwrap_or_else(|_| "null".to_string())
}

/// Script reporting the [`ElementState`] of the element matched by `query`.
pub fn element_state_js(query: &Query) -> String {
    format!(
        r#"(() => {{
  {RESOLVE_FN}
  const el = resolve({q}, document);
  if (!el) return JSON.stringify("missing");
  const style = window.getComputedStyle(el);
  const rect = el.getBoundingClientRect();
  if (style.visibility === "hidden" || style.display === "none" || rect.width === 0 || rect.height === 0) {{
    return JSON.stringify("hidden");
  }}
  if (el.disabled || el.getAttribute("aria-disabled") === "true") return JSON.stringify("disabled");
  return JSON.stringify("clickable");
}})()"#,
        q = encode(query)
    )
}

/// Script reading `innerText` of `query`, optionally scoped to `container`.
pub fn text_js(container: Option<&Query>, query: &Query) -> String {
    let container = container.map_or_else(|| "null".to_string(), encode);
    format!(
        r#"(() => {{
  {RESOLVE_FN}
  const scope = {container};
  const root = scope ? resolve(scope, document) : document;
  if (!root) return JSON.stringify({{ status: "container_missing" }});
  const el = resolve({q}, root);
  if (!el) return JSON.stringify({{ status: "missing" }});
  return JSON.stringify({{ status: "found", text: el.innerText ?? el.textContent ?? "" }});
}})()"#,
        q = encode(query)
    )
}

/// Script scrolling the viewport by a relative offset.
pub fn scroll_js(dx: i64, dy: i64) -> String {
    format!("window.scrollBy({dx}, {dy})")
}

/// Script focusing `query` and moving its caret to the end of the value.
///
/// Returns `false` when the element is gone. Some input types (email,
/// number) throw on `setSelectionRange`; focus already leaves their caret
/// at the end, so that error is swallowed.
pub fn focus_end_js(query: &Query) -> String {
    format!(
        r#"(() => {{
  {RESOLVE_FN}
  const el = resolve({q}, document);
  if (!el) return JSON.stringify(false);
  el.focus();
  if (typeof el.value === "string") {{
    try {{ el.setSelectionRange(el.value.length, el.value.length); }} catch (_) {{}}
  }}
  return JSON.stringify(true);
}})()"#,
        q = encode(query)
    )
}

/// Decode the JSON string a probe script returned.
pub fn decode<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| BrowserError::Script(format!("unexpected probe result '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    #[test]
    fn test_element_state_js_embeds_query() {
        let js = element_state_js(&Locator::id("item-0").query());
        assert!(js.contains(r##"resolve({"kind":"css","value":"#item-0"}, document)"##));
    }

    #[test]
    fn test_text_js_escapes_selectors() {
        let js = text_js(
            Some(&Locator::css("#output").query()),
            &Locator::text("p", "say \"hi\"").query_within(),
        );
        assert!(js.contains(r##"const scope = {"kind":"css","value":"#output"};"##));
        assert!(js.contains(r#"{"kind":"xpath","value":".//p[contains(text(),'say \"hi\"')]"}"#));
    }

    #[test]
    fn test_text_js_unscoped() {
        let js = text_js(None, &Locator::id("name").query());
        assert!(js.contains("const scope = null;"));
    }

    #[test]
    fn test_decode_state() {
        let state: ElementState = decode("\"clickable\"").unwrap();
        assert!(state.is_clickable());
        let state: ElementState = decode("\"missing\"").unwrap();
        assert!(!state.is_clickable());
    }

    #[test]
    fn test_decode_text_probe() {
        let probe: TextProbe = decode(r#"{"status":"found","text":"Name:Michael Davis"}"#).unwrap();
        assert_eq!(
            probe,
            TextProbe::Found {
                text: "Name:Michael Davis".to_string()
            }
        );
        let probe: TextProbe = decode(r#"{"status":"container_missing"}"#).unwrap();
        assert_eq!(probe, TextProbe::ContainerMissing);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode::<ElementState>("42").unwrap_err();
        assert!(matches!(err, BrowserError::Script(_)));
    }

    #[test]
    fn test_focus_end_js() {
        let js = focus_end_js(&Locator::id("userEmail").query());
        assert!(js.contains(r##"resolve({"kind":"css","value":"#userEmail"}, document)"##));
        assert!(js.contains("setSelectionRange"));
    }

    #[test]
    fn test_scroll_js() {
        assert_eq!(scroll_js(0, 300), "window.scrollBy(0, 300)");
    }
}
