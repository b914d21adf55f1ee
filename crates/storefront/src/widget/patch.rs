//! DOM patches sent to the page script.
//!
//! The host never ships a whole page after startup. Each interaction answers
//! with the smallest set of changes, addressed by CSS selector; `widget.js`
//! applies them in order.

use serde::Serialize;

/// One change to the rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomPatch {
    /// Replace the text content of `target`.
    SetText { target: String, text: String },
    /// Replace the inner markup of `target`.
    SetHtml { target: String, html: String },
    /// Append markup to the children of `target`.
    Append { target: String, html: String },
    /// Remove `target` from the page.
    Remove { target: String },
    /// Relabel and enable/disable a button.
    SetButton {
        target: String,
        label: String,
        disabled: bool,
    },
    /// Add (`enabled`) or remove a class on `target`.
    SetClass {
        target: String,
        class: String,
        enabled: bool,
    },
}

/// Selector for `base` elements whose `attr` equals `value`.
///
/// `value` is quoted and escaped, so ids from the catalog may contain any
/// character.
#[must_use]
pub fn by_attr(base: &str, attr: &str, value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("{base}[{attr}=\"{escaped}\"]")
}
