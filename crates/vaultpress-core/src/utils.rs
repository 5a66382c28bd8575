//! Shared helpers for HTML output and serialization.

use crate::{Error, Result};
use std::borrow::Cow;

const ESCAPED: [char; 4] = ['&', '<', '>', '"'];

/// Generic JSON serialization with consistent error handling
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| Error::other(format!("Failed to serialize {} as JSON: {}", context, e)))
}

/// Escape text for use in HTML element content or a double-quoted attribute.
///
/// Text nodes hold decoded characters, so anything interpolated into raw
/// markup has to be escaped again. Borrows when nothing needs escaping.
///
/// # Example
/// ```
/// use vaultpress_core::utils::escape_html;
///
/// assert_eq!(escape_html(r#"Q&A "notes""#), "Q&amp;A &quot;notes&quot;");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(ESCAPED) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
