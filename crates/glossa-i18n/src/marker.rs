#![forbid(unsafe_code)]

//! The `{$key$}` marker syntax.
//!
//! A string wrapped in `{$` … `$}` is a translation key rather than literal
//! text. The key is the verbatim substring between the delimiters; there is
//! no escaping, so a key containing `$}` cannot be written.
//!
//! ```
//! use glossa_i18n::marker;
//!
//! assert_eq!(marker::decode("{$menu.open$}"), Some("menu.open"));
//! assert_eq!(marker::decode("{$$}"), None);
//! assert_eq!(marker::decode("Open"), None);
//! assert_eq!(marker::encode("menu.open"), "{$menu.open$}");
//! ```

/// Opening delimiter.
pub const OPEN: &str = "{$";
/// Closing delimiter.
pub const CLOSE: &str = "$}";

/// Extract the key from a marker.
///
/// Matches only when `text` starts with [`OPEN`], ends with [`CLOSE`] and is
/// strictly longer than both delimiters together, so the key is never empty.
#[must_use]
pub fn decode(text: &str) -> Option<&str> {
    if text.len() > OPEN.len() + CLOSE.len() && text.starts_with(OPEN) && text.ends_with(CLOSE) {
        Some(&text[OPEN.len()..text.len() - CLOSE.len()])
    } else {
        None
    }
}

/// Wrap a key in the marker delimiters.
///
/// This is also the placeholder shown for keys no catalog can resolve.
#[must_use]
pub fn encode(key: &str) -> String {
    let mut out = String::with_capacity(OPEN.len() + key.len() + CLOSE.len());
    out.push_str(OPEN);
    out.push_str(key);
    out.push_str(CLOSE);
    out
}

/// Whether `text` is a well-formed marker.
#[inline]
#[must_use]
pub fn is_marker(text: &str) -> bool {
    decode(text).is_some()
}
