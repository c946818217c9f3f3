// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Escaping of TEXT values as defined in RFC 5545 Section 3.3.11.
//!
//! ```text
//! ESCAPED-CHAR = ("\\" / "\;" / "\," / "\N" / "\n")
//! ```

use std::borrow::Cow;

/// Resolve escape sequences in a TEXT value.
///
/// Unknown escapes (e.g. `\t`) and a trailing lone backslash are kept as-is.
#[must_use]
pub fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some(c @ ('\\' | ';' | ',')) => result.push(c),
            Some('n' | 'N') => result.push('\n'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    Cow::Owned(result)
}

/// Escape special characters in a TEXT value.
///
/// CR characters are dropped, a newline becomes `\n`.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', ';', ',', '\n', '\r']) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Split an escaped value on separators that are not preceded by a backslash.
///
/// The parts are returned still escaped.
#[must_use]
pub fn split_unescaped(raw: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in raw.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            parts.push(raw.get(start..i).unwrap_or_default());
            start = i + c.len_utf8();
        }
    }
    parts.push(raw.get(start..).unwrap_or_default());
    parts
}
