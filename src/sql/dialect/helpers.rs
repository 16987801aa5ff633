//! Shared helper functions for dialect profiles.
//!
//! Profiles are plain data; these helpers turn that data into text so every
//! engine goes through the same quoting and escaping code.

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Wrap a single identifier segment in `open`/`close`, doubling any embedded
/// closing quote character.
///
/// Used by: every profile (`"` for ANSI/Postgres/SQLite/Oracle, `` ` `` for
/// MySQL, `[`/`]` for T-SQL).
pub fn quote_with(ident: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(ident.len() + 2);
    out.push(open);
    for ch in ident.chars() {
        if ch == close {
            out.push(close);
        }
        out.push(ch);
    }
    out.push(close);
    out
}

/// Whether `segment` is already a complete quoted identifier for the given
/// quote pair (every inner closing quote doubled).
pub fn is_quoted(segment: &str, open: char, close: char) -> bool {
    let Some(inner) = segment
        .strip_prefix(open)
        .and_then(|rest| rest.strip_suffix(close))
    else {
        return false;
    };

    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == close {
            if chars.peek() == Some(&close) {
                chars.next();
            } else {
                return false;
            }
        }
    }
    true
}

/// Split a compound reference (`schema.table.column`) on `.` separators that
/// are outside quoted segments.
pub fn split_compound(name: &str, open: char, close: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut chars = name.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if quoted {
            if ch == close {
                // doubled close quote is an escaped character, not the end
                if chars.peek().map(|&(_, next)| next) == Some(close) {
                    chars.next();
                } else {
                    quoted = false;
                }
            }
        } else if ch == open {
            quoted = true;
        } else if ch == '.' {
            parts.push(&name[start..i]);
            start = i + 1;
        }
    }
    parts.push(&name[start..]);
    parts
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
/// Used by: All dialects
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote string with N prefix for Unicode (T-SQL).
/// Used by: T-SQL for non-ASCII strings
pub fn quote_string_unicode(s: &str) -> String {
    format!("N'{}'", s.replace('\'', "''"))
}

// =============================================================================
// Numeric / Binary Formatting
// =============================================================================

/// Format a float literal. Non-finite values have no SQL literal form and are
/// rendered as quoted strings.
pub fn format_float(f: f64) -> String {
    if f.is_finite() {
        let mut buffer = ryu::Buffer::new();
        buffer.format(f).to_string()
    } else if f.is_nan() {
        quote_string_single("NaN")
    } else if f.is_sign_positive() {
        quote_string_single("Infinity")
    } else {
        quote_string_single("-Infinity")
    }
}

/// Upper-case hex digits for a binary literal body.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
