//! Column specification expander.
//!
//! Turns the string forms accepted by
//! [`Query::select`](super::query::Query::select) into concrete columns
//! before compilation:
//!
//! | Input | Result |
//! |-------|--------|
//! | `id` | `Column { name: "id" }` |
//! | `users.id as uid` | `Column { name: "users.id", alias: "uid" }` |
//! | `Test.{ Code as A, Name }` | one `Column` per entry, each qualified with `Test` |
//! | `raw:COUNT(*) AS n` | `Raw`, text forwarded untouched |
//!
//! Whitespace and newlines inside a shorthand block are insignificant.

use once_cell::sync::Lazy;
use regex::Regex;

use super::clause::{Column, Raw};
use super::error::{CompileError, CompileResult};
use super::render::split_alias;

/// Marker that forwards the rest of a column specification verbatim.
pub const RAW_MARKER: &str = "raw:";

static SHORTHAND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(.*?)\.\{(.*)\}$").expect("shorthand pattern is valid"));

/// One column produced by expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum Expanded {
    Column(Column),
    Raw(Raw),
}

/// Expand one column specification.
pub fn expand(spec: &str) -> CompileResult<Vec<Expanded>> {
    if let Some(text) = spec.strip_prefix(RAW_MARKER) {
        return Ok(vec![Expanded::Raw(Raw::new(text))]);
    }

    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(CompileError::MissingIdentifier { clause: "SELECT" });
    }

    let Some(caps) = SHORTHAND_PATTERN.captures(trimmed) else {
        if trimmed.contains(['{', '}']) {
            return Err(malformed(spec, "unbalanced braces"));
        }
        return Ok(vec![Expanded::Column(plain_column(trimmed))]);
    };

    let prefix = caps.get(1).map_or("", |m| m.as_str()).trim();
    let body = caps.get(2).map_or("", |m| m.as_str());

    if prefix.is_empty() {
        return Err(malformed(spec, "empty prefix"));
    }
    if prefix.contains(['{', '}']) || body.contains(['{', '}']) {
        return Err(malformed(spec, "nested or unbalanced braces"));
    }

    body.split(',')
        .map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(malformed(spec, "empty entry"));
            }
            let (name, alias) = split_alias(entry);
            Ok(Expanded::Column(Column {
                source: Some(prefix.to_string()),
                name: name.to_string(),
                alias: alias.map(str::to_string),
            }))
        })
        .collect()
}

fn plain_column(spec: &str) -> Column {
    let (name, alias) = split_alias(spec);
    Column {
        source: None,
        name: name.to_string(),
        alias: alias.map(str::to_string),
    }
}

fn malformed(spec: &str, reason: &'static str) -> CompileError {
    CompileError::MalformedShorthand {
        spec: spec.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(source: Option<&str>, name: &str, alias: Option<&str>) -> Expanded {
        Expanded::Column(Column {
            source: source.map(Into::into),
            name: name.into(),
            alias: alias.map(Into::into),
        })
    }

    #[test]
    fn test_plain_and_aliased() {
        assert_eq!(expand("id").unwrap(), vec![col(None, "id", None)]);
        assert_eq!(
            expand("Test.FromValue as FromValue").unwrap(),
            vec![col(None, "Test.FromValue", Some("FromValue"))]
        );
    }

    #[test]
    fn test_shorthand_with_aliases() {
        assert_eq!(
            expand("Test.{ Code as Test, Test1 as FromValue }").unwrap(),
            vec![
                col(Some("Test"), "Code", Some("Test")),
                col(Some("Test"), "Test1", Some("FromValue")),
            ]
        );
    }

    #[test]
    fn test_shorthand_multiline() {
        let spec = "Test.{\n    AvailDate as Date,\n    Avail\n}";
        assert_eq!(
            expand(spec).unwrap(),
            vec![
                col(Some("Test"), "AvailDate", Some("Date")),
                col(Some("Test"), "Avail", None),
            ]
        );
    }

    #[test]
    fn test_schema_qualified_prefix() {
        assert_eq!(
            expand("dbo.Test.{ Id }").unwrap(),
            vec![col(Some("dbo.Test"), "Id", None)]
        );
    }

    #[test]
    fn test_raw_marker_is_verbatim() {
        assert_eq!(
            expand("raw:COUNT(*) AS  total").unwrap(),
            vec![Expanded::Raw(Raw::new("COUNT(*) AS  total"))]
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            expand(".{ A }"),
            Err(CompileError::MalformedShorthand { reason: "empty prefix", .. })
        ));
        assert!(matches!(
            expand("Test.{ A, , B }"),
            Err(CompileError::MalformedShorthand { reason: "empty entry", .. })
        ));
        assert!(matches!(
            expand("Test.{ A"),
            Err(CompileError::MalformedShorthand { .. })
        ));
        assert!(matches!(
            expand("Test.{ A.{ B } }"),
            Err(CompileError::MalformedShorthand { .. })
        ));
        assert_eq!(
            expand("   "),
            Err(CompileError::MissingIdentifier { clause: "SELECT" })
        );
    }
}
