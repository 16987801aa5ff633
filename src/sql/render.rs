//! Identifier rendering.
//!
//! The [`Renderer`] turns user-supplied names into tokens for one dialect:
//! compound references are split on `.` and each segment quoted on its own,
//! `*` is left bare, and segments that are already quoted pass through, so
//! quoting is idempotent. Raw fragments never come through here.

use once_cell::sync::Lazy;
use regex::Regex;

use super::dialect::{helpers, DialectProfile};
use super::token::{Token, TokenStream};

static ALIAS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^(.+?)\s+as\s+(.+)$").expect("alias pattern is valid"));

/// Split `expr as alias` (case-insensitive `AS`) into its two halves.
///
/// ```
/// use sqlpress::render::split_alias;
///
/// assert_eq!(split_alias("users.id AS uid"), ("users.id", Some("uid")));
/// assert_eq!(split_alias("users.id"), ("users.id", None));
/// ```
pub fn split_alias(spec: &str) -> (&str, Option<&str>) {
    let spec = spec.trim();
    match ALIAS_PATTERN.captures(spec) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(name), Some(alias)) => (name.as_str().trim(), Some(alias.as_str().trim())),
            _ => (spec, None),
        },
        None => (spec, None),
    }
}

/// Dialect-bound identifier renderer.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    profile: &'static DialectProfile,
}

impl Renderer {
    pub fn new(profile: &'static DialectProfile) -> Self {
        Self { profile }
    }

    /// Quote a (possibly compound) reference and return the text.
    pub fn quote(&self, name: &str) -> String {
        self.reference(name).serialize(self.profile)
    }

    /// Tokens for a compound reference such as `schema.table.column`.
    pub fn reference(&self, name: &str) -> TokenStream {
        let mut ts = TokenStream::new();
        let segments =
            helpers::split_compound(name.trim(), self.profile.open_quote, self.profile.close_quote);
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                ts.push(Token::Dot);
            }
            ts.push(self.segment(segment.trim()));
        }
        ts
    }

    /// Tokens for a table reference with an optional alias. An inline
    /// `name as alias` is honoured when `alias` is `None`.
    pub fn table(&self, name: &str, alias: Option<&str>) -> TokenStream {
        let (name, inline_alias) = match alias {
            Some(_) => (name.trim(), None),
            None => split_alias(name),
        };
        let mut ts = self.reference(name);
        if let Some(alias) = alias.or(inline_alias) {
            self.push_table_alias(&mut ts, alias);
        }
        ts
    }

    /// Append ` AS alias` or ` alias` depending on the dialect.
    pub fn push_table_alias(&self, ts: &mut TokenStream, alias: &str) {
        if self.profile.table_alias_as {
            ts.keyword(Token::As);
        } else {
            ts.space();
        }
        ts.push(self.alias(alias));
    }

    /// A single alias identifier. Aliases are never split on `.`.
    pub fn alias(&self, alias: &str) -> Token {
        self.segment(alias.trim())
    }

    fn segment(&self, segment: &str) -> Token {
        if segment == "*" {
            Token::Star
        } else if helpers::is_quoted(segment, self.profile.open_quote, self.profile.close_quote) {
            Token::Raw(segment.to_string())
        } else {
            Token::Ident(segment.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{ORACLE, POSTGRES, TSQL};

    #[test]
    fn test_split_alias() {
        assert_eq!(split_alias("a as b"), ("a", Some("b")));
        assert_eq!(split_alias("  a   AS   b "), ("a", Some("b")));
        assert_eq!(split_alias("a As b"), ("a", Some("b")));
        assert_eq!(split_alias("alias"), ("alias", None));
        assert_eq!(split_alias("basket"), ("basket", None));
    }

    #[test]
    fn test_quote_compound() {
        let r = Renderer::new(&TSQL);
        assert_eq!(r.quote("users"), "[users]");
        assert_eq!(r.quote("dbo.users.id"), "[dbo].[users].[id]");
        assert_eq!(r.quote("users.*"), "[users].*");
        assert_eq!(r.quote("*"), "*");
    }

    #[test]
    fn test_quote_is_idempotent() {
        for profile in [&TSQL, &POSTGRES] {
            let r = Renderer::new(profile);
            for name in ["users", "dbo.users", "a.b.c", "weird]name", "we\"ird", "t.*"] {
                let once = r.quote(name);
                assert_eq!(r.quote(&once), once, "{} on {}", name, profile.name);
            }
        }
    }

    #[test]
    fn test_table_alias_keyword() {
        let r = Renderer::new(&TSQL);
        assert_eq!(r.table("users", Some("u")).serialize(&TSQL), "[users] AS [u]");
        assert_eq!(r.table("users as u", None).serialize(&TSQL), "[users] AS [u]");

        let r = Renderer::new(&ORACLE);
        assert_eq!(r.table("users", Some("u")).serialize(&ORACLE), "\"users\" \"u\"");
    }
}
