//! SQL dialect profiles.
//!
//! Every supported engine is described by a [`DialectProfile`]: a `'static`
//! block of data consumed by the shared clause compilers. Differences that are
//! purely parametric (quote characters, placeholder syntax, literal spelling)
//! live in fields; the only genuinely divergent algorithm, pagination, is
//! selected through [`Pagination`].
//!
//! | Feature | SQL Server | PostgreSQL | MySQL | SQLite | Oracle |
//! |---------|-----------|------------|-------|--------|--------|
//! | Identifier quotes | `[ ]` | `" "` | `` ` ` `` | `" "` | `" "` |
//! | Placeholders | `@p0` | `$1` | `?` | `?` | `:p0` |
//! | Pagination | TOP / ROW_NUMBER | LIMIT/OFFSET | LIMIT/OFFSET | LIMIT/OFFSET | ROWNUM |
//! | INTERSECT / EXCEPT | ✓ | ✓ | ❌ | ✓ | ✓ (MINUS) |
//! | FULL OUTER JOIN | ✓ | ✓ | ❌ | ✓ | ✓ |
//! | Parenthesized set operands | ✓ | ✓ | ✓ | ❌ | ✓ |
//! | Bound parameter ceiling | 2100 | 65535 | 65535 | 32766 | 65535 |
//!
//! # Usage
//!
//! ```
//! use sqlpress::dialect::Dialect;
//!
//! let profile = Dialect::TSql.profile();
//! assert_eq!(profile.placeholder(0), "@p0");
//! ```

pub mod helpers;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod tsql;

pub use mysql::MYSQL;
pub use oracle::ORACLE;
pub use postgres::POSTGRES;
pub use sqlite::SQLITE;
pub use tsql::TSQL;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Profile data
// =============================================================================

/// How bound parameters are spelled in the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// Zero-based numbered markers with a prefix: `@p0`, `:p0`.
    Numbered { prefix: &'static str },
    /// One-based dollar markers: `$1`, `$2`.
    Dollar,
    /// Anonymous positional markers: `?`.
    Question,
}

/// Synthetic ordinal used by window emulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrdinal {
    /// `ROW_NUMBER() OVER (ORDER BY ...)` injected as an extra column.
    RowNumber,
    /// Oracle pseudo-column `ROWNUM`, assigned after the inner query's ordering.
    RowNum,
}

/// Pagination strategy declared by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `LIMIT n OFFSET m` appended after ORDER BY.
    Native,
    /// `TOP (n)` after `SELECT [DISTINCT]`. A positive offset falls through to
    /// `ROW_NUMBER()` window emulation.
    PrefixCount,
    /// Every limit/offset is emulated with a wrapping query.
    Window(RowOrdinal),
}

/// What a native-pagination engine needs when only an offset is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetOnly {
    /// `OFFSET m` is valid on its own.
    Bare,
    /// A LIMIT is mandatory; emit this sentinel row count in front.
    LimitSentinel(&'static str),
}

/// How case-insensitive LIKE is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseInsensitiveLike {
    /// `col ILIKE ?`
    Ilike,
    /// `LOWER(col) LIKE ?` with a lower-cased binding.
    LowerBoth,
}

/// Static description of one SQL engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectProfile {
    /// Short engine name used in logs and errors.
    pub name: &'static str,
    pub open_quote: char,
    pub close_quote: char,
    pub placeholder: PlaceholderStyle,
    pub pagination: Pagination,
    pub offset_only: OffsetOnly,
    pub true_literal: &'static str,
    pub false_literal: &'static str,
    /// Prefix non-ASCII string literals with `N` when inlining.
    pub unicode_string_prefix: bool,
    /// Binary literal template parts: `prefix` + hex + `suffix`.
    pub bytes_prefix: &'static str,
    pub bytes_suffix: &'static str,
    pub case_insensitive_like: CaseInsensitiveLike,
    /// Whether table aliases take the `AS` keyword (`FROM t AS x` vs `FROM t x`).
    pub table_alias_as: bool,
    pub supports_intersect: bool,
    pub supports_except: bool,
    /// Keyword for set difference (`EXCEPT`, or `MINUS` on Oracle).
    pub except_keyword: &'static str,
    pub supports_full_join: bool,
    pub supports_right_join: bool,
    /// Whether a set-operation arm may be wrapped in parentheses.
    pub parenthesized_set_operands: bool,
    /// Maximum number of bound parameters per statement.
    pub max_parameters: Option<usize>,
}

impl DialectProfile {
    /// Render the placeholder for a zero-based binding index.
    pub fn placeholder(&self, index: usize) -> String {
        match self.placeholder {
            PlaceholderStyle::Numbered { prefix } => format!("{}{}", prefix, index),
            PlaceholderStyle::Dollar => format!("${}", index + 1),
            PlaceholderStyle::Question => "?".into(),
        }
    }

    /// Quote one identifier segment.
    pub fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_with(ident, self.open_quote, self.close_quote)
    }

    /// Quote a string literal.
    pub fn quote_string(&self, s: &str) -> String {
        if self.unicode_string_prefix && !s.is_ascii() {
            helpers::quote_string_unicode(s)
        } else {
            helpers::quote_string_single(s)
        }
    }

    /// Format a boolean literal.
    pub fn format_bool(&self, b: bool) -> &'static str {
        if b {
            self.true_literal
        } else {
            self.false_literal
        }
    }
}

// =============================================================================
// Dialect selector
// =============================================================================

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    #[serde(alias = "sqlserver", alias = "mssql")]
    TSql,
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
    MySql,
    SQLite,
    Oracle,
}

impl Dialect {
    /// All supported dialects.
    pub const ALL: [Dialect; 5] = [
        Dialect::TSql,
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::SQLite,
        Dialect::Oracle,
    ];

    /// Get the profile for this dialect.
    pub fn profile(&self) -> &'static DialectProfile {
        match self {
            Dialect::TSql => &TSQL,
            Dialect::Postgres => &POSTGRES,
            Dialect::MySql => &MYSQL,
            Dialect::SQLite => &SQLITE,
            Dialect::Oracle => &ORACLE,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.profile().name)
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsql" | "sqlserver" | "mssql" => Ok(Dialect::TSql),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::SQLite),
            "oracle" => Ok(Dialect::Oracle),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::TSql.to_string(), "tsql");
        assert_eq!(Dialect::Postgres.to_string(), "postgres");
        assert_eq!(Dialect::MySql.to_string(), "mysql");
        assert_eq!(Dialect::SQLite.to_string(), "sqlite");
        assert_eq!(Dialect::Oracle.to_string(), "oracle");
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("sqlserver".parse::<Dialect>(), Ok(Dialect::TSql));
        assert_eq!("MSSQL".parse::<Dialect>(), Ok(Dialect::TSql));
        assert_eq!("postgresql".parse::<Dialect>(), Ok(Dialect::Postgres));
        assert_eq!("SQLite".parse::<Dialect>(), Ok(Dialect::SQLite));
        assert_eq!(
            "db2".parse::<Dialect>(),
            Err(UnknownDialect("db2".into()))
        );
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(Dialect::TSql.profile().quote_identifier("users"), "[users]");
        assert_eq!(
            Dialect::Postgres.profile().quote_identifier("users"),
            "\"users\""
        );
        assert_eq!(Dialect::MySql.profile().quote_identifier("users"), "`users`");
        assert_eq!(
            Dialect::TSql.profile().quote_identifier("weird]name"),
            "[weird]]name]"
        );
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(TSQL.placeholder(0), "@p0");
        assert_eq!(TSQL.placeholder(12), "@p12");
        assert_eq!(POSTGRES.placeholder(0), "$1");
        assert_eq!(MYSQL.placeholder(3), "?");
        assert_eq!(SQLITE.placeholder(3), "?");
        assert_eq!(ORACLE.placeholder(2), ":p2");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(TSQL.quote_string("it's"), "'it''s'");
        assert_eq!(TSQL.quote_string("café"), "N'café'");
        assert_eq!(POSTGRES.quote_string("café"), "'café'");
    }

    #[test]
    fn test_format_bool() {
        assert_eq!(TSQL.format_bool(true), "1");
        assert_eq!(MYSQL.format_bool(false), "0");
        assert_eq!(POSTGRES.format_bool(true), "true");
        assert_eq!(SQLITE.format_bool(false), "0");
    }

    #[test]
    fn test_pagination_strategies() {
        assert_eq!(TSQL.pagination, Pagination::PrefixCount);
        assert_eq!(POSTGRES.pagination, Pagination::Native);
        assert_eq!(MYSQL.pagination, Pagination::Native);
        assert_eq!(ORACLE.pagination, Pagination::Window(RowOrdinal::RowNum));
    }

    #[test]
    fn test_profiles_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DialectProfile>();
        assert_send_sync::<Dialect>();
    }
}
