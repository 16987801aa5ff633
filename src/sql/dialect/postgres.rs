//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - One-based `$1` parameters
//! - Native `LIMIT`/`OFFSET`, each usable alone
//! - `ILIKE` for case-insensitive matching
//! - Native boolean type (true/false)

use super::{CaseInsensitiveLike, DialectProfile, OffsetOnly, Pagination, PlaceholderStyle};

/// PostgreSQL profile.
pub const POSTGRES: DialectProfile = DialectProfile {
    name: "postgres",
    open_quote: '"',
    close_quote: '"',
    placeholder: PlaceholderStyle::Dollar,
    pagination: Pagination::Native,
    offset_only: OffsetOnly::Bare,
    true_literal: "true",
    false_literal: "false",
    unicode_string_prefix: false,
    bytes_prefix: "'\\x",
    bytes_suffix: "'",
    case_insensitive_like: CaseInsensitiveLike::Ilike,
    table_alias_as: true,
    supports_intersect: true,
    supports_except: true,
    except_keyword: "EXCEPT",
    supports_full_join: true,
    supports_right_join: true,
    parenthesized_set_operands: true,
    max_parameters: Some(65535),
};
