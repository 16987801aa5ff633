//! Oracle SQL dialect.
//!
//! Oracle features:
//! - ANSI identifier quoting (`"`)
//! - Numbered `:p0` bind variables
//! - No `LIMIT`; pagination through the `ROWNUM` pseudo-column
//! - Table aliases without `AS`
//! - `MINUS` instead of `EXCEPT`
//! - No boolean SQL type before 23c (1/0)

use super::{
    CaseInsensitiveLike, DialectProfile, OffsetOnly, Pagination, PlaceholderStyle, RowOrdinal,
};

/// Oracle profile.
pub const ORACLE: DialectProfile = DialectProfile {
    name: "oracle",
    open_quote: '"',
    close_quote: '"',
    placeholder: PlaceholderStyle::Numbered { prefix: ":p" },
    pagination: Pagination::Window(RowOrdinal::RowNum),
    offset_only: OffsetOnly::Bare,
    true_literal: "1",
    false_literal: "0",
    unicode_string_prefix: true,
    bytes_prefix: "HEXTORAW('",
    bytes_suffix: "')",
    case_insensitive_like: CaseInsensitiveLike::LowerBoth,
    table_alias_as: false,
    supports_intersect: true,
    supports_except: true,
    except_keyword: "MINUS",
    supports_full_join: true,
    supports_right_join: true,
    parenthesized_set_operands: true,
    max_parameters: Some(65535),
};
