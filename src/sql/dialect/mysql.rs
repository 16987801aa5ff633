//! MySQL SQL dialect.
//!
//! MySQL features:
//! - Backtick identifier quoting
//! - Anonymous `?` parameters
//! - `LIMIT` is mandatory before `OFFSET`; an offset-only query uses the
//!   largest unsigned 64-bit row count as its limit
//! - No FULL OUTER JOIN
//! - No INTERSECT / EXCEPT before 8.0.31; treated as unsupported

use super::{CaseInsensitiveLike, DialectProfile, OffsetOnly, Pagination, PlaceholderStyle};

/// MySQL profile.
pub const MYSQL: DialectProfile = DialectProfile {
    name: "mysql",
    open_quote: '`',
    close_quote: '`',
    placeholder: PlaceholderStyle::Question,
    pagination: Pagination::Native,
    offset_only: OffsetOnly::LimitSentinel("18446744073709551615"),
    true_literal: "1",
    false_literal: "0",
    unicode_string_prefix: false,
    bytes_prefix: "X'",
    bytes_suffix: "'",
    case_insensitive_like: CaseInsensitiveLike::LowerBoth,
    table_alias_as: true,
    supports_intersect: false,
    supports_except: false,
    except_keyword: "EXCEPT",
    supports_full_join: false,
    supports_right_join: true,
    parenthesized_set_operands: true,
    max_parameters: Some(65535),
};
