//! SQLite SQL dialect.
//!
//! SQLite features:
//! - ANSI identifier quoting (`"`)
//! - Anonymous `?` parameters
//! - `LIMIT -1` stands for "no limit" when only an offset is given
//! - Compound SELECT arms cannot be parenthesized, so an arm with its own
//!   ORDER BY or LIMIT cannot be expressed
//! - 32766 host parameters (SQLITE_MAX_VARIABLE_NUMBER since 3.32)

use super::{CaseInsensitiveLike, DialectProfile, OffsetOnly, Pagination, PlaceholderStyle};

/// SQLite profile.
pub const SQLITE: DialectProfile = DialectProfile {
    name: "sqlite",
    open_quote: '"',
    close_quote: '"',
    placeholder: PlaceholderStyle::Question,
    pagination: Pagination::Native,
    offset_only: OffsetOnly::LimitSentinel("-1"),
    true_literal: "1",
    false_literal: "0",
    unicode_string_prefix: false,
    bytes_prefix: "X'",
    bytes_suffix: "'",
    case_insensitive_like: CaseInsensitiveLike::LowerBoth,
    table_alias_as: true,
    supports_intersect: true,
    supports_except: true,
    except_keyword: "EXCEPT",
    supports_full_join: true,
    supports_right_join: true,
    parenthesized_set_operands: false,
    max_parameters: Some(32766),
};
