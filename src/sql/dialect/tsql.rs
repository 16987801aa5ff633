//! T-SQL (SQL Server / Azure SQL) dialect.
//!
//! T-SQL differs from ANSI in ways that matter to the compiler:
//! - Square bracket identifier quoting (`[name]`)
//! - Numbered `@p0` parameters
//! - No `LIMIT`; `TOP (n)` for plain limiting, `ROW_NUMBER()` wrapping when
//!   an offset is requested
//! - `N'...'` prefix for Unicode strings
//! - At most 2100 parameters per request

use super::{CaseInsensitiveLike, DialectProfile, OffsetOnly, Pagination, PlaceholderStyle};

/// T-SQL (SQL Server) profile.
pub const TSQL: DialectProfile = DialectProfile {
    name: "tsql",
    open_quote: '[',
    close_quote: ']',
    placeholder: PlaceholderStyle::Numbered { prefix: "@p" },
    pagination: Pagination::PrefixCount,
    offset_only: OffsetOnly::Bare,
    true_literal: "1",
    false_literal: "0",
    unicode_string_prefix: true,
    bytes_prefix: "0x",
    bytes_suffix: "",
    case_insensitive_like: CaseInsensitiveLike::LowerBoth,
    table_alias_as: true,
    supports_intersect: true,
    supports_except: true,
    except_keyword: "EXCEPT",
    supports_full_join: true,
    supports_right_join: true,
    parenthesized_set_operands: true,
    max_parameters: Some(2100),
};
