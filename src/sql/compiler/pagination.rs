//! Pagination strategies.
//!
//! The plan is chosen once per (sub)query from the profile's [`Pagination`]
//! and the normalized limit/offset:
//!
//! - **Native**: `... ORDER BY x LIMIT ? OFFSET ?`
//! - **Top**: `SELECT [DISTINCT] TOP (?) ...`, only without a positive offset
//! - **RowNumber**: inner query gains `ROW_NUMBER() OVER (ORDER BY ...)`, the
//!   outer query filters on it
//! - **RowNum**: Oracle `ROWNUM` wrapping
//!
//! Threshold arithmetic saturates so huge offsets never wrap.

use tracing::trace;

use super::clauses::{CoreShape, Parts};
use super::Emitter;
use crate::sql::dialect::{DialectProfile, OffsetOnly, Pagination, RowOrdinal};
use crate::sql::error::CompileResult;
use crate::sql::token::{Token, TokenStream};

/// How a single query is paginated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    None,
    Native {
        limit: Option<u64>,
        offset: Option<u64>,
    },
    Top(u64),
    RowNumber {
        limit: Option<u64>,
        offset: Option<u64>,
    },
    RowNum {
        limit: Option<u64>,
        offset: Option<u64>,
    },
}

impl Plan {
    /// Pick the plan for a profile. `limit` and `offset` are already
    /// normalized: zero limits and non-positive offsets arrive as `None`.
    pub fn choose(profile: &DialectProfile, limit: Option<u64>, offset: Option<u64>) -> Plan {
        if limit.is_none() && offset.is_none() {
            return Plan::None;
        }
        match profile.pagination {
            Pagination::Native => Plan::Native { limit, offset },
            Pagination::PrefixCount => match (limit, offset) {
                (Some(n), None) => Plan::Top(n),
                _ => Plan::RowNumber { limit, offset },
            },
            Pagination::Window(RowOrdinal::RowNumber) => Plan::RowNumber { limit, offset },
            Pagination::Window(RowOrdinal::RowNum) => Plan::RowNum { limit, offset },
        }
    }
}

/// First ordinal to keep (1-based).
fn lower_bound(offset: u64) -> u64 {
    offset.saturating_add(1)
}

/// First ordinal past the page.
fn upper_bound(offset: u64, limit: u64) -> u64 {
    offset.saturating_add(limit).saturating_add(1)
}

fn to_value(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl Emitter<'_> {
    /// Compile the SELECT statement of `parts` with its pagination applied.
    ///
    /// `outermost` is set only for the statement itself; SQL Server rejects an
    /// ORDER BY inside derived tables, CTEs and set-operation operands.
    pub(super) fn paginated(
        &mut self,
        parts: &Parts<'_>,
        outermost: bool,
    ) -> CompileResult<TokenStream> {
        let plan = Plan::choose(self.profile, parts.limit, parts.offset);
        trace!(dialect = self.profile.name, ?plan, "pagination plan");

        match plan {
            Plan::None => self.select_core(parts, CoreShape::default()),
            Plan::Native { limit, offset } => {
                let mut ts = self.select_core(parts, CoreShape::default())?;
                self.native_suffix(&mut ts, limit, offset);
                Ok(ts)
            }
            Plan::Top(n) => self.select_core(
                parts,
                CoreShape {
                    top: Some(n),
                    ..CoreShape::default()
                },
            ),
            Plan::RowNumber { limit, offset } => {
                self.row_number_wrapper(parts, limit, offset, outermost)
            }
            Plan::RowNum { limit, offset } => self.rownum_wrapper(parts, limit, offset),
        }
    }

    fn native_suffix(&mut self, ts: &mut TokenStream, limit: Option<u64>, offset: Option<u64>) {
        match (limit, offset) {
            (Some(limit), _) => {
                let param = self.ctx.bind(to_value(limit));
                ts.keyword(Token::Limit).push(param);
            }
            (None, Some(_)) => {
                if let OffsetOnly::LimitSentinel(sentinel) = self.profile.offset_only {
                    ts.keyword(Token::Limit).push(Token::Raw(sentinel.into()));
                }
            }
            (None, None) => {}
        }
        if let Some(offset) = offset {
            let param = self.ctx.bind(to_value(offset));
            ts.keyword(Token::Offset).push(param);
        }
    }

    /// `SELECT * FROM (inner + ROW_NUMBER()) AS wrapper WHERE row_num ...`
    fn row_number_wrapper(
        &mut self,
        parts: &Parts<'_>,
        limit: Option<u64>,
        offset: Option<u64>,
        outermost: bool,
    ) -> CompileResult<TokenStream> {
        let inner = if parts.distinct {
            self.distinct_row_number(parts)?
        } else {
            self.select_core(
                parts,
                CoreShape {
                    row_number: true,
                    ..CoreShape::default()
                },
            )?
        };

        let mut ts = TokenStream::new();
        ts.push(Token::Select)
            .space()
            .push(Token::Star)
            .keyword(Token::From)
            .lparen()
            .append(&inner)
            .rparen();
        self.renderer
            .push_table_alias(&mut ts, &self.options.wrapper_alias);
        ts.keyword(Token::Where);
        let ordinal = self.renderer.alias(&self.options.row_number_alias);
        self.ordinal_filter(&mut ts, ordinal.clone(), limit, offset);

        if outermost && !parts.orders.is_empty() {
            ts.keyword(Token::OrderBy).push(ordinal);
        }
        Ok(ts)
    }

    /// Oracle `ROWNUM` emulation.
    ///
    /// Limit only:
    /// `SELECT * FROM (inner) WHERE ROWNUM <= ?`
    ///
    /// With an offset:
    /// `SELECT * FROM (SELECT "w".*, ROWNUM AS "row_num" FROM (inner) "w") WHERE "row_num" >= ? [AND "row_num" < ?]`
    fn rownum_wrapper(
        &mut self,
        parts: &Parts<'_>,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> CompileResult<TokenStream> {
        let inner = self.select_core(parts, CoreShape::default())?;
        let mut ts = TokenStream::new();

        let Some(offset) = offset else {
            ts.push(Token::Select)
                .space()
                .push(Token::Star)
                .keyword(Token::From)
                .lparen()
                .append(&inner)
                .rparen()
                .keyword(Token::Where)
                .push(Token::Raw("ROWNUM".into()))
                .space()
                .push(Token::Lte)
                .space();
            let param = self.ctx.bind(to_value(limit.unwrap_or(u64::MAX)));
            ts.push(param);
            return Ok(ts);
        };

        let wrapper = self.renderer.alias(&self.options.wrapper_alias);
        let ordinal = self.renderer.alias(&self.options.row_number_alias);

        ts.push(Token::Select)
            .space()
            .push(Token::Star)
            .keyword(Token::From)
            .lparen()
            .push(Token::Select)
            .space()
            .push(wrapper)
            .push(Token::Dot)
            .push(Token::Star)
            .comma()
            .space()
            .push(Token::Raw("ROWNUM".into()))
            .keyword(Token::As)
            .push(ordinal.clone())
            .keyword(Token::From)
            .lparen()
            .append(&inner)
            .rparen();
        self.renderer
            .push_table_alias(&mut ts, &self.options.wrapper_alias);
        ts.rparen().keyword(Token::Where);
        self.ordinal_filter(&mut ts, ordinal, limit, Some(offset));
        Ok(ts)
    }

    /// `ordinal >= ? [AND ordinal < ?]`, or `ordinal <= ?` without an offset.
    fn ordinal_filter(
        &mut self,
        ts: &mut TokenStream,
        ordinal: Token,
        limit: Option<u64>,
        offset: Option<u64>,
    ) {
        match (offset, limit) {
            (Some(offset), limit) => {
                let lower = self.ctx.bind(to_value(lower_bound(offset)));
                ts.push(ordinal.clone())
                    .space()
                    .push(Token::Gte)
                    .space()
                    .push(lower);
                if let Some(limit) = limit {
                    let upper = self.ctx.bind(to_value(upper_bound(offset, limit)));
                    ts.keyword(Token::And)
                        .push(ordinal)
                        .space()
                        .push(Token::Lt)
                        .space()
                        .push(upper);
                }
            }
            (None, Some(limit)) => {
                let upper = self.ctx.bind(to_value(limit));
                ts.push(ordinal).space().push(Token::Lte).space().push(upper);
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MYSQL, ORACLE, POSTGRES, TSQL};

    #[test]
    fn test_plan_choice() {
        assert_eq!(Plan::choose(&TSQL, None, None), Plan::None);
        assert_eq!(Plan::choose(&TSQL, Some(5), None), Plan::Top(5));
        assert_eq!(
            Plan::choose(&TSQL, Some(5), Some(10)),
            Plan::RowNumber {
                limit: Some(5),
                offset: Some(10)
            }
        );
        assert_eq!(
            Plan::choose(&POSTGRES, None, Some(3)),
            Plan::Native {
                limit: None,
                offset: Some(3)
            }
        );
        assert_eq!(
            Plan::choose(&MYSQL, Some(1), None),
            Plan::Native {
                limit: Some(1),
                offset: None
            }
        );
        assert_eq!(
            Plan::choose(&ORACLE, Some(1), None),
            Plan::RowNum {
                limit: Some(1),
                offset: None
            }
        );
    }

    #[test]
    fn test_bounds_saturate() {
        assert_eq!(lower_bound(4), 5);
        assert_eq!(upper_bound(4, 10), 15);
        assert_eq!(upper_bound(u64::MAX - 1, 10), u64::MAX);
        assert_eq!(to_value(u64::MAX), i64::MAX);
    }
}
