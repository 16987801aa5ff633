//! Clause compilers.
//!
//! Each clause kind has one emitting method on [`Emitter`]. Values are bound
//! into the shared context at the exact point their placeholder is pushed,
//! so binding order always follows the text.

use std::borrow::Cow;

use crate::sql::clause::{
    Aggregate, Clause, Column, Condition, ConditionKind, Connector, Direction, Expr, Join,
    JoinKind, Operand, Operator, Raw, SetOp, Source,
};
use crate::sql::dialect::{helpers, CaseInsensitiveLike};
use crate::sql::error::{CompileError, CompileResult};
use crate::sql::expand::{self, Expanded};
use crate::sql::query::Query;
use crate::sql::token::{Token, TokenStream};
use crate::sql::value::Value;

use super::Emitter;

/// Derived table holding de-duplicated rows under window emulation.
const DISTINCT_ALIAS: &str = "distinct_rows";

// =============================================================================
// Partition
// =============================================================================

/// One entry of the SELECT list after shorthand expansion.
#[derive(Debug)]
pub(super) enum SelectItem<'q> {
    Column(Cow<'q, Column>),
    Raw(Cow<'q, Raw>),
    Aggregate {
        function: Aggregate,
        column: &'q str,
        alias: Option<&'q str>,
    },
    Subquery {
        query: &'q Query,
        alias: &'q str,
    },
}

/// A set-operation arm.
#[derive(Debug)]
pub(super) struct SetArm<'q> {
    pub kind: SetOp,
    pub all: bool,
    pub query: &'q Query,
}

/// The clauses of one query sorted into statement sections.
#[derive(Debug, Default)]
pub(super) struct Parts<'q> {
    pub ctes: Vec<(&'q str, &'q Query)>,
    pub columns: Vec<SelectItem<'q>>,
    pub distinct: bool,
    pub from: Option<&'q Source>,
    pub joins: Vec<&'q Join>,
    pub wheres: Vec<&'q Condition>,
    pub groups: Vec<&'q Expr>,
    pub havings: Vec<&'q Condition>,
    pub orders: Vec<(&'q Expr, Direction)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub set_ops: Vec<SetArm<'q>>,
}

impl<'q> Parts<'q> {
    /// Partition `query`, expanding column shorthand on the way.
    pub fn collect(query: &'q Query) -> CompileResult<Self> {
        let mut parts = Parts {
            limit: query.limit_value(),
            offset: query.offset_value(),
            ..Parts::default()
        };

        for clause in query.clauses() {
            match clause {
                Clause::Select(spec) => {
                    for item in expand::expand(spec)? {
                        parts.columns.push(match item {
                            Expanded::Column(column) => SelectItem::Column(Cow::Owned(column)),
                            Expanded::Raw(raw) => SelectItem::Raw(Cow::Owned(raw)),
                        });
                    }
                }
                Clause::Column(column) => {
                    parts.columns.push(SelectItem::Column(Cow::Borrowed(column)))
                }
                Clause::RawColumn(raw) => parts.columns.push(SelectItem::Raw(Cow::Borrowed(raw))),
                Clause::AggregateColumn {
                    function,
                    column,
                    alias,
                } => parts.columns.push(SelectItem::Aggregate {
                    function: *function,
                    column,
                    alias: alias.as_deref(),
                }),
                Clause::SubqueryColumn { query, alias } => {
                    parts.columns.push(SelectItem::Subquery { query, alias })
                }
                Clause::From(source) => parts.from = Some(source),
                Clause::Join(join) => parts.joins.push(join),
                Clause::Where(condition) => parts.wheres.push(condition),
                Clause::GroupBy(expr) => parts.groups.push(expr),
                Clause::Having(condition) => parts.havings.push(condition),
                Clause::OrderBy { expr, direction } => parts.orders.push((expr, *direction)),
                // normalized above; last one wins
                Clause::Limit(_) | Clause::Offset(_) => {}
                Clause::Distinct => parts.distinct = true,
                Clause::Union { query, kind, all } => parts.set_ops.push(SetArm {
                    kind: *kind,
                    all: *all,
                    query,
                }),
                Clause::Cte { name, query } => parts.ctes.push((name.as_str(), query.as_ref())),
            }
        }
        Ok(parts)
    }

    /// Whether this query must be parenthesized to act as a set operand.
    pub fn needs_parens(&self) -> bool {
        !self.orders.is_empty() || self.limit.is_some() || self.offset.is_some()
    }
}

/// Shape adjustments the pagination strategy asks of the SELECT core.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct CoreShape {
    /// `TOP (n)` after `SELECT [DISTINCT]`.
    pub top: Option<u64>,
    /// Append the `ROW_NUMBER()` ordinal column and move ORDER BY into it.
    pub row_number: bool,
    /// Leave out ORDER BY; an enclosing query applies the order.
    pub unordered: bool,
}

/// Text or binding marker inside a raw fragment.
enum RawPiece<'t> {
    Text(Cow<'t, str>),
    Marker,
}

/// Split raw text on unescaped `?` markers. `\?` becomes a literal `?`.
fn split_raw(text: &str) -> Vec<RawPiece<'_>> {
    if !text.contains('?') {
        return vec![RawPiece::Text(Cow::Borrowed(text))];
    }

    let mut pieces = Vec::new();
    let mut buf = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'?') => {
                chars.next();
                buf.push('?');
            }
            '?' => {
                if !buf.is_empty() {
                    pieces.push(RawPiece::Text(Cow::Owned(std::mem::take(&mut buf))));
                }
                pieces.push(RawPiece::Marker);
            }
            _ => buf.push(ch),
        }
    }
    if !buf.is_empty() {
        pieces.push(RawPiece::Text(Cow::Owned(buf)));
    }
    pieces
}

fn non_empty<'s>(name: &'s str, clause: &'static str) -> CompileResult<&'s str> {
    let name = name.trim();
    if name.is_empty() {
        Err(CompileError::MissingIdentifier { clause })
    } else {
        Ok(name)
    }
}

fn operator_token(op: Operator) -> Token {
    match op {
        Operator::Eq => Token::Eq,
        Operator::NotEq => Token::Ne,
        Operator::Lt => Token::Lt,
        Operator::Lte => Token::Lte,
        Operator::Gt => Token::Gt,
        Operator::Gte => Token::Gte,
    }
}

fn is_empty_group(condition: &Condition) -> bool {
    match &condition.kind {
        ConditionKind::Group(list) => list.iter().all(is_empty_group),
        _ => false,
    }
}

// =============================================================================
// Emitters
// =============================================================================

impl Emitter<'_> {
    /// `SELECT [DISTINCT] [TOP (n)] columns FROM ... [ORDER BY ...]`
    pub(super) fn select_core(
        &mut self,
        parts: &Parts<'_>,
        shape: CoreShape,
    ) -> CompileResult<TokenStream> {
        let mut ts = TokenStream::new();
        ts.push(Token::Select);
        if parts.distinct {
            ts.space().push(Token::Distinct);
        }
        if let Some(n) = shape.top {
            let param = self.ctx.bind(i64::try_from(n).unwrap_or(i64::MAX));
            ts.space()
                .push(Token::Top)
                .space()
                .lparen()
                .push(param)
                .rparen();
        }
        ts.space();
        self.select_list(&mut ts, &parts.columns)?;

        if shape.row_number {
            ts.comma().space();
            self.row_number_column(&mut ts, &parts.orders)?;
        }

        let source = parts.from.ok_or(CompileError::MissingSource)?;
        ts.keyword(Token::From);
        self.source(&mut ts, source, "FROM")?;

        for join in &parts.joins {
            self.join(&mut ts, join)?;
        }

        let filter = self.conditions(&parts.wheres)?;
        if !filter.is_empty() {
            ts.keyword(Token::Where).append(&filter);
        }

        if !parts.groups.is_empty() {
            ts.keyword(Token::GroupBy);
            for (i, expr) in parts.groups.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                self.expr(&mut ts, expr, "GROUP BY")?;
            }
        }

        let having = self.conditions(&parts.havings)?;
        if !having.is_empty() {
            ts.keyword(Token::Having).append(&having);
        }

        if !shape.row_number && !shape.unordered && !parts.orders.is_empty() {
            ts.keyword(Token::OrderBy);
            self.order_list(&mut ts, &parts.orders)?;
        }

        Ok(ts)
    }

    fn select_list(&mut self, ts: &mut TokenStream, columns: &[SelectItem<'_>]) -> CompileResult<()> {
        if columns.is_empty() {
            ts.push(Token::Star);
            return Ok(());
        }
        for (i, item) in columns.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            self.select_item(ts, item)?;
        }
        Ok(())
    }

    fn select_item(&mut self, ts: &mut TokenStream, item: &SelectItem<'_>) -> CompileResult<()> {
        match item {
            SelectItem::Column(column) => {
                non_empty(&column.name, "SELECT")?;
                ts.append(&self.renderer.reference(&column.full_name()));
                if let Some(alias) = &column.alias {
                    ts.keyword(Token::As).push(self.renderer.alias(alias));
                }
            }
            SelectItem::Raw(raw) => {
                let raw = self.raw(raw)?;
                ts.append(&raw);
            }
            SelectItem::Aggregate {
                function,
                column,
                alias,
            } => {
                let column = non_empty(column, "aggregate")?;
                ts.push(Token::FunctionName(function.function_name().into()))
                    .lparen()
                    .append(&self.renderer.reference(column))
                    .rparen();
                if let Some(alias) = alias {
                    ts.keyword(Token::As).push(self.renderer.alias(alias));
                }
            }
            SelectItem::Subquery { query, alias } => {
                let alias = non_empty(alias, "subquery column alias")?;
                let sub = self.subquery(query)?;
                ts.append(&sub)
                    .keyword(Token::As)
                    .push(self.renderer.alias(alias));
            }
        }
        Ok(())
    }

    /// `ROW_NUMBER() OVER (ORDER BY ...) AS [row_num]`
    fn row_number_column(
        &mut self,
        ts: &mut TokenStream,
        orders: &[(&Expr, Direction)],
    ) -> CompileResult<()> {
        ts.push(Token::FunctionName("ROW_NUMBER".into()))
            .lparen()
            .rparen()
            .keyword(Token::Over)
            .lparen()
            .push(Token::OrderBy)
            .space();
        if orders.is_empty() {
            ts.lparen()
                .push(Token::Select)
                .space()
                .push(Token::LitInt(0))
                .rparen();
        } else {
            self.order_list(ts, orders)?;
        }
        ts.rparen()
            .keyword(Token::As)
            .push(self.renderer.alias(&self.options.row_number_alias));
        Ok(())
    }

    /// `SELECT *, ROW_NUMBER() OVER (...) AS [row_num] FROM (SELECT DISTINCT ...) AS [distinct_rows]`
    ///
    /// Duplicates are removed before rows are numbered. The window orders by
    /// the derived table's output columns.
    pub(super) fn distinct_row_number(&mut self, parts: &Parts<'_>) -> CompileResult<TokenStream> {
        let orders: Vec<(Expr, Direction)> = parts
            .orders
            .iter()
            .map(|(expr, direction)| (self.output_column(expr, &parts.columns), *direction))
            .collect();
        let orders: Vec<(&Expr, Direction)> =
            orders.iter().map(|(expr, direction)| (expr, *direction)).collect();

        let mut ts = TokenStream::new();
        ts.push(Token::Select).space().push(Token::Star).comma().space();
        self.row_number_column(&mut ts, &orders)?;

        let inner = self.select_core(
            parts,
            CoreShape {
                unordered: true,
                ..CoreShape::default()
            },
        )?;
        ts.keyword(Token::From).lparen().append(&inner).rparen();
        self.renderer.push_table_alias(&mut ts, DISTINCT_ALIAS);
        Ok(ts)
    }

    /// Name under which an ORDER BY column is visible outside the SELECT list:
    /// the select alias when one matches, otherwise the bare column name.
    fn output_column(&self, expr: &Expr, columns: &[SelectItem<'_>]) -> Expr {
        let Expr::Column(name) = expr else {
            return expr.clone();
        };
        for item in columns {
            match item {
                SelectItem::Column(column)
                    if column.full_name() == *name || column.alias.as_deref() == Some(name.as_str()) =>
                {
                    let visible = match &column.alias {
                        Some(alias) => alias.clone(),
                        None => self.last_segment(&column.name),
                    };
                    return Expr::Column(visible);
                }
                SelectItem::Aggregate {
                    alias: Some(alias), ..
                } if *alias == name.as_str() => return Expr::Column(alias.to_string()),
                _ => {}
            }
        }
        Expr::Column(self.last_segment(name))
    }

    fn last_segment(&self, name: &str) -> String {
        helpers::split_compound(name, self.profile.open_quote, self.profile.close_quote)
            .last()
            .map_or_else(|| name.to_string(), |segment| segment.to_string())
    }

    fn order_list(
        &mut self,
        ts: &mut TokenStream,
        orders: &[(&Expr, Direction)],
    ) -> CompileResult<()> {
        for (i, (expr, direction)) in orders.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            self.expr(ts, expr, "ORDER BY")?;
            if *direction == Direction::Desc {
                ts.space().push(Token::Desc);
            }
        }
        Ok(())
    }

    fn expr(&mut self, ts: &mut TokenStream, expr: &Expr, clause: &'static str) -> CompileResult<()> {
        match expr {
            Expr::Column(name) => {
                let name = non_empty(name, clause)?;
                ts.append(&self.renderer.reference(name));
            }
            Expr::Raw(raw) => {
                let raw = self.raw(raw)?;
                ts.append(&raw);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Sources and joins
    // =========================================================================

    fn source(
        &mut self,
        ts: &mut TokenStream,
        source: &Source,
        clause: &'static str,
    ) -> CompileResult<()> {
        match source {
            Source::Table { name, alias } => {
                let name = non_empty(name, clause)?;
                ts.append(&self.renderer.table(name, alias.as_deref()));
            }
            Source::Subquery { query, alias } => {
                let alias = non_empty(alias, "derived table alias")?;
                let sub = self.subquery(query)?;
                ts.append(&sub);
                self.renderer.push_table_alias(ts, alias);
            }
            Source::Raw(raw) => {
                let raw = self.raw(raw)?;
                ts.append(&raw);
            }
        }
        Ok(())
    }

    fn join(&mut self, ts: &mut TokenStream, join: &Join) -> CompileResult<()> {
        let invalid = |reason| CompileError::InvalidJoin {
            table: join.source.label(),
            reason,
        };

        match join.kind {
            JoinKind::Full if !self.profile.supports_full_join => {
                return Err(self.unsupported("FULL OUTER JOIN"));
            }
            JoinKind::Right if !self.profile.supports_right_join => {
                return Err(self.unsupported("RIGHT JOIN"));
            }
            JoinKind::Cross if !join.conditions.is_empty() => {
                return Err(invalid("CROSS JOIN takes no ON conditions"));
            }
            _ => {}
        }

        ts.space();
        match join.kind {
            JoinKind::Inner => ts.push(Token::Inner),
            JoinKind::Left => ts.push(Token::Left),
            JoinKind::Right => ts.push(Token::Right),
            JoinKind::Full => ts.push(Token::Full).space().push(Token::Outer),
            JoinKind::Cross => ts.push(Token::Cross),
        };
        ts.space().push(Token::Join).space();
        self.source(ts, &join.source, "JOIN")?;

        if join.kind != JoinKind::Cross {
            let on: Vec<&Condition> = join.conditions.iter().collect();
            let on = self.conditions(&on)?;
            if on.is_empty() {
                return Err(invalid("missing ON condition"));
            }
            ts.keyword(Token::On).append(&on);
        }
        Ok(())
    }

    // =========================================================================
    // Conditions
    // =========================================================================

    /// Render a condition list. The first rendered condition drops its
    /// connector; empty groups are skipped entirely.
    pub(super) fn conditions(&mut self, list: &[&Condition]) -> CompileResult<TokenStream> {
        let mut ts = TokenStream::new();
        for condition in list {
            if is_empty_group(condition) {
                continue;
            }
            if !ts.is_empty() {
                ts.keyword(match condition.connector {
                    Connector::And => Token::And,
                    Connector::Or => Token::Or,
                });
            }
            self.condition(&mut ts, condition)?;
        }
        Ok(ts)
    }

    fn condition(&mut self, ts: &mut TokenStream, condition: &Condition) -> CompileResult<()> {
        let negated = condition.negated;
        match &condition.kind {
            ConditionKind::Compare {
                column,
                op,
                operand,
            } => {
                let column = non_empty(column, "WHERE")?;
                if let (Operand::Value(Value::Null), Operator::Eq | Operator::NotEq) = (operand, op)
                {
                    let is_not = (*op == Operator::NotEq) != negated;
                    ts.append(&self.renderer.reference(column)).space().push(if is_not {
                        Token::IsNotNull
                    } else {
                        Token::IsNull
                    });
                    return Ok(());
                }

                if negated {
                    ts.push(Token::Not).space().lparen();
                }
                ts.append(&self.renderer.reference(column))
                    .space()
                    .push(operator_token(*op))
                    .space();
                self.operand(ts, operand)?;
                if negated {
                    ts.rparen();
                }
            }
            ConditionKind::In { column, values } => {
                let column = non_empty(column, "WHERE")?;
                if values.is_empty() {
                    // nothing is in an empty set
                    ts.push(Token::LitInt(1))
                        .space()
                        .push(Token::Eq)
                        .space()
                        .push(Token::LitInt(if negated { 1 } else { 0 }));
                    return Ok(());
                }
                ts.append(&self.renderer.reference(column));
                if negated {
                    ts.space().push(Token::Not);
                }
                ts.keyword(Token::In).lparen();
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    let param = self.ctx.bind(value.clone());
                    ts.push(param);
                }
                ts.rparen();
            }
            ConditionKind::InQuery { column, query } => {
                let column = non_empty(column, "WHERE")?;
                ts.append(&self.renderer.reference(column));
                if negated {
                    ts.space().push(Token::Not);
                }
                ts.keyword(Token::In);
                let sub = self.subquery(query)?;
                ts.append(&sub);
            }
            ConditionKind::Between { column, low, high } => {
                let column = non_empty(column, "WHERE")?;
                ts.append(&self.renderer.reference(column));
                if negated {
                    ts.space().push(Token::Not);
                }
                let low = self.ctx.bind(low.clone());
                let high = self.ctx.bind(high.clone());
                ts.keyword(Token::Between)
                    .push(low)
                    .keyword(Token::And)
                    .push(high);
            }
            ConditionKind::Null { column } => {
                let column = non_empty(column, "WHERE")?;
                ts.append(&self.renderer.reference(column))
                    .space()
                    .push(if negated {
                        Token::IsNotNull
                    } else {
                        Token::IsNull
                    });
            }
            ConditionKind::Like {
                column,
                pattern,
                case_sensitive,
            } => {
                let column = non_empty(column, "WHERE")?;
                self.like(ts, column, pattern, *case_sensitive, negated);
            }
            ConditionKind::Exists { query } => {
                if negated {
                    ts.push(Token::Not).space();
                }
                ts.push(Token::Exists).space();
                let sub = self.subquery(query)?;
                ts.append(&sub);
            }
            ConditionKind::Group(list) => {
                let list: Vec<&Condition> = list.iter().collect();
                let inner = self.conditions(&list)?;
                if negated {
                    ts.push(Token::Not).space();
                }
                ts.lparen().append(&inner).rparen();
            }
            ConditionKind::Raw(raw) => {
                let raw = self.raw(raw)?;
                if negated {
                    ts.push(Token::Not).space().lparen().append(&raw).rparen();
                } else {
                    ts.append(&raw);
                }
            }
        }
        Ok(())
    }

    fn like(
        &mut self,
        ts: &mut TokenStream,
        column: &str,
        pattern: &str,
        case_sensitive: bool,
        negated: bool,
    ) {
        let strategy = (!case_sensitive).then_some(self.profile.case_insensitive_like);
        let (keyword, binding) = match strategy {
            None => {
                ts.append(&self.renderer.reference(column));
                (Token::Like, pattern.to_string())
            }
            Some(CaseInsensitiveLike::Ilike) => {
                ts.append(&self.renderer.reference(column));
                (Token::Ilike, pattern.to_string())
            }
            Some(CaseInsensitiveLike::LowerBoth) => {
                ts.push(Token::FunctionName("LOWER".into()))
                    .lparen()
                    .append(&self.renderer.reference(column))
                    .rparen();
                (Token::Like, pattern.to_lowercase())
            }
        };
        if negated {
            ts.space().push(Token::Not);
        }
        let param = self.ctx.bind(binding);
        ts.keyword(keyword).push(param);
    }

    fn operand(&mut self, ts: &mut TokenStream, operand: &Operand) -> CompileResult<()> {
        match operand {
            Operand::Value(value) => {
                let param = self.ctx.bind(value.clone());
                ts.push(param);
            }
            Operand::Column(name) => {
                let name = non_empty(name, "WHERE")?;
                ts.append(&self.renderer.reference(name));
            }
            Operand::Query(query) => {
                let sub = self.subquery(query)?;
                ts.append(&sub);
            }
            Operand::Raw(raw) => {
                let raw = self.raw(raw)?;
                ts.append(&raw);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Raw fragments and nesting
    // =========================================================================

    /// Emit a raw fragment, binding one value per unescaped `?`.
    pub(super) fn raw(&mut self, raw: &Raw) -> CompileResult<TokenStream> {
        let pieces = split_raw(&raw.text);
        let placeholders = pieces
            .iter()
            .filter(|p| matches!(p, RawPiece::Marker))
            .count();
        if placeholders != raw.bindings.len() {
            return Err(CompileError::BindingMismatch {
                text: raw.text.clone(),
                placeholders,
                bindings: raw.bindings.len(),
            });
        }

        let mut ts = TokenStream::new();
        let mut values = raw.bindings.iter();
        for piece in pieces {
            match piece {
                RawPiece::Text(text) => {
                    ts.push(Token::Raw(text.into_owned()));
                }
                RawPiece::Marker => {
                    if let Some(value) = values.next() {
                        let param = self.ctx.bind(value.clone());
                        ts.push(param);
                    }
                }
            }
        }
        Ok(ts)
    }

    /// `(nested query)` compiled into the shared context.
    pub(super) fn subquery(&mut self, query: &Query) -> CompileResult<TokenStream> {
        let inner = self.query(query)?;
        let mut ts = TokenStream::new();
        ts.lparen().append(&inner).rparen();
        Ok(ts)
    }

    pub(super) fn unsupported(&self, feature: &'static str) -> CompileError {
        CompileError::Unsupported {
            dialect: self.profile.name,
            feature,
        }
    }
}
