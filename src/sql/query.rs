//! Query description - an ordered list of clauses with thin constructors.
//!
//! Builders only push [`Clause`]s; nothing is validated until the query is
//! handed to a [`Compiler`](crate::compiler::Compiler). `From`, `Limit`,
//! `Offset` and `Distinct` are "last one wins"; every other clause kind
//! accumulates in insertion order.

use serde::{Deserialize, Serialize};

use super::clause::{
    Aggregate, Clause, Column, Condition, Direction, Expr, Join, JoinKind, Operator, Raw, SetOp,
    Source,
};
use super::value::Value;

/// A SELECT query description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use = "Query has no effect until compiled"]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    /// Create a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for `Query::new().from(name)`.
    pub fn table(name: &str) -> Self {
        Self::new().from(name)
    }

    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Append any clause.
    pub fn push(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Add column specifications. Each entry may be a plain name, an
    /// `x as y` alias, a `Prefix.{A, B as C}` shorthand block, or
    /// `raw:`-prefixed verbatim SQL.
    pub fn select(mut self, specs: &[&str]) -> Self {
        self.clauses
            .extend(specs.iter().map(|s| Clause::Select((*s).to_string())));
        self
    }

    pub fn select_column(self, column: Column) -> Self {
        self.push(Clause::Column(column))
    }

    /// Verbatim column expression with `?` bindings.
    pub fn select_raw(self, text: &str, bindings: Vec<Value>) -> Self {
        self.push(Clause::RawColumn(Raw::with_bindings(text, bindings)))
    }

    pub fn aggregate(self, function: Aggregate, column: &str, alias: Option<&str>) -> Self {
        self.push(Clause::AggregateColumn {
            function,
            column: column.into(),
            alias: alias.map(Into::into),
        })
    }

    pub fn select_subquery(self, query: Query, alias: &str) -> Self {
        self.push(Clause::SubqueryColumn {
            query: Box::new(query),
            alias: alias.into(),
        })
    }

    pub fn distinct(self) -> Self {
        self.push(Clause::Distinct)
    }

    // =========================================================================
    // Sources and joins
    // =========================================================================

    /// Set the FROM table (`name` may carry an `as alias`).
    pub fn from(self, name: &str) -> Self {
        self.push(Clause::From(Source::table(name)))
    }

    pub fn from_as(self, name: &str, alias: &str) -> Self {
        self.push(Clause::From(Source::aliased(name, alias)))
    }

    pub fn from_subquery(self, query: Query, alias: &str) -> Self {
        self.push(Clause::From(Source::Subquery {
            query: Box::new(query),
            alias: alias.into(),
        }))
    }

    pub fn from_raw(self, text: &str, bindings: Vec<Value>) -> Self {
        self.push(Clause::From(Source::Raw(Raw::with_bindings(text, bindings))))
    }

    /// Add a JOIN with an arbitrary condition list.
    pub fn join(self, kind: JoinKind, source: Source, conditions: Vec<Condition>) -> Self {
        self.push(Clause::Join(Join {
            kind,
            source,
            conditions,
        }))
    }

    /// `INNER JOIN table ON left = right`.
    pub fn inner_join(self, table: &str, left: &str, right: &str) -> Self {
        self.join(
            JoinKind::Inner,
            Source::table(table),
            vec![Condition::columns(left, Operator::Eq, right)],
        )
    }

    /// `LEFT JOIN table ON left = right`.
    pub fn left_join(self, table: &str, left: &str, right: &str) -> Self {
        self.join(
            JoinKind::Left,
            Source::table(table),
            vec![Condition::columns(left, Operator::Eq, right)],
        )
    }

    pub fn cross_join(self, table: &str) -> Self {
        self.join(JoinKind::Cross, Source::table(table), vec![])
    }

    // =========================================================================
    // Filtering and grouping
    // =========================================================================

    /// Add a WHERE condition.
    pub fn filter(self, condition: Condition) -> Self {
        self.push(Clause::Where(condition))
    }

    /// `WHERE column = value`.
    pub fn where_eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(Condition::eq(column, value))
    }

    pub fn where_raw(self, text: &str, bindings: Vec<Value>) -> Self {
        self.filter(Condition::raw(Raw::with_bindings(text, bindings)))
    }

    pub fn group_by(self, column: &str) -> Self {
        self.push(Clause::GroupBy(Expr::Column(column.into())))
    }

    pub fn group_by_raw(self, text: &str) -> Self {
        self.push(Clause::GroupBy(Expr::Raw(Raw::new(text))))
    }

    pub fn having(self, condition: Condition) -> Self {
        self.push(Clause::Having(condition))
    }

    // =========================================================================
    // Ordering and pagination
    // =========================================================================

    pub fn order_by(self, column: &str) -> Self {
        self.push(Clause::OrderBy {
            expr: Expr::Column(column.into()),
            direction: Direction::Asc,
        })
    }

    pub fn order_by_desc(self, column: &str) -> Self {
        self.push(Clause::OrderBy {
            expr: Expr::Column(column.into()),
            direction: Direction::Desc,
        })
    }

    pub fn order_by_raw(self, text: &str, bindings: Vec<Value>) -> Self {
        self.push(Clause::OrderBy {
            expr: Expr::Raw(Raw::with_bindings(text, bindings)),
            direction: Direction::Asc,
        })
    }

    /// Set LIMIT. Zero clears it.
    pub fn limit(self, limit: u64) -> Self {
        self.push(Clause::Limit(limit))
    }

    /// Set OFFSET. Zero or negative clears it.
    pub fn offset(self, offset: i64) -> Self {
        self.push(Clause::Offset(offset))
    }

    // =========================================================================
    // Set operations and CTEs
    // =========================================================================

    pub fn union(self, other: Query) -> Self {
        self.set_op(SetOp::Union, false, other)
    }

    pub fn union_all(self, other: Query) -> Self {
        self.set_op(SetOp::Union, true, other)
    }

    pub fn intersect(self, other: Query) -> Self {
        self.set_op(SetOp::Intersect, false, other)
    }

    pub fn except(self, other: Query) -> Self {
        self.set_op(SetOp::Except, false, other)
    }

    fn set_op(self, kind: SetOp, all: bool, other: Query) -> Self {
        self.push(Clause::Union {
            query: Box::new(other),
            kind,
            all,
        })
    }

    /// Add a common table expression: `WITH name AS (query)`.
    pub fn with(self, name: &str, query: Query) -> Self {
        self.push(Clause::Cte {
            name: name.into(),
            query: Box::new(query),
        })
    }

    // =========================================================================
    // Normalized accessors
    // =========================================================================

    /// Effective LIMIT: the last `Limit` clause, `None` when absent or zero.
    pub fn limit_value(&self) -> Option<u64> {
        self.clauses
            .iter()
            .rev()
            .find_map(|c| match c {
                Clause::Limit(n) => Some(*n),
                _ => None,
            })
            .filter(|n| *n > 0)
    }

    /// Effective OFFSET: the last `Offset` clause, `None` unless positive.
    pub fn offset_value(&self) -> Option<u64> {
        self.clauses
            .iter()
            .rev()
            .find_map(|c| match c {
                Clause::Offset(n) => Some(*n),
                _ => None,
            })
            .and_then(|n| u64::try_from(n).ok())
            .filter(|n| *n > 0)
    }

    pub fn is_distinct(&self) -> bool {
        self.clauses.iter().any(|c| matches!(c, Clause::Distinct))
    }

    pub fn has_order_by(&self) -> bool {
        self.clauses
            .iter()
            .any(|c| matches!(c, Clause::OrderBy { .. }))
    }

    pub fn has_set_operations(&self) -> bool {
        self.clauses
            .iter()
            .any(|c| matches!(c, Clause::Union { .. }))
    }

    /// Whether a LIMIT or OFFSET is in effect.
    pub fn is_paginated(&self) -> bool {
        self.limit_value().is_some() || self.offset_value().is_some()
    }
}
