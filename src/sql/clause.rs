//! Clause model - the intermediate representation consumed by the compiler.
//!
//! A [`Query`](super::query::Query) is an ordered list of [`Clause`]s. Every
//! variant is handled by an exhaustive match in the compiler, so adding a
//! clause kind is a compile error until every stage deals with it.

use serde::{Deserialize, Serialize};

use super::query::Query;
use super::value::Value;

// =============================================================================
// Raw fragments
// =============================================================================

/// Verbatim SQL.
///
/// The text is emitted exactly as written except for binding markers: each
/// unescaped `?` is replaced by the dialect placeholder of the next binding,
/// and `\?` produces a literal question mark. The number of markers must
/// match `bindings.len()`.
///
/// # Security Warning
///
/// **Never interpolate user input into `text`.** Pass it through `bindings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raw {
    pub text: String,
    #[serde(default)]
    pub bindings: Vec<Value>,
}

impl Raw {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            bindings: vec![],
        }
    }

    pub fn with_bindings(text: &str, bindings: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            bindings,
        }
    }
}

// =============================================================================
// Columns
// =============================================================================

/// A column reference in the SELECT list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Qualifier (table or alias) prepended as `source.name`.
    #[serde(default)]
    pub source: Option<String>,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl Column {
    pub fn new(name: &str) -> Self {
        Self {
            source: None,
            name: name.into(),
            alias: None,
        }
    }

    pub fn qualified(source: &str, name: &str) -> Self {
        Self {
            source: Some(source.into()),
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// `source.name`, or just `name` when unqualified.
    pub fn full_name(&self) -> String {
        match &self.source {
            Some(source) => format!("{}.{}", source, self.name),
            None => self.name.clone(),
        }
    }
}

/// Aggregate functions usable as a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl Aggregate {
    pub fn function_name(&self) -> &'static str {
        match self {
            Aggregate::Count => "COUNT",
            Aggregate::Sum => "SUM",
            Aggregate::Avg => "AVG",
            Aggregate::Min => "MIN",
            Aggregate::Max => "MAX",
        }
    }
}

// =============================================================================
// Sources and joins
// =============================================================================

/// Something a query reads rows from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Source {
    /// Table or view, optionally schema-qualified (`dbo.users`).
    Table {
        name: String,
        #[serde(default)]
        alias: Option<String>,
    },
    /// Derived table: `(SELECT ...) AS alias`.
    Subquery { query: Box<Query>, alias: String },
    Raw(Raw),
}

impl Source {
    pub fn table(name: &str) -> Self {
        Source::Table {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: &str, alias: &str) -> Self {
        Source::Table {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(&self) -> String {
        match self {
            Source::Table { name, .. } => name.clone(),
            Source::Subquery { alias, .. } => alias.clone(),
            Source::Raw(raw) => raw.text.clone(),
        }
    }
}

/// Type of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// A JOIN clause. `Cross` joins carry no conditions; every other kind needs
/// at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub source: Source,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

// =============================================================================
// Conditions
// =============================================================================

/// Boolean connector joining a condition to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Connector {
    #[default]
    And,
    Or,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Bound parameter.
    Value(Value),
    /// Another column, quoted like any identifier.
    Column(String),
    /// Scalar subquery.
    Query(Box<Query>),
    Raw(Raw),
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

/// The shape of a single predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionKind {
    Compare {
        column: String,
        op: Operator,
        operand: Operand,
    },
    In {
        column: String,
        values: Vec<Value>,
    },
    InQuery {
        column: String,
        query: Box<Query>,
    },
    Between {
        column: String,
        low: Value,
        high: Value,
    },
    Null {
        column: String,
    },
    Like {
        column: String,
        pattern: String,
        case_sensitive: bool,
    },
    Exists {
        query: Box<Query>,
    },
    /// Parenthesized sub-list, for arbitrary AND/OR trees.
    Group(Vec<Condition>),
    Raw(Raw),
}

/// A predicate with its connector and negation flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "conditions have no effect until added to a query"]
pub struct Condition {
    #[serde(default)]
    pub connector: Connector,
    #[serde(default)]
    pub negated: bool,
    pub kind: ConditionKind,
}

impl Condition {
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            connector: Connector::And,
            negated: false,
            kind,
        }
    }

    /// `column op operand`.
    pub fn compare(column: &str, op: Operator, operand: impl Into<Operand>) -> Self {
        Self::new(ConditionKind::Compare {
            column: column.into(),
            op,
            operand: operand.into(),
        })
    }

    /// `column op ?` with a bound value.
    pub fn value(column: &str, op: Operator, value: impl Into<Value>) -> Self {
        Self::compare(column, op, Operand::Value(value.into()))
    }

    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::value(column, Operator::Eq, value)
    }

    /// `left op right` where both sides are columns (join predicates).
    pub fn columns(left: &str, op: Operator, right: &str) -> Self {
        Self::compare(left, op, Operand::Column(right.into()))
    }

    pub fn is_in(column: &str, values: Vec<Value>) -> Self {
        Self::new(ConditionKind::In {
            column: column.into(),
            values,
        })
    }

    pub fn in_query(column: &str, query: Query) -> Self {
        Self::new(ConditionKind::InQuery {
            column: column.into(),
            query: Box::new(query),
        })
    }

    pub fn between(column: &str, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::new(ConditionKind::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        })
    }

    pub fn is_null(column: &str) -> Self {
        Self::new(ConditionKind::Null {
            column: column.into(),
        })
    }

    pub fn like(column: &str, pattern: &str) -> Self {
        Self::new(ConditionKind::Like {
            column: column.into(),
            pattern: pattern.into(),
            case_sensitive: true,
        })
    }

    pub fn ilike(column: &str, pattern: &str) -> Self {
        Self::new(ConditionKind::Like {
            column: column.into(),
            pattern: pattern.into(),
            case_sensitive: false,
        })
    }

    pub fn exists(query: Query) -> Self {
        Self::new(ConditionKind::Exists {
            query: Box::new(query),
        })
    }

    pub fn group(conditions: Vec<Condition>) -> Self {
        Self::new(ConditionKind::Group(conditions))
    }

    pub fn raw(raw: Raw) -> Self {
        Self::new(ConditionKind::Raw(raw))
    }

    /// Join to the previous condition with OR instead of AND.
    pub fn or(mut self) -> Self {
        self.connector = Connector::Or;
        self
    }

    /// Negate this condition.
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }
}

// =============================================================================
// Grouping, ordering, set operations
// =============================================================================

/// A GROUP BY / ORDER BY term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Column(String),
    Raw(Raw),
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Set operation combining two queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOp {
    Union,
    Intersect,
    Except,
}

// =============================================================================
// Clause
// =============================================================================

/// One structural component of a query description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    /// Unexpanded column specification: `name`, `name as alias`,
    /// `Prefix.{A as X, B}` shorthand, or `raw:` verbatim text.
    Select(String),
    Column(Column),
    RawColumn(Raw),
    AggregateColumn {
        function: Aggregate,
        column: String,
        #[serde(default)]
        alias: Option<String>,
    },
    SubqueryColumn {
        query: Box<Query>,
        alias: String,
    },
    From(Source),
    Join(Join),
    Where(Condition),
    GroupBy(Expr),
    Having(Condition),
    OrderBy {
        expr: Expr,
        #[serde(default)]
        direction: Direction,
    },
    /// Maximum row count; zero means "no limit".
    Limit(u64),
    /// Rows to skip; zero or negative means "no offset".
    Offset(i64),
    Distinct,
    Union {
        query: Box<Query>,
        kind: SetOp,
        #[serde(default)]
        all: bool,
    },
    /// Common table expression: `WITH name AS (query)`.
    Cte {
        name: String,
        query: Box<Query>,
    },
}
