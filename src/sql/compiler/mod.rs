//! Compiler orchestrator.
//!
//! [`Compiler::compile`] turns a [`Query`] into a [`CompiledQuery`]:
//!
//! 1. Partition the clauses into statement sections, expanding column
//!    shorthand.
//! 2. Pick the pagination plan for the profile.
//! 3. Emit every section in fixed order into one token stream, binding values
//!    into a fresh [`CompileContext`] as their placeholders are emitted.
//! 4. Check the profile's bound-parameter ceiling and serialize.
//!
//! Nested queries (derived tables, subquery columns, IN/EXISTS subqueries,
//! set-operation arms and CTEs) go through the same path recursively and
//! share the context, so numbering follows first use in the text.
//!
//! # Example
//!
//! ```
//! use sqlpress::compiler::compile;
//! use sqlpress::dialect::Dialect;
//! use sqlpress::query::Query;
//!
//! let compiled = compile(&Query::table("users").limit(1), Dialect::TSql).unwrap();
//! assert_eq!(compiled.sql, "SELECT TOP (@p0) * FROM [users]");
//! ```

mod clauses;
mod context;
mod pagination;

pub use context::CompileContext;
pub use pagination::Plan;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use self::clauses::Parts;
use super::dialect::{Dialect, DialectProfile};
use super::error::{CompileError, CompileResult};
use super::query::Query;
use super::render::Renderer;
use super::token::{Token, TokenStream};
use super::value::Value;
use crate::sql::clause::SetOp;

// =============================================================================
// Options
// =============================================================================

/// Tunables that are not part of a dialect profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Name of the synthetic ordinal column used by window emulation.
    pub row_number_alias: String,
    /// Alias of the derived table wrapping an emulated page.
    pub wrapper_alias: String,
    /// Overrides the profile's bound-parameter ceiling.
    pub max_parameters: Option<usize>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            row_number_alias: "row_num".into(),
            wrapper_alias: "results_wrapper".into(),
            max_parameters: None,
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// SQL text plus its bound values.
///
/// `bindings[i]` belongs to the placeholder with index `i`: `@p{i}`,
/// `:p{i}`, `${i+1}`, or the `i`-th `?`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub bindings: Vec<Value>,
    dialect: Dialect,
    tokens: TokenStream,
}

impl CompiledQuery {
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// The statement with every placeholder replaced by its escaped literal.
    ///
    /// For logs and debugging only; execute [`sql`](Self::sql) with
    /// [`bindings`](Self::bindings) instead.
    pub fn to_inline_sql(&self) -> String {
        self.tokens
            .serialize_inline(self.dialect.profile(), &self.bindings)
    }

    /// `(placeholder, value)` pairs in binding order.
    pub fn named_bindings(&self) -> Vec<(String, &Value)> {
        let profile = self.dialect.profile();
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, value)| (profile.placeholder(i), value))
            .collect()
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_inline_sql())
    }
}

// =============================================================================
// Compiler
// =============================================================================

/// Query compiler bound to one dialect.
///
/// Holds only a `'static` profile and immutable options, so a single
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Compiler {
    dialect: Dialect,
    options: CompileOptions,
}

impl Compiler {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_options(dialect, CompileOptions::default())
    }

    pub fn with_options(dialect: Dialect, options: CompileOptions) -> Self {
        Self { dialect, options }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn profile(&self) -> &'static DialectProfile {
        self.dialect.profile()
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Effective bound-parameter ceiling.
    pub fn parameter_limit(&self) -> Option<usize> {
        self.options
            .max_parameters
            .or(self.profile().max_parameters)
    }

    /// Compile `query`. No partial output is produced on error.
    pub fn compile(&self, query: &Query) -> CompileResult<CompiledQuery> {
        let profile = self.profile();
        debug!(
            dialect = profile.name,
            clauses = query.clauses().len(),
            "compiling query"
        );

        let mut emitter = Emitter::new(profile, &self.options);
        let tokens = emitter.query(query)?;
        let bindings = emitter.ctx.into_bindings();

        if let Some(limit) = self.parameter_limit() {
            if bindings.len() > limit {
                return Err(CompileError::TooManyParameters {
                    dialect: profile.name,
                    limit,
                    count: bindings.len(),
                });
            }
        }

        let sql = tokens.serialize(profile);
        trace!(sql = %sql, bindings = bindings.len(), "compiled query");

        Ok(CompiledQuery {
            sql,
            bindings,
            dialect: self.dialect,
            tokens,
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

/// Compile `query` for `dialect` with default options.
pub fn compile(query: &Query, dialect: Dialect) -> CompileResult<CompiledQuery> {
    Compiler::new(dialect).compile(query)
}

// =============================================================================
// Emitter
// =============================================================================

/// Mutable state of one compile: the profile, the renderer and the binding
/// context. Clause emitters live in `clauses`, pagination in `pagination`.
struct Emitter<'a> {
    profile: &'static DialectProfile,
    renderer: Renderer,
    options: &'a CompileOptions,
    ctx: CompileContext,
    /// Nesting level of the query being emitted; 1 is the statement itself.
    depth: usize,
}

impl<'a> Emitter<'a> {
    fn new(profile: &'static DialectProfile, options: &'a CompileOptions) -> Self {
        Self {
            profile,
            renderer: Renderer::new(profile),
            options,
            ctx: CompileContext::new(),
            depth: 0,
        }
    }

    /// Full statement: `[WITH ...] SELECT ... [set operations]`.
    ///
    /// Also used for every nested query, which shares the binding context.
    fn query(&mut self, query: &Query) -> CompileResult<TokenStream> {
        self.depth += 1;
        let statement = self.statement(query);
        self.depth -= 1;
        statement
    }

    fn statement(&mut self, query: &Query) -> CompileResult<TokenStream> {
        let parts = Parts::collect(query)?;
        let mut ts = TokenStream::new();

        if !parts.ctes.is_empty() {
            ts.push(Token::With).space();
            for (i, (name, cte)) in parts.ctes.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                if name.trim().is_empty() {
                    return Err(CompileError::MissingIdentifier { clause: "WITH" });
                }
                let sub = self.subquery(cte)?;
                ts.push(self.renderer.alias(name))
                    .keyword(Token::As)
                    .append(&sub);
            }
            ts.space();
        }

        let outermost = self.depth == 1 && parts.set_ops.is_empty();
        let head = self.paginated(&parts, outermost)?;
        if parts.set_ops.is_empty() {
            ts.append(&head);
            return Ok(ts);
        }

        self.set_operand(&mut ts, &head, parts.needs_parens())?;
        for arm in &parts.set_ops {
            ts.space();
            match arm.kind {
                SetOp::Union => ts.push(Token::Union),
                SetOp::Intersect if self.profile.supports_intersect => ts.push(Token::Intersect),
                SetOp::Except if self.profile.supports_except => ts.push(Token::Except),
                SetOp::Intersect => return Err(self.unsupported("INTERSECT")),
                SetOp::Except => return Err(self.unsupported("EXCEPT")),
            };
            if arm.all {
                ts.space().push(Token::All);
            }
            ts.space();

            let wrap = arm.query.has_order_by()
                || arm.query.is_paginated()
                || arm.query.has_set_operations();
            let body = self.query(arm.query)?;
            self.set_operand(&mut ts, &body, wrap)?;
        }
        Ok(ts)
    }

    fn set_operand(
        &self,
        ts: &mut TokenStream,
        body: &TokenStream,
        wrap: bool,
    ) -> CompileResult<()> {
        if !wrap {
            ts.append(body);
        } else if self.profile.parenthesized_set_operands {
            ts.lparen().append(body).rparen();
        } else {
            return Err(self.unsupported("ordered or paginated set operation operand"));
        }
        Ok(())
    }
}
