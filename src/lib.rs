//! # sqlpress
//!
//! Compiles structured query descriptions into parameterized SQL for several
//! database engines.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              Query (ordered list of Clauses)             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [expand]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Columns (shorthand blocks, aliases, raw)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compiler + DialectProfile]
//! ┌─────────────────────────────────────────────────────────┐
//! │        TokenStream + bindings (CompileContext)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [serialize]
//! ┌─────────────────────────────────────────────────────────┐
//! │          CompiledQuery { sql, bindings }                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use sqlpress::prelude::*;
//!
//! let query = Query::table("users")
//!     .select(&["users.{ id, name as display_name }"])
//!     .where_eq("active", true)
//!     .offset(10);
//!
//! let compiled = compile(&query, Dialect::Postgres).unwrap();
//! assert_eq!(
//!     compiled.sql,
//!     r#"SELECT "users"."id", "users"."name" AS "display_name" FROM "users" WHERE "active" = $1 OFFSET $2"#
//! );
//! assert_eq!(compiled.bindings, vec![Value::Bool(true), Value::Int(10)]);
//! ```

pub mod config;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::clause;
pub use sql::compiler;
pub use sql::dialect;
pub use sql::error;
pub use sql::expand;
pub use sql::query;
pub use sql::render;
pub use sql::token;
pub use sql::value;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::clause::{
        Aggregate, Clause, Column, Condition, Direction, Expr, JoinKind, Operand, Operator, Raw,
        SetOp, Source,
    };
    pub use crate::compiler::{compile, CompileOptions, CompiledQuery, Compiler};
    pub use crate::dialect::Dialect;
    pub use crate::error::{CompileError, CompileResult};
    pub use crate::query::Query;
    pub use crate::value::Value;
}

// Also export at crate root for convenience
pub use compiler::{compile, CompiledQuery, Compiler};
pub use dialect::Dialect;
pub use error::CompileError;
pub use query::Query;
pub use value::Value;
