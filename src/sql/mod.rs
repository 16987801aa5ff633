//! SQL generation module.
//!
//! This module turns query descriptions into multi-dialect SQL.
//! It includes:
//!
//! - [`clause`] - Clause model (columns, sources, conditions, ordering)
//! - [`query`] - Query description and thin builders
//! - [`expand`] - Column shorthand expansion
//! - [`render`] - Identifier and literal rendering
//! - [`compiler`] - Clause compilers, pagination and the orchestrator
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect profiles

pub mod clause;
pub mod compiler;
pub mod dialect;
pub mod error;
pub mod expand;
pub mod query;
pub mod render;
pub mod token;
pub mod value;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use clause::{
    Aggregate, Clause, Column, Condition, ConditionKind, Connector, Direction, Expr, Join,
    JoinKind, Operand, Operator, Raw, SetOp, Source,
};
pub use compiler::{compile, CompileOptions, CompiledQuery, Compiler};
pub use dialect::{Dialect, DialectProfile};
pub use error::{CompileError, CompileResult};
pub use query::Query;
pub use token::{Token, TokenStream};
pub use value::Value;
