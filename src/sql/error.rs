//! Compilation errors.

/// Errors that can occur while compiling a query description.
///
/// Compilation has no partial-success mode: any of these aborts the whole
/// statement and no SQL is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("Malformed column shorthand `{spec}`: {reason}")]
    MalformedShorthand { spec: String, reason: &'static str },

    #[error("{clause} clause references no column or table")]
    MissingIdentifier { clause: &'static str },

    #[error("Query has no FROM source")]
    MissingSource,

    #[error("Raw fragment `{text}` has {placeholders} placeholder(s) but {bindings} binding(s)")]
    BindingMismatch {
        text: String,
        placeholders: usize,
        bindings: usize,
    },

    #[error("Invalid join on `{table}`: {reason}")]
    InvalidJoin { table: String, reason: &'static str },

    #[error("{feature} is not supported by the {dialect} dialect")]
    Unsupported {
        dialect: &'static str,
        feature: &'static str,
    },

    #[error("Statement binds {count} parameters but {dialect} allows at most {limit}")]
    TooManyParameters {
        dialect: &'static str,
        limit: usize,
        count: usize,
    },
}

pub type CompileResult<T> = Result<T, CompileError>;
