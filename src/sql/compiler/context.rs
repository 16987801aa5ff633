//! Per-compilation binding state.

use crate::sql::token::Token;
use crate::sql::value::Value;

/// Binding list for one top-level compile.
///
/// The next placeholder index always equals the number of values bound so
/// far, so indices are dense and appear in first-use order. A context is
/// created by [`Compiler::compile`](super::Compiler::compile) and never
/// shared between compiles.
#[derive(Debug, Default)]
pub struct CompileContext {
    bindings: Vec<Value>,
}

impl CompileContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` and return the placeholder token that refers to it.
    pub fn bind(&mut self, value: impl Into<Value>) -> Token {
        let index = self.bindings.len();
        self.bindings.push(value.into());
        Token::Param(index)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn into_bindings(self) -> Vec<Value> {
        self.bindings
    }
}
