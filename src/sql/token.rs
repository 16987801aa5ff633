//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens are dialect-agnostic representations that serialize
//! to dialect-specific strings. Bound parameters are kept as
//! [`Token::Param`] so the same stream can be rendered with placeholders
//! or with inlined literals.

use super::dialect::DialectProfile;
use super::value::Value;

/// SQL Token - every possible element in a compiled statement.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    And,
    Or,
    Not,
    As,
    On,
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    GroupBy,
    Having,
    OrderBy,
    Asc,
    Desc,
    Limit,
    Offset,
    Top,
    In,
    Between,
    Like,
    Ilike,
    IsNull,
    IsNotNull,
    Exists,
    Distinct,
    All,
    Union,
    Intersect,
    /// Set difference; spelled per dialect (`EXCEPT` / `MINUS`).
    Except,
    With,
    Over,
    Null,

    // === Punctuation ===
    Comma,
    Dot,
    Star,
    LParen,
    RParen,

    // === Operators ===
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,

    // === Whitespace ===
    Space,

    // === Dynamic Content ===
    /// Single identifier segment, quoted per dialect.
    Ident(String),
    /// Integer literal that is part of the statement shape (never user data).
    LitInt(i64),
    /// Function name, rendered upper-case.
    FunctionName(String),
    /// Bound parameter by zero-based binding index.
    Param(usize),

    // === Escape Hatch ===
    /// Raw SQL passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** Raw SQL is not sanitized
    /// and can lead to SQL injection vulnerabilities. Values belong in
    /// [`Token::Param`].
    Raw(String),
}

/// How [`Token::Param`] is rendered.
#[derive(Debug, Clone, Copy)]
pub enum ParamRender<'a> {
    /// Dialect placeholder (`@p0`, `$1`, `?`).
    Placeholder,
    /// Literal value from the binding list.
    Inline(&'a [Value]),
}

impl Token {
    /// Serialize this token to a string for the given dialect.
    pub fn serialize(&self, profile: &DialectProfile, params: ParamRender<'_>) -> String {
        match self {
            // Keywords
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::Not => "NOT".into(),
            Token::As => "AS".into(),
            Token::On => "ON".into(),
            Token::Join => "JOIN".into(),
            Token::Inner => "INNER".into(),
            Token::Left => "LEFT".into(),
            Token::Right => "RIGHT".into(),
            Token::Full => "FULL".into(),
            Token::Outer => "OUTER".into(),
            Token::Cross => "CROSS".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::Having => "HAVING".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Asc => "ASC".into(),
            Token::Desc => "DESC".into(),
            Token::Limit => "LIMIT".into(),
            Token::Offset => "OFFSET".into(),
            Token::Top => "TOP".into(),
            Token::In => "IN".into(),
            Token::Between => "BETWEEN".into(),
            Token::Like => "LIKE".into(),
            Token::Ilike => "ILIKE".into(),
            Token::IsNull => "IS NULL".into(),
            Token::IsNotNull => "IS NOT NULL".into(),
            Token::Exists => "EXISTS".into(),
            Token::Distinct => "DISTINCT".into(),
            Token::All => "ALL".into(),
            Token::Union => "UNION".into(),
            Token::Intersect => "INTERSECT".into(),
            Token::Except => profile.except_keyword.into(),
            Token::With => "WITH".into(),
            Token::Over => "OVER".into(),
            Token::Null => "NULL".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            // Operators
            Token::Eq => "=".into(),
            Token::Ne => "<>".into(),
            Token::Lt => "<".into(),
            Token::Gt => ">".into(),
            Token::Lte => "<=".into(),
            Token::Gte => ">=".into(),

            Token::Space => " ".into(),

            // Dynamic - dialect-specific formatting
            Token::Ident(name) => profile.quote_identifier(name),
            Token::LitInt(n) => n.to_string(),
            Token::FunctionName(name) => name.to_uppercase(),
            Token::Param(index) => match params {
                ParamRender::Placeholder => profile.placeholder(*index),
                ParamRender::Inline(values) => match values.get(*index) {
                    Some(value) => value.to_literal(profile),
                    // The compile context guarantees every index is bound.
                    None => profile.placeholder(*index),
                },
            },

            // Escape hatch
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Extend with multiple tokens.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of parameter tokens in the stream.
    pub fn param_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| matches!(t, Token::Param(_)))
            .count()
    }

    /// Serialize all tokens to a SQL string with dialect placeholders.
    pub fn serialize(&self, profile: &DialectProfile) -> String {
        self.render(profile, ParamRender::Placeholder)
    }

    /// Serialize with each parameter replaced by its literal.
    pub fn serialize_inline(&self, profile: &DialectProfile, bindings: &[Value]) -> String {
        self.render(profile, ParamRender::Inline(bindings))
    }

    fn render(&self, profile: &DialectProfile, params: ParamRender<'_>) -> String {
        self.tokens
            .iter()
            .map(|t| t.serialize(profile, params))
            .collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }

    /// Push `keyword` surrounded by single spaces.
    pub fn keyword(&mut self, token: Token) -> &mut Self {
        self.space().push(token).space()
    }
}
