//! Lexical units produced by the tokenizer.

use std::fmt;

/// Classification of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Spaces, tabs and line breaks
    Whitespace,
    /// `-- ...` or `/* ... */`
    Comment,
    /// `0x` followed by decimal digits
    Hexadecimal,
    /// Number with a fractional part or exponent
    Real,
    /// Number without a fractional part
    Integer,
    /// Single-quoted string literal
    Literal,
    /// Bare or delimited name
    Identifier,
    /// Reserved word of the active keyword table
    Keyword,
    /// Placeholder (`?`, `:name`, `@name`, `$1`)
    Parameter,
    Operator,
    Parenthesis,
    Dot,
    Comma,
    /// Statement terminator `;`
    Terminal,
}

impl TokenType {
    /// Whether this token carries no meaning for the statement.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenType::Whitespace | TokenType::Comment)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Whitespace => "whitespace",
            TokenType::Comment => "comment",
            TokenType::Hexadecimal => "hexadecimal",
            TokenType::Real => "real",
            TokenType::Integer => "integer",
            TokenType::Literal => "literal",
            TokenType::Identifier => "identifier",
            TokenType::Keyword => "keyword",
            TokenType::Parameter => "parameter",
            TokenType::Operator => "operator",
            TokenType::Parenthesis => "parenthesis",
            TokenType::Dot => "dot",
            TokenType::Comma => "comma",
            TokenType::Terminal => "terminal",
        };
        f.write_str(name)
    }
}

/// A single lexical unit and where it starts in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub text: String,
    /// Byte offset into the tokenized string.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenType, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Returns true if the token is of `kind` and its text matches `text`
    /// case-insensitively.
    pub fn is(&self, kind: TokenType, text: &str) -> bool {
        self.kind == kind && self.text.eq_ignore_ascii_case(text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.text)
    }
}
