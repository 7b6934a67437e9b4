//! Dialect-aware rendering of identifiers, literals and operators.
//!
//! Builders never paste user input into SQL directly. Every table name,
//! column, value, operator and join type goes through one of the
//! `prepare_*` methods below, which either returns dialect-correct text or
//! fails with [`QuillError::InvalidArgument`].

use crate::builder::{SelectBuilder, Subquery};
use crate::command::Command;
use crate::dialect::{Dialect, SqlDialect, JOIN_TYPES};
use crate::error::{QuillError, QuillResult};
use crate::expression::Expression;
use crate::tokenizer::Tokenizer;
use crate::value::{Value, DATETIME_FORMAT};

/// Operator families accepted by [`Precompiler::prepare_operator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorGroup {
    Comparison,
    Set,
}

/// Something that names a table or column.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    /// A `.`-delimited path such as `schema.table.column`
    Name(String),
    /// A derived table or scalar subquery
    Subquery(Subquery),
    /// A raw fragment, e.g. `COUNT(*)`
    Expression(Expression),
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(name)
    }
}

impl From<&String> for Identifier {
    fn from(name: &String) -> Self {
        Identifier::Name(name.clone())
    }
}

impl From<Expression> for Identifier {
    fn from(expr: Expression) -> Self {
        Identifier::Expression(expr)
    }
}

impl From<Subquery> for Identifier {
    fn from(subquery: Subquery) -> Self {
        Identifier::Subquery(subquery)
    }
}

impl From<SelectBuilder> for Identifier {
    fn from(builder: SelectBuilder) -> Self {
        Identifier::Subquery(builder.into())
    }
}

impl From<Command> for Identifier {
    fn from(command: Command) -> Self {
        Identifier::Subquery(command.into())
    }
}

/// Renders abstract SQL constructs for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precompiler {
    dialect: Dialect,
}

impl Precompiler {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn rules(&self) -> &'static dyn SqlDialect {
        self.dialect.rules()
    }

    /// Whether `word` is reserved in this dialect.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.rules().is_keyword(word)
    }

    /// Tokenize `text` using this dialect's keyword table and string escapes.
    pub fn tokenize<'a>(&self, text: &'a str) -> Tokenizer<'a> {
        Tokenizer::with_lexicon(text, self.rules().lexicon())
    }

    /// Quote a string literal, optionally with a LIKE escape character.
    pub fn quote(&self, text: &str, escape: Option<char>) -> String {
        self.rules().quote(text, escape)
    }

    /// Quote each segment of a `.`-delimited path, stripping characters
    /// outside `[A-Za-z0-9$_ ]`. Subqueries are parenthesized instead.
    pub fn prepare_identifier(&self, expr: impl Into<Identifier>) -> QuillResult<String> {
        match expr.into() {
            Identifier::Name(name) => {
                let parts = name
                    .split('.')
                    .map(|part| self.quote_segment(part, &name))
                    .collect::<QuillResult<Vec<_>>>()?;
                Ok(parts.join("."))
            }
            Identifier::Subquery(subquery) => Ok(format!("({})", subquery.render(self.dialect)?)),
            Identifier::Expression(expr) => expr.render(self),
        }
    }

    /// Quote an alias. The alias must be a single segment.
    pub fn prepare_alias(&self, expr: &str) -> QuillResult<String> {
        self.quote_segment(&expr.replace('.', ""), expr)
    }

    /// Quote a path whose last segment is `*`, appending one if missing.
    pub fn prepare_wildcard(&self, expr: &str) -> QuillResult<String> {
        let mut parts = Vec::new();
        for part in expr.split('.') {
            if part.trim() == "*" {
                parts.push("*".to_string());
            } else {
                parts.push(self.quote_segment(part, expr)?);
            }
        }
        if parts.last().is_some_and(|p| p != "*") {
            parts.push("*".to_string());
        }
        Ok(parts.join("."))
    }

    /// Render a literal.
    pub fn prepare_value(&self, value: &Value, escape: Option<char>) -> QuillResult<String> {
        let rules = self.rules();
        match value {
            Value::Null => Ok("NULL".to_string()),
            Value::Bool(b) => Ok(rules.bool_literal(*b).to_string()),
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(n) if !n.is_finite() => Err(QuillError::invalid(format!(
                "cannot render non-finite number {}",
                n
            ))),
            Value::Float(n) => Ok(rules.float_literal(*n)),
            Value::String(s) => Ok(rules.quote(s, escape)),
            Value::Bytes(b) => Ok(rules.bytes_literal(b)),
            Value::Date(d) => Ok(format!("'{}'", d.format("%Y-%m-%d"))),
            Value::DateTime(dt) => Ok(format!("'{}'", dt.format(DATETIME_FORMAT))),
            Value::Array(items) if items.is_empty() => {
                Err(QuillError::invalid("cannot render an empty list"))
            }
            Value::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.prepare_value(item, escape))
                    .collect::<QuillResult<Vec<_>>>()?;
                Ok(format!("({})", items.join(", ")))
            }
            Value::Expression(expr) => expr.render(self),
            Value::Subquery(subquery) => Ok(format!("({})", subquery.render(self.dialect)?)),
        }
    }

    /// Validate an operator against `group` and return its canonical form.
    ///
    /// Input is upper-cased and runs of whitespace collapse to one space.
    pub fn prepare_operator(&self, expr: &str, group: OperatorGroup) -> QuillResult<String> {
        let normalized = normalize(expr);
        let rules = self.rules();
        let canonical = match group {
            OperatorGroup::Comparison => rules.comparison_operator(&normalized),
            OperatorGroup::Set => rules
                .set_operators()
                .iter()
                .find(|op| **op == normalized)
                .copied(),
        };
        canonical.map(str::to_string).ok_or_else(|| {
            QuillError::invalid(format!(
                "operator '{}' is not a {} operator in {}",
                expr,
                match group {
                    OperatorGroup::Comparison => "COMPARISON",
                    OperatorGroup::Set => "SET",
                },
                self.dialect
            ))
        })
    }

    /// Validate a join type such as `left outer`.
    pub fn prepare_join(&self, expr: &str) -> QuillResult<String> {
        let normalized = normalize(expr);
        match JOIN_TYPES.iter().find(|join| **join == normalized) {
            Some(join) if self.rules().supports_join(join) => Ok(join.to_string()),
            _ => Err(QuillError::invalid(format!(
                "join type '{}' is not supported in {}",
                expr, self.dialect
            ))),
        }
    }

    /// Render `<column> ASC|DESC [NULLS FIRST|LAST]`.
    ///
    /// Unknown directions fall back to `ASC`. The nulls clause is dropped for
    /// dialects without it and for values other than `FIRST` or `LAST`.
    pub fn prepare_ordering(
        &self,
        column: impl Into<Identifier>,
        direction: &str,
        nulls: Option<&str>,
    ) -> QuillResult<String> {
        let column = self.prepare_identifier(column)?;
        let direction = if direction.trim().eq_ignore_ascii_case("DESC") {
            "DESC"
        } else {
            "ASC"
        };
        let mut ordering = format!("{} {}", column, direction);
        if self.rules().supports_nulls_ordering() {
            match nulls.map(|n| n.trim().to_ascii_uppercase()).as_deref() {
                Some("FIRST") => ordering.push_str(" NULLS FIRST"),
                Some("LAST") => ordering.push_str(" NULLS LAST"),
                _ => {}
            }
        }
        Ok(ordering)
    }

    fn quote_segment(&self, segment: &str, whole: &str) -> QuillResult<String> {
        let cleaned: String = segment
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '$' | '_' | ' '))
            .collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Err(QuillError::invalid(format!(
                "identifier '{}' has an empty segment",
                whole
            )));
        }
        let (open, close) = self.rules().quote_chars();
        Ok(format!("{}{}{}", open, cleaned, close))
    }
}

fn normalize(expr: &str) -> String {
    expr.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}
