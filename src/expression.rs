//! Raw SQL fragments with placeholder substitution.

use crate::error::{QuillError, QuillResult};
use crate::precompiler::Precompiler;
use crate::tokenizer::TokenType;
use crate::value::Value;

/// A raw SQL fragment embedded verbatim into a statement.
///
/// Placeholders (`?`, `$n`, `:name`, `@name`) are replaced by the rendered
/// form of the bound values. A fragment with no bound values is passed
/// through untouched.
///
/// ```
/// use quill::{Dialect, Expression, Precompiler};
///
/// let pc = Precompiler::new(Dialect::PostgreSQL);
/// let expr = Expression::new("COALESCE(score, ?) + :bonus")
///     .bind(0)
///     .bind_named("bonus", 5);
/// assert_eq!(expr.render(&pc).unwrap(), "COALESCE(score, 0) + 5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    text: String,
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Bind the next positional placeholder.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Bind a named placeholder. A leading `:` or `@` on `name` is ignored.
    pub fn bind_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let name = name.trim_start_matches([':', '@']).to_string();
        self.named.push((name, value.into()));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_parameters(&self) -> bool {
        !self.positional.is_empty() || !self.named.is_empty()
    }

    /// Substitute bound values into the fragment.
    pub fn render(&self, precompiler: &Precompiler) -> QuillResult<String> {
        if !self.has_parameters() {
            return Ok(self.text.clone());
        }

        let mut out = String::with_capacity(self.text.len());
        let mut used = vec![false; self.positional.len()];
        let mut next = 0;

        for token in precompiler.tokenize(&self.text) {
            let token = token?;
            if token.kind != TokenType::Parameter {
                out.push_str(&token.text);
                continue;
            }

            let value = match token.text.as_bytes()[0] {
                b'?' => {
                    next += 1;
                    self.positional_at(next - 1, &mut used)
                }
                b'$' => token.text[1..]
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .and_then(|n| self.positional_at(n - 1, &mut used)),
                _ => self
                    .named
                    .iter()
                    .find(|(name, _)| name == &token.text[1..])
                    .map(|(_, v)| v),
            };

            let value = value.ok_or_else(|| {
                QuillError::invalid(format!(
                    "unresolved placeholder '{}' at position {}",
                    token.text, token.position
                ))
            })?;
            out.push_str(&precompiler.prepare_value(value, None)?);
        }

        let unused = used.iter().filter(|u| !**u).count();
        if unused > 0 {
            return Err(QuillError::invalid(format!(
                "{} positional parameter(s) have no placeholder in '{}'",
                unused, self.text
            )));
        }
        Ok(out)
    }

    fn positional_at(&self, index: usize, used: &mut [bool]) -> Option<&Value> {
        let value = self.positional.get(index)?;
        used[index] = true;
        Some(value)
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::new(text)
    }
}
