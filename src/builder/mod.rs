//! Statement builders.
//!
//! Each builder accumulates already-precompiled clause fragments. Mutators
//! validate their input immediately and return an error at the point of
//! misuse; `render` only assembles text and never changes the builder, so a
//! builder can be rendered repeatedly or cloned and extended.

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use update::UpdateBuilder;

use std::fmt;

use crate::command::Command;
use crate::dialect::{Dialect, DmlLimit};
use crate::error::{QuillError, QuillResult};
use crate::precompiler::{Identifier, OperatorGroup, Precompiler};
use crate::value::Value;

/// Boolean connector placed between WHERE / HAVING fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opens or closes a group of predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parenthesis {
    Open,
    Close,
}

impl Parenthesis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Parenthesis::Open => "(",
            Parenthesis::Close => ")",
        }
    }
}

/// A nested statement used as a value, a derived table or a combine target.
#[derive(Debug, Clone, PartialEq)]
pub enum Subquery {
    Select(Box<SelectBuilder>),
    Command(Command),
}

impl Subquery {
    /// Statement text without a terminator.
    ///
    /// A builder for another dialect cannot be embedded.
    pub fn render(&self, dialect: Dialect) -> QuillResult<String> {
        match self {
            Subquery::Select(builder) => {
                if builder.dialect() != dialect {
                    return Err(QuillError::invalid(format!(
                        "cannot embed a {} select in a {} statement",
                        builder.dialect(),
                        dialect
                    )));
                }
                Ok(builder.render(false)?.into_text())
            }
            Subquery::Command(command) => Ok(command.trimmed().to_string()),
        }
    }

    /// Whether the statement is a SELECT.
    pub fn is_select(&self, precompiler: &Precompiler) -> QuillResult<bool> {
        match self {
            Subquery::Select(_) => Ok(true),
            Subquery::Command(command) => {
                for token in precompiler.tokenize(command.text()) {
                    let token = token?;
                    if !token.kind.is_trivia() {
                        return Ok(token.is(crate::tokenizer::TokenType::Keyword, "SELECT"));
                    }
                }
                Ok(false)
            }
        }
    }
}

impl From<SelectBuilder> for Subquery {
    fn from(builder: SelectBuilder) -> Self {
        Subquery::Select(Box::new(builder))
    }
}

impl From<Command> for Subquery {
    fn from(command: Command) -> Self {
        Subquery::Command(command)
    }
}

impl From<&str> for Subquery {
    fn from(text: &str) -> Self {
        Subquery::Command(Command::new(text))
    }
}

/// Ordered WHERE / HAVING fragments.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Conditions {
    fragments: Vec<(Connector, String)>,
}

impl Conditions {
    pub(crate) fn push(&mut self, connector: Connector, text: String) {
        self.fragments.push((connector, text));
    }

    pub(crate) fn push_block(&mut self, parenthesis: Parenthesis, connector: Connector) {
        self.fragments
            .push((connector, parenthesis.as_str().to_string()));
    }

    pub(crate) fn clear(&mut self) {
        self.fragments.clear();
    }

    /// Join the fragments. A connector precedes a fragment unless it is the
    /// first one, follows an opening parenthesis, or is a closing one.
    pub(crate) fn render(&self) -> Option<String> {
        if self.fragments.is_empty() {
            return None;
        }
        let mut sql = String::new();
        let mut append = false;
        for (connector, text) in &self.fragments {
            if append && text != ")" {
                sql.push(' ');
                sql.push_str(connector.as_str());
                sql.push(' ');
            }
            sql.push_str(text);
            append = text != "(";
        }
        Some(sql)
    }
}

/// Render `<column> <operator> <value>` with the operator-specific value rules.
pub(crate) fn condition(
    precompiler: &Precompiler,
    column: Identifier,
    operator: &str,
    value: Value,
) -> QuillResult<String> {
    let column = precompiler.prepare_identifier(column)?;
    let operator = precompiler.prepare_operator(operator, OperatorGroup::Comparison)?;

    match operator.as_str() {
        "BETWEEN" | "NOT BETWEEN" => match &value {
            Value::Array(bounds) if bounds.len() == 2 => Ok(format!(
                "{} {} {} AND {}",
                column,
                operator,
                precompiler.prepare_value(&bounds[0], None)?,
                precompiler.prepare_value(&bounds[1], None)?
            )),
            _ => Err(QuillError::invalid(format!(
                "{} requires a list of exactly two bounds",
                operator
            ))),
        },
        "IN" | "NOT IN" => match &value {
            Value::Array(_) | Value::Subquery(_) => Ok(format!(
                "{} {} {}",
                column,
                operator,
                precompiler.prepare_value(&value, None)?
            )),
            _ => Err(QuillError::invalid(format!(
                "{} requires a list or a subquery",
                operator
            ))),
        },
        _ if value.is_null() => {
            let operator = match operator.as_str() {
                "=" => "IS",
                "<>" | "!=" => "IS NOT",
                other => other,
            };
            Ok(format!("{} {} NULL", column, operator))
        }
        "LIKE" | "NOT LIKE" if matches!(value, Value::String(_)) => Ok(format!(
            "{} {} {}",
            column,
            operator,
            precompiler.prepare_value(&value, Some('\\'))?
        )),
        _ => Ok(format!(
            "{} {} {}",
            column,
            operator,
            precompiler.prepare_value(&value, None)?
        )),
    }
}

/// ORDER BY / LIMIT / OFFSET for UPDATE and DELETE.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DmlTail {
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

/// Pieces of a limited UPDATE or DELETE.
pub(crate) struct DmlParts {
    /// Goes right after the verb (`TOP (n)`).
    pub(crate) top: Option<String>,
    /// WHERE clause plus any trailing clauses, with a leading space.
    pub(crate) tail: String,
}

impl DmlTail {
    pub(crate) fn order_by(
        &mut self,
        precompiler: &Precompiler,
        column: Identifier,
        direction: &str,
        nulls: Option<&str>,
    ) -> QuillResult<()> {
        match precompiler.rules().dml_limit() {
            DmlLimit::Top | DmlLimit::Unsupported => Err(unsupported(precompiler, "ORDER BY")),
            _ => {
                let ordering = precompiler.prepare_ordering(column, direction, nulls)?;
                self.order_by.push(ordering);
                Ok(())
            }
        }
    }

    pub(crate) fn limit(&mut self, precompiler: &Precompiler, limit: u64) -> QuillResult<()> {
        if limit > 0 && precompiler.rules().dml_limit() == DmlLimit::Unsupported {
            return Err(unsupported(precompiler, "LIMIT"));
        }
        self.limit = (limit > 0).then_some(limit);
        Ok(())
    }

    pub(crate) fn offset(&mut self, precompiler: &Precompiler, offset: u64) -> QuillResult<()> {
        if offset > 0 && !matches!(precompiler.rules().dml_limit(), DmlLimit::RowId(_)) {
            return Err(unsupported(precompiler, "OFFSET"));
        }
        self.offset = (offset > 0).then_some(offset);
        Ok(())
    }

    pub(crate) fn render(
        &self,
        precompiler: &Precompiler,
        table: &str,
        conditions: Option<String>,
    ) -> DmlParts {
        let filter = conditions
            .map(|c| format!(" WHERE {}", c))
            .unwrap_or_default();
        let order = if self.order_by.is_empty() {
            String::new()
        } else {
            format!(" ORDER BY {}", self.order_by.join(", "))
        };

        match precompiler.rules().dml_limit() {
            DmlLimit::Trailing => {
                let limit = self
                    .limit
                    .map(|n| format!(" LIMIT {}", n))
                    .unwrap_or_default();
                DmlParts {
                    top: None,
                    tail: format!("{}{}{}", filter, order, limit),
                }
            }
            DmlLimit::Top => DmlParts {
                top: self.limit.map(|n| format!("TOP ({})", n)),
                tail: filter,
            },
            DmlLimit::RowId(pseudo)
                if !self.order_by.is_empty() || self.limit.is_some() || self.offset.is_some() =>
            {
                let paging = precompiler
                    .rules()
                    .paginate(self.limit, self.offset, !self.order_by.is_empty())
                    .tail
                    .map(|t| format!(" {}", t))
                    .unwrap_or_default();
                DmlParts {
                    top: None,
                    tail: format!(
                        " WHERE {pseudo} IN (SELECT {pseudo} FROM {table}{filter}{order}{paging})"
                    ),
                }
            }
            DmlLimit::RowId(_) | DmlLimit::Unsupported => DmlParts {
                top: None,
                tail: filter,
            },
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

fn unsupported(precompiler: &Precompiler, clause: &str) -> QuillError {
    QuillError::invalid(format!(
        "{} does not support {} in UPDATE or DELETE",
        precompiler.dialect(),
        clause
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_connector_placement() {
        let mut c = Conditions::default();
        c.push(Connector::And, "a = 1".into());
        c.push_block(Parenthesis::Open, Connector::And);
        c.push(Connector::Or, "b = 2".into());
        c.push(Connector::Or, "c = 3".into());
        c.push_block(Parenthesis::Close, Connector::And);
        c.push(Connector::Or, "d = 4".into());
        assert_eq!(
            c.render().unwrap(),
            "a = 1 AND (b = 2 OR c = 3) OR d = 4"
        );
    }

    #[test]
    fn test_leading_block() {
        let mut c = Conditions::default();
        c.push_block(Parenthesis::Open, Connector::Or);
        c.push(Connector::Or, "a = 1".into());
        c.push_block(Parenthesis::Close, Connector::Or);
        assert_eq!(c.render().unwrap(), "(a = 1)");
        assert_eq!(Conditions::default().render(), None);
    }

    #[test]
    fn test_condition_value_rules() {
        let pc = Precompiler::new(Dialect::PostgreSQL);
        assert_eq!(
            condition(&pc, "x".into(), "=", Value::Null).unwrap(),
            "\"x\" IS NULL"
        );
        assert_eq!(
            condition(&pc, "x".into(), "!=", Value::Null).unwrap(),
            "\"x\" IS NOT NULL"
        );
        assert_eq!(
            condition(&pc, "x".into(), "between", vec![1, 5].into()).unwrap(),
            "\"x\" BETWEEN 1 AND 5"
        );
        assert_eq!(
            condition(&pc, "x".into(), "not in", vec!["a", "b"].into()).unwrap(),
            "\"x\" NOT IN ('a', 'b')"
        );
        assert_eq!(
            condition(&pc, "x".into(), "like", "a\\_%".into()).unwrap(),
            "\"x\" LIKE 'a\\_%' ESCAPE '\\'"
        );
        assert!(condition(&pc, "x".into(), "BETWEEN", vec![1].into()).is_err());
        assert!(condition(&pc, "x".into(), "IN", 3.into()).is_err());
    }

    #[test]
    fn test_command_subquery_must_select() {
        let pc = Precompiler::new(Dialect::SQLite);
        assert!(Subquery::from("  select 1").is_select(&pc).unwrap());
        assert!(!Subquery::from("DELETE FROM t").is_select(&pc).unwrap());
        assert!(!Subquery::from("").is_select(&pc).unwrap());
    }
}
