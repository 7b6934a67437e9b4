//! UPDATE builder.

use super::{condition, Conditions, Connector, DmlTail, Parenthesis};
use crate::command::Command;
use crate::dialect::Dialect;
use crate::error::{QuillError, QuillResult};
use crate::precompiler::{Identifier, Precompiler};
use crate::value::Value;

/// Builds `UPDATE` statements.
///
/// ORDER BY, LIMIT and OFFSET follow the dialect's rules for limited DML
/// and are rejected as soon as they are added when the dialect cannot
/// express them.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBuilder {
    precompiler: Precompiler,
    table: Option<String>,
    assignments: Vec<(String, String)>,
    filters: Conditions,
    tail: DmlTail,
}

impl UpdateBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            precompiler: Precompiler::new(dialect),
            table: None,
            assignments: Vec::new(),
            filters: Conditions::default(),
            tail: DmlTail::default(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.precompiler.dialect()
    }

    pub fn table(mut self, table: impl Into<Identifier>) -> QuillResult<Self> {
        self.table = Some(self.precompiler.prepare_identifier(table)?);
        Ok(self)
    }

    /// Assign `value` to `column`, replacing an earlier assignment.
    pub fn set(
        mut self,
        column: impl Into<Identifier>,
        value: impl Into<Value>,
    ) -> QuillResult<Self> {
        let column = self.precompiler.prepare_identifier(column)?;
        let value = self.precompiler.prepare_value(&value.into(), None)?;
        match self.assignments.iter_mut().find(|(c, _)| *c == column) {
            Some(assignment) => assignment.1 = value,
            None => self.assignments.push((column, value)),
        }
        Ok(self)
    }

    pub fn where_(
        mut self,
        column: impl Into<Identifier>,
        operator: &str,
        value: impl Into<Value>,
        connector: Connector,
    ) -> QuillResult<Self> {
        let predicate = condition(&self.precompiler, column.into(), operator, value.into())?;
        self.filters.push(connector, predicate);
        Ok(self)
    }

    pub fn and_where(
        self,
        column: impl Into<Identifier>,
        operator: &str,
        value: impl Into<Value>,
    ) -> QuillResult<Self> {
        self.where_(column, operator, value, Connector::And)
    }

    pub fn or_where(
        self,
        column: impl Into<Identifier>,
        operator: &str,
        value: impl Into<Value>,
    ) -> QuillResult<Self> {
        self.where_(column, operator, value, Connector::Or)
    }

    pub fn where_block(mut self, parenthesis: Parenthesis, connector: Connector) -> Self {
        self.filters.push_block(parenthesis, connector);
        self
    }

    pub fn order_by(self, column: impl Into<Identifier>, direction: &str) -> QuillResult<Self> {
        self.order_by_nulls(column, direction, None)
    }

    pub fn order_by_nulls(
        mut self,
        column: impl Into<Identifier>,
        direction: &str,
        nulls: Option<&str>,
    ) -> QuillResult<Self> {
        self.tail
            .order_by(&self.precompiler, column.into(), direction, nulls)?;
        Ok(self)
    }

    pub fn limit(mut self, limit: u64) -> QuillResult<Self> {
        self.tail.limit(&self.precompiler, limit)?;
        Ok(self)
    }

    pub fn offset(mut self, offset: u64) -> QuillResult<Self> {
        self.tail.offset(&self.precompiler, offset)?;
        Ok(self)
    }

    pub fn reset(mut self) -> Self {
        self.table = None;
        self.assignments.clear();
        self.filters.clear();
        self.tail.clear();
        self
    }

    pub fn render(&self, terminated: bool) -> QuillResult<Command> {
        let table = self
            .table
            .as_deref()
            .ok_or_else(|| QuillError::invalid("an UPDATE needs a target table"))?;
        if self.assignments.is_empty() {
            return Err(QuillError::invalid("an UPDATE needs at least one SET column"));
        }

        let parts = self
            .tail
            .render(&self.precompiler, table, self.filters.render());
        let assignments: Vec<String> = self
            .assignments
            .iter()
            .map(|(column, value)| format!("{} = {}", column, value))
            .collect();

        let mut sql = String::from("UPDATE ");
        if let Some(top) = &parts.top {
            sql.push_str(top);
            sql.push(' ');
        }
        sql.push_str(table);
        sql.push_str(" SET ");
        sql.push_str(&assignments.join(", "));
        sql.push_str(&parts.tail);

        if terminated {
            sql.push(';');
        }
        Ok(Command::new(sql))
    }
}
