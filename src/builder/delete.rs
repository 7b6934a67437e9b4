//! DELETE builder.

use super::{condition, Conditions, Connector, DmlTail, Parenthesis};
use crate::command::Command;
use crate::dialect::Dialect;
use crate::error::{QuillError, QuillResult};
use crate::precompiler::{Identifier, Precompiler};
use crate::value::Value;

/// Builds `DELETE` statements.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteBuilder {
    precompiler: Precompiler,
    from: Option<String>,
    filters: Conditions,
    tail: DmlTail,
}

impl DeleteBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            precompiler: Precompiler::new(dialect),
            from: None,
            filters: Conditions::default(),
            tail: DmlTail::default(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.precompiler.dialect()
    }

    pub fn from(mut self, table: impl Into<Identifier>) -> QuillResult<Self> {
        self.from = Some(self.precompiler.prepare_identifier(table)?);
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
        self.from = None;
        self.filters.clear();
        self.tail.clear();
        self
    }

    pub fn render(&self, terminated: bool) -> QuillResult<Command> {
        let table = self
            .from
            .as_deref()
            .ok_or_else(|| QuillError::invalid("a DELETE needs a target table"))?;
        let parts = self
            .tail
            .render(&self.precompiler, table, self.filters.render());

        let mut sql = String::from("DELETE ");
        if let Some(top) = &parts.top {
            sql.push_str(top);
            sql.push(' ');
        }
        sql.push_str("FROM ");
        sql.push_str(table);
        sql.push_str(&parts.tail);

        if terminated {
            sql.push(';');
        }
        Ok(Command::new(sql))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delete_all() {
        let cmd = DeleteBuilder::new(Dialect::PostgreSQL)
            .from("sessions")
            .unwrap()
            .render(true)
            .unwrap();
        assert_eq!(cmd.text(), "DELETE FROM \"sessions\";");
    }

    #[test]
    fn test_delete_with_grouped_where() {
        let cmd = DeleteBuilder::new(Dialect::MySQL)
            .from("sessions")
            .unwrap()
            .where_block(Parenthesis::Open, Connector::And)
            .and_where("expired", "=", true)
            .unwrap()
            .or_where("user_id", "=", Value::Null)
            .unwrap()
            .where_block(Parenthesis::Close, Connector::And)
            .and_where("kind", "<>", "api")
            .unwrap()
            .render(false)
            .unwrap();
        assert_eq!(
            cmd.text(),
            "DELETE FROM `sessions` WHERE (`expired` = TRUE OR `user_id` IS NULL) AND `kind` <> 'api'"
        );
    }

    #[test]
    fn test_oracle_rowid_subquery() {
        let cmd = DeleteBuilder::new(Dialect::Oracle)
            .from("logs")
            .unwrap()
            .order_by("created", "ASC")
            .unwrap()
            .limit(100)
            .unwrap()
            .render(false)
            .unwrap();
        assert_eq!(
            cmd.text(),
            "DELETE FROM \"logs\" WHERE ROWID IN (SELECT ROWID FROM \"logs\" \
             ORDER BY \"created\" ASC FETCH NEXT 100 ROWS ONLY)"
        );
    }

    #[test]
    fn test_mssql_top() {
        let cmd = DeleteBuilder::new(Dialect::MsSQL)
            .from("logs")
            .unwrap()
            .and_where("level", "=", "debug")
            .unwrap()
            .limit(50)
            .unwrap()
            .render(false)
            .unwrap();
        assert_eq!(
            cmd.text(),
            "DELETE TOP (50) FROM [logs] WHERE [level] = 'debug'"
        );
    }

    #[test]
    fn test_trailing_offset_rejected() {
        let builder = DeleteBuilder::new(Dialect::SQLite).from("t").unwrap();
        let err = builder.offset(5).unwrap_err();
        assert!(matches!(err, QuillError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_table() {
        assert!(DeleteBuilder::new(Dialect::SQLite).render(false).is_err());
    }
}
