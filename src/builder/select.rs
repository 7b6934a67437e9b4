//! SELECT builder.

use super::{condition, Conditions, Connector, Parenthesis, Subquery};
use crate::command::Command;
use crate::dialect::Dialect;
use crate::error::{QuillError, QuillResult};
use crate::precompiler::{Identifier, OperatorGroup, Precompiler};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
struct Join {
    kind: String,
    source: String,
    on: Vec<String>,
    using: Vec<String>,
}

/// Builds `SELECT` statements.
///
/// ```
/// use quill::{Dialect, SelectBuilder};
///
/// let cmd = SelectBuilder::new(Dialect::PostgreSQL)
///     .from("users").unwrap()
///     .and_where("age", ">", 18).unwrap()
///     .and_where("name", "=", "Bob").unwrap()
///     .render(true).unwrap();
/// assert_eq!(
///     cmd.text(),
///     "SELECT * FROM \"users\" WHERE \"age\" > 18 AND \"name\" = 'Bob';"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectBuilder {
    precompiler: Precompiler,
    distinct: bool,
    columns: Vec<String>,
    from: Vec<String>,
    joins: Vec<Join>,
    filters: Conditions,
    group_by: Vec<String>,
    having: Conditions,
    combine: Vec<String>,
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            precompiler: Precompiler::new(dialect),
            distinct: false,
            columns: Vec::new(),
            from: Vec::new(),
            joins: Vec::new(),
            filters: Conditions::default(),
            group_by: Vec::new(),
            having: Conditions::default(),
            combine: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.precompiler.dialect()
    }

    pub fn precompiler(&self) -> &Precompiler {
        &self.precompiler
    }

    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Add a result column. A trailing `*` segment selects every column.
    pub fn column(mut self, column: impl Into<Identifier>) -> QuillResult<Self> {
        let column = self.prepare_column(column.into())?;
        self.columns.push(column);
        Ok(self)
    }

    pub fn column_as(mut self, column: impl Into<Identifier>, alias: &str) -> QuillResult<Self> {
        let column = self.precompiler.prepare_identifier(column)?;
        let alias = self.precompiler.prepare_alias(alias)?;
        self.columns.push(format!("{} AS {}", column, alias));
        Ok(self)
    }

    /// Add a source table. Several sources render as a comma list.
    pub fn from(mut self, table: impl Into<Identifier>) -> QuillResult<Self> {
        let table = self.precompiler.prepare_identifier(table)?;
        self.from.push(table);
        Ok(self)
    }

    pub fn from_as(mut self, table: impl Into<Identifier>, alias: &str) -> QuillResult<Self> {
        let table = self.precompiler.prepare_identifier(table)?;
        let alias = self.precompiler.prepare_alias(alias)?;
        self.from.push(format!("{} {}", table, alias));
        Ok(self)
    }

    pub fn join(self, kind: &str, table: impl Into<Identifier>) -> QuillResult<Self> {
        self.push_join(kind, table.into(), None)
    }

    pub fn join_as(
        self,
        kind: &str,
        table: impl Into<Identifier>,
        alias: &str,
    ) -> QuillResult<Self> {
        self.push_join(kind, table.into(), Some(alias))
    }

    /// Add `left <operator> right` to the ON clause of the last join.
    pub fn on(
        mut self,
        left: impl Into<Identifier>,
        operator: &str,
        right: impl Into<Identifier>,
    ) -> QuillResult<Self> {
        let left = self.precompiler.prepare_identifier(left)?;
        let operator = self
            .precompiler
            .prepare_operator(operator, OperatorGroup::Comparison)?;
        let right = self.precompiler.prepare_identifier(right)?;
        let join = self.conditional_join("ON")?;
        if !join.using.is_empty() {
            return Err(QuillError::invalid("cannot mix ON and USING in one join"));
        }
        join.on.push(format!("{} {} {}", left, operator, right));
        Ok(self)
    }

    /// Add a column to the USING clause of the last join.
    pub fn using(mut self, column: impl Into<Identifier>) -> QuillResult<Self> {
        let column = self.precompiler.prepare_identifier(column)?;
        let join = self.conditional_join("USING")?;
        if !join.on.is_empty() {
            return Err(QuillError::invalid("cannot mix ON and USING in one join"));
        }
        join.using.push(column);
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

    pub fn group_by(mut self, column: impl Into<Identifier>) -> QuillResult<Self> {
        let column = self.precompiler.prepare_identifier(column)?;
        self.group_by.push(column);
        Ok(self)
    }

    pub fn having(
        mut self,
        column: impl Into<Identifier>,
        operator: &str,
        value: impl Into<Value>,
        connector: Connector,
    ) -> QuillResult<Self> {
        let predicate = condition(&self.precompiler, column.into(), operator, value.into())?;
        self.having.push(connector, predicate);
        Ok(self)
    }

    pub fn having_block(mut self, parenthesis: Parenthesis, connector: Connector) -> Self {
        self.having.push_block(parenthesis, connector);
        self
    }

    /// Append a set operation. Only SELECT statements can be combined.
    pub fn combine(mut self, operator: &str, statement: impl Into<Subquery>) -> QuillResult<Self> {
        let operator = self.precompiler.prepare_operator(operator, OperatorGroup::Set)?;
        let statement = statement.into();
        if !statement.is_select(&self.precompiler)? {
            return Err(QuillError::invalid("only a SELECT statement can be combined"));
        }
        let text = statement.render(self.dialect())?;
        if self.precompiler.rules().parenthesize_compound() {
            self.combine.push(format!("{} ({})", operator, text));
        } else {
            self.combine.push(format!("{} {}", operator, text));
        }
        Ok(self)
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
        let ordering = self.precompiler.prepare_ordering(column, direction, nulls)?;
        self.order_by.push(ordering);
        Ok(self)
    }

    /// Limit the number of rows. Zero removes the limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    /// Skip rows. Zero removes the offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = (offset > 0).then_some(offset);
        self
    }

    /// Drop every clause, keeping the dialect.
    pub fn reset(self) -> Self {
        Self::new(self.dialect())
    }

    pub fn render(&self, terminated: bool) -> QuillResult<Command> {
        if self.from.is_empty() && self.columns.is_empty() {
            return Err(QuillError::invalid(
                "a SELECT needs at least a source table or a column",
            ));
        }
        let paging = self.precompiler.rules().paginate(
            self.limit,
            self.offset,
            !self.order_by.is_empty(),
        );

        let mut sql = String::from("SELECT");
        if self.distinct {
            sql.push_str(" DISTINCT");
        }
        if let Some(top) = &paging.top {
            sql.push(' ');
            sql.push_str(top);
        }
        if self.columns.is_empty() {
            sql.push_str(" *");
        } else {
            sql.push(' ');
            sql.push_str(&self.columns.join(", "));
        }

        if !self.from.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&self.from.join(", "));
        }

        for join in &self.joins {
            sql.push_str(&format!(" {} JOIN {}", join.kind, join.source));
            if !join.on.is_empty() {
                sql.push_str(&format!(" ON ({})", join.on.join(" AND ")));
            } else if !join.using.is_empty() {
                sql.push_str(&format!(" USING ({})", join.using.join(", ")));
            }
        }

        if let Some(filters) = self.filters.render() {
            sql.push_str(" WHERE ");
            sql.push_str(&filters);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if let Some(having) = self.having.render() {
            sql.push_str(" HAVING ");
            sql.push_str(&having);
        }

        for combine in &self.combine {
            sql.push(' ');
            sql.push_str(combine);
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        if let Some(tail) = &paging.tail {
            sql.push(' ');
            sql.push_str(tail);
        }

        if terminated {
            sql.push(';');
        }
        Ok(Command::new(sql))
    }

    fn prepare_column(&self, column: Identifier) -> QuillResult<String> {
        match column {
            Identifier::Name(name) if name.trim_end().ends_with('*') => {
                self.precompiler.prepare_wildcard(&name)
            }
            other => self.precompiler.prepare_identifier(other),
        }
    }

    fn push_join(
        mut self,
        kind: &str,
        table: Identifier,
        alias: Option<&str>,
    ) -> QuillResult<Self> {
        let kind = self.precompiler.prepare_join(kind)?;
        let mut source = self.precompiler.prepare_identifier(table)?;
        if let Some(alias) = alias {
            source.push(' ');
            source.push_str(&self.precompiler.prepare_alias(alias)?);
        }
        self.joins.push(Join {
            kind,
            source,
            on: Vec::new(),
            using: Vec::new(),
        });
        Ok(self)
    }

    /// The last join, if it may carry an ON or USING clause.
    fn conditional_join(&mut self, clause: &str) -> QuillResult<&mut Join> {
        let join = self
            .joins
            .last_mut()
            .ok_or_else(|| QuillError::invalid(format!("{} must follow a join", clause)))?;
        if join.kind == "CROSS" || join.kind.starts_with("NATURAL") {
            return Err(QuillError::invalid(format!(
                "a {} JOIN cannot have an {} clause",
                join.kind, clause
            )));
        }
        Ok(join)
    }
}
