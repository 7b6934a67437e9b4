//! INSERT builder.

use crate::command::Command;
use crate::dialect::{Dialect, MultiRowInsert};
use crate::error::{QuillError, QuillResult};
use crate::precompiler::{Identifier, Precompiler};
use crate::value::Value;

/// Builds `INSERT` statements with one or more rows.
///
/// Columns are the union of every row's columns in first-seen order; a row
/// without a value for some column inserts `NULL` there.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertBuilder {
    precompiler: Precompiler,
    into: Option<String>,
    columns: Vec<String>,
    rows: Vec<Vec<(String, String)>>,
}

impl InsertBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            precompiler: Precompiler::new(dialect),
            into: None,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.precompiler.dialect()
    }

    pub fn into(mut self, table: impl Into<Identifier>) -> QuillResult<Self> {
        self.into = Some(self.precompiler.prepare_identifier(table)?);
        Ok(self)
    }

    /// Set a column of the first row, replacing an earlier value.
    pub fn column(
        mut self,
        column: impl Into<Identifier>,
        value: impl Into<Value>,
    ) -> QuillResult<Self> {
        let column = self.precompiler.prepare_identifier(column)?;
        let value = self.precompiler.prepare_value(&value.into(), None)?;
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        self.register(&column);
        let row = &mut self.rows[0];
        match row.iter_mut().find(|(c, _)| *c == column) {
            Some(cell) => cell.1 = value,
            None => row.push((column, value)),
        }
        Ok(self)
    }

    /// Append a row of `(column, value)` pairs.
    pub fn row<I, C, V>(mut self, cells: I) -> QuillResult<Self>
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<Identifier>,
        V: Into<Value>,
    {
        let mut row: Vec<(String, String)> = Vec::new();
        for (column, value) in cells {
            let column = self.precompiler.prepare_identifier(column)?;
            let value = self.precompiler.prepare_value(&value.into(), None)?;
            match row.iter_mut().find(|(c, _)| *c == column) {
                Some(cell) => cell.1 = value,
                None => row.push((column, value)),
            }
        }
        if row.is_empty() {
            return Err(QuillError::invalid("an inserted row needs at least one column"));
        }
        for (column, _) in &row {
            self.register(column);
        }
        self.rows.push(row);
        Ok(self)
    }

    pub fn reset(self) -> Self {
        Self::new(self.dialect())
    }

    pub fn render(&self, terminated: bool) -> QuillResult<Command> {
        let table = self
            .into
            .as_deref()
            .ok_or_else(|| QuillError::invalid("an INSERT needs a target table"))?;
        if self.columns.is_empty() {
            return Err(QuillError::invalid("an INSERT needs at least one column"));
        }

        let columns = self.columns.join(", ");
        let tuples: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<&str> = self
                    .columns
                    .iter()
                    .map(|column| {
                        row.iter()
                            .find(|(c, _)| c == column)
                            .map_or("NULL", |(_, v)| v.as_str())
                    })
                    .collect();
                format!("({})", cells.join(", "))
            })
            .collect();

        let mut sql = match self.precompiler.rules().multi_row_insert() {
            MultiRowInsert::InsertAll if tuples.len() > 1 => {
                let mut sql = String::from("INSERT ALL");
                for tuple in &tuples {
                    sql.push_str(&format!(" INTO {} ({}) VALUES {}", table, columns, tuple));
                }
                sql.push_str(" SELECT * FROM dual");
                sql
            }
            _ => format!(
                "INSERT INTO {} ({}) VALUES {}",
                table,
                columns,
                tuples.join(", ")
            ),
        };

        if terminated {
            sql.push(';');
        }
        Ok(Command::new(sql))
    }

    fn register(&mut self, column: &str) {
        if !self.columns.iter().any(|c| c == column) {
            self.columns.push(column.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_row() {
        let cmd = InsertBuilder::new(Dialect::MySQL)
            .into("users")
            .unwrap()
            .column("name", "Bob")
            .unwrap()
            .column("age", 30)
            .unwrap()
            .column("name", "Robert")
            .unwrap()
            .render(true)
            .unwrap();
        assert_eq!(
            cmd.text(),
            "INSERT INTO `users` (`name`, `age`) VALUES ('Robert', 30);"
        );
    }

    #[test]
    fn test_rows_fill_missing_cells() {
        let cmd = InsertBuilder::new(Dialect::PostgreSQL)
            .into("t")
            .unwrap()
            .row([("a", Value::Int(1)), ("b", Value::Int(2))])
            .unwrap()
            .row([("c", Value::Bool(true))])
            .unwrap()
            .render(false)
            .unwrap();
        assert_eq!(
            cmd.text(),
            "INSERT INTO \"t\" (\"a\", \"b\", \"c\") VALUES (1, 2, NULL), (NULL, NULL, TRUE)"
        );
    }

    #[test]
    fn test_oracle_insert_all() {
        let builder = InsertBuilder::new(Dialect::Oracle)
            .into("t")
            .unwrap()
            .row([("a", 1)])
            .unwrap();
        assert_eq!(
            builder.render(false).unwrap().text(),
            "INSERT INTO \"t\" (\"a\") VALUES (1)"
        );
        let cmd = builder.row([("a", 2)]).unwrap().render(false).unwrap();
        assert_eq!(
            cmd.text(),
            "INSERT ALL INTO \"t\" (\"a\") VALUES (1) INTO \"t\" (\"a\") VALUES (2) SELECT * FROM dual"
        );
    }

    #[test]
    fn test_missing_parts() {
        let b = InsertBuilder::new(Dialect::SQLite);
        assert!(b.clone().column("a", 1).unwrap().render(false).is_err());
        assert!(b.clone().into("t").unwrap().render(false).is_err());
        assert!(b.row(Vec::<(&str, i32)>::new()).is_err());
    }
}
