//! Connection drivers.
//!
//! A [`Connection`] owns one native `sqlx` handle for a [`DataSource`] and
//! moves between two states:
//!
//! ```text
//! Closed --open--> Open --execute/query--> Open --close--> Closed
//! ```
//!
//! Statements run one at a time. [`Connection::query`] hands back a
//! [`DataReader`] that borrows the connection until it is dropped.

mod pool;
mod reader;

pub use pool::{ConnectionPool, SharedConnection};
pub use reader::{DataReader, ReaderState};

use sqlx::any::AnyArguments;
use sqlx::AnyConnection;
use sqlx::query::Query;
use sqlx::{Any, Connection as _, Executor};
use tracing::{debug, info};

use crate::builder::SelectBuilder;
use crate::command::Command;
use crate::data_source::{DataSource, DriverKind};
use crate::dialect::Dialect;
use crate::error::{QuillError, QuillResult};
use crate::expression::Expression;
use crate::precompiler::Precompiler;
use crate::value::{Value, DATETIME_FORMAT};

/// Driver variants with a native client in this build.
fn supported_drivers(dialect: Dialect) -> &'static [DriverKind] {
    match dialect {
        Dialect::MySQL => &[DriverKind::Standard, DriverKind::Improved, DriverKind::Pdo],
        Dialect::PostgreSQL | Dialect::SQLite => &[DriverKind::Standard, DriverKind::Pdo],
        Dialect::MsSQL | Dialect::Oracle | Dialect::DB2 => &[],
    }
}

/// A single native connection to a data source.
#[derive(Debug)]
pub struct Connection {
    source: DataSource,
    handle: Option<AnyConnection>,
    in_transaction: bool,
}

impl Connection {
    /// Create a closed connection.
    ///
    /// Fails with [`QuillError::Config`] when no native client exists for the
    /// data source's dialect and driver.
    pub fn new(source: DataSource) -> QuillResult<Self> {
        if !supported_drivers(source.dialect()).contains(&source.driver()) {
            return Err(QuillError::Config(format!(
                "no {} driver is available for {}",
                source.driver(),
                source.dialect()
            )));
        }
        Ok(Self {
            source,
            handle: None,
            in_transaction: false,
        })
    }

    pub fn data_source(&self) -> &DataSource {
        &self.source
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    /// Open the native handle. Does nothing when already open.
    pub async fn open(&mut self) -> QuillResult<()> {
        if self.handle.is_some() {
            return Ok(());
        }
        sqlx::any::install_default_drivers();

        let mut handle = AnyConnection::connect(&self.source.url())
            .await
            .map_err(|e| QuillError::Connection(e.to_string()))?;

        let rules = self.source.dialect().rules();
        if let Some(sql) = rules.charset_sql(self.source.charset()) {
            handle
                .execute(sql.as_str())
                .await
                .map_err(|e| QuillError::Connection(e.to_string()))?;
        }

        info!(
            source = %self.source.id(),
            dialect = %self.source.dialect(),
            "Connection opened"
        );
        self.handle = Some(handle);
        Ok(())
    }

    /// Close the native handle. Returns `false` if it was not open.
    pub async fn close(&mut self) -> QuillResult<bool> {
        let Some(handle) = self.handle.take() else {
            return Ok(false);
        };
        self.in_transaction = false;
        handle
            .close()
            .await
            .map_err(|e| QuillError::Connection(e.to_string()))?;
        info!(source = %self.source.id(), "Connection closed");
        Ok(true)
    }

    /// Run a statement that returns no rows. Returns the affected row count.
    pub async fn execute(&mut self, command: &Command) -> QuillResult<u64> {
        let handle = self.handle_mut()?;
        debug!(sql = %command.text(), "execute");
        let result = if command.parameters().is_empty() {
            handle.execute(command.text()).await?
        } else {
            bind_parameters(command)?.execute(handle).await?
        };
        Ok(result.rows_affected())
    }

    /// Run a query and return a reader over its rows.
    pub async fn query<'a>(&'a mut self, command: &'a Command) -> QuillResult<DataReader<'a>> {
        let handle = self.handle_mut()?;
        debug!(sql = %command.text(), "query");
        let stream = if command.parameters().is_empty() {
            handle.fetch(command.text())
        } else {
            bind_parameters(command)?.fetch(handle)
        };
        DataReader::open(stream).await
    }

    pub async fn begin_transaction(&mut self) -> QuillResult<()> {
        if self.in_transaction {
            return Err(QuillError::Sql(
                "Failed to begin SQL transaction. Reason: A transaction is already in progress."
                    .to_string(),
            ));
        }
        let sql = self.source.dialect().rules().begin_transaction_sql();
        self.execute(&Command::new(sql)).await?;
        self.in_transaction = true;
        debug!(source = %self.source.id(), "Transaction started");
        Ok(())
    }

    pub async fn commit(&mut self) -> QuillResult<()> {
        self.finish_transaction("commit").await
    }

    pub async fn rollback(&mut self) -> QuillResult<()> {
        self.finish_transaction("rollback").await
    }

    /// The most recent generated key.
    ///
    /// With a `table`, reads `MAX(column)` from it (`column` defaults to
    /// `id`), which also works for dialects without a native mechanism. An
    /// empty table yields 0.
    pub async fn get_last_insert_id(
        &mut self,
        table: Option<&str>,
        column: Option<&str>,
    ) -> QuillResult<i64> {
        let dialect = self.source.dialect();
        let sql = match table {
            Some(table) => {
                let column = Precompiler::new(dialect).prepare_identifier(column.unwrap_or("id"))?;
                SelectBuilder::new(dialect)
                    .column_as(Expression::new(format!("MAX({})", column)), "id")?
                    .from(table)?
                    .render(false)?
                    .into_text()
            }
            None => dialect
                .rules()
                .last_insert_id_sql()
                .ok_or_else(|| {
                    QuillError::Sql(format!(
                        "{} has no native last insert id. Reason: A table name is required.",
                        dialect
                    ))
                })?
                .to_string(),
        };

        let command = Command::new(sql);
        let mut reader = self.query(&command).await?;
        let id = if reader.read().await? {
            reader.get("id", 0i64)
        } else {
            0
        };
        reader.dispose();
        Ok(id)
    }

    /// Escape `text` as a string literal for this connection's dialect.
    pub fn quote(&self, text: &str, escape: Option<char>) -> String {
        self.source.dialect().rules().quote(text, escape)
    }

    async fn finish_transaction(&mut self, action: &str) -> QuillResult<()> {
        if !self.in_transaction {
            return Err(QuillError::Sql(format!(
                "Failed to {} SQL transaction. Reason: No transaction is in progress.",
                action
            )));
        }
        let rules = self.source.dialect().rules();
        let sql = if action == "commit" {
            rules.commit_sql()
        } else {
            rules.rollback_sql()
        };
        self.execute(&Command::new(sql)).await?;
        self.in_transaction = false;
        debug!(source = %self.source.id(), action, "Transaction finished");
        Ok(())
    }

    fn handle_mut(&mut self) -> QuillResult<&mut AnyConnection> {
        self.handle.as_mut().ok_or_else(|| {
            QuillError::Sql(
                "Failed to run SQL statement. Reason: Unable to find connection.".to_string(),
            )
        })
    }
}

/// Bind a command's parameters positionally.
fn bind_parameters(command: &Command) -> QuillResult<Query<'_, Any, AnyArguments<'_>>> {
    let mut query = sqlx::query(command.text());
    for (name, value) in command.parameters() {
        query = match value {
            Value::Null => query.bind(None::<String>),
            Value::Bool(b) => query.bind(*b),
            Value::Int(n) => query.bind(*n),
            Value::Float(n) => query.bind(*n),
            Value::String(s) => query.bind(s.as_str()),
            Value::Bytes(b) => query.bind(b.as_slice()),
            Value::Date(d) => query.bind(d.format("%Y-%m-%d").to_string()),
            Value::DateTime(dt) => query.bind(dt.format(DATETIME_FORMAT).to_string()),
            Value::Array(_) | Value::Expression(_) | Value::Subquery(_) => {
                return Err(QuillError::invalid(format!(
                    "parameter '{}' cannot be bound to a placeholder",
                    name
                )));
            }
        };
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        let mysql = DataSource::new("a", Dialect::MySQL).with_driver(DriverKind::Improved);
        assert!(Connection::new(mysql).is_ok());

        let sqlite = DataSource::sqlite_memory().with_driver(DriverKind::Improved);
        assert!(matches!(Connection::new(sqlite), Err(QuillError::Config(_))));

        for dialect in [Dialect::MsSQL, Dialect::Oracle, Dialect::DB2] {
            let source = DataSource::new("x", dialect);
            assert!(matches!(Connection::new(source), Err(QuillError::Config(_))));
        }
    }

    #[tokio::test]
    async fn test_closed_connection_rejects_statements() {
        let mut conn = Connection::new(DataSource::sqlite_memory()).unwrap();
        assert!(!conn.is_connected());
        let err = conn.execute(&Command::new("SELECT 1")).await.unwrap_err();
        assert!(err.to_string().contains("Unable to find connection"));
        assert!(!conn.close().await.unwrap());
    }

    #[test]
    fn test_bind_rejects_lists() {
        let cmd = Command::new("SELECT ?").with_parameter("ids", vec![1, 2]);
        assert!(bind_parameters(&cmd).is_err());
    }
}
