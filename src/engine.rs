//! Database handle tying a data source to pooled execution.
//!
//! ```rust,ignore
//! let db = Database::connect(DataSource::sqlite_memory()).await?;
//! db.execute(&"CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)".into()).await?;
//!
//! let insert = db.insert().into("users")?.column("name", "Ada")?.render(true)?;
//! db.execute(&insert).await?;
//!
//! let rows = db.fetch_all(&db.select().from("users")?.render(true)?).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
use crate::command::Command;
use crate::data_source::DataSource;
use crate::driver::{ConnectionPool, SharedConnection};
use crate::error::QuillResult;
use crate::precompiler::Precompiler;
use crate::value::Value;

/// A data source plus the pool its connection lives in.
#[derive(Clone)]
pub struct Database {
    source: DataSource,
    pool: Arc<ConnectionPool>,
}

impl Database {
    /// Use `pool` for connections. Nothing is opened until first use.
    pub fn new(source: DataSource, pool: Arc<ConnectionPool>) -> Self {
        Self { source, pool }
    }

    /// Open `source` eagerly in a private pool.
    pub async fn connect(source: DataSource) -> QuillResult<Self> {
        let db = Self::new(source, Arc::new(ConnectionPool::new()));
        db.connection().await?;
        Ok(db)
    }

    pub fn data_source(&self) -> &DataSource {
        &self.source
    }

    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }

    pub fn precompiler(&self) -> Precompiler {
        Precompiler::new(self.source.dialect())
    }

    pub fn select(&self) -> SelectBuilder {
        SelectBuilder::new(self.source.dialect())
    }

    pub fn insert(&self) -> InsertBuilder {
        InsertBuilder::new(self.source.dialect())
    }

    pub fn update(&self) -> UpdateBuilder {
        UpdateBuilder::new(self.source.dialect())
    }

    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder::new(self.source.dialect())
    }

    /// The pooled connection, opened if needed.
    pub async fn connection(&self) -> QuillResult<SharedConnection> {
        self.pool.get_connection(&self.source).await
    }

    /// Run a statement and return the affected row count.
    pub async fn execute(&self, command: &Command) -> QuillResult<u64> {
        let shared = self.connection().await?;
        let mut conn = shared.lock().await;
        conn.execute(command).await
    }

    /// Run a query and collect every row.
    pub async fn fetch_all(&self, command: &Command) -> QuillResult<Vec<HashMap<String, Value>>> {
        let shared = self.connection().await?;
        let mut conn = shared.lock().await;
        let mut reader = conn.query(command).await?;

        let mut rows = Vec::new();
        while reader.read().await? {
            rows.push(reader.to_map());
        }
        Ok(rows)
    }

    /// Close this source's pooled connection and drop it from the pool.
    /// Returns `false` when nothing was open.
    pub async fn close(&self) -> QuillResult<bool> {
        self.pool.release(&self.source).await
    }

    /// Close every connection in the shared pool, including other sources'.
    pub async fn shutdown(&self) -> QuillResult<()> {
        self.pool.close_all().await
    }

    /// See [`Connection::get_last_insert_id`](crate::driver::Connection::get_last_insert_id).
    pub async fn last_insert_id(
        &self,
        table: Option<&str>,
        column: Option<&str>,
    ) -> QuillResult<i64> {
        let shared = self.connection().await?;
        let mut conn = shared.lock().await;
        conn.get_last_insert_id(table, column).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    #[test]
    fn test_builders_follow_dialect() {
        let db = Database::new(
            DataSource::new("pg", Dialect::PostgreSQL),
            Arc::new(ConnectionPool::new()),
        );
        assert_eq!(db.select().dialect(), Dialect::PostgreSQL);
        assert_eq!(db.insert().dialect(), Dialect::PostgreSQL);
        assert_eq!(db.update().dialect(), Dialect::PostgreSQL);
        assert_eq!(db.delete().dialect(), Dialect::PostgreSQL);
        assert_eq!(db.precompiler().dialect(), Dialect::PostgreSQL);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let db = Database::connect(DataSource::sqlite_memory()).await.unwrap();
        db.execute(&"CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)".into())
            .await
            .unwrap();

        let insert = db
            .insert()
            .into("t")
            .unwrap()
            .row([("name", "a")])
            .unwrap()
            .row([("name", "b")])
            .unwrap()
            .render(true)
            .unwrap();
        assert_eq!(db.execute(&insert).await.unwrap(), 2);

        let select = db
            .select()
            .column("name")
            .unwrap()
            .from("t")
            .unwrap()
            .order_by("id", "DESC")
            .unwrap()
            .render(true)
            .unwrap();
        let rows = db.fetch_all(&select).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], Value::String("b".into()));
        assert_eq!(db.last_insert_id(None, None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_close_and_shutdown() {
        let db = Database::connect(DataSource::sqlite_memory()).await.unwrap();
        let other = Database::new(DataSource::sqlite_memory(), Arc::clone(db.pool()));
        other.execute(&"SELECT 1".into()).await.unwrap();
        assert_eq!(db.pool().len().await, 2);

        assert!(db.close().await.unwrap());
        assert!(!db.close().await.unwrap());
        assert_eq!(db.pool().len().await, 1);

        db.shutdown().await.unwrap();
        assert!(db.pool().is_empty().await);

        // The handle stays usable; the next statement reopens a connection.
        db.execute(&"SELECT 1".into()).await.unwrap();
        assert_eq!(db.pool().len().await, 1);
    }
}
