//! Process-wide connection sharing keyed by data source id.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::Connection;
use crate::data_source::DataSource;
use crate::error::QuillResult;

/// A shared, lockable connection handed out by the pool.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// One open connection per data source id.
///
/// New connections are opened outside the pool lock. When two callers race
/// to create the same id, the first insert wins and the loser's connection
/// is closed, so every caller receives the same handle.
#[derive(Default)]
pub struct ConnectionPool {
    connections: Mutex<HashMap<String, SharedConnection>>,
}

impl ConnectionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pooled connection for `source`, creating and opening it on
    /// first use. A pooled connection that was closed is reopened.
    ///
    /// Do not call this while holding the lock of the same source's
    /// connection; the reopen check takes that lock.
    pub async fn get_connection(&self, source: &DataSource) -> QuillResult<SharedConnection> {
        let existing = self.connections.lock().await.get(source.id()).cloned();
        if let Some(existing) = existing {
            debug!(source = %source.id(), "Pooled connection reused");
            let mut conn = existing.lock().await;
            if !conn.is_connected() {
                conn.open().await?;
            }
            drop(conn);
            return Ok(existing);
        }

        let mut conn = Connection::new(source.clone())?;
        conn.open().await?;
        let created = Arc::new(Mutex::new(conn));

        let mut connections = self.connections.lock().await;
        let pooled = Arc::clone(
            connections
                .entry(source.id().to_string())
                .or_insert_with(|| Arc::clone(&created)),
        );
        let pooled_count = connections.len();
        drop(connections);

        if Arc::ptr_eq(&pooled, &created) {
            info!(source = %source.id(), pooled = pooled_count, "Connection pooled");
        } else {
            debug!(source = %source.id(), "Lost pooling race, closing duplicate");
            created.lock().await.close().await?;
        }
        Ok(pooled)
    }

    /// Forget the connection for `id` without closing it.
    pub async fn remove(&self, id: &str) -> Option<SharedConnection> {
        self.connections.lock().await.remove(id)
    }

    /// Close and forget the connection for `source`. Returns `false` when
    /// nothing was pooled under its id.
    pub async fn release(&self, source: &DataSource) -> QuillResult<bool> {
        let Some(shared) = self.remove(source.id()).await else {
            return Ok(false);
        };
        shared.lock().await.close().await?;
        Ok(true)
    }

    /// Close every pooled connection and empty the pool.
    ///
    /// Every connection is closed even when an earlier one fails; the first
    /// failure is returned.
    pub async fn close_all(&self) -> QuillResult<()> {
        let drained: Vec<(String, SharedConnection)> =
            self.connections.lock().await.drain().collect();
        let mut outcomes = Vec::with_capacity(drained.len());
        for (id, shared) in drained {
            let outcome = shared.lock().await.close().await;
            if let Err(e) = &outcome {
                debug!(source = %id, error = %e, "Pooled connection failed to close");
            }
            outcomes.push(outcome);
        }
        first_failure(outcomes)
    }

    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.lock().await.is_empty()
    }
}

fn first_failure(outcomes: Vec<QuillResult<bool>>) -> QuillResult<()> {
    outcomes.into_iter().try_for_each(|outcome| outcome.map(|_| ()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::error::QuillError;

    #[tokio::test]
    async fn test_same_id_shares_connection() {
        let pool = ConnectionPool::new();
        let source = DataSource::sqlite_memory();
        let a = pool.get_connection(&source).await.unwrap();
        let b = pool.get_connection(&source).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(pool.len().await, 1);

        let other = pool.get_connection(&DataSource::sqlite_memory()).await.unwrap();
        assert!(!Arc::ptr_eq(&a, &other));
        assert_eq!(pool.len().await, 2);
    }

    #[tokio::test]
    async fn test_closed_entry_is_reopened() {
        let pool = ConnectionPool::new();
        let source = DataSource::sqlite_memory();
        let a = pool.get_connection(&source).await.unwrap();
        assert!(a.lock().await.close().await.unwrap());

        let b = pool.get_connection(&source).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(b.lock().await.is_connected());
    }

    #[tokio::test]
    async fn test_release_and_close_all() {
        let pool = ConnectionPool::new();
        let source = DataSource::sqlite_memory();
        let conn = pool.get_connection(&source).await.unwrap();
        assert!(pool.release(&source).await.unwrap());
        assert!(!conn.lock().await.is_connected());
        assert!(!pool.release(&source).await.unwrap());

        let a = pool.get_connection(&DataSource::sqlite_memory()).await.unwrap();
        let b = pool.get_connection(&DataSource::sqlite_memory()).await.unwrap();
        pool.close_all().await.unwrap();
        assert!(pool.is_empty().await);
        assert!(!a.lock().await.is_connected());
        assert!(!b.lock().await.is_connected());
    }

    #[test]
    fn test_close_all_reports_first_failure() {
        let outcomes = vec![
            Ok(true),
            Err(QuillError::Sql("first".into())),
            Ok(false),
            Err(QuillError::Sql("second".into())),
        ];
        match first_failure(outcomes) {
            Err(QuillError::Sql(message)) => assert_eq!(message, "first"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(first_failure(vec![Ok(true), Ok(false)]).is_ok());
        assert!(first_failure(Vec::new()).is_ok());
    }

    #[tokio::test]
    async fn test_unsupported_source_is_not_pooled() {
        let pool = ConnectionPool::new();
        let err = pool
            .get_connection(&DataSource::new("ora", Dialect::Oracle))
            .await
            .unwrap_err();
        assert!(matches!(err, QuillError::Config(_)));
        assert!(pool.is_empty().await);
    }
}
