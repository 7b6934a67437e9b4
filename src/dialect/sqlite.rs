use std::collections::HashSet;

use super::{keywords, Dialect, Pagination, SqlDialect};

/// SQLite 3 rules.
pub struct SqliteRules;

impl SqlDialect for SqliteRules {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn keywords(&self) -> &'static HashSet<&'static str> {
        keywords::sqlite()
    }

    fn extra_comparison_operators(&self) -> &'static [&'static str] {
        &["GLOB", "NOT GLOB"]
    }

    // SQLite rejects parenthesized compound operands
    fn parenthesize_compound(&self) -> bool {
        false
    }

    fn paginate(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> Pagination {
        let tail = match (limit, offset) {
            (None, None) => None,
            (Some(n), None) => Some(format!("LIMIT {}", n)),
            (None, Some(m)) => Some(format!("LIMIT -1 OFFSET {}", m)),
            (Some(n), Some(m)) => Some(format!("LIMIT {} OFFSET {}", n, m)),
        };
        Pagination { top: None, tail }
    }

    fn begin_transaction_sql(&self) -> &'static str {
        "BEGIN IMMEDIATE TRANSACTION"
    }

    fn commit_sql(&self) -> &'static str {
        "COMMIT TRANSACTION"
    }

    fn rollback_sql(&self) -> &'static str {
        "ROLLBACK TRANSACTION"
    }

    fn last_insert_id_sql(&self) -> Option<&'static str> {
        Some("SELECT last_insert_rowid() AS id")
    }
}
