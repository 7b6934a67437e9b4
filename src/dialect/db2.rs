use std::collections::HashSet;

use super::{fetch_rows, hex, keywords, Dialect, DmlLimit, Pagination, SqlDialect};

/// IBM DB2 rules.
pub struct Db2Rules;

impl SqlDialect for Db2Rules {
    fn dialect(&self) -> Dialect {
        Dialect::DB2
    }

    fn keywords(&self) -> &'static HashSet<&'static str> {
        keywords::db2()
    }

    fn bytes_literal(&self, bytes: &[u8]) -> String {
        format!("BX'{}'", hex(bytes))
    }

    fn paginate(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> Pagination {
        Pagination {
            top: None,
            tail: fetch_rows(limit, offset, "FIRST"),
        }
    }

    fn dml_limit(&self) -> DmlLimit {
        DmlLimit::Unsupported
    }

    fn last_insert_id_sql(&self) -> Option<&'static str> {
        Some("SELECT IDENTITY_VAL_LOCAL() AS id FROM SYSIBM.SYSDUMMY1")
    }
}
