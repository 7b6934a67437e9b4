use std::collections::HashSet;

use super::{hex, keywords, Dialect, DmlLimit, SqlDialect};

/// PostgreSQL rules.
pub struct PostgresRules;

impl SqlDialect for PostgresRules {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSQL
    }

    fn keywords(&self) -> &'static HashSet<&'static str> {
        keywords::postgresql()
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn bytes_literal(&self, bytes: &[u8]) -> String {
        format!("'\\x{}'::bytea", hex(bytes))
    }

    fn extra_comparison_operators(&self) -> &'static [&'static str] {
        &["ILIKE", "NOT ILIKE", "SIMILAR TO", "NOT SIMILAR TO"]
    }

    fn dml_limit(&self) -> DmlLimit {
        DmlLimit::RowId("ctid")
    }

    fn last_insert_id_sql(&self) -> Option<&'static str> {
        Some("SELECT lastval() AS id")
    }

    fn charset_sql(&self, charset: &str) -> Option<String> {
        Some(format!("SET client_encoding TO {}", self.escape_string(charset)))
    }
}
