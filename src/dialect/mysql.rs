use std::collections::HashSet;

use super::{keywords, Dialect, Pagination, SqlDialect};

/// MySQL / MariaDB rules.
pub struct MySqlRules;

impl SqlDialect for MySqlRules {
    fn dialect(&self) -> Dialect {
        Dialect::MySQL
    }

    fn quote_chars(&self) -> (char, char) {
        ('`', '`')
    }

    fn keywords(&self) -> &'static HashSet<&'static str> {
        keywords::mysql()
    }

    fn backslash_escapes(&self) -> bool {
        true
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn escape_string(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('\'');
        for c in text.chars() {
            match c {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    fn extra_comparison_operators(&self) -> &'static [&'static str] {
        &["<=>", "REGEXP", "NOT REGEXP"]
    }

    fn set_operators(&self) -> &'static [&'static str] {
        &["UNION", "UNION ALL"]
    }

    fn supports_join(&self, join: &str) -> bool {
        !join.contains("FULL")
    }

    fn supports_nulls_ordering(&self) -> bool {
        false
    }

    fn paginate(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> Pagination {
        let tail = match (limit, offset) {
            (None, None) => None,
            (Some(n), None) => Some(format!("LIMIT {}", n)),
            // MySQL has no OFFSET without LIMIT
            (None, Some(m)) => Some(format!("LIMIT {} OFFSET {}", u64::MAX, m)),
            (Some(n), Some(m)) => Some(format!("LIMIT {} OFFSET {}", n, m)),
        };
        Pagination { top: None, tail }
    }

    fn begin_transaction_sql(&self) -> &'static str {
        "START TRANSACTION"
    }

    fn last_insert_id_sql(&self) -> Option<&'static str> {
        Some("SELECT CAST(LAST_INSERT_ID() AS SIGNED) AS id")
    }

    fn charset_sql(&self, charset: &str) -> Option<String> {
        Some(format!("SET NAMES {}", self.escape_string(charset)))
    }
}
