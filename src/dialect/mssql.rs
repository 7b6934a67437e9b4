use std::collections::HashSet;

use super::{fetch_rows, hex, keywords, Dialect, DmlLimit, Pagination, SqlDialect};

/// Microsoft SQL Server rules.
pub struct MsSqlRules;

impl SqlDialect for MsSqlRules {
    fn dialect(&self) -> Dialect {
        Dialect::MsSQL
    }

    fn quote_chars(&self) -> (char, char) {
        ('[', ']')
    }

    fn keywords(&self) -> &'static HashSet<&'static str> {
        keywords::mssql()
    }

    fn bytes_literal(&self, bytes: &[u8]) -> String {
        format!("0x{}", hex(bytes))
    }

    fn escape_string(&self, text: &str) -> String {
        let quoted = format!("'{}'", text.replace('\'', "''"));
        if text.is_ascii() {
            quoted
        } else {
            format!("N{}", quoted)
        }
    }

    fn supports_join(&self, join: &str) -> bool {
        !join.starts_with("NATURAL")
    }

    fn supports_nulls_ordering(&self) -> bool {
        false
    }

    fn paginate(&self, limit: Option<u64>, offset: Option<u64>, ordered: bool) -> Pagination {
        match (limit, offset) {
            (None, None) => Pagination::default(),
            (Some(n), None) => Pagination {
                top: Some(format!("TOP ({})", n)),
                tail: None,
            },
            (limit, offset) => {
                // OFFSET .. FETCH is only legal after an ORDER BY
                let rows = fetch_rows(limit, offset, "NEXT").unwrap_or_default();
                let tail = if ordered {
                    rows
                } else {
                    format!("ORDER BY (SELECT NULL) {}", rows)
                };
                Pagination {
                    top: None,
                    tail: Some(tail),
                }
            }
        }
    }

    fn dml_limit(&self) -> DmlLimit {
        DmlLimit::Top
    }

    fn begin_transaction_sql(&self) -> &'static str {
        "BEGIN TRAN"
    }

    fn commit_sql(&self) -> &'static str {
        "COMMIT TRAN"
    }

    fn rollback_sql(&self) -> &'static str {
        "ROLLBACK TRAN"
    }

    fn last_insert_id_sql(&self) -> Option<&'static str> {
        Some("SELECT CAST(SCOPE_IDENTITY() AS BIGINT) AS id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_strings_are_national() {
        assert_eq!(MsSqlRules.escape_string("it's"), "'it''s'");
        assert_eq!(MsSqlRules.escape_string("café"), "N'café'");
    }
}
