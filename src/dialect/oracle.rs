use std::collections::HashSet;

use super::{
    fetch_rows, keywords, Dialect, DmlLimit, MultiRowInsert, Pagination, SqlDialect,
    COMPARISON_OPERATORS,
};

/// Oracle rules.
pub struct OracleRules;

impl SqlDialect for OracleRules {
    fn dialect(&self) -> Dialect {
        Dialect::Oracle
    }

    fn keywords(&self) -> &'static HashSet<&'static str> {
        keywords::oracle()
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "'1'" } else { "'0'" }
    }

    fn comparison_operator(&self, operator: &str) -> Option<&'static str> {
        match operator {
            "!=" => Some("<>"),
            other => COMPARISON_OPERATORS.iter().find(|op| **op == other).copied(),
        }
    }

    fn set_operators(&self) -> &'static [&'static str] {
        &["UNION", "UNION ALL", "INTERSECT", "MINUS"]
    }

    fn paginate(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> Pagination {
        Pagination {
            top: None,
            tail: fetch_rows(limit, offset, "NEXT"),
        }
    }

    fn multi_row_insert(&self) -> MultiRowInsert {
        MultiRowInsert::InsertAll
    }

    fn dml_limit(&self) -> DmlLimit {
        DmlLimit::RowId("ROWID")
    }

    fn begin_transaction_sql(&self) -> &'static str {
        "SET TRANSACTION READ WRITE"
    }

    fn last_insert_id_sql(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_equal_is_normalized() {
        assert_eq!(OracleRules.comparison_operator("!="), Some("<>"));
        assert_eq!(OracleRules.comparison_operator("NOT BETWEEN"), Some("NOT BETWEEN"));
        assert_eq!(OracleRules.comparison_operator("ILIKE"), None);
    }
}
