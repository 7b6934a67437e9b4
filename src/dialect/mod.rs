//! SQL dialect registry.
//!
//! Every supported vendor is a variant of [`Dialect`]. The rendering rules
//! for a variant live behind the [`SqlDialect`] trait: data such as quote
//! characters, keyword tables and literal formats, plus the hooks where
//! vendors genuinely disagree (paging, multi-row inserts, limited DML,
//! transactions, last-insert-id).

pub mod keywords;

mod db2;
mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;

pub use db2::Db2Rules;
pub use mssql::MsSqlRules;
pub use mysql::MySqlRules;
pub use oracle::OracleRules;
pub use postgres::PostgresRules;
pub use sqlite::SqliteRules;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::QuillError;
use crate::tokenizer::Lexicon;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    MySQL,
    MsSQL,
    Oracle,
    SQLite,
    PostgreSQL,
    DB2,
}

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::MySQL,
        Dialect::MsSQL,
        Dialect::Oracle,
        Dialect::SQLite,
        Dialect::PostgreSQL,
        Dialect::DB2,
    ];

    /// Rendering rules for this dialect.
    pub fn rules(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::MySQL => &MySqlRules,
            Dialect::MsSQL => &MsSqlRules,
            Dialect::Oracle => &OracleRules,
            Dialect::SQLite => &SqliteRules,
            Dialect::PostgreSQL => &PostgresRules,
            Dialect::DB2 => &Db2Rules,
        }
    }

    /// Canonical name, as written in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySQL => "MySQL",
            Dialect::MsSQL => "MsSQL",
            Dialect::Oracle => "Oracle",
            Dialect::SQLite => "SQLite",
            Dialect::PostgreSQL => "PostgreSQL",
            Dialect::DB2 => "DB2",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySQL),
            "mssql" | "sqlserver" => Ok(Dialect::MsSQL),
            "oracle" => Ok(Dialect::Oracle),
            "sqlite" => Ok(Dialect::SQLite),
            "postgresql" | "postgres" => Ok(Dialect::PostgreSQL),
            "db2" => Ok(Dialect::DB2),
            other => Err(QuillError::Config(format!("unknown dialect '{}'", other))),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = QuillError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> Self {
        dialect.name().to_string()
    }
}

/// Comparison operators every dialect accepts.
pub const COMPARISON_OPERATORS: &[&str] = &[
    "=", "<>", "!=", "<", "<=", ">", ">=", "LIKE", "NOT LIKE", "IN", "NOT IN", "IS", "IS NOT",
    "BETWEEN", "NOT BETWEEN",
];

/// Every join type token, before per-dialect filtering.
pub const JOIN_TYPES: &[&str] = &[
    "CROSS",
    "INNER",
    "LEFT",
    "LEFT OUTER",
    "RIGHT",
    "RIGHT OUTER",
    "FULL",
    "FULL OUTER",
    "NATURAL",
    "NATURAL INNER",
    "NATURAL LEFT",
    "NATURAL LEFT OUTER",
    "NATURAL RIGHT",
    "NATURAL RIGHT OUTER",
    "NATURAL FULL",
    "NATURAL FULL OUTER",
];

const STANDARD_SET_OPERATORS: &[&str] = &["UNION", "UNION ALL", "INTERSECT", "EXCEPT"];

/// Row-limiting text for a SELECT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Rendered right after `SELECT [DISTINCT]`.
    pub top: Option<String>,
    /// Rendered at the very end of the statement.
    pub tail: Option<String>,
}

/// How an INSERT with several rows is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiRowInsert {
    /// `INSERT INTO t (..) VALUES (..), (..)`
    Values,
    /// `INSERT ALL INTO t (..) VALUES (..) INTO t (..) VALUES (..) SELECT * FROM dual`
    InsertAll,
}

/// How ORDER BY / LIMIT / OFFSET are applied to UPDATE and DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmlLimit {
    /// Trailing `ORDER BY .. LIMIT n`; offsets are rejected.
    Trailing,
    /// `TOP (n)` after the verb; ordering and offsets are rejected.
    Top,
    /// Restrict through `<pseudo column> IN (SELECT <pseudo column> ..)`.
    RowId(&'static str),
    /// None of the three clauses can be used.
    Unsupported,
}

/// Per-dialect rendering rules.
///
/// Defaults describe the ANSI behaviour shared by most vendors; each
/// dialect overrides what it does differently.
pub trait SqlDialect: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Opening and closing identifier quote characters.
    fn quote_chars(&self) -> (char, char) {
        ('"', '"')
    }

    /// Reserved words for this dialect.
    fn keywords(&self) -> &'static HashSet<&'static str>;

    fn is_keyword(&self, word: &str) -> bool {
        self.keywords().contains(word.to_ascii_uppercase().as_str())
    }

    /// Whether `\` is an escape character inside string literals.
    fn backslash_escapes(&self) -> bool {
        false
    }

    /// Tokenizer settings matching this dialect.
    fn lexicon(&self) -> Lexicon {
        Lexicon {
            keywords: self.keywords(),
            backslash_escapes: self.backslash_escapes(),
        }
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    /// Always carries a fraction or exponent so the literal stays a float.
    fn float_literal(&self, value: f64) -> String {
        format!("{:?}", value)
    }

    fn bytes_literal(&self, bytes: &[u8]) -> String {
        format!("x'{}'", hex(bytes))
    }

    /// Quote `text` as a string literal.
    fn escape_string(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }

    /// Quote `text` and optionally attach an `ESCAPE` clause for LIKE patterns.
    fn quote(&self, text: &str, escape: Option<char>) -> String {
        let mut quoted = self.escape_string(text);
        if let Some(c) = escape {
            quoted.push_str(" ESCAPE ");
            quoted.push_str(&self.escape_string(c.encode_utf8(&mut [0; 4])));
        }
        quoted
    }

    /// Comparison operators accepted on top of [`COMPARISON_OPERATORS`].
    fn extra_comparison_operators(&self) -> &'static [&'static str] {
        &[]
    }

    /// Canonical form of a normalized comparison operator, if allowed.
    fn comparison_operator(&self, operator: &str) -> Option<&'static str> {
        COMPARISON_OPERATORS
            .iter()
            .chain(self.extra_comparison_operators())
            .find(|op| **op == operator)
            .copied()
    }

    fn set_operators(&self) -> &'static [&'static str] {
        STANDARD_SET_OPERATORS
    }

    fn supports_join(&self, _join: &str) -> bool {
        true
    }

    fn supports_nulls_ordering(&self) -> bool {
        true
    }

    /// Whether a combined SELECT is wrapped in parentheses.
    fn parenthesize_compound(&self) -> bool {
        true
    }

    /// Row limiting for a SELECT. `ordered` tells whether an ORDER BY exists.
    fn paginate(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> Pagination {
        let tail = match (limit, offset) {
            (None, None) => None,
            (Some(n), None) => Some(format!("LIMIT {}", n)),
            (None, Some(m)) => Some(format!("OFFSET {}", m)),
            (Some(n), Some(m)) => Some(format!("LIMIT {} OFFSET {}", n, m)),
        };
        Pagination { top: None, tail }
    }

    fn multi_row_insert(&self) -> MultiRowInsert {
        MultiRowInsert::Values
    }

    fn dml_limit(&self) -> DmlLimit {
        DmlLimit::Trailing
    }

    fn begin_transaction_sql(&self) -> &'static str {
        "BEGIN"
    }

    fn commit_sql(&self) -> &'static str {
        "COMMIT"
    }

    fn rollback_sql(&self) -> &'static str {
        "ROLLBACK"
    }

    /// Query returning the last generated key as column `id`, if the
    /// dialect has a native mechanism.
    fn last_insert_id_sql(&self) -> Option<&'static str>;

    /// Statement selecting the client character set, if the dialect has one.
    fn charset_sql(&self, _charset: &str) -> Option<String> {
        None
    }
}

/// Lowercase hex digits for `bytes`.
pub(crate) fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// `OFFSET m ROWS FETCH <word> n ROWS ONLY` as used by Oracle, DB2 and MsSQL.
pub(crate) fn fetch_rows(limit: Option<u64>, offset: Option<u64>, fetch: &str) -> Option<String> {
    let offset = offset.map(|m| format!("OFFSET {} ROWS", m));
    let fetch = limit.map(|n| format!("FETCH {} {} ROWS ONLY", fetch, n));
    match (offset, fetch) {
        (None, None) => None,
        (Some(o), None) => Some(o),
        (None, Some(f)) => Some(f),
        (Some(o), Some(f)) => Some(format!("{} {}", o, f)),
    }
}
