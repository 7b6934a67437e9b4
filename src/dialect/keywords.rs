//! Reserved keyword tables, one per dialect, built on first use.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Words reserved by the SQL standard and by every supported dialect.
const STANDARD: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK",
    "COLUMN", "CONSTRAINT", "CREATE", "CROSS", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END",
    "ESCAPE", "EXCEPT", "EXISTS", "FALSE", "FOREIGN", "FROM", "FULL", "GROUP", "HAVING",
    "IN", "INDEX", "INNER", "INSERT", "INTERSECT", "INTO", "IS", "JOIN", "KEY", "LEFT",
    "LIKE", "NATURAL", "NOT", "NULL", "ON", "OR", "ORDER", "OUTER", "PRIMARY",
    "REFERENCES", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TO", "TRUE", "UNION",
    "UNIQUE", "UPDATE", "USING", "VALUES", "WHEN", "WHERE", "WITH",
];

const MYSQL: &[&str] = &[
    "ACCESSIBLE", "ANALYZE", "BEFORE", "BIGINT", "BINARY", "BLOB", "BOTH", "CALL",
    "CASCADE", "CHANGE", "CHAR", "CHARACTER", "COLLATE", "CONDITION", "CONTINUE",
    "CONVERT", "CURSOR", "DATABASE", "DATABASES", "DAY_HOUR", "DECIMAL", "DECLARE",
    "DELAYED", "DESCRIBE", "DIV", "DOUBLE", "DUAL", "EACH", "ELSEIF", "ENCLOSED",
    "EXPLAIN", "FETCH", "FLOAT", "FOR", "FORCE", "FULLTEXT", "GRANT", "HIGH_PRIORITY",
    "IF", "IGNORE", "INFILE", "INT", "INTEGER", "INTERVAL", "ITERATE", "KEYS", "KILL",
    "LEADING", "LEAVE", "LIMIT", "LINES", "LOAD", "LOCK", "LONG", "LOOP", "MATCH", "MOD",
    "MODIFIES", "OPTIMIZE", "OPTION", "OUT", "OUTFILE", "PROCEDURE", "PURGE", "RANGE",
    "READ", "REGEXP", "RELEASE", "RENAME", "REPEAT", "REPLACE", "REQUIRE", "RESTRICT",
    "RETURN", "REVOKE", "RLIKE", "SCHEMA", "SEPARATOR", "SHOW", "SPATIAL", "SQL",
    "STARTING", "STRAIGHT_JOIN", "TERMINATED", "TINYINT", "TRAILING", "TRIGGER", "UNDO",
    "UNLOCK", "UNSIGNED", "USAGE", "USE", "UTC_DATE", "VARCHAR", "WHILE", "WRITE", "XOR",
    "ZEROFILL",
];

const MSSQL: &[&str] = &[
    "BACKUP", "BEGIN", "BREAK", "BROWSE", "BULK", "CASCADE", "CHECKPOINT", "CLOSE",
    "CLUSTERED", "COALESCE", "COMMIT", "COMPUTE", "CONTAINS", "CONTINUE", "CONVERT",
    "CURSOR", "DATABASE", "DBCC", "DEALLOCATE", "DECLARE", "DENY", "DISK", "DISTRIBUTED",
    "DOUBLE", "DUMP", "ERRLVL", "EXEC", "EXECUTE", "EXIT", "FETCH", "FILE", "FILLFACTOR",
    "FOR", "FREETEXT", "FUNCTION", "GOTO", "GRANT", "HOLDLOCK", "IDENTITY",
    "IDENTITY_INSERT", "IF", "KILL", "LINENO", "LOAD", "MERGE", "NOCHECK", "NONCLUSTERED",
    "NULLIF", "OF", "OFF", "OFFSETS", "OPEN", "OPENQUERY", "OPTION", "OVER", "PERCENT",
    "PIVOT", "PLAN", "PRECISION", "PRINT", "PROC", "PROCEDURE", "PUBLIC", "RAISERROR",
    "READ", "RECONFIGURE", "REPLICATION", "RESTORE", "RESTRICT", "RETURN", "REVERT",
    "REVOKE", "ROLLBACK", "ROWCOUNT", "ROWGUIDCOL", "RULE", "SAVE", "SCHEMA",
    "SESSION_USER", "SETUSER", "SHUTDOWN", "SOME", "STATISTICS", "SYSTEM_USER",
    "TABLESAMPLE", "TEXTSIZE", "TOP", "TRAN", "TRANSACTION", "TRIGGER", "TRUNCATE",
    "TSEQUAL", "UNPIVOT", "UPDATETEXT", "USE", "USER", "VARYING", "VIEW", "WAITFOR",
    "WHILE", "WRITETEXT",
];

const ORACLE: &[&str] = &[
    "ACCESS", "AUDIT", "CHAR", "CLUSTER", "COMMENT", "COMPRESS", "CONNECT", "DATE",
    "DECIMAL", "EXCLUSIVE", "FILE", "FLOAT", "FOR", "GRANT", "IDENTIFIED", "IMMEDIATE",
    "INCREMENT", "INITIAL", "INTEGER", "LEVEL", "LOCK", "LONG", "MAXEXTENTS", "MINUS",
    "MLSLABEL", "MODE", "MODIFY", "NOAUDIT", "NOCOMPRESS", "NOWAIT", "NUMBER", "OF",
    "OFFLINE", "ONLINE", "OPTION", "PCTFREE", "PRIOR", "PRIVILEGES", "PUBLIC", "RAW",
    "RENAME", "RESOURCE", "REVOKE", "ROW", "ROWID", "ROWNUM", "ROWS", "SESSION", "SHARE",
    "SIZE", "SMALLINT", "START", "SUCCESSFUL", "SYNONYM", "SYSDATE", "TRIGGER", "UID",
    "VALIDATE", "VARCHAR", "VARCHAR2", "VIEW", "WHENEVER",
];

const SQLITE: &[&str] = &[
    "ABORT", "ACTION", "AFTER", "ANALYZE", "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN",
    "CASCADE", "CAST", "COLLATE", "COMMIT", "CONFLICT", "DATABASE", "DEFERRABLE",
    "DEFERRED", "DETACH", "EACH", "EXCLUSIVE", "EXPLAIN", "FAIL", "FOR", "GLOB", "IF",
    "IGNORE", "IMMEDIATE", "INDEXED", "INITIALLY", "INSTEAD", "ISNULL", "LIMIT", "MATCH",
    "NO", "NOTNULL", "OF", "OFFSET", "PLAN", "PRAGMA", "QUERY", "RAISE", "RECURSIVE",
    "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE", "RESTRICT", "ROLLBACK", "ROW",
    "SAVEPOINT", "TEMP", "TEMPORARY", "TRANSACTION", "TRIGGER", "VACUUM", "VIEW",
    "VIRTUAL", "WITHOUT",
];

const POSTGRESQL: &[&str] = &[
    "ANALYSE", "ANALYZE", "ARRAY", "ASYMMETRIC", "AUTHORIZATION", "BINARY", "BOTH", "CAST",
    "COLLATE", "COLLATION", "CONCURRENTLY", "CURRENT_CATALOG", "CURRENT_ROLE",
    "CURRENT_SCHEMA", "CURRENT_USER", "DEFERRABLE", "DO", "FETCH", "FOR", "FREEZE",
    "GRANT", "ILIKE", "INITIALLY", "ISNULL", "LATERAL", "LEADING", "LIMIT", "LOCALTIME",
    "LOCALTIMESTAMP", "NOTNULL", "OFFSET", "ONLY", "OVERLAPS", "PLACING", "RETURNING",
    "SESSION_USER", "SIMILAR", "SOME", "SYMMETRIC", "TABLESAMPLE", "TRAILING", "USER",
    "VARIADIC", "VERBOSE", "WINDOW",
];

const DB2: &[&str] = &[
    "ACTIVATE", "ALIAS", "ALLOCATE", "ALLOW", "ASSOCIATE", "ASUTIME", "AUDIT", "AUX",
    "AUXILIARY", "BEFORE", "BEGIN", "BUFFERPOOL", "CALL", "CALLED", "CAPTURE", "CARDINALITY",
    "CCSID", "CLONE", "CLOSE", "CLUSTER", "COLLECTION", "COLLID", "COMMENT", "COMMIT",
    "CONCAT", "CONDITION", "CONTAINS", "CONTINUE", "CURSOR", "DATA", "DATABASE", "DAY",
    "DAYS", "DB2SQL", "DBINFO", "DECLARE", "DETERMINISTIC", "DO", "DOCUMENT", "DSSIZE",
    "EDITPROC", "ELSEIF", "ENCODING", "ERASE", "EXECUTE", "EXIT", "EXTERNAL", "FENCED",
    "FETCH", "FIELDPROC", "FINAL", "FIRST", "FOR", "FREE", "FUNCTION", "GENERAL",
    "GENERATED", "GRANT", "HANDLER", "HOLD", "HOUR", "HOURS", "IF", "IMMEDIATE",
    "INHERIT", "ITERATE", "LABEL", "LANGUAGE", "LC_CTYPE", "LEAVE", "LOCATOR", "LOCK",
    "LOCKMAX", "LOCKSIZE", "LOOP", "MICROSECOND", "MINUTE", "MODE", "MONTH", "NEXTVAL",
    "NUMPARTS", "OBID", "OF", "OPEN", "OPTIMIZATION", "OPTIMIZE", "PACKAGE", "PARAMETER",
    "PART", "PATH", "PIECESIZE", "PLAN", "PRECISION", "PREPARE", "PRIQTY", "PROCEDURE",
    "PROGRAM", "PSID", "QUERYNO", "READS", "RELEASE", "RENAME", "REPEAT", "RESIGNAL",
    "RESTRICT", "RESULT", "RETURN", "RETURNS", "REVOKE", "ROLLBACK", "ROW", "ROWSET",
    "RRN", "RUN", "SAVEPOINT", "SCHEMA", "SCRATCHPAD", "SECOND", "SECQTY", "SECURITY",
    "SEQUENCE", "SIGNAL", "SIMPLE", "SOME", "SOURCE", "SPECIFIC", "STANDARD", "STATIC",
    "STAY", "STOGROUP", "STORES", "STYLE", "SUMMARY", "SYNONYM", "SYSFUN", "SYSIBM",
    "SYSPROC", "SYSTEM", "TABLESPACE", "TRIGGER", "TYPE", "UNDO", "UNTIL", "VALIDPROC",
    "VARIABLE", "VARIANT", "VCAT", "VIEW", "VOLUMES", "WHILE", "WLM", "YEAR", "YEARS",
];

fn build(extra: &[&'static str]) -> HashSet<&'static str> {
    STANDARD.iter().chain(extra.iter()).copied().collect()
}

static STANDARD_TABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| build(&[]));
static MYSQL_TABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| build(MYSQL));
static MSSQL_TABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| build(MSSQL));
static ORACLE_TABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| build(ORACLE));
static SQLITE_TABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| build(SQLITE));
static POSTGRESQL_TABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| build(POSTGRESQL));
static DB2_TABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| build(DB2));

pub fn standard() -> &'static HashSet<&'static str> {
    &STANDARD_TABLE
}

pub fn mysql() -> &'static HashSet<&'static str> {
    &MYSQL_TABLE
}

pub fn mssql() -> &'static HashSet<&'static str> {
    &MSSQL_TABLE
}

pub fn oracle() -> &'static HashSet<&'static str> {
    &ORACLE_TABLE
}

pub fn sqlite() -> &'static HashSet<&'static str> {
    &SQLITE_TABLE
}

pub fn postgresql() -> &'static HashSet<&'static str> {
    &POSTGRESQL_TABLE
}

pub fn db2() -> &'static HashSet<&'static str> {
    &DB2_TABLE
}
