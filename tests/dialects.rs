//! The same statements rendered for every dialect.

use pretty_assertions::assert_eq;
use quill::prelude::*;
use quill::{DataSource, Identifier};

fn paged_select(dialect: Dialect) -> String {
    SelectBuilder::new(dialect)
        .column("id")
        .unwrap()
        .from("users")
        .unwrap()
        .and_where("name", "=", "O'Brien")
        .unwrap()
        .order_by("id", "DESC")
        .unwrap()
        .limit(5)
        .offset(10)
        .render(true)
        .unwrap()
        .into_text()
}

#[test]
fn test_paged_select_per_dialect() {
    assert_eq!(
        paged_select(Dialect::MySQL),
        "SELECT `id` FROM `users` WHERE `name` = 'O\\'Brien' ORDER BY `id` DESC LIMIT 5 OFFSET 10;"
    );
    assert_eq!(
        paged_select(Dialect::MsSQL),
        "SELECT [id] FROM [users] WHERE [name] = 'O''Brien' ORDER BY [id] DESC OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY;"
    );
    assert_eq!(
        paged_select(Dialect::Oracle),
        "SELECT \"id\" FROM \"users\" WHERE \"name\" = 'O''Brien' ORDER BY \"id\" DESC OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY;"
    );
    assert_eq!(
        paged_select(Dialect::SQLite),
        "SELECT \"id\" FROM \"users\" WHERE \"name\" = 'O''Brien' ORDER BY \"id\" DESC LIMIT 5 OFFSET 10;"
    );
    assert_eq!(
        paged_select(Dialect::PostgreSQL),
        "SELECT \"id\" FROM \"users\" WHERE \"name\" = 'O''Brien' ORDER BY \"id\" DESC LIMIT 5 OFFSET 10;"
    );
    assert_eq!(
        paged_select(Dialect::DB2),
        "SELECT \"id\" FROM \"users\" WHERE \"name\" = 'O''Brien' ORDER BY \"id\" DESC OFFSET 10 ROWS FETCH FIRST 5 ROWS ONLY;"
    );
}

#[test]
fn test_unordered_mssql_paging_adds_order() {
    let sql = SelectBuilder::new(Dialect::MsSQL)
        .from("t")
        .unwrap()
        .offset(20)
        .render(false)
        .unwrap();
    assert_eq!(
        sql.text(),
        "SELECT * FROM [t] ORDER BY (SELECT NULL) OFFSET 20 ROWS"
    );
}

#[test]
fn test_boolean_and_bytes_literals() {
    let render = |dialect: Dialect| {
        InsertBuilder::new(dialect)
            .into("t")
            .unwrap()
            .column("flag", true)
            .unwrap()
            .column("blob", Value::bytes(vec![0xde, 0xad]))
            .unwrap()
            .render(false)
            .unwrap()
            .into_text()
    };
    assert_eq!(
        render(Dialect::MySQL),
        "INSERT INTO `t` (`flag`, `blob`) VALUES (TRUE, x'dead')"
    );
    assert_eq!(
        render(Dialect::MsSQL),
        "INSERT INTO [t] ([flag], [blob]) VALUES (1, 0xdead)"
    );
    assert_eq!(
        render(Dialect::Oracle),
        "INSERT INTO \"t\" (\"flag\", \"blob\") VALUES ('1', x'dead')"
    );
    assert_eq!(
        render(Dialect::PostgreSQL),
        "INSERT INTO \"t\" (\"flag\", \"blob\") VALUES (TRUE, '\\xdead'::bytea)"
    );
    assert_eq!(
        render(Dialect::DB2),
        "INSERT INTO \"t\" (\"flag\", \"blob\") VALUES (1, BX'dead')"
    );
}

#[test]
fn test_grouped_conditions() {
    let sql = quill::select(&DataSource::sqlite_memory())
        .from("orders")
        .unwrap()
        .and_where("status", "=", "open")
        .unwrap()
        .where_block(Parenthesis::Open, Connector::And)
        .and_where("total", "between", vec![10, 20])
        .unwrap()
        .or_where("id", "in", vec![1, 2, 3])
        .unwrap()
        .where_block(Parenthesis::Close, Connector::And)
        .and_where("deleted_at", "=", Value::Null)
        .unwrap()
        .render(true)
        .unwrap();
    assert_eq!(
        sql.text(),
        "SELECT * FROM \"orders\" WHERE \"status\" = 'open' AND (\"total\" BETWEEN 10 AND 20 \
         OR \"id\" IN (1, 2, 3)) AND \"deleted_at\" IS NULL;"
    );
}

#[test]
fn test_joins_and_subqueries() {
    let pg = Dialect::PostgreSQL;
    let recent = SelectBuilder::new(pg)
        .column("user_id")
        .unwrap()
        .from("orders")
        .unwrap()
        .and_where("total", ">", 100)
        .unwrap();

    let sql = SelectBuilder::new(pg)
        .column("u.name")
        .unwrap()
        .column_as(Expression::new("COUNT(*)"), "n")
        .unwrap()
        .from_as("users", "u")
        .unwrap()
        .join_as("left outer", "profiles", "p")
        .unwrap()
        .on("p.user_id", "=", "u.id")
        .unwrap()
        .and_where("u.id", "IN", recent)
        .unwrap()
        .group_by("u.name")
        .unwrap()
        .render(false)
        .unwrap();
    assert_eq!(
        sql.text(),
        "SELECT \"u\".\"name\", COUNT(*) AS \"n\" FROM \"users\" \"u\" \
         LEFT OUTER JOIN \"profiles\" \"p\" ON (\"p\".\"user_id\" = \"u\".\"id\") \
         WHERE \"u\".\"id\" IN (SELECT \"user_id\" FROM \"orders\" WHERE \"total\" > 100) \
         GROUP BY \"u\".\"name\""
    );
}

#[test]
fn test_dialect_specific_rejections() {
    let full = SelectBuilder::new(Dialect::MySQL).from("a").unwrap().join("full", "b");
    assert!(matches!(full, Err(QuillError::InvalidArgument(_))));

    let natural = SelectBuilder::new(Dialect::MsSQL)
        .from("a")
        .unwrap()
        .join("natural", "b");
    assert!(natural.is_err());

    let minus = SelectBuilder::new(Dialect::PostgreSQL)
        .from("a")
        .unwrap()
        .combine("MINUS", "SELECT 1");
    assert!(minus.is_err());

    let regexp = SelectBuilder::new(Dialect::SQLite)
        .from("a")
        .unwrap()
        .and_where("name", "REGEXP", "^a");
    assert!(regexp.is_err());

    let limited = UpdateBuilder::new(Dialect::DB2).table("t").unwrap().limit(1);
    assert!(limited.is_err());
}

#[test]
fn test_oracle_minus_and_operator_normalisation() {
    let sql = SelectBuilder::new(Dialect::Oracle)
        .column("id")
        .unwrap()
        .from("a")
        .unwrap()
        .and_where("kind", "!=", "x")
        .unwrap()
        .combine("minus", "SELECT \"id\" FROM \"b\"")
        .unwrap()
        .render(false)
        .unwrap();
    assert_eq!(
        sql.text(),
        "SELECT \"id\" FROM \"a\" WHERE \"kind\" <> 'x' MINUS (SELECT \"id\" FROM \"b\")"
    );
}

#[test]
fn test_limited_delete_per_dialect() {
    let delete = |dialect: Dialect| {
        DeleteBuilder::new(dialect)
            .from("logs")
            .unwrap()
            .and_where("level", "=", "debug")
            .unwrap()
            .limit(100)
            .unwrap()
            .render(true)
            .unwrap()
            .into_text()
    };
    assert_eq!(
        delete(Dialect::MySQL),
        "DELETE FROM `logs` WHERE `level` = 'debug' LIMIT 100;"
    );
    assert_eq!(
        delete(Dialect::MsSQL),
        "DELETE TOP (100) FROM [logs] WHERE [level] = 'debug';"
    );
    assert_eq!(
        delete(Dialect::PostgreSQL),
        "DELETE FROM \"logs\" WHERE ctid IN (SELECT ctid FROM \"logs\" WHERE \"level\" = 'debug' LIMIT 100);"
    );
}

#[test]
fn test_expression_identifiers() {
    let pc = quill::precompiler(&DataSource::new("pg", Dialect::PostgreSQL));
    let expr = Expression::new("LOWER(name) = ?").bind("bob");
    assert_eq!(
        pc.prepare_identifier(Identifier::Expression(expr)).unwrap(),
        "LOWER(name) = 'bob'"
    );

    let unbound = Expression::new("x = ? AND y = ?").bind(1);
    assert!(pc.prepare_identifier(Identifier::Expression(unbound)).is_err());
}

#[test]
fn test_tokenize_shortcut() {
    use quill::tokenizer::TokenType;

    let tokens = quill::tokenize("SELECT \"a\", 0x12 FROM t -- note\n;")
        .significant()
        .unwrap();
    let kinds: Vec<TokenType> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenType::Keyword,
            TokenType::Identifier,
            TokenType::Comma,
            TokenType::Hexadecimal,
            TokenType::Keyword,
            TokenType::Identifier,
            TokenType::Terminal,
        ]
    );
    assert_eq!(tokens[3].text, "0x12");
}
