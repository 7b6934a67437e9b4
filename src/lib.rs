//! # Quill
//!
//! Dialect-aware SQL statement builders, precompilers and pooled drivers.
//!
//! Builders escape every identifier and value for the target dialect and
//! render a [`Command`]; the driver runs it on a pooled native connection.
//!
//! ## Quick Example
//!
//! ```
//! use quill::prelude::*;
//!
//! let cmd = SelectBuilder::new(Dialect::MsSQL)
//!     .column("name").unwrap()
//!     .from("users").unwrap()
//!     .and_where("active", "=", true).unwrap()
//!     .limit(10)
//!     .render(true).unwrap();
//! assert_eq!(
//!     cmd.text(),
//!     "SELECT TOP (10) [name] FROM [users] WHERE [active] = 1;"
//! );
//! ```
//!
//! ## Dialects
//!
//! | Dialect    | Identifiers | Paging                          | Driver |
//! |------------|-------------|---------------------------------|--------|
//! | MySQL      | `` `a` ``   | `LIMIT n OFFSET m`              | yes    |
//! | MsSQL      | `[a]`       | `TOP (n)` / `OFFSET .. FETCH`   | render only |
//! | Oracle     | `"a"`       | `OFFSET .. FETCH NEXT`          | render only |
//! | SQLite     | `"a"`       | `LIMIT n OFFSET m`              | yes    |
//! | PostgreSQL | `"a"`       | `LIMIT n OFFSET m`              | yes    |
//! | DB2        | `"a"`       | `OFFSET .. FETCH FIRST`         | render only |

pub mod builder;
pub mod command;
pub mod config;
pub mod data_source;
pub mod dialect;
pub mod driver;
pub mod engine;
pub mod error;
pub mod expression;
pub mod precompiler;
pub mod tokenizer;
pub mod value;

pub use builder::{
    Connector, DeleteBuilder, InsertBuilder, Parenthesis, SelectBuilder, Subquery, UpdateBuilder,
};
pub use command::Command;
pub use config::DatabaseConfig;
pub use data_source::{CachePolicy, DataSource, DriverKind, Role};
pub use dialect::{Dialect, SqlDialect};
pub use driver::{Connection, ConnectionPool, DataReader};
pub use engine::Database;
pub use error::{QuillError, QuillResult};
pub use expression::Expression;
pub use precompiler::{Identifier, OperatorGroup, Precompiler};
pub use value::{FromValue, Value};

pub mod prelude {
    pub use crate::builder::{
        Connector, DeleteBuilder, InsertBuilder, Parenthesis, SelectBuilder, Subquery,
        UpdateBuilder,
    };
    pub use crate::command::Command;
    pub use crate::data_source::DataSource;
    pub use crate::dialect::Dialect;
    pub use crate::driver::{Connection, ConnectionPool, DataReader};
    pub use crate::engine::Database;
    pub use crate::error::*;
    pub use crate::expression::Expression;
    pub use crate::precompiler::Precompiler;
    pub use crate::value::{FromValue, Value};
}

/// A SELECT builder for the data source's dialect.
pub fn select(source: &DataSource) -> SelectBuilder {
    SelectBuilder::new(source.dialect())
}

/// An INSERT builder for the data source's dialect.
pub fn insert(source: &DataSource) -> InsertBuilder {
    InsertBuilder::new(source.dialect())
}

/// An UPDATE builder for the data source's dialect.
pub fn update(source: &DataSource) -> UpdateBuilder {
    UpdateBuilder::new(source.dialect())
}

/// A DELETE builder for the data source's dialect.
pub fn delete(source: &DataSource) -> DeleteBuilder {
    DeleteBuilder::new(source.dialect())
}

/// A precompiler for rendering fragments in the data source's dialect.
pub fn precompiler(source: &DataSource) -> Precompiler {
    Precompiler::new(source.dialect())
}

/// Lex `expression` with the standard keyword table.
///
/// # Example
///
/// ```
/// use quill::tokenizer::TokenType;
///
/// let tokens = quill::tokenize("SELECT 1;").significant().unwrap();
/// assert_eq!(tokens[0].kind, TokenType::Keyword);
/// assert_eq!(tokens[2].kind, TokenType::Terminal);
/// ```
pub fn tokenize(expression: &str) -> tokenizer::Tokenizer<'_> {
    tokenizer::tokenize(expression)
}
