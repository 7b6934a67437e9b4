//! Data sources loaded from TOML.
//!
//! ```toml
//! [database.default]
//! dialect = "MySQL"
//! driver = "Improved"
//! charset = "UTF-8"
//! caching = false
//!
//! [database.default.connection]
//! hostname = "localhost"
//! port = 3306
//! username = "root"
//! password = ""
//! database = "app"
//! persistent = false
//! role = "master"
//! ```
//!
//! Each `[database.<name>]` table becomes a [`DataSource`] with id
//! `database.<name>`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::data_source::{CachePolicy, DataSource, DriverKind, Role};
use crate::dialect::Dialect;
use crate::error::{QuillError, QuillResult};

/// Every data source declared in a configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    database: BTreeMap<String, SourceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct SourceConfig {
    dialect: Dialect,
    #[serde(default)]
    driver: DriverKind,
    #[serde(default = "default_charset")]
    charset: String,
    #[serde(default)]
    caching: bool,
    /// Seconds
    #[serde(default = "default_cache_lifetime")]
    cache_lifetime: u64,
    #[serde(default)]
    cache_force: bool,
    #[serde(default)]
    connection: ConnectionConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConnectionConfig {
    hostname: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    database: Option<String>,
    #[serde(default)]
    persistent: bool,
    #[serde(default)]
    role: Role,
}

fn default_charset() -> String {
    "utf8".to_string()
}

fn default_cache_lifetime() -> u64 {
    60
}

impl DatabaseConfig {
    pub fn from_toml_str(content: &str) -> QuillResult<Self> {
        toml::from_str(content).map_err(|e| QuillError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> QuillResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Names of the declared data sources, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.database.keys().map(String::as_str)
    }

    /// Build the data source declared as `[database.<name>]`.
    pub fn data_source(&self, name: &str) -> QuillResult<DataSource> {
        let config = self.database.get(name).ok_or_else(|| {
            QuillError::Config(format!("no data source named '{}'", name))
        })?;

        let conn = &config.connection;
        let mut source = DataSource::new(format!("database.{}", name), config.dialect)
            .with_driver(config.driver)
            .with_charset(&config.charset)
            .with_persistent(conn.persistent)
            .with_role(conn.role)
            .with_cache(CachePolicy {
                enabled: config.caching,
                lifetime: Duration::from_secs(config.cache_lifetime),
                force: config.cache_force,
            });
        if let Some(hostname) = &conn.hostname {
            source = source.with_hostname(hostname);
        }
        if let Some(port) = conn.port {
            source = source.with_port(port);
        }
        if let Some(username) = &conn.username {
            source = source.with_username(username);
        }
        if let Some(password) = &conn.password {
            source = source.with_password(password);
        }
        if let Some(database) = &conn.database {
            source = source.with_database(database);
        }
        Ok(source)
    }

    /// Every declared data source.
    pub fn data_sources(&self) -> QuillResult<Vec<DataSource>> {
        self.names().map(|name| self.data_source(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[database.default]
dialect = "MySQL"
driver = "Improved"
charset = "UTF-8"
caching = true

[database.default.connection]
hostname = "db.local"
port = 3306
username = "root"
password = ""
database = "app"
role = "slave"

[database.cache]
dialect = "sqlite"

[database.cache.connection]
database = ":memory:"
"#;

    #[test]
    fn test_parse_sources() {
        let config = DatabaseConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["cache", "default"]);

        let source = config.data_source("default").unwrap();
        assert_eq!(source.id(), "database.default");
        assert_eq!(source.dialect(), Dialect::MySQL);
        assert_eq!(source.driver(), DriverKind::Improved);
        assert_eq!(source.charset(), "utf8");
        assert_eq!(source.role(), Role::Slave);
        assert!(source.cache().enabled);
        assert_eq!(source.cache().lifetime, Duration::from_secs(60));
        assert_eq!(source.url(), "mysql://root:@db.local:3306/app");

        let cache = config.data_source("cache").unwrap();
        assert_eq!(cache.url(), "sqlite::memory:");
        assert_eq!(cache.driver(), DriverKind::Standard);
    }

    #[test]
    fn test_unknown_names_fail() {
        let err =
            DatabaseConfig::from_toml_str("[database.x]\ndialect = \"access\"\n").unwrap_err();
        assert!(matches!(err, QuillError::Config(_)));

        let config = DatabaseConfig::from_toml_str(SAMPLE).unwrap();
        assert!(matches!(
            config.data_source("missing"),
            Err(QuillError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = DatabaseConfig::load(file.path()).unwrap();
        assert_eq!(config.data_sources().unwrap().len(), 2);

        let missing = DatabaseConfig::load(file.path().with_extension("absent"));
        assert!(matches!(missing, Err(QuillError::Io(_))));
    }
}
