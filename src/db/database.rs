use std::env;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::DbError;

/// A result row: column name to JSON value.
pub type Row = serde_json::Map<String, Value>;

/// Driver seam. The host supplies the implementation for whatever engine
/// it talks to; the builder and model layers only ever see prepared SQL
/// text with positional `?` placeholders and the matching bindings.
pub trait Connection: Send + Sync {
    fn query(&self, sql: &str, bindings: &[Value]) -> Result<Vec<Row>, DbError>;

    fn execute(&self, sql: &str, bindings: &[Value]) -> Result<u64, DbError>;

    fn last_insert_id(&self) -> Result<i64, DbError>;
}

/// Cheap-clone handle around the host's driver.
///
/// Constructed once at startup and passed into models explicitly; there
/// is no process-wide connection; whoever needs the database holds a
/// handle.
#[derive(Clone)]
pub struct Database {
    conn: Arc<dyn Connection>,
}

impl Database {
    #[must_use]
    pub fn new(conn: Arc<dyn Connection>) -> Self {
        Self { conn }
    }

    pub fn query(&self, sql: &str, bindings: &[Value]) -> Result<Vec<Row>, DbError> {
        self.conn.query(sql, bindings)
    }

    pub fn execute(&self, sql: &str, bindings: &[Value]) -> Result<u64, DbError> {
        self.conn.execute(sql, bindings)
    }

    pub fn last_insert_id(&self) -> Result<i64, DbError> {
        self.conn.last_insert_id()
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Database")
    }
}

/// Connection settings from `DB_*` environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub driver: String,
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub charset: String,
}

impl DbConfig {
    /// Load settings from the environment, with the usual defaults.
    #[must_use]
    pub fn from_env() -> Self {
        fn var(key: &str, default: &str) -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        }
        Self {
            driver: var("DB_DRIVER", "mysql"),
            host: var("DB_HOST", "127.0.0.1"),
            name: var("DB_NAME", ""),
            user: var("DB_USER", ""),
            password: var("DB_PASS", ""),
            charset: var("DB_CHARSET", "utf8mb4"),
        }
    }

    /// DSN in `driver:host=...;dbname=...;charset=...` form.
    #[must_use]
    pub fn dsn(&self) -> String {
        format!(
            "{}:host={};dbname={};charset={}",
            self.driver, self.host, self.name, self.charset
        )
    }
}
