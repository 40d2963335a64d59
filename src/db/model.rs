use serde_json::Value;

use super::builder::Builder;
use super::database::{Database, Row};
use crate::error::DbError;

/// Base-model contract.
///
/// Implementors supply the table name and a database handle and inherit
/// the common CRUD operations; `primary_key` defaults to `id`.
///
/// ```
/// use skiff::db::{Database, Model};
///
/// struct Users {
///     db: Database,
/// }
///
/// impl Model for Users {
///     fn table(&self) -> &str {
///         "users"
///     }
///     fn database(&self) -> &Database {
///         &self.db
///     }
/// }
/// ```
pub trait Model {
    fn table(&self) -> &str;

    fn database(&self) -> &Database;

    /// Primary-key column for the keyed operations.
    fn primary_key(&self) -> &str {
        "id"
    }

    /// Fresh query builder scoped to this model's table.
    fn query(&self) -> Builder {
        Builder::new(self.database().clone(), self.table())
    }

    fn find_all(&self) -> Result<Vec<Row>, DbError> {
        self.query().get()
    }

    fn find(&self, id: impl Into<Value>) -> Result<Option<Row>, DbError> {
        self.query().where_eq(self.primary_key(), id).first()
    }

    fn insert(&self, data: Row) -> Result<i64, DbError> {
        self.query().insert(data)
    }

    fn update(&self, id: impl Into<Value>, data: Row) -> Result<u64, DbError> {
        self.query().where_eq(self.primary_key(), id).update(data)
    }

    fn delete(&self, id: impl Into<Value>) -> Result<u64, DbError> {
        self.query().where_eq(self.primary_key(), id).delete()
    }
}
