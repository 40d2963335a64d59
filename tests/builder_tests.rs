use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use skiff::{Builder, Connection, Database, DbError, Model, Order, Row};

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

/// Records every statement and returns canned rows.
#[derive(Default)]
struct FakeConnection {
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    rows: Mutex<Vec<Row>>,
    last_id: i64,
}

impl FakeConnection {
    fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    fn recorded(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Connection for FakeConnection {
    fn query(&self, sql: &str, bindings: &[Value]) -> Result<Vec<Row>, DbError> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), bindings.to_vec()));
        Ok(self.rows.lock().unwrap().clone())
    }

    fn execute(&self, sql: &str, bindings: &[Value]) -> Result<u64, DbError> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), bindings.to_vec()));
        Ok(1)
    }

    fn last_insert_id(&self) -> Result<i64, DbError> {
        Ok(self.last_id)
    }
}

fn fake_db() -> (Arc<FakeConnection>, Database) {
    let conn = Arc::new(FakeConnection::default());
    let db = Database::new(conn.clone());
    (conn, db)
}

#[test]
fn test_select_compiles_full_clause() {
    let (_, db) = fake_db();
    let (sql, bindings) = Builder::new(db, "t")
        .select(["a", "b"])
        .where_eq("x", 1)
        .or_where_eq("y", "z")
        .order_by("x", Order::Asc)
        .limit(2)
        .offset(4)
        .to_sql();

    assert_eq!(
        sql,
        "SELECT a,b FROM t WHERE x = ? OR y = ? ORDER BY x ASC LIMIT 2 OFFSET 4"
    );
    assert_eq!(bindings, [json!(1), json!("z")]);
}

#[test]
fn test_select_defaults_to_star() {
    let (_, db) = fake_db();
    let (sql, bindings) = Builder::new(db, "users").to_sql();
    assert_eq!(sql, "SELECT * FROM users");
    assert!(bindings.is_empty());
}

#[test]
fn test_where_chain_uses_recorded_connectives() {
    let (_, db) = fake_db();
    let (sql, _) = Builder::new(db, "t")
        .where_eq("a", 1)
        .where_eq("b", 2)
        .or_where_eq("c", 3)
        .to_sql();
    assert_eq!(sql, "SELECT * FROM t WHERE a = ? AND b = ? OR c = ?");
}

#[test]
fn test_first_applies_limit_one() {
    let conn = Arc::new(FakeConnection::with_rows(vec![row(&[(
        "id",
        json!(1),
    )])]));
    let db = Database::new(conn.clone());

    let found = Builder::new(db, "users").where_eq("id", 1).first().unwrap();
    assert!(found.is_some());

    let calls = conn.recorded();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "SELECT * FROM users WHERE id = ? LIMIT 1");
    assert_eq!(calls[0].1, [json!(1)]);
}

#[test]
fn test_first_on_empty_result_is_none() {
    let (_, db) = fake_db();
    assert!(Builder::new(db, "users").first().unwrap().is_none());
}

#[test]
fn test_count_selects_count_star() {
    let conn = Arc::new(FakeConnection::with_rows(vec![row(&[(
        "total",
        json!(3),
    )])]));
    let db = Database::new(conn.clone());

    let total = Builder::new(db, "users").count().unwrap();
    assert_eq!(total, 3);

    let calls = conn.recorded();
    assert_eq!(calls[0].0, "SELECT COUNT(*) as total FROM users LIMIT 1");
}

#[test]
fn test_insert_builds_placeholders_and_returns_id() {
    let conn = Arc::new(FakeConnection {
        last_id: 17,
        ..FakeConnection::default()
    });
    let db = Database::new(conn.clone());

    let id = Builder::new(db, "pets")
        .insert(row(&[("name", json!("Rex")), ("species", json!("dog"))]))
        .unwrap();
    assert_eq!(id, 17);

    let calls = conn.recorded();
    assert_eq!(calls[0].0, "INSERT INTO pets (name,species) VALUES (?,?)");
    assert_eq!(calls[0].1, [json!("Rex"), json!("dog")]);
}

#[test]
fn test_update_appends_where_after_set_bindings() {
    let (conn, db) = fake_db();

    let affected = Builder::new(db, "users")
        .where_eq("id", 5)
        .update(row(&[("name", json!("x"))]))
        .unwrap();
    assert_eq!(affected, 1);

    let calls = conn.recorded();
    assert_eq!(calls[0].0, "UPDATE users SET name = ? WHERE id = ?");
    assert_eq!(calls[0].1, [json!("x"), json!(5)]);
}

#[test]
fn test_delete_compiles_where() {
    let (conn, db) = fake_db();

    Builder::new(db, "sessions")
        .where_eq("expired", true)
        .delete()
        .unwrap();

    let calls = conn.recorded();
    assert_eq!(calls[0].0, "DELETE FROM sessions WHERE expired = ?");
    assert_eq!(calls[0].1, [json!(true)]);
}

struct Users {
    db: Database,
}

impl Model for Users {
    fn table(&self) -> &str {
        "users"
    }

    fn database(&self) -> &Database {
        &self.db
    }
}

#[test]
fn test_model_find_uses_primary_key() {
    let (conn, db) = fake_db();
    let users = Users { db };

    let _ = users.find(7).unwrap();

    let calls = conn.recorded();
    assert_eq!(calls[0].0, "SELECT * FROM users WHERE id = ? LIMIT 1");
    assert_eq!(calls[0].1, [json!(7)]);
}

#[test]
fn test_model_update_and_delete_are_keyed() {
    let (conn, db) = fake_db();
    let users = Users { db };

    users.update(7, row(&[("name", json!("new"))])).unwrap();
    users.delete(7).unwrap();

    let calls = conn.recorded();
    assert_eq!(calls[0].0, "UPDATE users SET name = ? WHERE id = ?");
    assert_eq!(calls[1].0, "DELETE FROM users WHERE id = ?");
}

#[test]
fn test_model_insert_returns_last_insert_id() {
    let conn = Arc::new(FakeConnection {
        last_id: 99,
        ..FakeConnection::default()
    });
    let users = Users {
        db: Database::new(conn),
    };

    let id = users.insert(row(&[("name", json!("a"))])).unwrap();
    assert_eq!(id, 99);
}
