use serde_json::Value;
use tracing::debug;

use super::database::{Database, Row};
use crate::error::DbError;

/// Sort direction for [`Builder::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Connective {
    And,
    Or,
}

struct Predicate {
    field: String,
    value: Value,
    connective: Connective,
}

/// Fluent single-table query builder.
///
/// Each call consumes and returns the builder; execution consumes it
/// outright, so state never leaks between queries. Table and column names
/// are interpolated verbatim (they come from code, not request input)
/// while values always travel as positional `?` bindings.
pub struct Builder {
    db: Database,
    table: String,
    select: Vec<String>,
    predicates: Vec<Predicate>,
    order: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Builder {
    pub fn new(db: Database, table: impl Into<String>) -> Self {
        Self {
            db,
            table: table.into(),
            select: vec!["*".to_string()],
            predicates: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Replace the projection (defaults to `*`).
    #[must_use]
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// `AND field = ?`.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            field: field.into(),
            value: value.into(),
            connective: Connective::And,
        });
        self
    }

    /// `OR field = ?`.
    #[must_use]
    pub fn or_where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            field: field.into(),
            value: value.into(),
            connective: Connective::Or,
        });
        self
    }

    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Order) -> Self {
        self.order
            .push(format!("{} {}", field.into(), direction.as_sql()));
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Compiled SELECT text and bindings, without executing.
    #[must_use]
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut sql = format!("SELECT {} FROM {}", self.select.join(","), self.table);
        let bindings = self.append_where(&mut sql);
        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order.join(","));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        (sql, bindings)
    }

    fn append_where(&self, sql: &mut String) -> Vec<Value> {
        let mut bindings = Vec::with_capacity(self.predicates.len());
        if self.predicates.is_empty() {
            return bindings;
        }
        sql.push_str(" WHERE ");
        for (index, predicate) in self.predicates.iter().enumerate() {
            if index > 0 {
                sql.push_str(match predicate.connective {
                    Connective::And => " AND ",
                    Connective::Or => " OR ",
                });
            }
            sql.push_str(&predicate.field);
            sql.push_str(" = ?");
            bindings.push(predicate.value.clone());
        }
        bindings
    }

    /// Run the SELECT and return all rows.
    pub fn get(self) -> Result<Vec<Row>, DbError> {
        let (sql, bindings) = self.to_sql();
        debug!(sql = %sql, "executing select");
        self.db.query(&sql, &bindings)
    }

    /// Run the SELECT with `LIMIT 1` and return the first row, if any.
    pub fn first(self) -> Result<Option<Row>, DbError> {
        let mut rows = self.limit(1).get()?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    /// `SELECT COUNT(*)` under the current predicates.
    pub fn count(self) -> Result<u64, DbError> {
        let row = self.select(["COUNT(*) as total"]).first()?;
        Ok(row
            .as_ref()
            .and_then(|r| r.get("total"))
            .and_then(|total| {
                total
                    .as_u64()
                    .or_else(|| total.as_str().and_then(|s| s.parse().ok()))
            })
            .unwrap_or(0))
    }

    /// Insert one row and return the driver's last insert id.
    pub fn insert(self, data: Row) -> Result<i64, DbError> {
        let fields = data.keys().map(String::as_str).collect::<Vec<_>>().join(",");
        let placeholders = vec!["?"; data.len()].join(",");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table, fields, placeholders
        );
        let bindings: Vec<Value> = data.values().cloned().collect();
        debug!(sql = %sql, "executing insert");
        self.db.execute(&sql, &bindings)?;
        self.db.last_insert_id()
    }

    /// Update under the current predicates; returns affected rows.
    pub fn update(self, data: Row) -> Result<u64, DbError> {
        let set = data
            .keys()
            .map(|field| format!("{field} = ?"))
            .collect::<Vec<_>>()
            .join(",");
        let mut sql = format!("UPDATE {} SET {}", self.table, set);
        let mut bindings: Vec<Value> = data.values().cloned().collect();
        bindings.extend(self.append_where(&mut sql));
        debug!(sql = %sql, "executing update");
        self.db.execute(&sql, &bindings)
    }

    /// Delete under the current predicates; returns affected rows.
    pub fn delete(self) -> Result<u64, DbError> {
        let mut sql = format!("DELETE FROM {}", self.table);
        let bindings = self.append_where(&mut sql);
        debug!(sql = %sql, "executing delete");
        self.db.execute(&sql, &bindings)
    }
}
