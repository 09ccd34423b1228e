#![forbid(unsafe_code)]

use crate::{EngineError, QueryOutcome, QueryRow};
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Ad-hoc query feed over a SQLite database.
#[derive(Debug)]
pub struct SqliteQuerySource {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteQuerySource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    pub fn open_in_memory() -> Result<Self, EngineError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Backend failures are reported as `QueryOutcome::Error`, never as `Err`.
    pub fn run(&self, sql: &str) -> QueryOutcome {
        match self.collect_rows(sql) {
            Ok(rows) => QueryOutcome::Rows(rows),
            Err(err) => {
                tracing::debug!(error = %err, "query failed");
                QueryOutcome::Error(err.to_string())
            }
        }
    }

    fn collect_rows(&self, sql: &str) -> Result<Vec<QueryRow>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(sql)?;
        let names = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut columns = Vec::with_capacity(names.len());
            for (index, name) in names.iter().enumerate() {
                columns.push((name.clone(), cell_to_json(row.get_ref(index)?)));
            }
            out.push(QueryRow::new(columns));
        }
        Ok(out)
    }
}

fn cell_to_json(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::from(v),
        ValueRef::Real(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(format!("<blob {} bytes>", bytes.len())),
    }
}
