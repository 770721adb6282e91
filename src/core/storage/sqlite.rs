// src/core/storage/sqlite.rs

//! The reference `SqlSession` implementation over an embedded SQLite
//! connection.
//!
//! Hosts that embed SQLite hand commands a [`SqliteSession`]; hosts with a
//! different engine supply their own [`SqlSession`] implementation. Schema
//! bootstrap/migration is owned by the host, never by this module.

use super::{SqlResult, SqlSession};
use crate::core::CommandError;
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use std::path::Path;
use tracing::debug;

/// Opens a SQLite database at the given path.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection, CommandError> {
    Connection::open(path).map_err(CommandError::from)
}

/// Opens an in-memory SQLite database (fixtures and tests).
pub fn open_in_memory() -> Result<Connection, CommandError> {
    Connection::open_in_memory().map_err(CommandError::from)
}

/// Configures a connection the way the hosting service expects: foreign keys
/// enforced, WAL journaling for concurrent readers.
pub fn configure(conn: &Connection) -> Result<(), CommandError> {
    // execute_batch discards the row pragmas like journal_mode report back.
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")?;
    Ok(())
}

/// A transaction-scoped session over a `rusqlite::Connection`.
pub struct SqliteSession {
    conn: Connection,
}

impl SqliteSession {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens, configures, and wraps an in-memory database in one step.
    pub fn in_memory() -> Result<Self, CommandError> {
        let conn = open_in_memory()?;
        configure(&conn)?;
        Ok(Self::new(conn))
    }

    /// Hands the underlying connection back to the host.
    pub fn into_inner(self) -> Connection {
        self.conn
    }

    /// Direct access for host-side bootstrap (schema creation in fixtures).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SqlSession for SqliteSession {
    fn read(&self, query: &str) -> Result<SqlResult, CommandError> {
        debug!(query, "store read");
        let mut stmt = self
            .conn
            .prepare(query)
            .map_err(|e| CommandError::StoreRead(e.to_string()))?;
        let columns = stmt.column_count();

        let mut rows = stmt
            .query([])
            .map_err(|e| CommandError::StoreRead(e.to_string()))?;

        let mut result = SqlResult::default();
        while let Some(row) = rows
            .next()
            .map_err(|e| CommandError::StoreRead(e.to_string()))?
        {
            let mut cells = Vec::with_capacity(columns);
            for index in 0..columns {
                let cell = match row
                    .get_ref(index)
                    .map_err(|e| CommandError::StoreRead(e.to_string()))?
                {
                    ValueRef::Null => String::new(),
                    ValueRef::Integer(v) => v.to_string(),
                    ValueRef::Real(v) => v.to_string(),
                    ValueRef::Text(v) => String::from_utf8_lossy(v).into_owned(),
                    ValueRef::Blob(v) => String::from_utf8_lossy(v).into_owned(),
                };
                cells.push(cell);
            }
            result.rows.push(cells);
        }
        Ok(result)
    }

    fn write(&mut self, query: &str) -> Result<(), CommandError> {
        debug!(query, "store write");
        self.conn
            .execute_batch(query)
            .map_err(|e| CommandError::StoreWrite(e.to_string()))
    }

    fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}
