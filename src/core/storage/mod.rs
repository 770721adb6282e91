// src/core/storage/mod.rs

//! The store boundary: a transaction-scoped session handle passed in by the
//! host, plus the row container reads produce.
//!
//! The embedded relational engine itself is an external collaborator; the
//! core only talks to it through [`SqlSession`]. The split between `read`
//! (`&self`) and `write` (`&mut self`) is what lets the dispatcher hand a
//! shared reference to `peek` and thereby make the read-only guarantee of the
//! peek phase a compile-time fact.

pub mod sqlite;

pub use sqlite::SqliteSession;

use crate::core::CommandError;

/// Ordered rows of text cells, as returned by [`SqlSession::read`].
///
/// Cells are the engine's text rendering of each column; `NULL` reads as the
/// empty string. Handlers that care about column counts must check them
/// (store-shape drift is tolerated, not fatal).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlResult {
    pub rows: Vec<Vec<String>>,
}

impl SqlResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<String>> {
        self.rows.iter()
    }
}

/// A handle to an already-open, transaction-scoped database session.
///
/// The host owns the surrounding transaction's isolation and commit/abort
/// semantics; commands only issue statements through this trait. A command's
/// `peek` phase receives `&dyn SqlSession` and therefore cannot reach
/// `write`/`last_insert_rowid` mutations; `process` receives `&mut dyn
/// SqlSession` and is the only phase that may mutate persisted state.
pub trait SqlSession {
    /// Executes a query and returns every row as text cells.
    fn read(&self, query: &str) -> Result<SqlResult, CommandError>;

    /// Executes a mutating statement.
    fn write(&mut self, query: &str) -> Result<(), CommandError>;

    /// The row id generated by the most recent successful insert on this
    /// session, or `0` when nothing has been inserted.
    fn last_insert_rowid(&self) -> i64;
}

/// Renders `value` as a SQL text literal, doubling embedded single quotes.
///
/// Values interpolated into statement text must go through here.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
