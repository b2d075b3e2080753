//! Relational persistence for users, customers, entries and attachments.
//!
//! `Store` owns a single SQLite connection. Reads go through [`Store::read`];
//! every mutation goes through [`Store::write`], which wraps the closure in a
//! transaction so a request either commits all of its changes or none.

pub mod attachments;
pub mod customers;
pub mod entries;
mod schema;
pub mod users;

use crate::error::{AppError, AppResult};
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> AppResult<Self> {
        register_fold_case(&conn)?;
        schema::initialize(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Internal("database connection lock poisoned".to_string()))
    }

    pub fn read<T>(&self, f: impl FnOnce(&Connection) -> AppResult<T>) -> AppResult<T> {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Runs `f` inside a transaction. Returning `Err` drops the transaction,
    /// which rolls back everything `f` wrote.
    pub fn write<T>(&self, f: impl FnOnce(&Transaction<'_>) -> AppResult<T>) -> AppResult<T> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

/// `fold_case(text)`: Unicode lower-casing for searches. The built-in
/// `LIKE` only folds ASCII letters, so accented names would not match.
fn register_fold_case(conn: &Connection) -> AppResult<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

/// Turns blank form input into `None` and trims the rest.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builds a `LIKE` pattern matching `term` anywhere, escaping wildcards.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// [`like_pattern`] over the lower-cased term, for columns compared through
/// `fold_case` or stored lower-cased.
pub fn folded_pattern(term: &str) -> String {
    like_pattern(&term.to_lowercase())
}
