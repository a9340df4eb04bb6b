//! SQLite connection ownership and schema setup.

use crate::Result;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Owns the connection to a register database file.
///
/// The schema is applied with `CREATE TABLE IF NOT EXISTS` on every open, so
/// opening a fresh path and reopening an existing register go through the
/// same call. There is no migration path.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database at `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PenaltyError::Io`] if the parent directory cannot be
    /// created, or [`crate::PenaltyError::Database`] if the file is not a
    /// SQLite database or the schema cannot be applied.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        log::debug!("opened register database at {}", path.display());
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
