mod schema;

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// String-keyed persistence, the shape of a browser's local storage.
/// Stores serialize themselves into a single value per key.
pub(crate) trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Create the schema on a fresh file and check the recorded version on an
    /// existing one. A file written by a newer build is refused rather than
    /// read with the wrong layout.
    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        let recorded: Option<i32> = if has_version_table {
            self.conn
                .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                    row.get(0)
                })?
        } else {
            None
        };

        match recorded {
            Some(version) if version == schema::CURRENT_VERSION => Ok(()),
            Some(version) if version > schema::CURRENT_VERSION => bail!(
                "Database schema v{version} is newer than this build supports (v{})",
                schema::CURRENT_VERSION
            ),
            _ => {
                // Fresh file, or one whose version row went missing
                self.conn.execute_batch(schema::SCHEMA_V1)?;
                self.conn.execute("DELETE FROM schema_version", [])?;
                self.conn.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    params![schema::CURRENT_VERSION],
                )?;
                tracing::info!("Initialized database schema v{}", schema::CURRENT_VERSION);
                Ok(())
            }
        }
    }
}

impl Storage for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("Failed to read '{key}'"))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, chrono::Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("Failed to write '{key}'"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
