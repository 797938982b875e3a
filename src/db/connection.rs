use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::{Result, StorageContext};

/// Sole owner of the SQLite connection. Constructed once at startup and
/// handed to whoever drives the operations; all table access goes through it.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file and make sure both tables exist.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open SQLite database")?;
        info!(path = %path.display(), "connected to SQLite database");
        Self::from_connection(conn)
    }

    /// Throwaway database, used by tests and previews.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // SQLite only honours ON DELETE CASCADE when this is set on the
        // connection doing the delete.
        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("failed to enable foreign keys")?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the `plans` and `plan_details` tables if they are missing.
    /// Safe to call on every startup.
    pub fn init_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS plans (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    date TEXT NOT NULL
                )",
                [],
            )
            .context("failed to create plans table")?;

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS plan_details (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    plan_id INTEGER NOT NULL,
                    detail_date TEXT NOT NULL,
                    destination TEXT NOT NULL,
                    address TEXT,
                    notes TEXT,
                    FOREIGN KEY(plan_id) REFERENCES plans(id) ON DELETE CASCADE
                )",
                [],
            )
            .context("failed to create plan_details table")?;

        info!("database schema initialized");
        Ok(())
    }

    pub(super) fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(store: &Store) -> Vec<String> {
        let mut stmt = store
            .conn()
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name LIKE 'plan%'
                 ORDER BY name",
            )
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn open_creates_both_tables() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(table_names(&store), vec!["plan_details", "plans"]);
    }

    #[test]
    fn init_schema_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        let id = store.add_plan("Kyoto Trip", "2024-05-01").unwrap();

        store.init_schema().unwrap();
        store.init_schema().unwrap();

        let plans = store.list_plans().unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, id);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let store = Store::open_in_memory().unwrap();
        let enabled: i64 = store
            .conn()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
