// ==========================================
// Station Registry - SQLite connection setup
// ==========================================
// Goals:
// - single place for Connection::open PRAGMA behavior, so every module
//   gets the same foreign_keys / busy_timeout settings
// - schema creation for the three registry tables
// ==========================================

use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Schema version the current code expects.
///
/// The check is warn-only (no automatic migration): running against an
/// older database file keeps working, but the mismatch is logged so it
/// does not go unnoticed.
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Apply the unified PRAGMAs to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings, so this must
/// run for every opened connection.
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration applied.
pub fn open_connection<P: AsRef<Path>>(db_path: P) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Create the registry schema if it does not exist yet.
///
/// Constraint notes:
/// - `tabel_number` and `name` carry real UNIQUE constraints. The service
///   layer runs an advisory existence check first, but the constraint here
///   is what actually guarantees uniqueness under concurrent submissions.
/// - `station_maintenance.station_id` deliberately has no REFERENCES
///   clause: deleting a station must orphan its maintenance records, and
///   with foreign_keys=ON an enforced FK would reject the delete.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS employees (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            tabel_number TEXT NOT NULL UNIQUE,
            last_name    TEXT NOT NULL DEFAULT '',
            first_name   TEXT NOT NULL DEFAULT '',
            patronymic   TEXT NOT NULL DEFAULT '',
            region       TEXT NOT NULL DEFAULT '',
            hire_date    TEXT NOT NULL DEFAULT '',
            position     TEXT NOT NULL DEFAULT '',
            phone        TEXT NOT NULL DEFAULT '',
            contract_no  TEXT NOT NULL DEFAULT '',
            pdf_path     TEXT,
            photo_path   TEXT
        );

        CREATE TABLE IF NOT EXISTS stations (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL UNIQUE,
            location   TEXT NOT NULL DEFAULT '',
            type       TEXT NOT NULL DEFAULT '',
            frequency  TEXT NOT NULL DEFAULT '',
            power      TEXT NOT NULL DEFAULT '',
            status     TEXT NOT NULL DEFAULT '',
            contact    TEXT NOT NULL DEFAULT '',
            notes      TEXT NOT NULL DEFAULT '',
            region     TEXT NOT NULL DEFAULT '',
            pdf_path   TEXT,
            photo_path TEXT
        );

        CREATE TABLE IF NOT EXISTS station_maintenance (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            station_id       INTEGER NOT NULL,
            maintenance_date TEXT NOT NULL,
            maintenance_type TEXT NOT NULL,
            parts_replaced   TEXT NOT NULL DEFAULT '',
            notes            TEXT NOT NULL DEFAULT '',
            user_label       TEXT NOT NULL DEFAULT '',
            created_at       TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_maintenance_date
            ON station_maintenance (maintenance_date);
        CREATE INDEX IF NOT EXISTS idx_maintenance_station
            ON station_maintenance (station_id);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Read the stored schema_version (None if the table does not exist).
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Open the database, create the schema if needed, and warn on a version
/// mismatch.
pub fn open_registry_db<P: AsRef<Path>>(db_path: P) -> rusqlite::Result<Connection> {
    let conn = open_connection(db_path)?;
    init_schema(&conn)?;

    match read_schema_version(&conn)? {
        Some(v) if v != CURRENT_SCHEMA_VERSION => {
            tracing::warn!(
                stored = v,
                expected = CURRENT_SCHEMA_VERSION,
                "schema_version mismatch; running without migration"
            );
        }
        None => {
            tracing::warn!("schema_version table missing after init");
        }
        _ => {}
    }

    Ok(conn)
}
