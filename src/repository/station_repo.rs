// ==========================================
// Station Registry - station repository
// ==========================================
// Data access only; validation and role gating live in the API layer.
// ==========================================

use crate::domain::station::{Station, StationDraft};
use crate::domain::types::{Region, RegionFilter, StationStatus, StationType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const STATION_COLUMNS: &str = "id, name, location, type, frequency, power, status, contact, \
     notes, region, pdf_path, photo_path";

/// Station repository over the `stations` table.
pub struct StationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StationRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_connection(db_path)
            .map_err(|e| RepositoryError::StoreUnavailable(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Station> {
        Ok(Station {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
            station_type: StationType::from_db_str(&row.get::<_, String>(3)?),
            frequency: row.get(4)?,
            power: row.get(5)?,
            status: StationStatus::from_db_str(&row.get::<_, String>(6)?),
            contact: row.get(7)?,
            notes: row.get(8)?,
            region: Region::from_db_str(&row.get::<_, String>(9)?),
            pdf_path: row.get(10)?,
            photo_path: row.get(11)?,
        })
    }

    /// True if a live row carries this station name, optionally excluding
    /// one id.
    pub fn exists(&self, name: &str, exclude_id: Option<i64>) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let hit: Option<i64> = match exclude_id {
            None => conn
                .query_row(
                    "SELECT 1 FROM stations WHERE name = ?1 LIMIT 1",
                    params![name],
                    |row| row.get(0),
                )
                .optional()?,
            Some(id) => conn
                .query_row(
                    "SELECT 1 FROM stations WHERE name = ?1 AND id <> ?2 LIMIT 1",
                    params![name, id],
                    |row| row.get(0),
                )
                .optional()?,
        };
        Ok(hit.is_some())
    }

    /// Filtered fetch, ordered by name ascending.
    ///
    /// Search does substring match (LIKE) OR-combined across name,
    /// location, contact and notes.
    pub fn fetch(
        &self,
        search: &str,
        region_filter: &RegionFilter,
    ) -> RepositoryResult<Vec<Station>> {
        let conn = self.get_conn()?;

        let mut sql = format!("SELECT {STATION_COLUMNS} FROM stations");
        let mut clauses: Vec<&str> = Vec::new();
        let mut bind: Vec<String> = Vec::new();

        if let Some(region) = region_filter.as_db_str() {
            clauses.push("region = ?");
            bind.push(region.to_string());
        }

        let search = search.trim();
        if !search.is_empty() {
            clauses.push("(name LIKE ? OR location LIKE ? OR contact LIKE ? OR notes LIKE ?)");
            let like = format!("%{search}%");
            bind.extend(std::iter::repeat(like).take(4));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY name ASC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(bind.iter()), |row| Self::map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Station>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {STATION_COLUMNS} FROM stations WHERE id = ?1"
        ))?;
        match stmt.query_row(params![id], |row| Self::map_row(row)) {
            Ok(station) => Ok(Some(station)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a new station and return the assigned id.
    ///
    /// The UNIQUE constraint on name is the fail-safe behind the API
    /// layer's advisory pre-check.
    pub fn add(&self, draft: &StationDraft) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO stations (
                name, location, type, frequency, power, status,
                contact, notes, region, pdf_path, photo_path
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                draft.name,
                draft.location,
                draft.station_type.to_db_str(),
                draft.frequency,
                draft.power,
                draft.status.to_db_str(),
                draft.contact,
                draft.notes,
                draft.region.to_db_str(),
                draft.pdf_path,
                draft.photo_path,
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, name = %draft.name, "station added");
        Ok(id)
    }

    /// Replace every mutable field of the row.
    pub fn update(&self, id: i64, draft: &StationDraft) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            r#"
            UPDATE stations
            SET name = ?1, location = ?2, type = ?3, frequency = ?4, power = ?5,
                status = ?6, contact = ?7, notes = ?8, region = ?9,
                pdf_path = ?10, photo_path = ?11
            WHERE id = ?12
            "#,
            params![
                draft.name,
                draft.location,
                draft.station_type.to_db_str(),
                draft.frequency,
                draft.power,
                draft.status.to_db_str(),
                draft.contact,
                draft.notes,
                draft.region.to_db_str(),
                draft.pdf_path,
                draft.photo_path,
                id,
            ],
        )?;
        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "station",
                id,
            });
        }
        Ok(())
    }

    /// Update only the notes column (the field a viewer may edit).
    pub fn update_notes(&self, id: i64, notes: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE stations SET notes = ?1 WHERE id = ?2",
            params![notes, id],
        )?;
        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "station",
                id,
            });
        }
        Ok(())
    }

    /// Hard delete. Maintenance records referencing the station are left
    /// in place (orphaned), matching the unenforced FK.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM stations WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "station",
                id,
            });
        }
        tracing::debug!(id, "station deleted");
        Ok(())
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM stations", [], |row| row.get(0))?;
        Ok(n)
    }
}
