// ==========================================
// Station Registry - maintenance journal repository
// ==========================================
// Append-only journal over station_maintenance plus the read-side
// aggregation queries. Joins to stations are LEFT JOINs: orphaned
// records (station deleted afterward) must keep flowing.
// ==========================================

use crate::domain::maintenance::{
    DailyStats, MaintenanceLogEntry, MaintenanceRecord, NewMaintenanceRecord,
};
use crate::domain::types::{MaintenanceType, Region};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult, Row, ToSql};
use std::sync::{Arc, Mutex};

/// Raw per-region aggregation row; region is the station's current raw
/// value, None when the station is gone.
#[derive(Debug, Clone)]
pub struct RegionStatsRow {
    pub raw_region: Option<String>,
    pub stations_serviced: i64,
    pub repair_count: i64,
    pub service_count: i64,
}

/// Maintenance journal repository.
pub struct MaintenanceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MaintenanceRepository {
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

    /// Append one journal row. created_at is assigned here; the
    /// autoincrement id is what makes insert order recoverable when two
    /// rows land within the same second.
    pub fn insert(&self, record: &NewMaintenanceRecord) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let created_at = Utc::now().naive_utc();
        conn.execute(
            r#"
            INSERT INTO station_maintenance (
                station_id, maintenance_date, maintenance_type,
                parts_replaced, notes, user_label, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.station_id,
                record.date,
                record.record_type.to_db_str(),
                record.parts_replaced,
                record.notes,
                record.user_label,
                created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Whole-journal statistics for one calendar day.
    pub fn stats_for_date(&self, date: NaiveDate) -> RepositoryResult<DailyStats> {
        let conn = self.get_conn()?;
        let stats = conn.query_row(
            r#"
            SELECT COUNT(DISTINCT station_id),
                   COALESCE(SUM(CASE WHEN maintenance_type = ?2 THEN 1 ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN maintenance_type = ?3 THEN 1 ELSE 0 END), 0)
            FROM station_maintenance
            WHERE maintenance_date = ?1
            "#,
            params![
                date,
                MaintenanceType::Repair.to_db_str(),
                MaintenanceType::Service.to_db_str(),
            ],
            |row| {
                Ok(DailyStats {
                    stations_serviced: row.get(0)?,
                    repair_count: row.get(1)?,
                    service_count: row.get(2)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// Per-region statistics for one day, grouped by the station's
    /// *current* raw region value (LEFT JOIN against live stations).
    pub fn region_stats_for_date(&self, date: NaiveDate) -> RepositoryResult<Vec<RegionStatsRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT s.region,
                   COUNT(DISTINCT m.station_id),
                   COALESCE(SUM(CASE WHEN m.maintenance_type = ?2 THEN 1 ELSE 0 END), 0),
                   COALESCE(SUM(CASE WHEN m.maintenance_type = ?3 THEN 1 ELSE 0 END), 0)
            FROM station_maintenance m
            LEFT JOIN stations s ON s.id = m.station_id
            WHERE m.maintenance_date = ?1
            GROUP BY s.region
            "#,
        )?;
        let rows = stmt
            .query_map(
                params![
                    date,
                    MaintenanceType::Repair.to_db_str(),
                    MaintenanceType::Service.to_db_str(),
                ],
                |row| {
                    Ok(RegionStatsRow {
                        raw_region: row.get(0)?,
                        stations_serviced: row.get(1)?,
                        repair_count: row.get(2)?,
                        service_count: row.get(3)?,
                    })
                },
            )?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// Journal listing with optional, independently combinable filters
    /// (AND semantics), most recent first.
    pub fn fetch_log(
        &self,
        date: Option<NaiveDate>,
        region: Option<&str>,
        station_id: Option<i64>,
    ) -> RepositoryResult<Vec<MaintenanceLogEntry>> {
        let conn = self.get_conn()?;

        let mut sql = String::from(
            "SELECT m.id, m.station_id, m.maintenance_date, m.maintenance_type, \
             m.parts_replaced, m.notes, m.user_label, m.created_at, s.name, s.region \
             FROM station_maintenance m \
             LEFT JOIN stations s ON s.id = m.station_id",
        );
        let mut clauses: Vec<&str> = Vec::new();
        let mut bind: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(date) = date {
            clauses.push("m.maintenance_date = ?");
            bind.push(Box::new(date));
        }
        if let Some(region) = region {
            clauses.push("s.region = ?");
            bind.push(Box::new(region.to_string()));
        }
        if let Some(station_id) = station_id {
            clauses.push("m.station_id = ?");
            bind.push(Box::new(station_id));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY m.maintenance_date DESC, m.created_at DESC, m.id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(bind.iter()), |row| Self::map_log_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    fn map_log_row(row: &Row<'_>) -> SqliteResult<MaintenanceLogEntry> {
        let record = MaintenanceRecord {
            id: row.get(0)?,
            station_id: row.get(1)?,
            date: row.get::<_, NaiveDate>(2)?,
            record_type: MaintenanceType::from_db_str(&row.get::<_, String>(3)?),
            parts_replaced: row.get(4)?,
            notes: row.get(5)?,
            user_label: row.get(6)?,
            created_at: row.get::<_, NaiveDateTime>(7)?,
        };
        let station_name: Option<String> = row.get(8)?;
        let station_region: Option<String> = row.get(9)?;
        Ok(MaintenanceLogEntry {
            record,
            station_name,
            station_region: station_region.as_deref().map(Region::from_db_str),
        })
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM station_maintenance", [], |row| {
            row.get(0)
        })?;
        Ok(n)
    }
}
